use crate::Sample;

/// A freeze control: either one value held for the whole block or a
/// per-sample signal. An operand is written while its control is positive
/// and frozen while it is zero or negative.
#[derive(Debug, Clone, Copy)]
pub enum Control<'a> {
    Held(Sample),
    Signal(&'a [Sample]),
}

impl Control<'_> {
    /// Index advance per sample: 0 for a held value, 1 for a signal.
    pub fn step(&self) -> usize {
        match self {
            Control::Held(_) => 0,
            Control::Signal(_) => 1,
        }
    }

    #[inline]
    pub fn value_at(&self, index: usize) -> Sample {
        match self {
            Control::Held(value) => *value,
            Control::Signal(signal) => signal[index],
        }
    }

    #[inline]
    pub fn is_active_at(&self, index: usize) -> bool {
        self.value_at(index) > 0.0
    }

    pub(crate) fn covers(&self, len: usize) -> bool {
        match self {
            Control::Held(_) => true,
            Control::Signal(signal) => signal.len() >= len,
        }
    }
}

impl From<Sample> for Control<'_> {
    fn from(value: Sample) -> Self {
        Control::Held(value)
    }
}

impl<'a> From<&'a [Sample]> for Control<'a> {
    fn from(signal: &'a [Sample]) -> Self {
        Control::Signal(signal)
    }
}

/// Which operands take the current sample into their history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gate {
    pub input: bool,
    pub response: bool,
}

impl Gate {
    pub const OPEN: Gate = Gate {
        input: true,
        response: true,
    };

    /// Input keeps streaming, the impulse response is held.
    pub const RESPONSE_FROZEN: Gate = Gate {
        input: true,
        response: false,
    };
}
