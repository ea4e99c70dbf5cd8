use crate::control::Gate;
use crate::{Convolution, Sample};

/// Time-domain convolution over two rings of `taps` samples. Costs `taps`
/// multiply-adds per sample and has no latency.
#[derive(Clone, Debug)]
pub struct DirectConvolver {
    input: Vec<Sample>,
    response: Vec<Sample>,
    input_cursor: usize,
    response_cursor: usize,
}

impl DirectConvolver {
    pub fn new(taps: usize) -> Self {
        assert!(taps > 0);
        log::debug!("direct convolver: {} taps", taps);
        Self {
            input: vec![0.; taps],
            response: vec![0.; taps],
            input_cursor: 0,
            response_cursor: 0,
        }
    }

    pub fn taps(&self) -> usize {
        self.response.len()
    }

    /// Replaces the impulse response with `response`, truncated to
    /// [`taps`](Self::taps) and zero-filled past its end. Later unfrozen
    /// response samples overwrite it again from tap 0.
    pub fn load_response(&mut self, response: &[Sample]) {
        let len = response.len().min(self.taps());
        self.response[..len].copy_from_slice(&response[..len]);
        self.response[len..].fill(0.);
        self.response_cursor = 0;
    }
}

#[inline]
fn push(ring: &mut [Sample], cursor: &mut usize, value: Sample) {
    ring[*cursor] = value;
    *cursor += 1;
    if *cursor == ring.len() {
        *cursor = 0;
    }
}

impl Convolution for DirectConvolver {
    fn tick(&mut self, input: Sample, response: Sample, gate: Gate) -> Sample {
        if gate.input {
            push(&mut self.input, &mut self.input_cursor, input);
        }
        if gate.response {
            push(&mut self.response, &mut self.response_cursor, response);
        }

        // input walked forward from its oldest sample, response walked
        // backward from its last tap
        let split = self.input_cursor;
        let older: Sample = self.input[split..]
            .iter()
            .zip(self.response[split..].iter().rev())
            .map(|(x, h)| x * h)
            .sum();
        let newer: Sample = self.input[..split]
            .iter()
            .zip(self.response[..split].iter().rev())
            .map(|(x, h)| x * h)
            .sum();
        older + newer
    }

    fn reset(&mut self) {
        self.input.fill(0.);
        self.response.fill(0.);
        self.input_cursor = 0;
        self.response_cursor = 0;
    }

    fn latency(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_input_meets_first_tap() {
        let mut convolver = DirectConvolver::new(3);
        convolver.load_response(&[1.0, 10.0, 100.0]);

        let out: Vec<Sample> = [1.0, 2.0, 3.0, 0.0, 0.0]
            .iter()
            .map(|&x| convolver.tick(x, 0.0, Gate::RESPONSE_FROZEN))
            .collect();
        assert_eq!(out, vec![1.0, 12.0, 123.0, 230.0, 300.0]);
    }

    #[test]
    fn frozen_input_holds_output() {
        let mut convolver = DirectConvolver::new(2);
        convolver.load_response(&[1.0, 1.0]);
        let first = convolver.tick(4.0, 0.0, Gate::RESPONSE_FROZEN);
        let frozen = Gate {
            input: false,
            response: false,
        };
        assert_eq!(convolver.tick(9.0, 0.0, frozen), first);
        assert_eq!(convolver.tick(9.0, 0.0, frozen), first);
    }
}
