//! Frame-spectral signals as produced by a phase-vocoder analysis.

use crate::Sample;

/// How the two values of each bin are to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectralFormat {
    /// Amplitude and frequency.
    Pvs,
    /// Magnitude and phase.
    Polar,
    /// Real and imaginary parts.
    Complex,
    /// Partial tracks.
    Tracks,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PvBin {
    pub amp: Sample,
    pub freq: Sample,
}

impl PvBin {
    pub fn new(amp: Sample, freq: Sample) -> Self {
        Self { amp, freq }
    }
}

/// Static description of a frame-spectral stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSpec {
    pub bins: usize,
    pub format: SpectralFormat,
    /// Sliding streams produce one frame per sample.
    pub sliding: bool,
}

/// One analysis frame. `count` grows by one for every new frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PvFrame {
    pub bins: Vec<PvBin>,
    pub count: u64,
}

impl PvFrame {
    pub fn new(bins: usize) -> Self {
        Self {
            bins: vec![PvBin::default(); bins],
            count: 0,
        }
    }

    pub fn from_bins(bins: Vec<PvBin>, count: u64) -> Self {
        Self { bins, count }
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}
