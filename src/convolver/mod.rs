pub mod direct;
pub mod packed;
pub mod partitioned;
pub mod rust_fft;
pub mod traits;

pub use direct::DirectConvolver;
pub use partitioned::GenericPartitionedConvolver;
pub use rust_fft::Fft;
pub use traits::FftBackend;

use realfft::RealFftPlanner;

use crate::config::{ConvolverConfig, Layout};
use crate::control::Gate;
use crate::error::Result;
use crate::{Convolution, Sample};

pub type PartitionedConvolver = GenericPartitionedConvolver<Fft>;

/// Time-varying convolver. The mode is chosen once from the configuration:
/// a partition size of 1 or less means brute-force convolution, anything
/// larger means partitioned FFT convolution.
#[derive(Clone, Debug)]
pub enum TvConvolver {
    Direct(DirectConvolver),
    Partitioned(PartitionedConvolver),
}

impl TvConvolver {
    /// Builds a convolver for `config`, taking any transform plans from the
    /// caller's `planner`.
    pub fn new(config: &ConvolverConfig, planner: &mut RealFftPlanner<Sample>) -> Result<Self> {
        match config.layout()? {
            Layout::Direct { taps } => Ok(TvConvolver::Direct(DirectConvolver::new(taps))),
            Layout::Partitioned {
                partition,
                transform_size,
                blocks,
                ..
            } => {
                let fft = Fft::plan(planner, transform_size);
                Ok(TvConvolver::Partitioned(PartitionedConvolver::new(
                    partition, blocks, fft,
                )?))
            }
        }
    }

    pub fn is_partitioned(&self) -> bool {
        matches!(self, TvConvolver::Partitioned(_))
    }

    pub fn taps(&self) -> usize {
        match self {
            TvConvolver::Direct(c) => c.taps(),
            TvConvolver::Partitioned(c) => c.taps(),
        }
    }

    pub fn load_response(&mut self, response: &[Sample]) -> Result<()> {
        match self {
            TvConvolver::Direct(c) => {
                c.load_response(response);
                Ok(())
            }
            TvConvolver::Partitioned(c) => c.load_response(response),
        }
    }
}

impl Convolution for TvConvolver {
    #[inline]
    fn tick(&mut self, input: Sample, response: Sample, gate: Gate) -> Sample {
        match self {
            TvConvolver::Direct(c) => c.tick(input, response, gate),
            TvConvolver::Partitioned(c) => c.tick(input, response, gate),
        }
    }

    fn reset(&mut self) {
        match self {
            TvConvolver::Direct(c) => c.reset(),
            TvConvolver::Partitioned(c) => c.reset(),
        }
    }

    fn latency(&self) -> usize {
        match self {
            TvConvolver::Direct(c) => c.latency(),
            TvConvolver::Partitioned(c) => c.latency(),
        }
    }
}
