use serde::{Deserialize, Serialize};

use crate::error::{ConvolutionError, Result};

/// Requested sizes for a convolver. The two values are order-insensitive:
/// the smaller becomes the partition size, the larger the filter length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvolverConfig {
    pub partition_size: usize,
    pub filter_length: usize,
}

impl Default for ConvolverConfig {
    fn default() -> Self {
        Self {
            partition_size: 256,
            filter_length: 4096,
        }
    }
}

/// Buffer geometry resolved from a [`ConvolverConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Brute-force convolution over `taps` samples.
    Direct { taps: usize },
    Partitioned {
        /// Samples per partition, also the processing latency.
        partition: usize,
        /// Ring length in samples, one transform-sized slot per block.
        span: usize,
        /// Length of each forward/inverse transform (`2 * partition`).
        transform_size: usize,
        /// Number of partitions held by each ring.
        blocks: usize,
    },
}

impl Layout {
    pub fn transform_size(&self) -> Option<usize> {
        match self {
            Layout::Direct { .. } => None,
            Layout::Partitioned { transform_size, .. } => Some(*transform_size),
        }
    }

    /// Number of impulse-response taps the layout can hold.
    pub fn taps(&self) -> usize {
        match self {
            Layout::Direct { taps } => *taps,
            Layout::Partitioned {
                partition, blocks, ..
            } => partition * blocks,
        }
    }
}

impl ConvolverConfig {
    pub fn new(partition_size: usize, filter_length: usize) -> Self {
        Self {
            partition_size,
            filter_length,
        }
    }

    pub fn layout(&self) -> Result<Layout> {
        let (mut pars, mut fils) = (self.partition_size, self.filter_length);
        if pars > fils {
            std::mem::swap(&mut pars, &mut fils);
        }
        if fils == 0 {
            return Err(ConvolutionError::EmptyFilter);
        }
        if pars <= 1 {
            return Ok(Layout::Direct { taps: fils });
        }

        let partition = nearest_power_of_two(pars).ok_or(ConvolutionError::FilterTooLong(pars))?;
        let filter = nearest_power_of_two(fils).ok_or(ConvolutionError::FilterTooLong(fils))?;
        if partition != pars {
            log::warn!("partition size {} rounded to {}", pars, partition);
        }
        if filter != fils {
            log::warn!("filter length {} rounded to {}", fils, filter);
        }

        let span = filter
            .checked_mul(2)
            .ok_or(ConvolutionError::FilterTooLong(fils))?;
        let transform_size = partition * 2;
        Ok(Layout::Partitioned {
            partition,
            span,
            transform_size,
            blocks: span / transform_size,
        })
    }
}

/// Rounds `n` to whichever bracketing power of two is closer, preferring the
/// larger one on a tie. Values below 2 round to 1 or 2. Returns `None` when
/// the larger bracketing power does not fit in a `usize`.
pub fn nearest_power_of_two(n: usize) -> Option<usize> {
    let upper = n.checked_add(1)?.checked_next_power_of_two()?.max(2);
    let lower = upper >> 1;
    if n.abs_diff(lower) < upper - n {
        Some(lower)
    } else {
        Some(upper)
    }
}
