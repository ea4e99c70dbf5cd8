use rustfft::num_complex::Complex;

use crate::control::Gate;
use crate::convolver::packed::{copy_and_pad, packed_multiply_accumulate, packed_size};
use crate::convolver::traits::FftBackend;
use crate::error::{ConvolutionError, Result};
use crate::{Convolution, Sample};

/// One operand's history: the partition currently being filled plus a ring
/// of transformed partitions.
#[derive(Clone, Debug)]
struct SpectralRing {
    staging: Vec<Sample>,
    blocks: Vec<Vec<Complex<Sample>>>,
    cursor: usize,
    dirty: bool,
}

impl SpectralRing {
    fn new(partition: usize, blocks: usize, bins: usize) -> Self {
        Self {
            staging: vec![0.; partition],
            blocks: vec![vec![Complex::new(0., 0.); bins]; blocks],
            cursor: 0,
            dirty: false,
        }
    }

    #[inline]
    fn write(&mut self, slot: usize, value: Sample) {
        self.staging[slot] = value;
        self.dirty = true;
    }

    /// Transforms the staged partition into the ring slot under the cursor
    /// and advances the cursor. Nothing happens if no sample arrived since the
    /// last commit. Slots left unwritten by a freeze enter the ring as zeros.
    fn commit<F: FftBackend>(&mut self, fft: &mut F, fft_buffer: &mut [Sample]) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.dirty = false;

        copy_and_pad(fft_buffer, &self.staging, self.staging.len());
        fft.forward(fft_buffer, &mut self.blocks[self.cursor])?;
        self.staging.fill(0.);

        self.cursor += 1;
        if self.cursor == self.blocks.len() {
            self.cursor = 0;
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.staging.fill(0.);
        for block in &mut self.blocks {
            block.fill(Complex::new(0., 0.));
        }
        self.cursor = 0;
        self.dirty = false;
    }
}

/// Uniformly partitioned convolution of two streams.
///
/// Both operands are cut into partitions of `partition` samples, each
/// zero-padded to `2 * partition` and transformed once. At every partition
/// boundary the input partition that is `k` blocks old is multiplied with
/// response partition `k`, the products are summed and inverted, and the
/// result is overlap-added into the following `partition` output samples.
#[derive(Clone, Debug)]
pub struct GenericPartitionedConvolver<F: FftBackend> {
    partition: usize,
    input: SpectralRing,
    response: SpectralRing,
    spectrum: Vec<Complex<Sample>>,
    accumulator: Vec<Sample>,
    saved: Vec<Sample>,
    fft_buffer: Vec<Sample>,
    fft: F,
    position: usize,
}

impl<F: FftBackend> GenericPartitionedConvolver<F> {
    /// `partition` must be a power of two above 1 and `blocks` at least 1;
    /// `fft` must have been planned for `2 * partition` points.
    pub fn new(partition: usize, blocks: usize, fft: F) -> Result<Self> {
        if partition < 2 || !partition.is_power_of_two() || blocks == 0 {
            return Err(ConvolutionError::InvalidGeometry { partition, blocks });
        }

        let transform_size = 2 * partition;
        if fft.len() != transform_size {
            return Err(ConvolutionError::TransformSize {
                expected: transform_size,
                actual: fft.len(),
            });
        }
        let bins = packed_size(transform_size);

        log::debug!(
            "partitioned convolver: partition {}, {} blocks, transform {}",
            partition,
            blocks,
            transform_size
        );

        Ok(Self {
            partition,
            input: SpectralRing::new(partition, blocks, bins),
            response: SpectralRing::new(partition, blocks, bins),
            spectrum: vec![Complex::new(0., 0.); bins],
            accumulator: vec![0.; transform_size],
            saved: vec![0.; partition],
            fft_buffer: vec![0.; transform_size],
            fft,
            position: 0,
        })
    }

    pub fn partition(&self) -> usize {
        self.partition
    }

    pub fn blocks(&self) -> usize {
        self.input.blocks.len()
    }

    /// Number of response taps held by the ring.
    pub fn taps(&self) -> usize {
        self.partition * self.blocks()
    }

    /// Replaces the impulse response with `response`, truncated to
    /// [`taps`](Self::taps) and zero-filled past its end. Later unfrozen
    /// response samples overwrite it again from tap 0.
    pub fn load_response(&mut self, response: &[Sample]) -> Result<()> {
        let response = &response[..response.len().min(self.taps())];
        self.response.clear();

        for (i, block) in self.response.blocks.iter_mut().enumerate() {
            let start = (i * self.partition).min(response.len());
            let size_copy = (response.len() - start).min(self.partition);
            copy_and_pad(&mut self.fft_buffer, &response[start..], size_copy);
            self.fft.forward(&mut self.fft_buffer, block)?;
        }
        Ok(())
    }

    fn update_block(&mut self) -> Result<()> {
        self.input.commit(&mut self.fft, &mut self.fft_buffer)?;
        self.response.commit(&mut self.fft, &mut self.fft_buffer)?;

        self.spectrum.fill(Complex::new(0., 0.));

        // spectral delay line: starting at the input cursor walks from the
        // oldest input partition to the newest while the response is walked
        // from its last partition to its first.
        let blocks = self.input.blocks.len();
        let mut index_audio = self.input.cursor;
        for index_ir in (0..blocks).rev() {
            packed_multiply_accumulate(
                &mut self.spectrum,
                &self.input.blocks[index_audio],
                &self.response.blocks[index_ir],
            );
            index_audio += 1;
            if index_audio == blocks {
                index_audio = 0;
            }
        }

        self.fft.inverse(&self.spectrum, &mut self.accumulator)?;
        Ok(())
    }
}

impl<F: FftBackend> Convolution for GenericPartitionedConvolver<F> {
    #[inline]
    fn tick(&mut self, input: Sample, response: Sample, gate: Gate) -> Sample {
        let n = self.position;
        if gate.input {
            self.input.write(n, input);
        }
        if gate.response {
            self.response.write(n, response);
        }

        let output = self.accumulator[n] + self.saved[n];
        self.saved[n] = self.accumulator[n + self.partition];

        self.position += 1;
        if self.position == self.partition {
            self.position = 0;
            if self.update_block().is_err() {
                self.accumulator.fill(0.);
            }
        }
        output
    }

    fn reset(&mut self) {
        self.input.clear();
        self.response.clear();
        self.spectrum.fill(Complex::new(0., 0.));
        self.accumulator.fill(0.);
        self.saved.fill(0.);
        self.position = 0;
    }

    fn latency(&self) -> usize {
        self.partition
    }
}
