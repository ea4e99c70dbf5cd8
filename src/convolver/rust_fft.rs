use realfft::{ComplexToReal, FftError, RealFftPlanner, RealToComplex};
use rustfft::num_complex::Complex;
use std::sync::Arc;

use crate::convolver::packed::{pack, unpack};
use crate::convolver::traits::FftBackend;
use crate::Sample;

/// realfft-backed transform pair. Plans come from a planner owned by the
/// host, so several convolvers of the same size share one plan.
#[derive(Clone)]
pub struct Fft {
    fft_forward: Arc<dyn RealToComplex<Sample>>,
    fft_inverse: Arc<dyn ComplexToReal<Sample>>,
    spectrum: Vec<Complex<Sample>>,
    forward_scratch: Vec<Complex<Sample>>,
    inverse_scratch: Vec<Complex<Sample>>,
}

impl std::fmt::Debug for Fft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fft(len: {})", self.fft_forward.len())
    }
}

impl Fft {
    pub fn plan(planner: &mut RealFftPlanner<Sample>, length: usize) -> Self {
        let fft_forward = planner.plan_fft_forward(length);
        let fft_inverse = planner.plan_fft_inverse(length);
        Self {
            spectrum: fft_forward.make_output_vec(),
            forward_scratch: fft_forward.make_scratch_vec(),
            inverse_scratch: fft_inverse.make_scratch_vec(),
            fft_forward,
            fft_inverse,
        }
    }
}

impl FftBackend for Fft {
    fn len(&self) -> usize {
        self.fft_forward.len()
    }

    fn forward(
        &mut self,
        input: &mut [Sample],
        output: &mut [Complex<Sample>],
    ) -> Result<(), FftError> {
        self.fft_forward
            .process_with_scratch(input, &mut self.spectrum, &mut self.forward_scratch)?;
        pack(&self.spectrum, output);
        Ok(())
    }

    fn inverse(
        &mut self,
        input: &[Complex<Sample>],
        output: &mut [Sample],
    ) -> Result<(), FftError> {
        unpack(input, &mut self.spectrum);
        self.fft_inverse
            .process_with_scratch(&mut self.spectrum, output, &mut self.inverse_scratch)?;

        // FFT Normalization
        let scale = 1.0 / output.len() as Sample;
        output.iter_mut().for_each(|value| *value *= scale);

        Ok(())
    }
}
