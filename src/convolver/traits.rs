use rustfft::num_complex::Complex;

use crate::Sample;

/// Real-input transform of a fixed length, producing and consuming the
/// packed layout described in [`crate::convolver::packed`].
pub trait FftBackend {
    fn len(&self) -> usize;

    fn forward(
        &mut self,
        input: &mut [Sample],
        output: &mut [Complex<Sample>],
    ) -> Result<(), realfft::FftError>;

    /// Inverse transform, normalised so that `inverse(forward(x)) == x`.
    fn inverse(
        &mut self,
        input: &[Complex<Sample>],
        output: &mut [Sample],
    ) -> Result<(), realfft::FftError>;
}
