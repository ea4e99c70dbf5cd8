use thiserror::Error;

use crate::fsig::SpectralFormat;

#[derive(Error, Debug)]
pub enum ConvolutionError {
    #[error("partition size and filter length are both zero")]
    EmptyFilter,
    #[error("filter length {0} is too long to round to a power of two")]
    FilterTooLong(usize),
    #[error("invalid partition geometry: partition {partition}, {blocks} blocks")]
    InvalidGeometry { partition: usize, blocks: usize },
    #[error("transform backend has length {actual}, layout needs {expected}")]
    TransformSize { expected: usize, actual: usize },
    #[error("sliding analysis streams are not supported")]
    SlidingNotSupported,
    #[error("frame format {0:?} is not supported")]
    UnsupportedFormat(SpectralFormat),
    #[error("FFT error: {0}")]
    Fft(#[from] realfft::FftError),
}

pub type Result<T> = std::result::Result<T, ConvolutionError>;
