//! Packed real-spectrum layout.
//!
//! A real signal of length `N` has `N/2 + 1` distinct bins, of which the
//! first (DC) and the last (Nyquist) are purely real. The packed layout stores
//! `N/2` complex values: bin 0 carries DC in `re` and Nyquist in `im`, and bins
//! `1..N/2` are the ordinary complex bins.

use rustfft::num_complex::Complex;

use crate::Sample;

pub fn packed_size(transform_size: usize) -> usize {
    transform_size / 2
}

/// Converts `N/2 + 1` bins into `N/2` packed bins.
pub fn pack(full: &[Complex<Sample>], packed: &mut [Complex<Sample>]) {
    assert_eq!(full.len(), packed.len() + 1);
    let nyquist = full[packed.len()].re;
    packed.copy_from_slice(&full[..packed.len()]);
    packed[0] = Complex::new(full[0].re, nyquist);
}

/// Converts `N/2` packed bins back into `N/2 + 1` bins.
pub fn unpack(packed: &[Complex<Sample>], full: &mut [Complex<Sample>]) {
    assert_eq!(full.len(), packed.len() + 1);
    let half = packed.len();
    full[..half].copy_from_slice(packed);
    full[0] = Complex::new(packed[0].re, 0.);
    full[half] = Complex::new(packed[0].im, 0.);
}

pub fn copy_and_pad(dst: &mut [Sample], src: &[Sample], src_size: usize) {
    assert!(dst.len() >= src_size);
    dst[0..src_size].copy_from_slice(&src[0..src_size]);
    dst[src_size..].fill(0.);
}

/// `result += a * b` over packed spectra. Bin 0 is multiplied per component
/// so DC and Nyquist never mix.
#[inline]
pub fn packed_multiply_accumulate(
    result: &mut [Complex<Sample>],
    a: &[Complex<Sample>],
    b: &[Complex<Sample>],
) {
    assert_eq!(result.len(), a.len());
    assert_eq!(result.len(), b.len());
    if result.is_empty() {
        return;
    }

    result[0].re += a[0].re * b[0].re;
    result[0].im += a[0].im * b[0].im;

    for ((r, a), b) in result[1..].iter_mut().zip(&a[1..]).zip(&b[1..]) {
        r.re += a.re * b.re - a.im * b.im;
        r.im += a.re * b.im + a.im * b.re;
    }
}
