use crate::error::{ConvolutionError, Result};
use crate::fsig::{FrameSpec, PvBin, PvFrame, SpectralFormat};
use crate::Sample;

/// Keeps the `keep` loudest bins of each frame and zeroes the rest.
#[derive(Debug, Clone)]
pub struct PeakTracer {
    amps: Vec<Sample>,
    frame_count: u64,
}

impl PeakTracer {
    pub fn new(spec: &FrameSpec) -> Result<Self> {
        if spec.sliding {
            return Err(ConvolutionError::SlidingNotSupported);
        }
        if !matches!(spec.format, SpectralFormat::Pvs | SpectralFormat::Polar) {
            return Err(ConvolutionError::UnsupportedFormat(spec.format));
        }

        Ok(Self {
            amps: vec![0.; spec.bins],
            frame_count: 0,
        })
    }

    /// Traces `input` into `output` when `input` is a frame not seen yet.
    /// Returns whether a new frame was written.
    ///
    /// `keep` is read as a control value and truncated toward zero. The
    /// selection index `len - keep` is clamped to `[0, len - 1]`, so a `keep`
    /// at or above the bin count passes everything and a `keep` of 1 or less
    /// keeps only the loudest bin and its ties.
    pub fn trace(&mut self, input: &PvFrame, keep: Sample, output: &mut PvFrame) -> bool {
        if input.count <= self.frame_count {
            return false;
        }
        assert_eq!(input.len(), self.amps.len());
        assert_eq!(output.len(), input.len());

        let len = input.len();
        if len > 0 {
            let n = (len as i64)
                .saturating_sub(keep as i64)
                .clamp(0, len as i64 - 1) as usize;

            for (amp, bin) in self.amps.iter_mut().zip(&input.bins) {
                *amp = bin.amp;
            }
            let (_, threshold, _) = self.amps.select_nth_unstable_by(n, Sample::total_cmp);
            let threshold = *threshold;

            for (out, bin) in output.bins.iter_mut().zip(&input.bins) {
                *out = if bin.amp >= threshold {
                    *bin
                } else {
                    PvBin::default()
                };
            }
        }

        output.count = input.count;
        self.frame_count = input.count;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(bins: usize) -> FrameSpec {
        FrameSpec {
            bins,
            format: SpectralFormat::Pvs,
            sliding: false,
        }
    }

    fn frame(amps: &[Sample], count: u64) -> PvFrame {
        PvFrame::from_bins(
            amps.iter()
                .enumerate()
                .map(|(i, &a)| PvBin::new(a, 100.0 * i as Sample))
                .collect(),
            count,
        )
    }

    #[test]
    fn rejects_sliding_and_foreign_formats() {
        let mut sliding = spec(8);
        sliding.sliding = true;
        assert!(matches!(
            PeakTracer::new(&sliding),
            Err(ConvolutionError::SlidingNotSupported)
        ));

        let mut complex = spec(8);
        complex.format = SpectralFormat::Complex;
        assert!(matches!(
            PeakTracer::new(&complex),
            Err(ConvolutionError::UnsupportedFormat(SpectralFormat::Complex))
        ));

        let mut polar = spec(8);
        polar.format = SpectralFormat::Polar;
        assert!(PeakTracer::new(&polar).is_ok());
    }

    #[test]
    fn keeps_top_bins() {
        let mut tracer = PeakTracer::new(&spec(6)).unwrap();
        let input = frame(&[0.1, 0.9, 0.3, 0.7, 0.2, 0.5], 1);
        let mut output = PvFrame::new(6);

        assert!(tracer.trace(&input, 3.0, &mut output));
        let amps: Vec<Sample> = output.bins.iter().map(|b| b.amp).collect();
        assert_eq!(amps, vec![0.0, 0.9, 0.0, 0.7, 0.0, 0.5]);
        assert_eq!(output.bins[3], input.bins[3]);
        assert_eq!(output.bins[0], PvBin::default());
        assert_eq!(output.count, 1);
    }

    #[test]
    fn stale_frames_are_skipped() {
        let mut tracer = PeakTracer::new(&spec(3)).unwrap();
        let mut output = PvFrame::new(3);
        assert!(tracer.trace(&frame(&[1.0, 2.0, 3.0], 4), 1.0, &mut output));
        let before = output.clone();
        assert!(!tracer.trace(&frame(&[9.0, 0.0, 0.0], 4), 1.0, &mut output));
        assert_eq!(output, before);
        assert!(tracer.trace(&frame(&[9.0, 0.0, 0.0], 5), 1.0, &mut output));
        assert_eq!(output.bins[0].amp, 9.0);
    }

    #[test]
    fn non_positive_keep_is_clamped() {
        let mut tracer = PeakTracer::new(&spec(4)).unwrap();
        let mut output = PvFrame::new(4);
        tracer.trace(&frame(&[0.4, 0.8, 0.2, 0.6], 1), -3.0, &mut output);
        let amps: Vec<Sample> = output.bins.iter().map(|b| b.amp).collect();
        assert_eq!(amps, vec![0.0, 0.8, 0.0, 0.0]);
    }

    #[test]
    fn extreme_keep_values_are_clamped() {
        let input = frame(&[0.4, 0.8, 0.2, 0.6], 1);

        let mut output = PvFrame::new(4);
        let mut tracer = PeakTracer::new(&spec(4)).unwrap();
        assert!(tracer.trace(&input, -1.0e30, &mut output));
        let amps: Vec<Sample> = output.bins.iter().map(|b| b.amp).collect();
        assert_eq!(amps, vec![0.0, 0.8, 0.0, 0.0]);

        let mut output = PvFrame::new(4);
        let mut tracer = PeakTracer::new(&spec(4)).unwrap();
        assert!(tracer.trace(&input, 1.0e30, &mut output));
        assert_eq!(output, input);
    }
}
