pub mod config;
pub mod control;
pub mod convolver;
pub mod error;
pub mod fsig;
pub mod pv_trace;

pub use config::{ConvolverConfig, Layout};
pub use control::{Control, Gate};
pub use convolver::{DirectConvolver, PartitionedConvolver, TvConvolver};
pub use error::{ConvolutionError, Result};
pub use pv_trace::PeakTracer;

pub type Sample = f32;

pub trait Convolution {
    /// Consumes one input and one impulse-response sample and returns one
    /// output sample. Must be real-time safe: no allocation, no locking.
    fn tick(&mut self, input: Sample, response: Sample, gate: Gate) -> Sample;

    fn reset(&mut self);

    /// Delay in samples between an input sample and its first contribution
    /// to the output.
    fn latency(&self) -> usize;

    fn process(
        &mut self,
        input: &[Sample],
        response: &[Sample],
        freeze_input: Control,
        freeze_response: Control,
        output: &mut [Sample],
    ) {
        assert!(input.len() >= output.len());
        assert!(response.len() >= output.len());
        assert!(freeze_input.covers(output.len()));
        assert!(freeze_response.covers(output.len()));

        let (mut i, mut r) = (0, 0);
        let (step_i, step_r) = (freeze_input.step(), freeze_response.step());
        for (n, out) in output.iter_mut().enumerate() {
            let gate = Gate {
                input: freeze_input.is_active_at(i),
                response: freeze_response.is_active_at(r),
            };
            *out = self.tick(input[n], response[n], gate);
            i += step_i;
            r += step_r;
        }
    }
}
