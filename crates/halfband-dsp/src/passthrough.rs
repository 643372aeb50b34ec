//! Identity processor.
//!
//! Useful as a reference: wrapped in an engine it measures the up/down
//! cascade on its own.

use halfband_core::{InnerProcessor, ParamBinding};

/// Copies every input channel to the matching output channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough<const N: usize>;

/// One-channel identity.
pub type MonoPassthrough = Passthrough<1>;

/// Two-channel identity.
pub type StereoPassthrough = Passthrough<2>;

impl<const N: usize> InnerProcessor for Passthrough<N> {
    const INPUTS: usize = N;
    const OUTPUTS: usize = N;

    fn instance_constants(&mut self, _sample_rate: f32) {}

    fn instance_clear(&mut self) {}

    fn compute(&mut self, frames: usize, inputs: &[&[f32]], outputs: &mut [&mut [f32]]) {
        for (output, input) in outputs.iter_mut().zip(inputs) {
            output[..frames].copy_from_slice(&input[..frames]);
        }
    }

    fn parameters() -> &'static [ParamBinding<Self>] {
        &[]
    }
}
