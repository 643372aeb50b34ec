//! The contract between the engine and the processor it wraps.

use crate::param_info::ParamDescriptor;
use crate::param_table::ParamBinding;

/// Upper bound on the channel count of either side of an inner processor.
///
/// Channel views are assembled on the stack, so the limit is static.
pub const MAX_CHANNELS: usize = 32;

/// A sample-synchronous multi-channel processor driven by an
/// [`Engine`](crate::Engine).
///
/// Exactly one concrete type is wrapped per engine, so the engine is generic
/// over it and every call is statically dispatched. The sample rate handed to
/// the lifecycle hooks is the host rate given to
/// [`Engine::init`](crate::Engine::init), unless the engine was configured
/// with [`InnerRate::Oversampled`](crate::InnerRate::Oversampled).
///
/// Every active parameter is a plain `f32` field of the implementor, exposed
/// through [`parameters`](Self::parameters). The [`parameters!`](crate::parameters)
/// macro generates that table together with named accessors.
pub trait InnerProcessor: Sized + 'static {
    /// Number of input channels.
    const INPUTS: usize;
    /// Number of output channels.
    const OUTPUTS: usize;

    /// Initializes state shared by every instance of the type.
    fn class_init(_sample_rate: f32) {}

    /// Recomputes sample-rate-derived constants.
    fn instance_constants(&mut self, sample_rate: f32);

    /// Clears signal history (delay lines, filter memories, envelopes).
    ///
    /// Parameter fields and sample-rate constants are left alone.
    fn instance_clear(&mut self);

    /// Restores every active parameter to its initial value.
    fn instance_reset_params(&mut self) {
        for binding in Self::parameters() {
            (binding.set)(self, binding.descriptor.range.init);
        }
    }

    /// Processes `frames` samples per channel.
    ///
    /// `inputs` holds [`INPUTS`](Self::INPUTS) slices and `outputs` holds
    /// [`OUTPUTS`](Self::OUTPUTS) slices, each exactly `frames` long.
    fn compute(&mut self, frames: usize, inputs: &[&[f32]], outputs: &mut [&mut [f32]]);

    /// Active parameters in index order.
    fn parameters() -> &'static [ParamBinding<Self>];

    /// Passive (metering) controls. Metadata only.
    fn meters() -> &'static [ParamDescriptor] {
        &[]
    }
}
