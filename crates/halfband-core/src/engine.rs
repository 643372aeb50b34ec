//! The oversampling engine.
//!
//! [`Engine`] wraps one [`InnerProcessor`] so that it runs at
//! `factor × sample_rate` while the host sees the original rate.
//!
//! # Lifecycle
//!
//! ```text
//! new ──▶ Uninitialized ──init──▶ Initialized ◀──┐
//!                                   │  │         │
//!                                   │  └─process─┤
//!                                   └────clear───┘
//! ```
//!
//! `init` may be called again to change the sample rate. `clear` drops signal
//! history but keeps sample-rate constants and parameter values. `process`
//! before `init` writes silence.
//!
//! The inner processor receives the rate given to `init` unchanged. A
//! processor whose filters should be tuned to the rate `compute` actually runs
//! at opts in with [`InnerRate::Oversampled`].
//!
//! # Example
//!
//! ```rust,ignore
//! let config = EngineConfig::for_processor::<Saturator>(OversamplingFactor::X4);
//! let mut engine = Engine::<Saturator>::new(config)?;
//! engine.init(48_000.0);
//! engine.process(&[&left, &right], &mut [&mut out_l, &mut out_r], frames);
//! ```

use crate::error::{ChannelSide, EngineError};
use crate::factor::OversamplingFactor;
use crate::param_info::ParamDescriptor;
use crate::param_table::ParameterTable;
use crate::processor::InnerProcessor;
use crate::segment::{self, SegmentDriver};
use crate::shared::SharedParams;

/// Sample rate handed to the inner processor by [`Engine::init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InnerRate {
    /// The rate passed to `init`.
    #[default]
    Host,
    /// The rate passed to `init` times the oversampling factor.
    Oversampled,
}

/// Construction-time engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Input channel count; must equal the processor's.
    pub inputs: usize,
    /// Output channel count; must equal the processor's.
    pub outputs: usize,
    /// Oversampling factor.
    pub factor: OversamplingFactor,
    /// Largest number of host frames converted in one pass.
    pub max_segment_frames: usize,
    /// Rate the inner processor is initialized with.
    pub inner_rate: InnerRate,
}

impl EngineConfig {
    /// Default cap on frames per segment.
    pub const DEFAULT_MAX_SEGMENT_FRAMES: usize = 512;

    /// Configuration matching the channel layout of processor type `P`.
    pub fn for_processor<P: InnerProcessor>(factor: OversamplingFactor) -> Self {
        Self {
            inputs: P::INPUTS,
            outputs: P::OUTPUTS,
            factor,
            max_segment_frames: Self::DEFAULT_MAX_SEGMENT_FRAMES,
            inner_rate: InnerRate::Host,
        }
    }

    /// Overrides the segment cap.
    pub fn with_max_segment_frames(mut self, frames: usize) -> Self {
        self.max_segment_frames = frames;
        self
    }

    /// Overrides the rate handed to the inner processor.
    pub fn with_inner_rate(mut self, inner_rate: InnerRate) -> Self {
        self.inner_rate = inner_rate;
        self
    }

    fn validate<P: InnerProcessor>(&self) -> Result<(), EngineError> {
        for (side, count, expected) in [
            (ChannelSide::Input, self.inputs, P::INPUTS),
            (ChannelSide::Output, self.outputs, P::OUTPUTS),
        ] {
            if count != expected {
                return Err(EngineError::ChannelMismatch {
                    side,
                    expected,
                    found: count,
                });
            }
        }
        Ok(())
    }
}

/// Lifecycle state of an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Built, waiting for `init`.
    Uninitialized,
    /// Ready to process.
    Initialized,
}

/// Oversampling wrapper around one inner processor.
pub struct Engine<P: InnerProcessor> {
    inner: P,
    driver: SegmentDriver<P>,
    config: EngineConfig,
    state: EngineState,
    sample_rate: f32,
}

impl<P: InnerProcessor + Default> Engine<P> {
    /// Builds an engine around a default-constructed processor.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_processor(P::default(), config)
    }
}

impl<P: InnerProcessor> Engine<P> {
    /// Builds an engine around `inner`.
    ///
    /// Validates the configuration, allocates every buffer the engine will
    /// use and resets the processor's parameters to their initial values.
    pub fn with_processor(mut inner: P, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate::<P>()?;
        let driver = SegmentDriver::new(config.factor, config.max_segment_frames)?;
        inner.instance_reset_params();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            inputs = config.inputs,
            outputs = config.outputs,
            factor = config.factor.multiplier(),
            max_segment_frames = config.max_segment_frames,
            "engine created"
        );

        Ok(Self {
            inner,
            driver,
            config,
            state: EngineState::Uninitialized,
            sample_rate: 0.0,
        })
    }

    /// Prepares the engine for `sample_rate` (the host rate).
    ///
    /// The processor's constants are computed for `sample_rate`, or for the
    /// oversampled rate with [`InnerRate::Oversampled`]. Its signal history
    /// and every filter history are cleared. Parameter values are kept.
    pub fn init(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        let rate = self.processor_rate();
        P::class_init(rate);
        self.inner.instance_constants(rate);
        self.inner.instance_clear();
        self.driver.clear();
        self.state = EngineState::Initialized;

        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate, processor_rate = rate, "engine initialized");
    }

    /// Resets processor and filter state without touching sample-rate
    /// constants or parameters.
    pub fn clear(&mut self) {
        self.inner.instance_clear();
        self.driver.clear();

        #[cfg(feature = "tracing")]
        tracing::debug!("engine cleared");
    }

    /// Processes `frames` host frames.
    ///
    /// `frames` is reduced to the shortest buffer passed in. With fewer
    /// channel buffers than the processor needs, or before [`init`](Self::init),
    /// the outputs are filled with silence.
    pub fn process(&mut self, inputs: &[&[f32]], outputs: &mut [&mut [f32]], frames: usize) {
        if self.state != EngineState::Initialized {
            let frames = segment::usable_frames::<P>(inputs, outputs, frames);
            segment::silence(outputs, frames);
            return;
        }

        self.driver.process(&mut self.inner, inputs, outputs, frames);
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Oversampling factor.
    pub fn factor(&self) -> OversamplingFactor {
        self.config.factor
    }

    /// Host sample rate passed to the last `init`, or 0 before `init`.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Rate `compute` runs at: the host rate times the factor.
    pub fn oversampled_rate(&self) -> f32 {
        self.sample_rate * self.config.factor.multiplier() as f32
    }

    /// Rate handed to the inner processor by the last `init`.
    pub fn processor_rate(&self) -> f32 {
        match self.config.inner_rate {
            InnerRate::Host => self.sample_rate,
            InnerRate::Oversampled => self.oversampled_rate(),
        }
    }

    /// The wrapped processor.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// The wrapped processor, mutably.
    pub fn inner_mut(&mut self) -> &mut P {
        &mut self.inner
    }

    /// Consumes the engine and returns the processor.
    pub fn into_inner(self) -> P {
        self.inner
    }

    /// Parameter surface of the processor type.
    pub fn table(&self) -> ParameterTable<P> {
        ParameterTable::of()
    }

    /// Number of active parameters.
    pub fn parameter_count(&self) -> usize {
        P::parameters().len()
    }

    /// Descriptor of the active parameter at `index`.
    pub fn descriptor(&self, index: usize) -> Option<&'static ParamDescriptor> {
        self.table().descriptor(index)
    }

    /// Reads the parameter at `index`; `0.0` when out of range.
    pub fn get_parameter(&self, index: usize) -> f32 {
        self.table().get(&self.inner, index)
    }

    /// Writes the parameter at `index` as given, without clamping.
    ///
    /// Out-of-range indices are ignored.
    pub fn set_parameter(&mut self, index: usize, value: f32) {
        self.table().set(&mut self.inner, index, value);
    }

    /// Index of the active parameter named `symbol`.
    pub fn find_parameter(&self, symbol: &str) -> Option<usize> {
        self.table().find_by_symbol(symbol)
    }

    /// Number of passive (metering) controls.
    pub fn meter_count(&self) -> usize {
        P::meters().len()
    }

    /// Descriptor of the passive control at `index`.
    pub fn meter_descriptor(&self, index: usize) -> Option<&'static ParamDescriptor> {
        self.table().meter_descriptor(index)
    }

    /// Copies every value of `shared` into the processor.
    pub fn apply_shared(&mut self, shared: &SharedParams) {
        let table = self.table();
        for (index, value) in shared.values().take(table.count()).enumerate() {
            table.set(&mut self.inner, index, value);
        }
    }
}

impl<P: InnerProcessor + core::fmt::Debug> core::fmt::Debug for Engine<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Engine")
            .field("inner", &self.inner)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("sample_rate", &self.sample_rate)
            .finish_non_exhaustive()
    }
}
