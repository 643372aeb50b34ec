//! Index-based parameter access over inner-processor fields.
//!
//! A [`ParameterTable`] owns no values. It pairs each [`ParamDescriptor`] with
//! a getter and a setter for the processor field that stores the live value.
//! The index into the table is the parameter's identity for the lifetime of
//! the engine.
//!
//! Out-of-range indices never fault: reads return `0.0`, writes are ignored
//! and descriptor lookups return `None`. Values are never clamped.

use crate::param_info::{ParamDescriptor, ParamRange};
use crate::processor::InnerProcessor;

/// Descriptor plus field accessors for one active parameter.
pub struct ParamBinding<P> {
    /// Parameter metadata.
    pub descriptor: ParamDescriptor,
    /// Reads the backing field.
    pub get: fn(&P) -> f32,
    /// Writes the backing field.
    pub set: fn(&mut P, f32),
}

impl<P> Clone for ParamBinding<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for ParamBinding<P> {}

impl<P> core::fmt::Debug for ParamBinding<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParamBinding")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Static parameter surface of an inner processor type.
pub struct ParameterTable<P: 'static> {
    bindings: &'static [ParamBinding<P>],
    meters: &'static [ParamDescriptor],
}

impl<P: 'static> Clone for ParameterTable<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: 'static> Copy for ParameterTable<P> {}

impl<P: 'static> core::fmt::Debug for ParameterTable<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParameterTable")
            .field("parameters", &self.bindings.len())
            .field("meters", &self.meters.len())
            .finish()
    }
}

impl<P: InnerProcessor> ParameterTable<P> {
    /// Table of processor type `P`.
    pub fn of() -> Self {
        Self::new(P::parameters(), P::meters())
    }
}

impl<P: 'static> ParameterTable<P> {
    /// Creates a table from explicit bindings and meter descriptors.
    pub const fn new(
        bindings: &'static [ParamBinding<P>],
        meters: &'static [ParamDescriptor],
    ) -> Self {
        Self { bindings, meters }
    }

    /// Number of active parameters.
    #[inline]
    pub fn count(&self) -> usize {
        self.bindings.len()
    }

    /// Descriptor of the active parameter at `index`.
    #[inline]
    pub fn descriptor(&self, index: usize) -> Option<&'static ParamDescriptor> {
        self.bindings.get(index).map(|b| &b.descriptor)
    }

    /// Iterates over the active descriptors in index order.
    pub fn descriptors(&self) -> impl Iterator<Item = &'static ParamDescriptor> {
        self.bindings.iter().map(|b| &b.descriptor)
    }

    /// Reads the parameter at `index`, or `0.0` when out of range.
    #[inline]
    pub fn get(&self, inner: &P, index: usize) -> f32 {
        self.bindings.get(index).map_or(0.0, |b| (b.get)(inner))
    }

    /// Writes the parameter at `index`. Out-of-range indices are ignored.
    #[inline]
    pub fn set(&self, inner: &mut P, index: usize, value: f32) {
        if let Some(binding) = self.bindings.get(index) {
            (binding.set)(inner, value);
        }
    }

    /// Finds an active parameter by its symbol.
    pub fn find_by_symbol(&self, symbol: &str) -> Option<usize> {
        self.bindings
            .iter()
            .position(|b| b.descriptor.symbol == symbol)
    }

    /// Number of passive (metering) controls.
    #[inline]
    pub fn meter_count(&self) -> usize {
        self.meters.len()
    }

    /// Descriptor of the passive control at `index`.
    #[inline]
    pub fn meter_descriptor(&self, index: usize) -> Option<&'static ParamDescriptor> {
        self.meters.get(index)
    }

    /// Display label of the parameter at `index`.
    pub fn parameter_label(&self, index: usize) -> Option<&'static str> {
        self.descriptor(index).map(|d| d.label)
    }

    /// Short label of the parameter at `index`.
    pub fn parameter_short_label(&self, index: usize) -> Option<&'static str> {
        self.descriptor(index).map(|d| d.short_label)
    }

    /// Symbol of the parameter at `index`.
    pub fn parameter_symbol(&self, index: usize) -> Option<&'static str> {
        self.descriptor(index).map(|d| d.symbol)
    }

    /// Unit string of the parameter at `index`.
    pub fn parameter_unit(&self, index: usize) -> Option<&'static str> {
        self.descriptor(index).map(|d| d.unit)
    }

    /// Initial value and bounds of the parameter at `index`.
    pub fn parameter_range(&self, index: usize) -> Option<ParamRange> {
        self.descriptor(index).map(|d| d.range)
    }

    /// Whether the parameter at `index` is a trigger.
    pub fn parameter_is_trigger(&self, index: usize) -> bool {
        self.descriptor(index).is_some_and(ParamDescriptor::is_trigger)
    }

    /// Whether the parameter at `index` is boolean.
    pub fn parameter_is_boolean(&self, index: usize) -> bool {
        self.descriptor(index).is_some_and(ParamDescriptor::is_boolean)
    }

    /// Whether the parameter at `index` is integer-valued.
    pub fn parameter_is_integer(&self, index: usize) -> bool {
        self.descriptor(index).is_some_and(ParamDescriptor::is_integer)
    }

    /// Whether the parameter at `index` is logarithmic.
    pub fn parameter_is_logarithmic(&self, index: usize) -> bool {
        self.descriptor(index)
            .is_some_and(ParamDescriptor::is_logarithmic)
    }
}

/// Declares the active parameters of an inner processor.
///
/// For each entry `field as symbol => descriptor` the macro:
///
/// - appends a [`ParamBinding`] to the associated const `PARAMETERS`, with the
///   descriptor's symbol set to `symbol`;
/// - adds `get_<symbol>` / `set_<symbol>` to the named accessor trait, which
///   is implemented for [`Engine<Processor>`](crate::Engine).
///
/// Entry order is index order.
///
/// # Example
///
/// ```rust
/// use halfband_core::{Engine, EngineConfig, InnerProcessor, ParamBinding, ParamDescriptor, parameters};
///
/// #[derive(Default)]
/// pub struct Gain {
///     level: f32,
/// }
///
/// parameters! {
///     /// Named accessors for [`Gain`].
///     Gain: GainParams {
///         level as level => ParamDescriptor::slider("Level", 1.0, 0.0, 2.0, 0.01),
///     }
/// }
///
/// impl InnerProcessor for Gain {
///     const INPUTS: usize = 1;
///     const OUTPUTS: usize = 1;
///
///     fn instance_constants(&mut self, _sample_rate: f32) {}
///     fn instance_clear(&mut self) {}
///
///     fn compute(&mut self, frames: usize, inputs: &[&[f32]], outputs: &mut [&mut [f32]]) {
///         for i in 0..frames {
///             outputs[0][i] = inputs[0][i] * self.level;
///         }
///     }
///
///     fn parameters() -> &'static [ParamBinding<Self>] {
///         Self::PARAMETERS
///     }
/// }
///
/// let mut engine = Engine::<Gain>::new(EngineConfig::for_processor::<Gain>(Default::default())).unwrap();
/// engine.set_level(0.5);
/// assert_eq!(engine.get_parameter(0), 0.5);
/// ```
#[macro_export]
macro_rules! parameters {
    (
        $(#[$attr:meta])*
        $proc:ident : $accessors:ident {
            $( $field:ident as $symbol:ident => $desc:expr ),* $(,)?
        }
    ) => {
        impl $proc {
            /// Active parameter bindings in index order.
            pub const PARAMETERS: &'static [$crate::ParamBinding<Self>] = &[
                $(
                    $crate::ParamBinding {
                        descriptor: $desc.with_symbol(stringify!($symbol)),
                        get: |p: &Self| p.$field,
                        set: |p: &mut Self, value: f32| p.$field = value,
                    },
                )*
            ];
        }

        $crate::paste::paste! {
            $(#[$attr])*
            #[allow(non_snake_case)]
            pub trait $accessors {
                $(
                    #[doc = "Reads the `" $symbol "` parameter."]
                    fn [<get_ $symbol>](&self) -> f32;
                    #[doc = "Writes the `" $symbol "` parameter without clamping."]
                    fn [<set_ $symbol>](&mut self, value: f32);
                )*
            }

            #[allow(non_snake_case)]
            impl $accessors for $crate::Engine<$proc> {
                $(
                    fn [<get_ $symbol>](&self) -> f32 {
                        self.inner().$field
                    }

                    fn [<set_ $symbol>](&mut self, value: f32) {
                        self.inner_mut().$field = value;
                    }
                )*
            }
        }
    };
}
