//! Catalogue of the bundled processors.
//!
//! The engine is generic over its processor, so selecting one by name
//! means matching on [`ProcessorKind`] and instantiating
//! `Engine<ConcreteType>` in each arm.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use halfband_core::{InnerProcessor, ParamDescriptor, ParameterTable};

use crate::{MonoPassthrough, Saturator, StereoPassthrough, Wavefolder};

/// A bundled processor type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessorKind {
    /// [`MonoPassthrough`]
    Passthrough,
    /// [`StereoPassthrough`]
    StereoPassthrough,
    /// [`Saturator`]
    Saturator,
    /// [`Wavefolder`]
    Wavefolder,
}

impl ProcessorKind {
    /// Every bundled processor.
    pub const ALL: [Self; 4] = [
        Self::Passthrough,
        Self::StereoPassthrough,
        Self::Saturator,
        Self::Wavefolder,
    ];

    /// Lowercase identifier used on the command line.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Passthrough => "passthrough",
            Self::StereoPassthrough => "stereo-passthrough",
            Self::Saturator => "saturator",
            Self::Wavefolder => "wavefolder",
        }
    }

    /// One-line description.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Passthrough => "Mono identity; measures the conversion chain alone",
            Self::StereoPassthrough => "Stereo identity",
            Self::Saturator => "Stereo tanh saturation with bias and level",
            Self::Wavefolder => "Mono sine wavefolder with tone filter and peak meter",
        }
    }

    /// Looks up a processor by [`id`](Self::id).
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    /// Input channel count.
    pub const fn inputs(self) -> usize {
        match self {
            Self::Passthrough => MonoPassthrough::INPUTS,
            Self::StereoPassthrough => StereoPassthrough::INPUTS,
            Self::Saturator => Saturator::INPUTS,
            Self::Wavefolder => Wavefolder::INPUTS,
        }
    }

    /// Output channel count.
    pub const fn outputs(self) -> usize {
        match self {
            Self::Passthrough => MonoPassthrough::OUTPUTS,
            Self::StereoPassthrough => StereoPassthrough::OUTPUTS,
            Self::Saturator => Saturator::OUTPUTS,
            Self::Wavefolder => Wavefolder::OUTPUTS,
        }
    }

    /// Active parameter descriptors in index order.
    pub fn parameters(self) -> Vec<ParamDescriptor> {
        fn collect<P: InnerProcessor>() -> Vec<ParamDescriptor> {
            ParameterTable::<P>::of().descriptors().copied().collect()
        }

        match self {
            Self::Passthrough => collect::<MonoPassthrough>(),
            Self::StereoPassthrough => collect::<StereoPassthrough>(),
            Self::Saturator => collect::<Saturator>(),
            Self::Wavefolder => collect::<Wavefolder>(),
        }
    }

    /// Meter descriptors.
    pub fn meters(self) -> &'static [ParamDescriptor] {
        match self {
            Self::Passthrough => MonoPassthrough::meters(),
            Self::StereoPassthrough => StereoPassthrough::meters(),
            Self::Saturator => Saturator::meters(),
            Self::Wavefolder => Wavefolder::meters(),
        }
    }
}

impl core::fmt::Display for ProcessorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.id())
    }
}

/// Error returned when parsing an unknown processor id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProcessor;

impl core::fmt::Display for UnknownProcessor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("unknown processor (expected one of: ")?;
        for (i, kind) in ProcessorKind::ALL.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(kind.id())?;
        }
        f.write_str(")")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnknownProcessor {}

impl core::str::FromStr for ProcessorKind {
    type Err = UnknownProcessor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or(UnknownProcessor)
    }
}
