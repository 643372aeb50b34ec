//! Halfband DSP - inner processors for the oversampling engine
//!
//! Each processor implements [`InnerProcessor`](halfband_core::InnerProcessor)
//! and runs at whatever rate its engine hands it:
//!
//! - [`Passthrough`] - Identity, mono or stereo
//! - [`Saturator`] - Stereo tanh drive with bias and level
//! - [`Wavefolder`] - Mono sine folder with tone filter and peak meter
//!
//! [`ProcessorKind`] lists them for selection by name.
//!
//! ## Example
//!
//! ```rust
//! use halfband_core::{Engine, EngineConfig, OversamplingFactor};
//! use halfband_dsp::{Wavefolder, WavefolderParams};
//!
//! let config = EngineConfig::for_processor::<Wavefolder>(OversamplingFactor::X8);
//! let mut engine = Engine::<Wavefolder>::new(config).unwrap();
//! engine.init(48000.0);
//! engine.set_drive(4.0);
//!
//! let input = [0.5_f32; 256];
//! let mut output = [0.0_f32; 256];
//! engine.process(&[&input], &mut [&mut output], 256);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod catalogue;
pub mod filters;
pub mod passthrough;
pub mod saturator;
pub mod wavefolder;

// Re-export main types at crate root
pub use catalogue::{ProcessorKind, UnknownProcessor};
pub use filters::{DcBlocker, OnePole};
pub use passthrough::{MonoPassthrough, Passthrough, StereoPassthrough};
pub use saturator::{Saturator, SaturatorParams};
pub use wavefolder::{MAX_FOLDS, Wavefolder, WavefolderParams};
