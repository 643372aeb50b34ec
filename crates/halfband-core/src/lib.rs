//! Halfband Core - real-time oversampling engine
//!
//! This crate runs an arbitrary multi-channel processor at 2, 4, 8 or 16 times
//! the host sample rate and returns its output at the host rate. Nonlinear
//! processing inside the wrapped processor aliases far less at the higher rate.
//!
//! # Core Abstractions
//!
//! ## Engine
//!
//! - [`Engine`] - Owns the inner processor, conversion chains and scratch memory
//! - [`EngineConfig`] - Channel counts, [`OversamplingFactor`], segment cap
//! - [`InnerProcessor`] - Contract of the wrapped processor (statically dispatched)
//!
//! ## Rate Conversion
//!
//! - [`Upsampler2x`] / [`Downsampler2x`] - Half-band polyphase IIR [`FilterStage`]s
//! - [`UpsamplerChain`] / [`DownsamplerChain`] - `log2(factor)` stages per channel
//! - [`WorkArena`] - Pre-allocated ping-pong lanes
//! - [`SegmentDriver`] - Splits calls into bounded segments
//!
//! ## Parameters
//!
//! - [`ParamDescriptor`] - Label, unit, range, [`ScaleKind`], [`ParamFlags`]
//! - [`ParameterTable`] - Index-based access to processor fields, no clamping
//! - [`parameters!`] - Declares a processor's table and named accessors
//! - [`SharedParams`] - Lock-free values for a control thread
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! halfband-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: `process` never allocates, locks or fails
//! - **Static dispatch**: one concrete processor type per engine
//! - **Bounded memory**: scratch sized once from channels, factor and segment cap

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod arena;
pub mod chain;
pub mod engine;
pub mod error;
pub mod factor;
pub mod param_info;
pub mod param_table;
pub mod processor;
pub mod segment;
pub mod shared;
pub mod stage;

#[doc(hidden)]
pub use paste;

// Re-export main types at crate root
pub use arena::{Half, WorkArena};
pub use chain::{DownsamplerChain, UpsamplerChain};
pub use engine::{Engine, EngineConfig, EngineState, InnerRate};
pub use error::{ChannelSide, EngineError};
pub use factor::OversamplingFactor;
pub use param_info::{ParamDescriptor, ParamFlags, ParamRange, ScaleKind, WidgetKind};
pub use param_table::{ParamBinding, ParameterTable};
pub use processor::{InnerProcessor, MAX_CHANNELS};
pub use segment::SegmentDriver;
pub use shared::SharedParams;
pub use stage::{
    COEFS_2X, COEFS_4X, COEFS_8X, COEFS_16X, Downsampler2x, FilterStage, MAX_SECTIONS,
    Upsampler2x, stage_coefficients,
};
