//! Processor manifests and widget metadata for halfband engines.
//!
//! This crate describes an oversampled processor from the outside: its
//! name and license, its channels, its oversampling setup and the widgets
//! that become parameters and meters.
//!
//! # Features
//!
//! - **Manifests**: Load a processor description from TOML ([`Manifest`])
//! - **Widgets**: Interpret widget kinds, ranges and tags ([`Widget`])
//! - **Identifiers**: Derive C-like symbols from labels ([`mangle`])
//! - **Tags**: Controller strings and typed tag values ([`split_label`], [`TagValue`])
//! - **Listings**: Serializable parameter rows ([`ParameterSummary`])
//!
//! # Example
//!
//! ```rust,no_run
//! use halfband_meta::Manifest;
//!
//! let mut manifest = Manifest::load("wavefolder.toml").unwrap();
//! manifest.apply_define("oversampling=16").unwrap();
//!
//! let meta = manifest.interpret().unwrap();
//! let config = meta.engine_config();
//! for row in meta.parameters() {
//!     println!("{} {} [{}, {}]", row.index, row.symbol, row.min, row.max);
//! }
//! # let _ = config;
//! ```

mod error;
mod mangle;
mod manifest;
mod summary;
mod tags;
mod widget;

pub use error::MetaError;
pub use mangle::{is_valid_identifier, mangle};
pub use manifest::{Channel, Manifest, ProcessorMeta};
pub use summary::ParameterSummary;
pub use tags::{TagValue, Tags, is_ordering_key, parse_float_literal, split_label};
pub use widget::{NumLiteral, Widget, WidgetList, WidgetSpec};
