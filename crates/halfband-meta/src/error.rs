//! Error types for manifest loading and validation.

use std::path::PathBuf;

use halfband_core::EngineError;
use thiserror::Error;

/// Errors that can occur while loading or validating a manifest.
#[derive(Debug, Error)]
pub enum MetaError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Widget type name is not recognized
    #[error("widget '{label}' has unsupported type '{kind}'")]
    UnsupportedWidget {
        /// Label of the offending widget.
        label: String,
        /// Type name found in the manifest.
        kind: String,
    },

    /// Widget appears in the wrong list
    #[error("widget '{label}' of type '{kind}' cannot be {list}")]
    WidgetPlacement {
        /// Label of the offending widget.
        label: String,
        /// Type name of the widget.
        kind: String,
        /// `"active"` or `"passive"`.
        list: &'static str,
    },

    /// A slider or entry lacks one of init/min/max/step
    #[error("widget '{label}' is missing '{field}'")]
    MissingValue {
        /// Label of the offending widget.
        label: String,
        /// Name of the missing field.
        field: &'static str,
    },

    /// Numeric literal could not be parsed
    #[error("invalid number '{text}' for '{field}'")]
    InvalidNumber {
        /// Field holding the literal.
        field: String,
        /// Text as written.
        text: String,
    },

    /// Identifier is not a valid C-like identifier
    #[error("invalid identifier '{0}'")]
    InvalidIdentifier(String),

    /// Two widgets in one list mangle to the same symbol
    #[error("duplicate parameter symbol '{0}'")]
    DuplicateSymbol(String),

    /// Define is not of the form `KEY=VALUE`
    #[error("malformed define '{0}' (expected KEY=VALUE)")]
    InvalidDefine(String),

    /// Manifest does not describe the compiled processor
    #[error("manifest does not match processor: {0}")]
    ProcessorMismatch(String),

    /// Engine configuration rejected
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl MetaError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MetaError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid number error.
    pub fn invalid_number(field: impl Into<String>, text: impl Into<String>) -> Self {
        MetaError::InvalidNumber {
            field: field.into(),
            text: text.into(),
        }
    }

    /// Create a missing value error.
    pub fn missing_value(label: impl Into<String>, field: &'static str) -> Self {
        MetaError::MissingValue {
            label: label.into(),
            field,
        }
    }
}
