//! Construction-time configuration errors.
//!
//! Every failure the engine can report happens while it is being built.
//! Once an [`Engine`](crate::Engine) exists, processing and parameter access
//! never fail: out-of-range parameter indices are absorbed silently.

/// Which side of the engine a channel count refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelSide {
    /// Inputs fed into the inner processor.
    Input,
    /// Outputs produced by the inner processor.
    Output,
}

impl core::fmt::Display for ChannelSide {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Input => f.write_str("input"),
            Self::Output => f.write_str("output"),
        }
    }
}

/// Errors raised when an engine configuration is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// The oversampling factor is not one of 1, 2, 4, 8 or 16.
    UnsupportedFactor(usize),
    /// The configured channel count disagrees with the inner processor.
    ChannelMismatch {
        /// Input or output side.
        side: ChannelSide,
        /// Channel count declared by the inner processor.
        expected: usize,
        /// Channel count found in the configuration.
        found: usize,
    },
    /// More channels than [`MAX_CHANNELS`](crate::MAX_CHANNELS) were requested.
    TooManyChannels {
        /// Input or output side.
        side: ChannelSide,
        /// Requested channel count.
        count: usize,
    },
    /// The maximum segment length must be at least one frame.
    ZeroSegmentLength,
    /// The scratch memory for this segment length cannot be addressed.
    SegmentTooLong(usize),
}

impl core::fmt::Display for EngineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnsupportedFactor(n) => write!(
                f,
                "unsupported oversampling factor {n} (accepted: 1, 2, 4, 8, 16)"
            ),
            Self::ChannelMismatch {
                side,
                expected,
                found,
            } => write!(
                f,
                "{side} channel mismatch: processor has {expected}, configuration has {found}"
            ),
            Self::TooManyChannels { side, count } => write!(
                f,
                "{count} {side} channels exceed the limit of {}",
                crate::MAX_CHANNELS
            ),
            Self::ZeroSegmentLength => f.write_str("maximum segment length must be non-zero"),
            Self::SegmentTooLong(frames) => write!(
                f,
                "maximum segment length {frames} needs more scratch memory than can be addressed"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}
