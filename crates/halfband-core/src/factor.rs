//! Oversampling factor selection.
//!
//! Only power-of-two factors are supported because every conversion step is a
//! single 2× half-band stage. The factor is fixed when an engine is built and
//! never changes afterwards.

use crate::EngineError;

/// Supported oversampling factors.
///
/// The number of cascaded 2× stages per channel is `log2(factor)`:
///
/// | Factor | Stages |
/// |--------|--------|
/// | `X1`   | 0 (pass-through) |
/// | `X2`   | 1 |
/// | `X4`   | 2 |
/// | `X8`   | 3 |
/// | `X16`  | 4 |
///
/// # Example
///
/// ```rust
/// use halfband_core::OversamplingFactor;
///
/// let factor = OversamplingFactor::try_from(4).unwrap();
/// assert_eq!(factor, OversamplingFactor::X4);
/// assert_eq!(factor.stage_count(), 2);
/// assert!(OversamplingFactor::try_from(3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OversamplingFactor {
    /// No oversampling. The inner processor runs at the host rate.
    #[default]
    X1,
    /// 2× oversampling (one stage).
    X2,
    /// 4× oversampling (two cascaded stages).
    X4,
    /// 8× oversampling (three cascaded stages).
    X8,
    /// 16× oversampling (four cascaded stages).
    X16,
}

impl OversamplingFactor {
    /// All supported factors in ascending order.
    pub const ALL: [Self; 5] = [Self::X1, Self::X2, Self::X4, Self::X8, Self::X16];

    /// Returns the integer multiple of the host sample rate.
    #[inline]
    pub const fn multiplier(self) -> usize {
        match self {
            Self::X1 => 1,
            Self::X2 => 2,
            Self::X4 => 4,
            Self::X8 => 8,
            Self::X16 => 16,
        }
    }

    /// Returns the number of cascaded 2× stages (`log2(factor)`).
    #[inline]
    pub const fn stage_count(self) -> usize {
        match self {
            Self::X1 => 0,
            Self::X2 => 1,
            Self::X4 => 2,
            Self::X8 => 3,
            Self::X16 => 4,
        }
    }

    /// Returns `true` for the pass-through factor.
    #[inline]
    pub const fn is_bypass(self) -> bool {
        matches!(self, Self::X1)
    }
}

impl TryFrom<usize> for OversamplingFactor {
    type Error = EngineError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::X1),
            2 => Ok(Self::X2),
            4 => Ok(Self::X4),
            8 => Ok(Self::X8),
            16 => Ok(Self::X16),
            other => Err(EngineError::UnsupportedFactor(other)),
        }
    }
}

impl From<OversamplingFactor> for usize {
    fn from(factor: OversamplingFactor) -> Self {
        factor.multiplier()
    }
}

impl core::fmt::Display for OversamplingFactor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x", self.multiplier())
    }
}
