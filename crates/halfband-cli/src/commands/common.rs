//! Argument parsers and level helpers shared by commands.

use halfband_core::OversamplingFactor;

/// Parses `key=value` with a numeric value.
pub fn parse_param(s: &str) -> Result<(String, f32), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter format: '{s}' (expected symbol=value)"))?;
    let value = value
        .trim()
        .parse::<f32>()
        .map_err(|_| format!("invalid value for '{key}': '{value}'"))?;
    Ok((key.trim().to_string(), value))
}

/// Parses an oversampling factor (1, 2, 4, 8 or 16).
pub fn parse_factor(s: &str) -> Result<OversamplingFactor, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("invalid oversampling factor: '{s}'"))?;
    OversamplingFactor::try_from(n).map_err(|e| e.to_string())
}

/// Root mean square of a buffer.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

/// Largest absolute sample.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0, f32::max)
}

/// Linear gain to decibels, floored at -120 dB.
pub fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        -120.0
    } else {
        20.0 * linear.log10()
    }
}
