//! First-order filters used inside the processors.
//!
//! Both filters are tuned for the rate passed to `set_sample_rate` or
//! `set_cutoff`. Inside an engine that is the rate given to `init`, or the
//! oversampled rate when the engine is configured with
//! `InnerRate::Oversampled`.

use core::f32::consts::TAU;
use libm::expf;

/// Values below this magnitude are flushed to zero.
const DENORMAL_FLOOR: f32 = 1e-20;

#[inline]
fn flush_denormal(x: f32) -> f32 {
    if x.abs() < DENORMAL_FLOOR { 0.0 } else { x }
}

/// DC blocker: `y[n] = x[n] - x[n-1] + R * y[n-1]`.
///
/// The pole `R` is placed for a fixed cutoff of about 7 Hz.
#[derive(Debug, Clone, Default)]
pub struct DcBlocker {
    coeff: f32,
    x_prev: f32,
    y_prev: f32,
}

impl DcBlocker {
    const CUTOFF_HZ: f32 = 7.0;

    /// Creates a blocker for `sample_rate`.
    pub fn new(sample_rate: f32) -> Self {
        let mut blocker = Self::default();
        blocker.set_sample_rate(sample_rate);
        blocker
    }

    /// Recomputes `R` for a new rate. History is kept.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.coeff = expf(-TAU * Self::CUTOFF_HZ / sample_rate).clamp(0.9, 0.99999);
    }

    /// Filters one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = flush_denormal(input - self.x_prev + self.coeff * self.y_prev);
        self.x_prev = input;
        self.y_prev = output;
        output
    }

    /// Pole position.
    pub fn coeff(&self) -> f32 {
        self.coeff
    }

    /// Clears history.
    pub fn reset(&mut self) {
        self.x_prev = 0.0;
        self.y_prev = 0.0;
    }
}

/// One-pole (6 dB/oct) lowpass: `y[n] = x[n] + c * (y[n-1] - x[n])`,
/// `c = exp(-2π f / fs)`.
#[derive(Debug, Clone, Default)]
pub struct OnePole {
    state: f32,
    coeff: f32,
}

impl OnePole {
    /// Sets the cutoff. Frequencies above Nyquist are clamped to it.
    pub fn set_cutoff(&mut self, freq_hz: f32, sample_rate: f32) {
        let freq = freq_hz.clamp(0.0, 0.5 * sample_rate);
        self.coeff = expf(-TAU * freq / sample_rate);
    }

    /// Filters one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.state = flush_denormal(input + self.coeff * (self.state - input));
        self.state
    }

    /// Clears history.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dc_blocker_removes_offset() {
        let mut blocker = DcBlocker::new(192000.0);
        let mut out = 1.0;
        for _ in 0..192000 {
            out = blocker.process(0.5);
        }
        assert!(out.abs() < 1e-3, "residual DC {out}");
    }

    #[test]
    fn dc_blocker_tracks_rate() {
        let slow = DcBlocker::new(48000.0).coeff();
        let fast = DcBlocker::new(768000.0).coeff();
        assert!(fast > slow);
    }

    #[test]
    fn one_pole_passes_dc() {
        let mut lp = OnePole::default();
        lp.set_cutoff(1000.0, 48000.0);
        let mut out = 0.0;
        for _ in 0..48000 {
            out = lp.process(1.0);
        }
        assert!((out - 1.0).abs() < 1e-4, "DC should pass, got {out}");
    }

    #[test]
    fn one_pole_attenuates_nyquist() {
        let mut lp = OnePole::default();
        lp.set_cutoff(100.0, 48000.0);
        let mut sum = 0.0f32;
        for i in 0..4800 {
            let input = if i % 2 == 0 { 1.0 } else { -1.0 };
            sum += lp.process(input).abs();
        }
        assert!(sum / 4800.0 < 0.05);
    }

    #[test]
    fn reset_clears_state() {
        let mut lp = OnePole::default();
        lp.set_cutoff(100.0, 48000.0);
        lp.process(1.0);
        lp.reset();
        assert_eq!(lp.process(0.0), 0.0);
    }
}
