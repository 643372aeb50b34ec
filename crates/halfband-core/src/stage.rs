//! Two-times half-band polyphase IIR conversion stages.
//!
//! Each stage doubles or halves the sample rate with a half-band lowpass built
//! from two parallel chains of first-order allpass sections (polyphase
//! decomposition). Coefficients alternate between the two paths: even-indexed
//! coefficients belong to path 0, odd-indexed ones to path 1.
//!
//! ```text
//!            ┌── A0(z) ──┐
//!  x[n] ─────┤           ├── interleave ──▶ y[2n], y[2n+1]      (upsampler)
//!            └── A1(z) ──┘
//!
//!  x[2n+1] ── A0(z) ──┐
//!                     ├── ½(a + b) ──▶ y[n]                     (downsampler)
//!  x[2n]   ── A1(z) ──┘
//! ```
//!
//! Every allpass section computes `y = (x - y₁)·a + x₁`, which is the
//! difference equation of `(a + z⁻¹) / (1 + a·z⁻¹)` at the stage's low rate.
//! Both paths have unity gain at DC, so a converted DC level is preserved
//! exactly once the history settles.
//!
//! ## Coefficient tables
//!
//! The innermost stage (1×→2×) sits against the original Nyquist frequency and
//! needs the steepest transition, so it uses 12 sections. Each further doubling
//! only has to reject images far above the audio band and uses fewer sections:
//! 4 (2×→4×), 3 (4×→8×) and 2 (8×→16×). The tables are process-wide `static`
//! data shared by every stage instance.

/// Maximum number of allpass sections held by a single stage.
pub const MAX_SECTIONS: usize = 12;

/// Stage 0 (1×↔2×): 12 sections, steepest transition band.
#[allow(clippy::excessive_precision)]
#[rustfmt::skip]
pub static COEFS_2X: [f32; 12] = [
    0.036681502163648017, 0.13654762463195794, 0.27463175937945444, 0.42313861743656711,
    0.56109869787919531,  0.67754004997416184, 0.76974183386322703, 0.83988962484963892,
    0.89226081800387902,  0.9315419599631839,  0.96209454837808417, 0.98781637073289585,
];

/// Stage 1 (2×↔4×): 4 sections.
#[allow(clippy::excessive_precision)]
#[rustfmt::skip]
pub static COEFS_4X: [f32; 4] = [
    0.041893991997656171, 0.16890348243995201, 0.39056077292116603, 0.74389574826847926,
];

/// Stage 2 (4×↔8×): 3 sections.
#[allow(clippy::excessive_precision)]
#[rustfmt::skip]
pub static COEFS_8X: [f32; 3] = [
    0.055748680811302048, 0.24305119574153072, 0.64669913119268196,
];

/// Stage 3 (8×↔16×): 2 sections.
#[allow(clippy::excessive_precision)]
#[rustfmt::skip]
pub static COEFS_16X: [f32; 2] = [
    0.10717745346023573, 0.53091435354504557,
];

/// Returns the coefficient table for a stage index.
///
/// Index 0 is the stage adjacent to the original rate (1×↔2×); index 3 is the
/// outermost (8×↔16×). Indices past 3 reuse the outermost table.
#[inline]
pub fn stage_coefficients(index: usize) -> &'static [f32] {
    match index {
        0 => &COEFS_2X,
        1 => &COEFS_4X,
        2 => &COEFS_8X,
        _ => &COEFS_16X,
    }
}

/// Common contract of the up- and downsampling stages.
pub trait FilterStage {
    /// Converts `src` into `dst`.
    ///
    /// Upsamplers consume `src.len()` samples and write `2 × src.len()`;
    /// downsamplers consume `2 × dst.len()` samples and write `dst.len()`.
    /// Callers size both slices; no bounds are checked beyond debug builds.
    fn process_block(&mut self, dst: &mut [f32], src: &[f32]);

    /// Resets the filter history to the zero state.
    fn clear_buffers(&mut self);

    /// Number of allpass sections (both paths together).
    fn sections(&self) -> usize;
}

/// Two-path allpass bank with per-section history.
#[derive(Debug, Clone)]
struct AllpassBank {
    coefs: &'static [f32],
    x: [f32; MAX_SECTIONS],
    y: [f32; MAX_SECTIONS],
}

impl AllpassBank {
    fn new(coefs: &'static [f32]) -> Self {
        debug_assert!(coefs.len() <= MAX_SECTIONS);
        Self {
            coefs,
            x: [0.0; MAX_SECTIONS],
            y: [0.0; MAX_SECTIONS],
        }
    }

    /// Advances both paths by one low-rate sample.
    #[inline]
    fn run(&mut self, mut path0: f32, mut path1: f32) -> (f32, f32) {
        for (i, &a) in self.coefs.iter().enumerate() {
            let spl = if i & 1 == 0 { &mut path0 } else { &mut path1 };
            let out = (*spl - self.y[i]) * a + self.x[i];
            self.x[i] = *spl;
            self.y[i] = out;
            *spl = out;
        }
        (path0, path1)
    }

    fn clear(&mut self) {
        self.x = [0.0; MAX_SECTIONS];
        self.y = [0.0; MAX_SECTIONS];
    }
}

/// 2× upsampling stage.
///
/// # Example
///
/// ```rust
/// use halfband_core::{FilterStage, Upsampler2x, COEFS_2X};
///
/// let mut up = Upsampler2x::new(&COEFS_2X);
/// let input = [1.0_f32; 64];
/// let mut output = [0.0_f32; 128];
/// up.process_block(&mut output, &input);
/// ```
#[derive(Debug, Clone)]
pub struct Upsampler2x {
    bank: AllpassBank,
}

impl Upsampler2x {
    /// Creates an upsampler over a static coefficient table.
    pub fn new(coefs: &'static [f32]) -> Self {
        Self {
            bank: AllpassBank::new(coefs),
        }
    }

    /// Converts one input sample into two output samples.
    #[inline]
    pub fn process_sample(&mut self, input: f32) -> [f32; 2] {
        let (even, odd) = self.bank.run(input, input);
        [even, odd]
    }
}

impl FilterStage for Upsampler2x {
    fn process_block(&mut self, dst: &mut [f32], src: &[f32]) {
        debug_assert!(dst.len() >= 2 * src.len());
        for (pair, &input) in dst.chunks_exact_mut(2).zip(src) {
            let [even, odd] = self.process_sample(input);
            pair[0] = even;
            pair[1] = odd;
        }
    }

    fn clear_buffers(&mut self) {
        self.bank.clear();
    }

    fn sections(&self) -> usize {
        self.bank.coefs.len()
    }
}

/// 2× downsampling stage.
#[derive(Debug, Clone)]
pub struct Downsampler2x {
    bank: AllpassBank,
}

impl Downsampler2x {
    /// Creates a downsampler over a static coefficient table.
    pub fn new(coefs: &'static [f32]) -> Self {
        Self {
            bank: AllpassBank::new(coefs),
        }
    }

    /// Converts two consecutive input samples into one output sample.
    #[inline]
    pub fn process_sample(&mut self, pair: [f32; 2]) -> f32 {
        let (a, b) = self.bank.run(pair[1], pair[0]);
        0.5 * (a + b)
    }
}

impl FilterStage for Downsampler2x {
    fn process_block(&mut self, dst: &mut [f32], src: &[f32]) {
        debug_assert!(src.len() >= 2 * dst.len());
        for (out, pair) in dst.iter_mut().zip(src.chunks_exact(2)) {
            *out = self.process_sample([pair[0], pair[1]]);
        }
    }

    fn clear_buffers(&mut self) {
        self.bank.clear();
    }

    fn sections(&self) -> usize {
        self.bank.coefs.len()
    }
}
