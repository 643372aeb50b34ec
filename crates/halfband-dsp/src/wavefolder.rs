//! Mono sine wavefolder with a tone filter and a peak meter.
//!
//! The driven input goes through `folds` cascaded `sin(π/2 · x)` stages.
//! Each stage folds the previous one back on itself, so the spectrum gets
//! dense quickly; this is the kind of processor that needs oversampling.
//!
//! Controls:
//!
//! | Symbol   | Widget   | Meaning |
//! |----------|----------|---------|
//! | `drive`  | hslider  | Input gain |
//! | `tone`   | hslider  | One-pole lowpass cutoff (log scale) |
//! | `folds`  | nentry   | Number of fold stages, 1 to 8 |
//! | `bypass` | checkbox | Pass input through |
//! | `reset`  | button   | Clear filter and meter on the next block |

use core::f32::consts::FRAC_PI_2;

use halfband_core::{
    InnerProcessor, ParamBinding, ParamDescriptor, ParamFlags, ScaleKind, parameters,
};
use libm::{expf, sinf};

use crate::filters::OnePole;

/// Release time of the peak meter.
const PEAK_RELEASE_SECONDS: f32 = 0.3;

/// Largest accepted fold count.
pub const MAX_FOLDS: usize = 8;

/// Mono wavefolder.
#[derive(Debug, Clone, Default)]
pub struct Wavefolder {
    drive: f32,
    tone: f32,
    folds: f32,
    bypass: f32,
    reset: f32,
    sample_rate: f32,
    release: f32,
    peak: f32,
    lowpass: OnePole,
}

const METERS: &[ParamDescriptor] =
    &[ParamDescriptor::bargraph("Peak", 0.0, 1.0).with_symbol("peak")];

parameters! {
    /// Named accessors for [`Wavefolder`] engines.
    Wavefolder: WavefolderParams {
        drive as drive => ParamDescriptor::slider("Drive", 2.0, 0.5, 10.0, 0.01),
        tone as tone => ParamDescriptor::slider("Tone", 6000.0, 200.0, 16000.0, 1.0)
            .with_unit("Hz")
            .with_scale(ScaleKind::Log),
        folds as folds => ParamDescriptor::entry("Folds", 2.0, 1.0, 8.0, 1.0)
            .with_short_label("Fld")
            .with_tagged_flags(ParamFlags::INTEGER),
        bypass as bypass => ParamDescriptor::checkbox("Bypass"),
        reset as reset => ParamDescriptor::button("Reset"),
    }
}

impl Wavefolder {
    /// Current peak meter reading.
    pub fn peak(&self) -> f32 {
        self.peak
    }

    /// Rate the processor's constants were computed for.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    #[inline]
    fn fold(&self, x: f32, stages: usize) -> f32 {
        let mut y = x * self.drive;
        for _ in 0..stages {
            y = sinf(FRAC_PI_2 * y);
        }
        y
    }
}

impl InnerProcessor for Wavefolder {
    const INPUTS: usize = 1;
    const OUTPUTS: usize = 1;

    fn instance_constants(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.release = expf(-1.0 / (PEAK_RELEASE_SECONDS * sample_rate));
    }

    fn instance_clear(&mut self) {
        self.lowpass.reset();
        self.peak = 0.0;
    }

    fn compute(&mut self, frames: usize, inputs: &[&[f32]], outputs: &mut [&mut [f32]]) {
        let input = &inputs[0][..frames];
        let output = &mut outputs[0][..frames];

        if self.reset > 0.5 {
            self.instance_clear();
        }

        if self.bypass > 0.5 {
            output.copy_from_slice(input);
        } else {
            // NaN and negative counts fold once
            let stages = (self.folds as usize).clamp(1, MAX_FOLDS);
            self.lowpass.set_cutoff(self.tone, self.sample_rate);
            for (o, &x) in output.iter_mut().zip(input) {
                let folded = self.fold(x, stages);
                *o = self.lowpass.process(folded);
            }
        }

        for &y in output.iter() {
            self.peak = y.abs().max(self.peak * self.release);
        }
    }

    fn parameters() -> &'static [ParamBinding<Self>] {
        Self::PARAMETERS
    }

    fn meters() -> &'static [ParamDescriptor] {
        METERS
    }
}
