//! Stereo tanh saturator.
//!
//! Each channel is driven into `tanh` with a bias that shifts the curve
//! and adds even harmonics. The static offset the bias creates is
//! subtracted, and a DC blocker removes what is left.
//!
//! ```text
//! y = level * dc_block(tanh(drive * x + bias) - tanh(bias))
//! ```

use halfband_core::{InnerProcessor, ParamBinding, ParamDescriptor, ScaleKind, parameters};
use libm::{powf, tanhf};

use crate::filters::DcBlocker;

/// Stereo saturator with drive, bias and output level.
#[derive(Debug, Clone, Default)]
pub struct Saturator {
    drive: f32,
    bias: f32,
    level_db: f32,
    dc: [DcBlocker; 2],
}

parameters! {
    /// Named accessors for [`Saturator`] engines.
    Saturator: SaturatorParams {
        drive as drive => ParamDescriptor::slider("Drive", 4.0, 1.0, 50.0, 0.01)
            .with_scale(ScaleKind::Log)
            .with_tooltip("Input gain into the tanh curve"),
        bias as bias => ParamDescriptor::slider("Bias", 0.0, -1.0, 1.0, 0.01)
            .with_tooltip("Curve offset; adds even harmonics"),
        level_db as level => ParamDescriptor::slider("Level", -6.0, -48.0, 12.0, 0.1)
            .with_unit("dB")
            .with_short_label("Lvl"),
    }
}

impl InnerProcessor for Saturator {
    const INPUTS: usize = 2;
    const OUTPUTS: usize = 2;

    fn instance_constants(&mut self, sample_rate: f32) {
        for dc in &mut self.dc {
            dc.set_sample_rate(sample_rate);
        }
    }

    fn instance_clear(&mut self) {
        for dc in &mut self.dc {
            dc.reset();
        }
    }

    fn compute(&mut self, frames: usize, inputs: &[&[f32]], outputs: &mut [&mut [f32]]) {
        let gain = powf(10.0, self.level_db / 20.0);
        let offset = tanhf(self.bias);

        for ((input, output), dc) in inputs.iter().zip(outputs.iter_mut()).zip(&mut self.dc) {
            for (o, &x) in output[..frames].iter_mut().zip(&input[..frames]) {
                let shaped = tanhf(self.drive * x + self.bias) - offset;
                *o = gain * dc.process(shaped);
            }
        }
    }

    fn parameters() -> &'static [ParamBinding<Self>] {
        Self::PARAMETERS
    }
}
