//! Per-channel cascades of 2× stages.
//!
//! An [`UpsamplerChain`] raises one channel from the host rate to the
//! oversampled rate; a [`DownsamplerChain`] brings one channel back. Both run
//! entirely inside a [`WorkArena`](crate::WorkArena) lane, ping-ponging
//! between its two halves.
//!
//! ```text
//! up   (4×):  src ──[1×→2×]──▶ front ──[2×→4×]──▶ back            (result: back)
//! down (4×):  front ──[4×→2×]──▶ back ──[2×→1×]──▶ dst
//! ```

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::arena::{Half, ping_pong};
use crate::factor::OversamplingFactor;
use crate::stage::{Downsampler2x, FilterStage, Upsampler2x, stage_coefficients};

/// Cascade of upsampling stages for one channel.
///
/// Stage `i` converts `2^i × frames` samples into `2^(i+1) × frames`; stage 0
/// sits against the host rate and carries the steepest coefficient table.
#[derive(Debug, Clone)]
pub struct UpsamplerChain {
    stages: Vec<Upsampler2x>,
}

impl UpsamplerChain {
    /// Builds `log2(factor)` stages, innermost first.
    pub fn new(factor: OversamplingFactor) -> Self {
        let stages = (0..factor.stage_count())
            .map(|i| Upsampler2x::new(stage_coefficients(i)))
            .collect();
        Self { stages }
    }

    /// Number of cascaded stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns `true` for the pass-through chain.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Upsamples `src` into `lane`.
    ///
    /// Returns the lane half that holds the `factor × src.len()` converted
    /// samples, starting at that half's first sample. The lane must hold at
    /// least `2 × factor × src.len()` samples.
    pub fn process(&mut self, lane: &mut [f32], src: &[f32]) -> Half {
        let frames = src.len();
        let half_len = lane.len() / 2;
        let Some((first, rest)) = self.stages.split_first_mut() else {
            lane[..frames].copy_from_slice(src);
            return Half::FRONT;
        };

        first.process_block(&mut lane[..2 * frames], src);
        let mut current = Half::FRONT;
        for (i, stage) in rest.iter_mut().enumerate() {
            let n = frames << (i + 1);
            debug_assert!(2 * n <= half_len);
            let (from, to) = ping_pong(lane, current);
            stage.process_block(&mut to[..2 * n], &from[..n]);
            current = current.swap();
        }
        current
    }

    /// Resets every stage to the zero state.
    pub fn clear_buffers(&mut self) {
        for stage in &mut self.stages {
            stage.clear_buffers();
        }
    }
}

/// Cascade of downsampling stages for one channel.
///
/// Stored in processing order: the stage at the highest rate comes first and
/// the one landing on the host rate comes last.
#[derive(Debug, Clone)]
pub struct DownsamplerChain {
    stages: Vec<Downsampler2x>,
}

impl DownsamplerChain {
    /// Builds `log2(factor)` stages, outermost first.
    pub fn new(factor: OversamplingFactor) -> Self {
        let stages = (0..factor.stage_count())
            .rev()
            .map(|i| Downsampler2x::new(stage_coefficients(i)))
            .collect();
        Self { stages }
    }

    /// Number of cascaded stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns `true` for the pass-through chain.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Downsamples the lane half `current` into `dst`.
    ///
    /// The half must start with `factor × dst.len()` oversampled samples. The
    /// other half is used as scratch; the final stage writes `dst` directly.
    pub fn process(&mut self, lane: &mut [f32], current: Half, dst: &mut [f32]) {
        let frames = dst.len();
        let half_len = lane.len() / 2;
        let Some((last, rest)) = self.stages.split_last_mut() else {
            let start = current.offset(half_len);
            dst.copy_from_slice(&lane[start..start + frames]);
            return;
        };

        let mut current = current;
        let total = frames << (rest.len() + 1);
        for (i, stage) in rest.iter_mut().enumerate() {
            let n = total >> (i + 1);
            let (from, to) = ping_pong(lane, current);
            stage.process_block(&mut to[..n], &from[..2 * n]);
            current = current.swap();
        }

        let start = current.offset(half_len);
        last.process_block(dst, &lane[start..start + 2 * frames]);
    }

    /// Resets every stage to the zero state.
    pub fn clear_buffers(&mut self) {
        for stage in &mut self.stages {
            stage.clear_buffers();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "std"))]
    use alloc::vec;

    fn round_trip(factor: OversamplingFactor, input: &[f32]) -> Vec<f32> {
        let n = factor.multiplier();
        let mut up = UpsamplerChain::new(factor);
        let mut down = DownsamplerChain::new(factor);
        let mut up_lane = vec![0.0_f32; 2 * n * input.len()];
        let mut down_lane = vec![0.0_f32; 2 * n * input.len()];
        let mut out = vec![0.0_f32; input.len()];

        let half = up.process(&mut up_lane, input);
        let start = half.offset(up_lane.len() / 2);
        down_lane[..n * input.len()].copy_from_slice(&up_lane[start..start + n * input.len()]);
        down.process(&mut down_lane, Half::FRONT, &mut out);
        out
    }

    #[test]
    fn stage_count_matches_factor() {
        for factor in OversamplingFactor::ALL {
            assert_eq!(UpsamplerChain::new(factor).len(), factor.stage_count());
            assert_eq!(DownsamplerChain::new(factor).len(), factor.stage_count());
        }
        assert!(UpsamplerChain::new(OversamplingFactor::X1).is_empty());
    }

    #[test]
    fn downsampler_order_is_mirrored() {
        let down = DownsamplerChain::new(OversamplingFactor::X16);
        let sections: Vec<usize> = down.stages.iter().map(FilterStage::sections).collect();
        assert_eq!(sections, [2, 3, 4, 12]);

        let up = UpsamplerChain::new(OversamplingFactor::X16);
        let sections: Vec<usize> = up.stages.iter().map(FilterStage::sections).collect();
        assert_eq!(sections, [12, 4, 3, 2]);
    }

    #[test]
    fn result_half_alternates_with_stage_count() {
        let input = [0.0_f32; 8];
        let expect = [
            (OversamplingFactor::X2, Half::FRONT),
            (OversamplingFactor::X4, Half::BACK),
            (OversamplingFactor::X8, Half::FRONT),
            (OversamplingFactor::X16, Half::BACK),
        ];
        for (factor, half) in expect {
            let mut chain = UpsamplerChain::new(factor);
            let mut lane = vec![0.0_f32; 2 * factor.multiplier() * input.len()];
            assert_eq!(chain.process(&mut lane, &input), half, "{factor}");
        }
    }

    #[test]
    fn dc_survives_round_trip() {
        let input = vec![0.75_f32; 2048];
        for factor in OversamplingFactor::ALL {
            let out = round_trip(factor, &input);
            for &s in &out[1500..] {
                assert!((s - 0.75).abs() < 1e-3, "{factor}: DC drifted to {s}");
            }
        }
    }

    #[test]
    fn bypass_chain_copies() {
        let input: Vec<f32> = (0..16).map(|i| i as f32).collect();
        assert_eq!(round_trip(OversamplingFactor::X1, &input), input);
    }

    #[test]
    fn clear_buffers_silences_tail() {
        let mut up = UpsamplerChain::new(OversamplingFactor::X8);
        let mut lane = vec![0.0_f32; 2 * 8 * 64];
        let burst = vec![1.0_f32; 64];
        up.process(&mut lane, &burst);
        up.clear_buffers();

        let half = up.process(&mut lane, &[0.0; 64]);
        let start = half.offset(lane.len() / 2);
        assert!(lane[start..start + 8 * 64].iter().all(|&s| s == 0.0));
    }
}
