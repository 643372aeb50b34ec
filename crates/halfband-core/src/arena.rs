//! Pre-allocated scratch memory for the conversion chains.
//!
//! The [`WorkArena`] owns one lane per input channel and one lane per output
//! channel. A lane holds `2 × factor × max_segment_frames` samples and is
//! split into two halves of `factor × max_segment_frames`. Conversion stages
//! ping-pong between the halves: a stage reads the *current* half, writes the
//! other one, then the roles swap by toggling an index. Nothing is moved or
//! reallocated after construction.

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::error::EngineError;

/// Index of a lane half, toggled after every stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Half(u8);

impl Half {
    /// The first half of a lane.
    pub const FRONT: Self = Self(0);
    /// The second half of a lane.
    pub const BACK: Self = Self(1);

    /// Returns the other half.
    #[inline]
    pub const fn swap(self) -> Self {
        Self(self.0 ^ 1)
    }

    /// Offset of this half inside a lane whose halves hold `half_len` samples.
    #[inline]
    pub const fn offset(self, half_len: usize) -> usize {
        self.0 as usize * half_len
    }
}

/// Splits a lane into `(current, other)` for one ping-pong step.
///
/// `current` is read by the stage and `other` receives its output.
#[inline]
pub fn ping_pong(lane: &mut [f32], current: Half) -> (&[f32], &mut [f32]) {
    let half_len = lane.len() / 2;
    let (front, back) = lane.split_at_mut(half_len);
    if current == Half::FRONT {
        (front, back)
    } else {
        (back, front)
    }
}

/// Fixed-size scratch region for every channel's conversion chain.
///
/// Sized once from `(channels × factor × max_segment_frames)`; owned
/// exclusively by the segment driver.
#[derive(Debug, Clone)]
pub struct WorkArena {
    inputs: Vec<f32>,
    outputs: Vec<f32>,
    lane_len: usize,
}

impl WorkArena {
    /// Allocates lanes for `num_inputs + num_outputs` channels.
    ///
    /// A `factor` of 1 needs no scratch and allocates nothing. Fails with
    /// [`EngineError::SegmentTooLong`] when the arena size overflows.
    pub fn new(
        num_inputs: usize,
        num_outputs: usize,
        factor: usize,
        max_segment_frames: usize,
    ) -> Result<Self, EngineError> {
        let too_long = EngineError::SegmentTooLong(max_segment_frames);
        let lane_len = Self::lane_len_for(factor, max_segment_frames).ok_or(too_long)?;
        let input_len = num_inputs.checked_mul(lane_len).ok_or(too_long)?;
        let output_len = num_outputs.checked_mul(lane_len).ok_or(too_long)?;
        input_len
            .checked_add(output_len)
            .and_then(|total| total.checked_mul(core::mem::size_of::<f32>()))
            .filter(|&bytes| bytes <= isize::MAX as usize)
            .ok_or(too_long)?;

        Ok(Self {
            inputs: vec![0.0; input_len],
            outputs: vec![0.0; output_len],
            lane_len,
        })
    }

    /// Lane length for `factor` and `max_segment_frames`, or `None` on overflow.
    pub fn lane_len_for(factor: usize, max_segment_frames: usize) -> Option<usize> {
        if factor > 1 {
            factor.checked_mul(max_segment_frames)?.checked_mul(2)
        } else {
            Some(0)
        }
    }

    /// Samples per lane (both halves).
    #[inline]
    pub fn lane_len(&self) -> usize {
        self.lane_len
    }

    /// Samples per lane half.
    #[inline]
    pub fn half_len(&self) -> usize {
        self.lane_len / 2
    }

    /// Total number of samples held by the arena.
    pub fn len(&self) -> usize {
        self.inputs.len() + self.outputs.len()
    }

    /// Returns `true` if the arena holds no scratch memory.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the lane of input channel `channel`.
    ///
    /// # Panics
    ///
    /// Panics if `channel` is not an input channel of this arena.
    pub fn input_lane_mut(&mut self, channel: usize) -> &mut [f32] {
        let start = channel * self.lane_len;
        &mut self.inputs[start..start + self.lane_len]
    }

    /// Returns the lane of output channel `channel`.
    ///
    /// # Panics
    ///
    /// Panics if `channel` is not an output channel of this arena.
    pub fn output_lane_mut(&mut self, channel: usize) -> &mut [f32] {
        let start = channel * self.lane_len;
        &mut self.outputs[start..start + self.lane_len]
    }

    /// Borrows the input and output regions at the same time.
    ///
    /// Each region is the concatenation of its channels' lanes.
    #[inline]
    pub fn regions_mut(&mut self) -> (&mut [f32], &mut [f32]) {
        (&mut self.inputs, &mut self.outputs)
    }

    /// Zeroes every lane.
    pub fn clear(&mut self) {
        self.inputs.fill(0.0);
        self.outputs.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sized_from_channels_factor_and_segment() {
        let arena = WorkArena::new(2, 3, 4, 512).expect("arena fits");
        assert_eq!(arena.lane_len(), 2 * 4 * 512);
        assert_eq!(arena.half_len(), 4 * 512);
        assert_eq!(arena.len(), 5 * 2 * 4 * 512);
    }

    #[test]
    fn bypass_factor_allocates_nothing() {
        let arena = WorkArena::new(2, 2, 1, 512).expect("arena fits");
        assert!(arena.is_empty());
        assert_eq!(arena.lane_len(), 0);
    }

    #[test]
    fn oversized_segment_rejected() {
        let err = WorkArena::new(1, 1, 16, usize::MAX / 8).unwrap_err();
        assert_eq!(err, EngineError::SegmentTooLong(usize::MAX / 8));
        assert!(WorkArena::new(32, 32, 2, usize::MAX / 64).is_err());
        assert_eq!(WorkArena::lane_len_for(16, usize::MAX), None);
        assert_eq!(WorkArena::lane_len_for(1, usize::MAX), Some(0));
        assert!(WorkArena::new(2, 2, 1, usize::MAX).is_ok());
    }

    #[test]
    fn lanes_are_disjoint() {
        let mut arena = WorkArena::new(2, 1, 2, 4).expect("arena fits");
        arena.input_lane_mut(0).fill(1.0);
        arena.input_lane_mut(1).fill(2.0);
        arena.output_lane_mut(0).fill(3.0);
        let (inputs, outputs) = arena.regions_mut();
        assert!(inputs[..16].iter().all(|&s| s == 1.0));
        assert!(inputs[16..].iter().all(|&s| s == 2.0));
        assert!(outputs.iter().all(|&s| s == 3.0));
    }

    #[test]
    fn ping_pong_toggles_halves() {
        let mut lane = [0.0_f32, 1.0, 2.0, 3.0, 4.0, 5.0];
        let current = Half::FRONT;
        {
            let (src, dst) = ping_pong(&mut lane, current);
            assert_eq!(src, &[0.0, 1.0, 2.0]);
            dst[0] = 9.0;
        }
        assert_eq!(lane[3], 9.0);

        let current = current.swap();
        assert_eq!(current, Half::BACK);
        let (src, dst) = ping_pong(&mut lane, current);
        assert_eq!(src, &[9.0, 4.0, 5.0]);
        assert_eq!(dst.len(), 3);
        assert_eq!(current.swap(), Half::FRONT);
        assert_eq!(Half::BACK.offset(3), 3);
    }

    #[test]
    fn clear_zeroes_everything() {
        let mut arena = WorkArena::new(1, 1, 8, 16).expect("arena fits");
        arena.input_lane_mut(0).fill(0.5);
        arena.output_lane_mut(0).fill(-0.5);
        arena.clear();
        let (inputs, outputs) = arena.regions_mut();
        assert!(inputs.iter().chain(outputs.iter()).all(|&s| s == 0.0));
    }
}
