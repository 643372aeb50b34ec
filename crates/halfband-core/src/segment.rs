//! Bounded-segment driver: upsample, compute, downsample.
//!
//! The [`SegmentDriver`] owns every channel's conversion chains and the
//! [`WorkArena`] they run in. A call of any length is cut into segments of at
//! most `max_segment_frames` host frames; each segment goes through
//!
//! ```text
//! input[c] ─▶ UpsamplerChain[c] ─▶ arena ─▶ compute(factor × seg) ─▶ arena ─▶ DownsamplerChain[c] ─▶ output[c]
//! ```
//!
//! Filter state lives in the stages and survives segment boundaries and
//! separate calls, so splitting a signal into blocks never changes the result.
//! With a factor of 1 the driver calls `compute` once on the caller's buffers,
//! without conversion and without a segment limit.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::marker::PhantomData;

use crate::arena::{Half, WorkArena};
use crate::chain::{DownsamplerChain, UpsamplerChain};
use crate::error::{ChannelSide, EngineError};
use crate::factor::OversamplingFactor;
use crate::processor::{InnerProcessor, MAX_CHANNELS};

/// Drives processors of type `P` through per-segment rate conversion.
pub struct SegmentDriver<P: InnerProcessor> {
    factor: OversamplingFactor,
    max_segment_frames: usize,
    up: Vec<UpsamplerChain>,
    down: Vec<DownsamplerChain>,
    arena: WorkArena,
    _processor: PhantomData<fn() -> P>,
}

impl<P: InnerProcessor> SegmentDriver<P> {
    /// Allocates chains and scratch for the channel layout of `P`.
    ///
    /// All memory the driver will ever use is allocated here.
    pub fn new(
        factor: OversamplingFactor,
        max_segment_frames: usize,
    ) -> Result<Self, EngineError> {
        for (side, count) in [
            (ChannelSide::Input, P::INPUTS),
            (ChannelSide::Output, P::OUTPUTS),
        ] {
            if count > MAX_CHANNELS {
                return Err(EngineError::TooManyChannels { side, count });
            }
        }
        if max_segment_frames == 0 {
            return Err(EngineError::ZeroSegmentLength);
        }

        Ok(Self {
            factor,
            max_segment_frames,
            up: (0..P::INPUTS).map(|_| UpsamplerChain::new(factor)).collect(),
            down: (0..P::OUTPUTS)
                .map(|_| DownsamplerChain::new(factor))
                .collect(),
            arena: WorkArena::new(
                P::INPUTS,
                P::OUTPUTS,
                factor.multiplier(),
                max_segment_frames,
            )?,
            _processor: PhantomData,
        })
    }

    /// Oversampling factor.
    pub fn factor(&self) -> OversamplingFactor {
        self.factor
    }

    /// Largest number of host frames handed to one conversion pass.
    pub fn max_segment_frames(&self) -> usize {
        self.max_segment_frames
    }

    /// Scratch memory owned by the driver.
    pub fn arena(&self) -> &WorkArena {
        &self.arena
    }

    /// Resets every filter history and zeroes the arena.
    pub fn clear(&mut self) {
        for chain in &mut self.up {
            chain.clear_buffers();
        }
        for chain in &mut self.down {
            chain.clear_buffers();
        }
        self.arena.clear();
    }

    /// Processes up to `frames` host frames through `inner`.
    ///
    /// `frames` is reduced to the shortest buffer passed in. With fewer
    /// channel buffers than `P` needs, the outputs are filled with silence
    /// and `inner` is not called.
    pub fn process(
        &mut self,
        inner: &mut P,
        inputs: &[&[f32]],
        outputs: &mut [&mut [f32]],
        frames: usize,
    ) {
        let frames = usable_frames::<P>(inputs, outputs, frames);
        if inputs.len() < P::INPUTS || outputs.len() < P::OUTPUTS {
            silence(outputs, frames);
            return;
        }

        if self.factor.is_bypass() {
            Self::compute_direct(inner, inputs, outputs, frames);
            return;
        }

        let mut offset = 0;
        while offset < frames {
            let segment = (frames - offset).min(self.max_segment_frames);
            self.process_segment(inner, inputs, outputs, offset, segment);
            offset += segment;
        }
    }

    fn compute_direct(
        inner: &mut P,
        inputs: &[&[f32]],
        outputs: &mut [&mut [f32]],
        frames: usize,
    ) {
        let ins: [&[f32]; MAX_CHANNELS] = core::array::from_fn(|c| {
            if c < P::INPUTS {
                &inputs[c][..frames]
            } else {
                &[]
            }
        });
        let mut lanes = outputs.iter_mut().take(P::OUTPUTS);
        let mut outs: [&mut [f32]; MAX_CHANNELS] = core::array::from_fn(|_| match lanes.next() {
            Some(out) => &mut out[..frames],
            None => Default::default(),
        });
        inner.compute(frames, &ins[..P::INPUTS], &mut outs[..P::OUTPUTS]);
    }

    fn process_segment(
        &mut self,
        inner: &mut P,
        inputs: &[&[f32]],
        outputs: &mut [&mut [f32]],
        offset: usize,
        segment: usize,
    ) {
        let oversampled = segment * self.factor.multiplier();
        let lane_len = self.arena.lane_len();
        let half_len = self.arena.half_len();
        let (in_region, out_region) = self.arena.regions_mut();

        let mut halves = [Half::FRONT; MAX_CHANNELS];
        for ((chain, lane), (half, input)) in self
            .up
            .iter_mut()
            .zip(in_region.chunks_exact_mut(lane_len))
            .zip(halves.iter_mut().zip(inputs))
        {
            *half = chain.process(lane, &input[offset..offset + segment]);
        }

        {
            let in_region: &[f32] = in_region;
            let ins: [&[f32]; MAX_CHANNELS] = core::array::from_fn(|c| {
                if c < P::INPUTS {
                    let start = c * lane_len + halves[c].offset(half_len);
                    &in_region[start..start + oversampled]
                } else {
                    &[]
                }
            });
            let mut lanes = out_region.chunks_exact_mut(lane_len).take(P::OUTPUTS);
            let mut outs: [&mut [f32]; MAX_CHANNELS] =
                core::array::from_fn(|_| match lanes.next() {
                    Some(lane) => &mut lane[..oversampled],
                    None => Default::default(),
                });
            inner.compute(oversampled, &ins[..P::INPUTS], &mut outs[..P::OUTPUTS]);
        }

        for ((chain, lane), output) in self
            .down
            .iter_mut()
            .zip(out_region.chunks_exact_mut(lane_len))
            .zip(outputs.iter_mut())
        {
            chain.process(lane, Half::FRONT, &mut output[offset..offset + segment]);
        }
    }
}

impl<P: InnerProcessor> core::fmt::Debug for SegmentDriver<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SegmentDriver")
            .field("factor", &self.factor)
            .field("max_segment_frames", &self.max_segment_frames)
            .field("arena_len", &self.arena.len())
            .finish_non_exhaustive()
    }
}

/// `frames` reduced to the shortest channel buffer `P` reads or writes.
pub(crate) fn usable_frames<P: InnerProcessor>(
    inputs: &[&[f32]],
    outputs: &[&mut [f32]],
    frames: usize,
) -> usize {
    inputs
        .iter()
        .take(P::INPUTS)
        .map(|b| b.len())
        .chain(outputs.iter().take(P::OUTPUTS).map(|b| b.len()))
        .fold(frames, usize::min)
}

/// Zeroes the first `frames` samples of every output.
pub(crate) fn silence(outputs: &mut [&mut [f32]], frames: usize) {
    for out in outputs.iter_mut() {
        let n = frames.min(out.len());
        out[..n].fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param_table::ParamBinding;

    #[cfg(not(feature = "std"))]
    use alloc::{vec, vec::Vec};

    /// Records the frame count of every compute call and copies input to output.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<usize>,
    }

    impl InnerProcessor for Recorder {
        const INPUTS: usize = 2;
        const OUTPUTS: usize = 2;

        fn instance_constants(&mut self, _sample_rate: f32) {}
        fn instance_clear(&mut self) {}

        fn compute(&mut self, frames: usize, inputs: &[&[f32]], outputs: &mut [&mut [f32]]) {
            assert_eq!(inputs.len(), 2);
            assert_eq!(outputs.len(), 2);
            for (input, output) in inputs.iter().zip(outputs.iter_mut()) {
                assert_eq!(input.len(), frames);
                assert_eq!(output.len(), frames);
                output.copy_from_slice(input);
            }
            self.calls.push(frames);
        }

        fn parameters() -> &'static [ParamBinding<Self>] {
            &[]
        }
    }

    fn driver(factor: OversamplingFactor, max_segment_frames: usize) -> SegmentDriver<Recorder> {
        SegmentDriver::new(factor, max_segment_frames).expect("valid driver")
    }

    fn run(
        driver: &mut SegmentDriver<Recorder>,
        inner: &mut Recorder,
        frames: usize,
    ) -> Vec<Vec<f32>> {
        let left: Vec<f32> = (0..frames).map(|i| libm::sinf(i as f32 * 0.01)).collect();
        let right = vec![0.25_f32; frames];
        let mut out_l = vec![0.0_f32; frames];
        let mut out_r = vec![0.0_f32; frames];
        {
            let mut outputs: [&mut [f32]; 2] = [&mut out_l, &mut out_r];
            driver.process(inner, &[&left, &right], &mut outputs, frames);
        }
        vec![out_l, out_r]
    }

    /// Declares more inputs than an engine supports.
    struct Wide;

    impl InnerProcessor for Wide {
        const INPUTS: usize = MAX_CHANNELS + 1;
        const OUTPUTS: usize = 1;

        fn instance_constants(&mut self, _sample_rate: f32) {}
        fn instance_clear(&mut self) {}
        fn compute(&mut self, _frames: usize, _inputs: &[&[f32]], _outputs: &mut [&mut [f32]]) {}

        fn parameters() -> &'static [ParamBinding<Self>] {
            &[]
        }
    }

    #[test]
    fn construction_validates_layout_and_cap() {
        assert_eq!(
            SegmentDriver::<Wide>::new(OversamplingFactor::X2, 64).unwrap_err(),
            EngineError::TooManyChannels {
                side: ChannelSide::Input,
                count: MAX_CHANNELS + 1,
            }
        );
        assert_eq!(
            SegmentDriver::<Recorder>::new(OversamplingFactor::X2, 0).unwrap_err(),
            EngineError::ZeroSegmentLength
        );
        assert_eq!(
            SegmentDriver::<Recorder>::new(OversamplingFactor::X16, usize::MAX / 4)
                .unwrap_err(),
            EngineError::SegmentTooLong(usize::MAX / 4)
        );
    }

    #[test]
    fn too_few_buffers_yield_silence() {
        let mut driver = driver(OversamplingFactor::X2, 16);
        let mut inner = Recorder::default();
        let input = [0.5_f32; 32];
        let mut out_l = [7.0_f32; 32];
        let mut out_r = [7.0_f32; 32];

        driver.process(&mut inner, &[&input], &mut [&mut out_l, &mut out_r], 32);
        assert!(inner.calls.is_empty());
        assert!(out_l.iter().chain(out_r.iter()).all(|&s| s == 0.0));

        driver.process(&mut inner, &[&input, &input], &mut [&mut out_l], 32);
        assert!(inner.calls.is_empty());
        assert!(out_l.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn frames_reduced_to_shortest_buffer() {
        let mut driver = driver(OversamplingFactor::X4, 512);
        let mut inner = Recorder::default();
        let left = [0.5_f32; 40];
        let right = [0.5_f32; 24];
        let mut out_l = [0.0_f32; 40];
        let mut out_r = [0.0_f32; 40];
        let mut outputs: [&mut [f32]; 2] = [&mut out_l, &mut out_r];
        driver.process(&mut inner, &[&left, &right], &mut outputs, 100);
        assert_eq!(inner.calls, [96]);
    }

    #[test]
    fn segments_are_capped() {
        let mut driver = driver(OversamplingFactor::X4, 512);
        let mut inner = Recorder::default();
        run(&mut driver, &mut inner, 1000);
        assert_eq!(inner.calls, [2048, 1952]);
    }

    #[test]
    fn exact_multiple_of_segment() {
        let mut driver = driver(OversamplingFactor::X2, 64);
        let mut inner = Recorder::default();
        run(&mut driver, &mut inner, 192);
        assert_eq!(inner.calls, [128, 128, 128]);
    }

    #[test]
    fn bypass_has_no_segment_limit() {
        let mut driver = driver(OversamplingFactor::X1, 16);
        let mut inner = Recorder::default();
        let out = run(&mut driver, &mut inner, 1000);
        assert_eq!(inner.calls, [1000]);
        assert!(driver.arena().is_empty());
        assert!(out[1].iter().all(|&s| s == 0.25));
    }

    #[test]
    fn zero_frames_is_a_no_op() {
        let mut driver = driver(OversamplingFactor::X8, 32);
        let mut inner = Recorder::default();
        run(&mut driver, &mut inner, 0);
        assert!(inner.calls.is_empty());
    }

    #[test]
    fn identity_inner_passes_dc() {
        let mut driver = driver(OversamplingFactor::X16, 128);
        let mut inner = Recorder::default();
        let out = run(&mut driver, &mut inner, 4096);
        for &s in &out[1][3000..] {
            assert!((s - 0.25).abs() < 1e-3, "DC drifted to {s}");
        }
    }

    #[test]
    fn clear_resets_chains() {
        let mut driver = driver(OversamplingFactor::X4, 256);
        let mut inner = Recorder::default();
        run(&mut driver, &mut inner, 700);
        driver.clear();

        let zeros = vec![0.0_f32; 300];
        let mut out_l = vec![1.0_f32; 300];
        let mut out_r = vec![1.0_f32; 300];
        let mut outputs: [&mut [f32]; 2] = [&mut out_l, &mut out_r];
        driver.process(&mut inner, &[&zeros, &zeros], &mut outputs, 300);
        assert!(out_l.iter().chain(out_r.iter()).all(|&s| s == 0.0));
    }
}
