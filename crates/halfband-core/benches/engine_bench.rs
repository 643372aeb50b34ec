//! Criterion benchmarks for the halfband-core engine
//!
//! Run with: cargo bench -p halfband-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use halfband_core::{
    Downsampler2x, Engine, EngineConfig, FilterStage, InnerProcessor, OversamplingFactor,
    ParamBinding, Upsampler2x, stage_coefficients,
};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

/// Stereo tanh stage; cheap enough that conversion cost dominates.
#[derive(Default)]
struct Tanh;

impl InnerProcessor for Tanh {
    const INPUTS: usize = 2;
    const OUTPUTS: usize = 2;

    fn instance_constants(&mut self, _sample_rate: f32) {}

    fn instance_clear(&mut self) {}

    fn compute(&mut self, frames: usize, inputs: &[&[f32]], outputs: &mut [&mut [f32]]) {
        for (input, output) in inputs.iter().zip(outputs.iter_mut()) {
            for (o, &i) in output[..frames].iter_mut().zip(&input[..frames]) {
                *o = (i * 3.0).tanh();
            }
        }
    }

    fn parameters() -> &'static [ParamBinding<Self>] {
        &[]
    }
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("Stage");

    for stage in 0..4 {
        let input = generate_test_signal(512);
        let mut wide = vec![0.0_f32; 1024];
        let mut narrow = vec![0.0_f32; 512];
        let sections = stage_coefficients(stage).len();

        group.bench_with_input(
            BenchmarkId::new("up_down", format!("{sections}_sections")),
            &stage,
            |b, &stage| {
                let mut up = Upsampler2x::new(stage_coefficients(stage));
                let mut down = Downsampler2x::new(stage_coefficients(stage));
                b.iter(|| {
                    up.process_block(&mut wide, black_box(&input));
                    down.process_block(&mut narrow, &wide);
                    black_box(&narrow);
                });
            },
        );
    }

    group.finish();
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("Engine");

    for factor in OversamplingFactor::ALL {
        for &block_size in BLOCK_SIZES {
            let left = generate_test_signal(block_size);
            let right = generate_test_signal(block_size);
            let mut out_l = vec![0.0_f32; block_size];
            let mut out_r = vec![0.0_f32; block_size];

            group.bench_with_input(
                BenchmarkId::new(format!("process_{factor}"), block_size),
                &block_size,
                |b, &block_size| {
                    let config = EngineConfig::for_processor::<Tanh>(factor);
                    let mut engine = Engine::<Tanh>::new(config).expect("valid config");
                    engine.init(SAMPLE_RATE);
                    b.iter(|| {
                        engine.process(
                            &[black_box(&left), black_box(&right)],
                            &mut [&mut out_l, &mut out_r],
                            block_size,
                        );
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_stages, bench_engine);
criterion_main!(benches);
