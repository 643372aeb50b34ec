//! File-based processing command.

use super::common::{linear_to_db, parse_factor, parse_param, peak, rms};
use crate::wav::{Audio, read_wav, write_wav};
use anyhow::Context;
use clap::{Args, ValueEnum};
use halfband_core::{Engine, EngineConfig, InnerProcessor, InnerRate, OversamplingFactor};
use halfband_dsp::{MonoPassthrough, ProcessorKind, Saturator, StereoPassthrough, Wavefolder};
use halfband_meta::Manifest;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

/// Rate the processor's constants are computed for
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum CliInnerRate {
    /// The file's sample rate
    #[default]
    Host,
    /// The file's sample rate times the oversampling factor
    Oversampled,
}

impl From<CliInnerRate> for InnerRate {
    fn from(rate: CliInnerRate) -> Self {
        match rate {
            CliInnerRate::Host => InnerRate::Host,
            CliInnerRate::Oversampled => InnerRate::Oversampled,
        }
    }
}

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Processor to run
    #[arg(short, long)]
    processor: ProcessorKind,

    /// Oversampling factor (1, 2, 4, 8 or 16)
    #[arg(short, long, default_value = "4", value_parser = parse_factor)]
    factor: OversamplingFactor,

    /// Largest segment converted in one pass, in host frames
    #[arg(long, default_value_t = EngineConfig::DEFAULT_MAX_SEGMENT_FRAMES)]
    max_frames: usize,

    /// Rate handed to the processor at init
    #[arg(long, value_enum, default_value = "host")]
    inner_rate: CliInnerRate,

    /// Manifest supplying factor and segment cap; must match the processor
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Host block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Parameter values by symbol (e.g. "drive=8")
    #[arg(long, value_parser = parse_param, number_of_values = 1)]
    param: Vec<(String, f32)>,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if args.block_size == 0 {
        anyhow::bail!("block size must be at least 1");
    }

    println!("Reading {}...", args.input.display());
    let input = read_wav(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    println!(
        "  {} frames, {} channel(s), {} Hz, {:.2}s",
        input.frames(),
        input.channels.len(),
        input.sample_rate,
        input.frames() as f32 / input.sample_rate as f32
    );

    let output = match args.processor {
        ProcessorKind::Passthrough => render::<MonoPassthrough>(&args, &input)?,
        ProcessorKind::StereoPassthrough => render::<StereoPassthrough>(&args, &input)?,
        ProcessorKind::Saturator => render::<Saturator>(&args, &input)?,
        ProcessorKind::Wavefolder => render::<Wavefolder>(&args, &input)?,
    };

    let input_all: Vec<f32> = input.channels.concat();
    let output_all: Vec<f32> = output.channels.concat();
    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&input_all)),
        linear_to_db(peak(&input_all))
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&output_all)),
        linear_to_db(peak(&output_all))
    );

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &output, args.bit_depth)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("Done!");

    Ok(())
}

fn engine_config<P: InnerProcessor>(args: &ProcessArgs) -> anyhow::Result<EngineConfig> {
    let Some(path) = &args.manifest else {
        return Ok(EngineConfig::for_processor::<P>(args.factor)
            .with_max_segment_frames(args.max_frames));
    };

    let meta = Manifest::load(path)?.interpret()?;
    meta.check_processor::<P>()?;
    tracing::info!(
        manifest = %meta.name,
        factor = meta.factor.multiplier(),
        max_frames = meta.max_segment_frames,
        "using manifest configuration"
    );
    Ok(meta.engine_config())
}

fn render<P: InnerProcessor + Default>(
    args: &ProcessArgs,
    input: &Audio,
) -> anyhow::Result<Audio> {
    let config = engine_config::<P>(args)?.with_inner_rate(args.inner_rate.into());
    let mut engine = Engine::<P>::new(config)?;
    engine.init(input.sample_rate as f32);

    for (symbol, value) in &args.param {
        let Some(index) = engine.find_parameter(symbol) else {
            let known: Vec<&str> = engine.table().descriptors().map(|d| d.symbol).collect();
            anyhow::bail!(
                "unknown parameter '{symbol}' for {} (available: {})",
                args.processor,
                known.join(", ")
            );
        };
        engine.set_parameter(index, *value);
        tracing::debug!(symbol = %symbol, value, index, "parameter set");
    }

    println!(
        "Processing with {} at {}x ({} Hz internal, tuned for {} Hz)...",
        args.processor,
        config.factor.multiplier(),
        engine.oversampled_rate(),
        engine.processor_rate()
    );

    let frames = input.frames();
    let mut channels = vec![vec![0.0_f32; frames]; P::OUTPUTS];

    let pb = ProgressBar::new(frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let mut start = 0;
    while start < frames {
        let end = (start + args.block_size).min(frames);
        let inputs: Vec<&[f32]> = (0..P::INPUTS)
            .map(|c| &input.channel_or_last(c)[start..end])
            .collect();
        let mut outputs: Vec<&mut [f32]> = channels
            .iter_mut()
            .map(|channel| &mut channel[start..end])
            .collect();
        engine.process(&inputs, &mut outputs, end - start);
        pb.set_position(end as u64);
        start = end;
    }

    pb.finish_with_message("done");

    Ok(Audio {
        channels,
        sample_rate: input.sample_rate,
    })
}
