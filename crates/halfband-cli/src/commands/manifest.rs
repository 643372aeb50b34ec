//! Manifest validation command.

use super::params::print_table;
use clap::Args;
use halfband_dsp::{MonoPassthrough, ProcessorKind, Saturator, StereoPassthrough, Wavefolder};
use halfband_meta::{Channel, Manifest, ParameterSummary, ProcessorMeta, TagValue};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args)]
pub struct ManifestArgs {
    /// Manifest file (TOML)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Override or add a value (e.g. -D oversampling=8)
    #[arg(short = 'D', value_name = "KEY=VALUE", number_of_values = 1)]
    define: Vec<String>,

    /// Check the manifest against a bundled processor
    #[arg(long, value_name = "PROCESSOR")]
    check: Option<ProcessorKind>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ChannelListing<'a> {
    name: &'a str,
    tags: Vec<(&'a str, TagValue)>,
}

impl<'a> ChannelListing<'a> {
    fn new(channel: &'a Channel) -> Self {
        Self {
            name: &channel.name,
            tags: channel.tags.typed().collect(),
        }
    }
}

#[derive(Serialize)]
struct ManifestListing<'a> {
    name: &'a str,
    author: &'a str,
    copyright: &'a str,
    license: &'a str,
    version: &'a str,
    identifier: &'a str,
    oversampling: usize,
    max_frames: usize,
    inputs: Vec<ChannelListing<'a>>,
    outputs: Vec<ChannelListing<'a>>,
    meta: &'a [(String, TagValue)],
    defines: &'a [(String, TagValue)],
    parameters: Vec<ParameterSummary>,
    meters: Vec<ParameterSummary>,
}

impl<'a> ManifestListing<'a> {
    fn new(meta: &'a ProcessorMeta) -> Self {
        Self {
            name: &meta.name,
            author: &meta.author,
            copyright: &meta.copyright,
            license: &meta.license,
            version: &meta.version,
            identifier: &meta.identifier,
            oversampling: meta.factor.multiplier(),
            max_frames: meta.max_segment_frames,
            inputs: meta.inputs.iter().map(ChannelListing::new).collect(),
            outputs: meta.outputs.iter().map(ChannelListing::new).collect(),
            meta: &meta.meta,
            defines: &meta.defines,
            parameters: meta.parameters(),
            meters: meta.meters(),
        }
    }
}

pub fn run(args: ManifestArgs) -> anyhow::Result<()> {
    let mut manifest = Manifest::load(&args.file)?;
    for define in &args.define {
        manifest.apply_define(define)?;
    }
    let meta = manifest.interpret()?;

    if let Some(kind) = args.check {
        match kind {
            ProcessorKind::Passthrough => meta.check_processor::<MonoPassthrough>()?,
            ProcessorKind::StereoPassthrough => meta.check_processor::<StereoPassthrough>()?,
            ProcessorKind::Saturator => meta.check_processor::<Saturator>()?,
            ProcessorKind::Wavefolder => meta.check_processor::<Wavefolder>()?,
        }
        tracing::info!(processor = %kind, "manifest matches processor");
    }

    let listing = ManifestListing::new(&meta);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("{} ({})", listing.name, listing.identifier);
    for (label, value) in [
        ("Author", listing.author),
        ("Copyright", listing.copyright),
        ("License", listing.license),
        ("Version", listing.version),
    ] {
        if !value.is_empty() {
            println!("  {label:<10} {value}");
        }
    }
    println!(
        "  Oversampling {}x, segments of at most {} frames",
        listing.oversampling, listing.max_frames
    );
    print_channels("Inputs", &listing.inputs);
    print_channels("Outputs", &listing.outputs);
    for (title, entries) in [("Meta", listing.meta), ("Defines", listing.defines)] {
        if !entries.is_empty() {
            println!("  {title}:");
            for (key, value) in entries {
                println!("    {key} = {value}");
            }
        }
    }
    println!();

    print_table("Parameters", &listing.parameters);
    print_table("Meters", &listing.meters);
    Ok(())
}

fn print_channels(title: &str, channels: &[ChannelListing<'_>]) {
    println!("  {title}: {}", channels.len());
    for (i, channel) in channels.iter().enumerate() {
        let tags: Vec<String> = channel
            .tags
            .iter()
            .map(|(k, v)| format!("[{k}:{v}]"))
            .collect();
        println!("    {i}: {} {}", channel.name, tags.join(""));
    }
}
