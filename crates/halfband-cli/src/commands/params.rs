//! Processor and parameter listing command.

use clap::Args;
use halfband_dsp::ProcessorKind;
use halfband_meta::ParameterSummary;
use serde::Serialize;

#[derive(Args)]
pub struct ParamsArgs {
    /// Processor to describe (omit to list all processors)
    #[arg(value_name = "PROCESSOR")]
    processor: Option<ProcessorKind>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

/// JSON shape of one processor.
#[derive(Serialize)]
struct ProcessorListing {
    id: &'static str,
    description: &'static str,
    inputs: usize,
    outputs: usize,
    parameters: Vec<ParameterSummary>,
    meters: Vec<ParameterSummary>,
}

impl ProcessorListing {
    fn new(kind: ProcessorKind) -> Self {
        Self {
            id: kind.id(),
            description: kind.description(),
            inputs: kind.inputs(),
            outputs: kind.outputs(),
            parameters: ParameterSummary::list(&kind.parameters()),
            meters: ParameterSummary::list(kind.meters()),
        }
    }
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let kinds: Vec<ProcessorKind> = match args.processor {
        Some(kind) => vec![kind],
        None => ProcessorKind::ALL.to_vec(),
    };

    if args.json {
        let listings: Vec<ProcessorListing> =
            kinds.into_iter().map(ProcessorListing::new).collect();
        println!("{}", serde_json::to_string_pretty(&listings)?);
        return Ok(());
    }

    if args.processor.is_none() {
        println!("Available Processors:\n");
        for kind in kinds {
            println!(
                "  {:<20} {}in/{}out  {}",
                kind.id(),
                kind.inputs(),
                kind.outputs(),
                kind.description()
            );
        }
        println!("\nUse 'halfband params <PROCESSOR>' for parameter details.");
        return Ok(());
    }

    for kind in kinds {
        let listing = ProcessorListing::new(kind);
        println!("{} - {}", listing.id, listing.description);
        println!("  Channels: {} in, {} out\n", listing.inputs, listing.outputs);
        print_table("Parameters", &listing.parameters);
        print_table("Meters", &listing.meters);
    }

    Ok(())
}

pub fn print_table(title: &str, rows: &[ParameterSummary]) {
    println!("{title}:");
    if rows.is_empty() {
        println!("  (none)\n");
        return;
    }
    println!(
        "  {:>3}  {:<12} {:<10} {:>10} {:>10} {:>10} {:>8}  {:<6} {:<6} flags",
        "#", "symbol", "kind", "init", "min", "max", "step", "unit", "scale"
    );
    for row in rows {
        println!(
            "  {:>3}  {:<12} {:<10} {:>10} {:>10} {:>10} {:>8}  {:<6} {:<6} {}",
            row.index,
            row.symbol,
            row.kind,
            row.init,
            row.min,
            row.max,
            row.step,
            row.unit,
            row.scale,
            row.flag_names()
        );
    }
    println!();
}
