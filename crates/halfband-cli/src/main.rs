//! Halfband CLI - run processors through the oversampling engine.

mod commands;
mod wav;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "halfband")]
#[command(author, version, about = "Halfband oversampling engine CLI", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a WAV file through an oversampled processor
    Process(commands::process::ProcessArgs),

    /// List processors and their parameters
    Params(commands::params::ParamsArgs),

    /// Validate a processor manifest and print its tables
    Manifest(commands::manifest::ManifestArgs),

    /// Measure the impulse response of the conversion chain
    Impulse(commands::impulse::ImpulseArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Params(args) => commands::params::run(args),
        Commands::Manifest(args) => commands::manifest::run(args),
        Commands::Impulse(args) => commands::impulse::run(args),
    }
}
