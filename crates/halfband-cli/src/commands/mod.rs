//! CLI subcommands.

pub mod common;
pub mod impulse;
pub mod manifest;
pub mod params;
pub mod process;
