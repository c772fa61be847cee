//! Command implementations for the csvparse CLI
//!
//! Each command is implemented in its own module:
//! - `decode`: decode a CSV file into contact records and write them out
//! - `inspect`: show how a CSV header binds to the contact schema

pub mod decode;
pub mod inspect;
pub mod shared;

use anyhow::Result;

use crate::DecodeStats;
use crate::cli::args::Commands;

/// Main command runner
///
/// Dispatches to the subcommand handler. Returns the statistics of the
/// decode that the command performed.
pub fn run(command: Commands) -> Result<DecodeStats> {
    match command {
        Commands::Decode(decode_args) => decode::run_decode(decode_args),
        Commands::Inspect(inspect_args) => inspect::run_inspect(inspect_args),
    }
}
