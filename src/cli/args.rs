//! Command-line argument definitions for csvparse
//!
//! This module defines the CLI interface using the clap derive API. Decoding
//! settings given on the command line override the configuration file.

use crate::config::{AnnotationPolicy, DecoderConfig, ShortRowPolicy};
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// CLI arguments for the csvparse decoder
///
/// Decodes CSV contact lists into typed records, binding columns by header
/// text and normalizing names, phone numbers, ZIP codes and dates.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "csvparse",
    version,
    about = "Decode CSV contact lists into normalized records",
    long_about = "Decodes CSV files into contact records. Columns are bound to record fields by \
                  matching header text against per-field patterns; values are normalized on the \
                  way in (title/upper/lower case, phone formatting, ZIP+4 splitting, date parsing, \
                  full-name decomposition). Output is written as JSON, JSON lines or CSV."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Decode a CSV file into contact records
    Decode(DecodeArgs),
    /// Show how a CSV header binds to the contact schema
    Inspect(InspectArgs),
}

/// Arguments for the decode command
#[derive(Debug, Clone, Parser)]
pub struct DecodeArgs {
    /// CSV file to decode
    #[arg(value_name = "INPUT", help = "CSV file to decode")]
    pub input: PathBuf,

    /// Output file for decoded records
    ///
    /// Records are written to standard output when not specified.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write records to FILE instead of standard output"
    )]
    pub output: Option<PathBuf>,

    /// Output format for decoded records
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "json",
        help = "Output format for decoded records"
    )]
    pub format: OutputFormat,

    /// Only bind fields that carry a format annotation
    ///
    /// Text fields without a format directive and temporal fields without an
    /// explicit binding are left unbound.
    #[arg(long = "strict", help = "Only bind fields that carry a format annotation")]
    pub strict: bool,

    /// Handling of rows with fewer cells than a bound column needs
    #[arg(
        long = "short-rows",
        value_enum,
        value_name = "POLICY",
        help = "Handling of rows shorter than the header"
    )]
    pub short_rows: Option<ShortRows>,

    /// Field delimiter
    #[arg(
        short = 'd',
        long = "delimiter",
        value_name = "CHAR",
        help = "Field delimiter (default ',')"
    )]
    pub delimiter: Option<char>,

    /// Path to configuration file
    ///
    /// JSON configuration file for decoder settings. If not specified, looks
    /// for csvparse/config.json in the user configuration directory.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. The decode summary is not printed.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// CSV file whose header is inspected
    #[arg(value_name = "INPUT", help = "CSV file whose header is inspected")]
    pub input: PathBuf,

    /// Only bind fields that carry a format annotation
    #[arg(long = "strict", help = "Only bind fields that carry a format annotation")]
    pub strict: bool,

    /// Field delimiter
    #[arg(
        short = 'd',
        long = "delimiter",
        value_name = "CHAR",
        help = "Field delimiter (default ',')"
    )]
    pub delimiter: Option<char>,

    /// Path to configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Output formats for decoded records
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// A single pretty-printed JSON array
    Json,
    /// One JSON object per line
    Jsonl,
    /// CSV with one column per record field
    Csv,
}

/// Short row handling selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShortRows {
    /// Missing cells read as empty
    Empty,
    /// Fail the decode
    Error,
}

impl From<ShortRows> for ShortRowPolicy {
    fn from(value: ShortRows) -> Self {
        match value {
            ShortRows::Empty => ShortRowPolicy::Empty,
            ShortRows::Error => ShortRowPolicy::Error,
        }
    }
}

impl DecodeArgs {
    /// Validate the decode command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        validate_input(&self.input)?;
        validate_config_file(self.config_file.as_deref())?;

        if let Some(output) = &self.output {
            if output == &self.input {
                return Err(Error::configuration(format!(
                    "Output file would overwrite the input: {}",
                    output.display()
                )));
            }

            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(Error::configuration(format!(
                        "Output file directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply_overrides(&self, config: &mut DecoderConfig) {
        if self.strict {
            config.annotation_policy = AnnotationPolicy::Strict;
        }
        if let Some(short_rows) = self.short_rows {
            config.short_row_policy = short_rows.into();
        }
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            log_level(self.verbose)
        }
    }
}

impl InspectArgs {
    /// Validate the inspect command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        validate_input(&self.input)?;
        validate_config_file(self.config_file.as_deref())
    }

    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply_overrides(&self, config: &mut DecoderConfig) {
        if self.strict {
            config.annotation_policy = AnnotationPolicy::Strict;
        }
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose)
    }
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn validate_input(input: &Path) -> Result<()> {
    if !input.is_file() {
        return Err(Error::configuration(format!(
            "Input file does not exist: {}",
            input.display()
        )));
    }
    Ok(())
}

fn validate_config_file(config_file: Option<&Path>) -> Result<()> {
    if let Some(config_file) = config_file {
        if !config_file.exists() {
            return Err(Error::configuration(format!(
                "Config file does not exist: {}",
                config_file.display()
            )));
        }
    }
    Ok(())
}
