//! Decode command implementation
//!
//! Decodes a CSV file into [`Contact`] records, writes them in the requested
//! format and prints a summary to stderr.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use colored::*;
use tracing::info;

use super::shared::{load_configuration, setup_logging};
use crate::app::models::Contact;
use crate::app::services::csv_decoder::{CsvDecoder, DecodeStats};
use crate::app::services::schema::CsvRecord;
use crate::cli::args::{DecodeArgs, OutputFormat};

/// Run the decode command
pub fn run_decode(args: DecodeArgs) -> Result<DecodeStats> {
    setup_logging(args.get_log_level(), args.quiet);
    args.validate()?;

    let config = load_configuration(args.config_file.as_deref(), |config| {
        args.apply_overrides(config)
    })?;
    let schema = Contact::schema()?;
    let decoder = CsvDecoder::new(config);

    let result = decoder
        .decode_file(&args.input, &schema)
        .with_context(|| format!("Failed to decode {}", args.input.display()))?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            write_records(BufWriter::new(file), &result.records, args.format)?;
            info!("Wrote {} records to {}", result.records.len(), path.display());
        }
        None => write_records(io::stdout().lock(), &result.records, args.format)?,
    }

    if !args.quiet {
        print_summary(&result.stats);
    }

    Ok(result.stats)
}

/// Serialize records to `writer` in the given format
pub fn write_records<W: Write>(mut writer: W, records: &[Contact], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, records)
                .context("Failed to write JSON output")?;
            writeln!(writer)?;
        }
        OutputFormat::Jsonl => {
            for record in records {
                serde_json::to_writer(&mut writer, record)
                    .context("Failed to write JSON lines output")?;
                writeln!(writer)?;
            }
        }
        OutputFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(&mut writer);
            for record in records {
                csv_writer
                    .serialize(record)
                    .context("Failed to write CSV output")?;
            }
            csv_writer.flush()?;
        }
    }

    writer.flush()?;
    Ok(())
}

fn print_summary(stats: &DecodeStats) {
    eprintln!("\n{}", "Decode Summary".bright_green().bold());
    eprintln!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.elapsed.as_millis().to_string().bright_white()
    );
    eprintln!(
        "  {} {}",
        "Records decoded:".bright_cyan(),
        stats.records_decoded.to_string().bright_white().bold()
    );
    eprintln!(
        "  {} {} of {} ({:.0}%)",
        "Fields bound:".bright_cyan(),
        stats.bound_fields.to_string().bright_white(),
        stats.bound_fields + stats.unbound_fields,
        stats.binding_rate()
    );
    eprintln!(
        "  {} {} names split, {} ZIP+4 codes",
        "Post-processed:".bright_cyan(),
        stats.names_split,
        stats.postal_codes_split
    );

    if !stats.is_clean() {
        eprintln!(
            "  {} {} missing cells, {} unparsed dates, {} unformattable phones",
            "Anomalies:".bright_yellow(),
            stats.missing_cells.to_string().bright_yellow(),
            stats.unparsed_dates.to_string().bright_yellow(),
            stats.unformattable_phones.to_string().bright_yellow()
        );
    }
}
