//! Inspect command implementation
//!
//! Prints which header column feeds each [`Contact`] field, without decoding
//! any data rows.

use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use colored::*;

use super::shared::{load_configuration, setup_logging};
use crate::Error;
use crate::app::models::Contact;
use crate::app::services::csv_decoder::reader::read_rows;
use crate::app::services::csv_decoder::{ColumnMap, CsvDecoder, DecodeStats};
use crate::app::services::schema::{CsvRecord, Schema};
use crate::cli::args::InspectArgs;

/// Run the inspect command
pub fn run_inspect(args: InspectArgs) -> Result<DecodeStats> {
    setup_logging(args.get_log_level(), false);
    args.validate()?;

    let config = load_configuration(args.config_file.as_deref(), |config| {
        args.apply_overrides(config)
    })?;
    let schema = Contact::schema()?;
    let decoder = CsvDecoder::new(config);

    let file = File::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    let rows = read_rows(BufReader::new(file), decoder.config())?;
    let header = rows.first().ok_or(Error::EmptyInput)?;
    let column_map = decoder.bind(header, &schema)?;

    print_binding(header, &column_map, &schema);

    let unbound = column_map.unbound_fields(&schema).len();
    Ok(DecodeStats {
        data_rows: rows.len() - 1,
        bound_fields: column_map.len(),
        unbound_fields: unbound,
        ..Default::default()
    })
}

fn print_binding<R>(header: &[String], column_map: &ColumnMap, schema: &Schema<R>) {
    println!("{}", "Column Binding".bright_green().bold());

    for field in schema.fields() {
        let directive = field
            .directive()
            .map(|directive| directive.token())
            .unwrap_or("");
        match column_map.get(field.id()) {
            Some(column) => println!(
                "  {:<10} {} column {} ({}) {}",
                field.id().bright_cyan(),
                "<-".bright_black(),
                column.to_string().bright_white(),
                header[column].bright_white().bold(),
                directive.bright_black()
            ),
            None => println!(
                "  {:<10} {}",
                field.id().bright_cyan(),
                "unbound".bright_yellow()
            ),
        }
    }

    let bound_columns: Vec<usize> = column_map
        .bindings()
        .into_iter()
        .map(|(_, column)| column)
        .collect();
    let unused: Vec<&str> = header
        .iter()
        .enumerate()
        .filter(|(index, _)| !bound_columns.contains(index))
        .map(|(_, name)| name.as_str())
        .collect();
    if !unused.is_empty() {
        println!(
            "\n  {} {}",
            "Unused columns:".bright_yellow(),
            unused.join(", ")
        );
    }
}
