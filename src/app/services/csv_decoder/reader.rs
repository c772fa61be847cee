//! Row reading on top of the `csv` crate
//!
//! Tokenizing, quoting and escaping are left to `csv::Reader`; this adapter
//! only collects every record (header included) into owned rows.

use std::io::Read;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::config::DecoderConfig;
use crate::{Error, Result};

/// One CSV row: an ordered sequence of cells
pub type Row = Vec<String>;

/// Read all rows from `input`, header row first
pub fn read_rows<R: Read>(input: R, config: &DecoderConfig) -> Result<Vec<Row>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(config.flexible_rows)
        .delimiter(config.delimiter_byte())
        .trim(if config.trim_cells { Trim::All } else { Trim::None })
        .from_reader(input);

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            Error::csv_parsing(format!("unable to read CSV row {}", index), Some(e))
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!("Read {} CSV rows", rows.len());
    Ok(rows)
}
