//! CSV-to-record decoder
//!
//! This module turns a fully materialized set of CSV rows into typed records
//! described by a [`Schema`](crate::app::services::schema::Schema).
//!
//! ## Architecture
//!
//! The decoder is organized into logical components:
//! - [`decoder`] - Orchestration: read rows, bind the header, materialize records
//! - [`reader`] - Adapter turning a `csv::Reader` into rows of owned cells
//! - [`column_mapping`] - Header-to-field binding and duplicate header detection
//! - [`record_materializer`] - Per-row field population
//! - [`post_processing`] - Cross-field fixes: name decomposition, ZIP+4 splitting
//! - [`stats`] - Decode statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use csvparse::{Contact, CsvDecoder, CsvRecord, DecoderConfig};
//!
//! # fn example() -> csvparse::Result<()> {
//! let decoder = CsvDecoder::new(DecoderConfig::default());
//! let schema = Contact::schema()?;
//! let result = decoder.decode_reader("Name,Zip\nJANE ROE,00501\n".as_bytes(), &schema)?;
//!
//! println!("Decoded {} records, {} fields bound",
//!          result.stats.records_decoded,
//!          result.stats.bound_fields);
//! # Ok(())
//! # }
//! ```

pub mod column_mapping;
pub mod decoder;
pub mod post_processing;
pub mod reader;
pub mod record_materializer;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_mapping::ColumnMap;
pub use decoder::CsvDecoder;
pub use stats::{DecodeResult, DecodeStats};
