//! csvparse Library
//!
//! Decodes CSV input into typed records. Columns are bound to record fields by
//! matching header text against per-field regular expressions, and each value
//! is run through a per-field transform on the way in.
//!
//! This library provides tools for:
//! - Declaring record schemas with accessor pairs, binding patterns and format directives
//! - Binding a header row to a schema (rejecting duplicate header names)
//! - Materializing data rows into records with date, phone and text formatting
//! - Cross-field post-processing: full-name decomposition and zip+4 splitting
//! - Reading rows from any `std::io::Read` through the `csv` crate
//!
//! ```rust
//! use csvparse::{Contact, CsvDecoder, DecoderConfig};
//!
//! # fn example() -> csvparse::Result<()> {
//! let input = "Name,Phone,Zip\njohn doe,9493237895,92882-1234\n";
//! let decoder = CsvDecoder::new(DecoderConfig::default());
//! let contacts: Vec<Contact> = decoder.decode(input.as_bytes())?;
//!
//! assert_eq!(contacts[0].phone, "(949) 323-7895");
//! assert_eq!(contacts[0].zip, "92882");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod csv_decoder;
        pub mod domain_parsers;
        pub mod field_formatter;
        pub mod name_splitter;
        pub mod schema;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Contact, Timestamp};
pub use app::services::csv_decoder::{ColumnMap, CsvDecoder, DecodeResult, DecodeStats};
pub use app::services::field_formatter::FormatDirective;
pub use app::services::name_splitter::{HeuristicNameSplitter, NameSplitter, ParsedName};
pub use app::services::schema::{CsvRecord, FieldRole, FieldSpec, Schema};
pub use config::{AnnotationPolicy, DecoderConfig, ShortRowPolicy};

/// Result type alias for csvparse operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for decode operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The underlying CSV reader rejected the input
    #[error("CSV parsing error: {message}")]
    CsvParsing {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Input contained no rows at all (not even a header)
    #[error("Empty CSV input: no header row found")]
    EmptyInput,

    /// A data row was too short for a bound column
    #[error("Row {row} has {width} cells but column {column} is bound")]
    ShortRow {
        row: usize,
        column: usize,
        width: usize,
    },

    /// Schema declaration is unusable
    #[error("Schema error: {message}")]
    Schema { message: String },

    /// A binding pattern failed to compile
    #[error("Invalid binding pattern '{pattern}' for field '{field}'")]
    InvalidPattern {
        field: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Two header cells carry the same text
    #[error("Repeated header name: {name}")]
    DuplicateHeader { name: String },

    /// Unknown format directive token
    #[error("Invalid string format '{directive}': use [tc, uc, lc, fp, ss, -]")]
    InvalidDirective { directive: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::CsvParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a short row error
    pub fn short_row(row: usize, column: usize, width: usize) -> Self {
        Self::ShortRow { row, column, width }
    }

    /// Create a schema error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Create an invalid binding pattern error
    pub fn invalid_pattern(
        field: impl Into<String>,
        pattern: impl Into<String>,
        source: regex::Error,
    ) -> Self {
        Self::InvalidPattern {
            field: field.into(),
            pattern: pattern.into(),
            source,
        }
    }

    /// Create a duplicate header error
    pub fn duplicate_header(name: impl Into<String>) -> Self {
        Self::DuplicateHeader { name: name.into() }
    }

    /// Create an invalid directive error
    pub fn invalid_directive(directive: impl Into<String>) -> Self {
        Self::InvalidDirective {
            directive: directive.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether this error came from the input rather than the schema or configuration
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Io { .. }
                | Self::CsvParsing { .. }
                | Self::EmptyInput
                | Self::ShortRow { .. }
                | Self::DuplicateHeader { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            message: "unable to read CSV rows".to_string(),
            source: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::duplicate_header("Zip").to_string(),
            "Repeated header name: Zip"
        );
        assert_eq!(
            Error::short_row(3, 4, 2).to_string(),
            "Row 3 has 2 cells but column 4 is bound"
        );
        assert!(
            Error::invalid_directive("xx")
                .to_string()
                .contains("'xx'")
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::EmptyInput.is_input_error());
        assert!(Error::short_row(1, 1, 0).is_input_error());
        assert!(!Error::schema("no fields").is_input_error());
        assert!(!Error::configuration("bad delimiter").is_input_error());

        let io: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(io, Error::Io { .. }));
        assert!(io.is_input_error());
    }
}
