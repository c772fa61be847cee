//! Configuration management and validation.
//!
//! Provides the decoder settings, their defaults, and a layered loader:
//! an explicit JSON file, else the user config file when present, else the
//! built-in defaults. Command-line flags are applied on top by the CLI.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_DELIMITER};
use crate::{Error, Result};

/// How fields without explicit tags take part in decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationPolicy {
    /// Untagged fields bind on their identifier and text fields without a
    /// format tag receive the raw cell
    #[default]
    PassThrough,
    /// Only tagged fields bind; text fields without a format tag are skipped
    Strict,
}

/// What a bound column that is missing from a short row resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortRowPolicy {
    /// Treat the missing cell as empty
    #[default]
    Empty,
    /// Abort the decode with a short row error
    Error,
}

/// Decoder settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Participation of untagged fields
    pub annotation_policy: AnnotationPolicy,

    /// Handling of rows narrower than the bound columns
    pub short_row_policy: ShortRowPolicy,

    /// Field delimiter used by the CSV reader (single ASCII character)
    pub delimiter: char,

    /// Accept rows whose width differs from the header's
    pub flexible_rows: bool,

    /// Trim surrounding whitespace from every cell while reading
    pub trim_cells: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            annotation_policy: AnnotationPolicy::default(),
            short_row_policy: ShortRowPolicy::default(),
            delimiter: DEFAULT_DELIMITER as char,
            flexible_rows: true,
            trim_cells: false,
        }
    }
}

impl DecoderConfig {
    /// Load configuration: explicit file, else the user config file, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Read and validate a JSON configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!("Invalid config file {}: {}", path.display(), e))
        })?;
        config.validate()?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Location of the user config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Check settings for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() {
            return Err(Error::configuration(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )));
        }

        if self.delimiter == '"' || self.delimiter == '\n' || self.delimiter == '\r' {
            return Err(Error::configuration(format!(
                "Delimiter {:?} conflicts with CSV quoting or line endings",
                self.delimiter
            )));
        }

        Ok(())
    }

    /// Delimiter as the byte expected by the CSV reader
    pub fn delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII
        self.delimiter as u8
    }
}
