//! Core decoder implementation
//!
//! This module provides the decode orchestration: reading rows, binding the
//! header to a schema, and coordinating record materialization.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use super::column_mapping::ColumnMap;
use super::reader::read_rows;
use super::record_materializer::{MaterializeContext, materialize};
use super::stats::{DecodeResult, DecodeStats};
use crate::app::services::name_splitter::{HeuristicNameSplitter, NameSplitter};
use crate::app::services::schema::{CsvRecord, Schema};
use crate::config::DecoderConfig;
use crate::{Error, Result};

/// CSV-to-record decoder
///
/// The decoder holds only immutable settings and may be shared across
/// threads. Every decode call binds the header into its own [`ColumnMap`].
#[derive(Debug, Clone)]
pub struct CsvDecoder {
    config: DecoderConfig,
    name_splitter: Arc<dyn NameSplitter>,
}

impl Default for CsvDecoder {
    fn default() -> Self {
        Self::new(DecoderConfig::default())
    }
}

impl CsvDecoder {
    /// Create a decoder using the heuristic name splitter
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            name_splitter: Arc::new(HeuristicNameSplitter),
        }
    }

    /// Replace the name splitter used for full-name decomposition
    pub fn with_name_splitter(mut self, name_splitter: Arc<dyn NameSplitter>) -> Self {
        self.name_splitter = name_splitter;
        self
    }

    /// Decoder configuration
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode CSV text into records of a type that declares its own schema
    pub fn decode<R: CsvRecord>(&self, input: impl Read) -> Result<Vec<R>> {
        let schema = R::schema()?;
        Ok(self.decode_reader(input, &schema)?.records)
    }

    /// Decode CSV text from any reader
    pub fn decode_reader<R: Default>(
        &self,
        input: impl Read,
        schema: &Schema<R>,
    ) -> Result<DecodeResult<R>> {
        self.config.validate()?;
        let rows = read_rows(input, &self.config)?;
        self.decode_rows(&rows, schema)
    }

    /// Decode a CSV file
    pub fn decode_file<R: Default>(
        &self,
        path: &Path,
        schema: &Schema<R>,
    ) -> Result<DecodeResult<R>> {
        info!("Decoding CSV file: {}", path.display());

        let file = File::open(path)
            .map_err(|e| Error::io(format!("Failed to open file {}", path.display()), e))?;
        let result = self.decode_reader(BufReader::new(file), schema)?;

        info!(
            "Decoded {} records from {}",
            result.stats.records_decoded,
            path.display()
        );
        Ok(result)
    }

    /// Bind a header row to a schema under this decoder's annotation policy
    pub fn bind<R>(&self, header: &[String], schema: &Schema<R>) -> Result<ColumnMap> {
        ColumnMap::bind(header, schema, self.config.annotation_policy)
    }

    /// Decode rows that are already split into cells
    ///
    /// Row 0 is the header. A header with no data rows yields no records.
    pub fn decode_rows<R: Default>(
        &self,
        rows: &[Vec<String>],
        schema: &Schema<R>,
    ) -> Result<DecodeResult<R>> {
        let start = Instant::now();
        let (header, data_rows) = rows.split_first().ok_or(Error::EmptyInput)?;

        let column_map = self.bind(header, schema)?;
        let mut stats = DecodeStats::new();
        stats.data_rows = data_rows.len();
        stats.bound_fields = column_map.len();
        stats.unbound_fields = schema.len() - column_map.len();

        debug!(
            "Column binding: {} of {} fields bound across {} header cells",
            stats.bound_fields,
            schema.len(),
            header.len()
        );

        let context = MaterializeContext {
            annotation_policy: self.config.annotation_policy,
            short_row_policy: self.config.short_row_policy,
            name_splitter: self.name_splitter.as_ref(),
        };
        let records = materialize(&column_map, data_rows, schema, &context, &mut stats)?;

        stats.records_decoded = records.len();
        stats.elapsed = start.elapsed();
        debug!(
            "Decoded {} records in {:?} ({} anomalies)",
            stats.records_decoded,
            stats.elapsed,
            stats.anomaly_count()
        );

        Ok(DecodeResult {
            records,
            column_map,
            stats,
        })
    }
}
