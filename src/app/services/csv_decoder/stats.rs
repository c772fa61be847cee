//! Decode statistics and result structures
//!
//! Per-value anomalies (unparseable dates, unformattable phone numbers, cells
//! missing from short rows) never fail a decode; they are counted here so
//! callers can see how much of the input degraded to sentinel values.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::column_mapping::ColumnMap;

/// Decode result with records, the column binding used, and statistics
#[derive(Debug, Clone)]
pub struct DecodeResult<R> {
    /// Records in input row order
    pub records: Vec<R>,

    /// Header binding used for this decode
    pub column_map: ColumnMap,

    /// Decode statistics
    pub stats: DecodeStats,
}

/// Decode statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecodeStats {
    /// Rows after the header
    pub data_rows: usize,

    /// Records produced
    pub records_decoded: usize,

    /// Schema fields bound to a column
    pub bound_fields: usize,

    /// Schema fields with no column
    pub unbound_fields: usize,

    /// Bound cells absent from short rows (read as empty)
    pub missing_cells: usize,

    /// Non-empty date cells that matched no layout
    pub unparsed_dates: usize,

    /// Non-empty phone cells that could not be formatted
    pub unformattable_phones: usize,

    /// Records whose first/middle/last names came from the full name
    pub names_split: usize,

    /// ZIP codes recognized in ZIP+4 form
    pub postal_codes_split: usize,

    /// Wall-clock decode time
    pub elapsed: Duration,
}

impl DecodeStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Values that degraded to a sentinel
    pub fn anomaly_count(&self) -> usize {
        self.missing_cells + self.unparsed_dates + self.unformattable_phones
    }

    /// Check whether every value was used as-is
    pub fn is_clean(&self) -> bool {
        self.anomaly_count() == 0
    }

    /// Share of schema fields bound to a column, as a percentage
    pub fn binding_rate(&self) -> f64 {
        let total = self.bound_fields + self.unbound_fields;
        if total == 0 {
            0.0
        } else {
            (self.bound_fields as f64 / total as f64) * 100.0
        }
    }
}
