//! Header-to-field binding
//!
//! This module matches each header cell against the binding patterns of a
//! schema and records which column feeds which field. The resulting
//! [`ColumnMap`] belongs to a single decode call.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::app::services::schema::Schema;
use crate::config::AnnotationPolicy;
use crate::{Error, Result};

/// Field identifier to zero-based column index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnMap {
    field_to_column: HashMap<String, usize>,
}

impl ColumnMap {
    /// Bind a header row to a schema
    ///
    /// Header cells are scanned left to right and, for each cell, participating
    /// fields in declaration order. When several cells match one field the last
    /// match wins. Fails if two header cells are textually identical.
    pub fn bind<R>(header: &[String], schema: &Schema<R>, policy: AnnotationPolicy) -> Result<Self> {
        check_duplicate_headers(header)?;

        let mut field_to_column = HashMap::new();
        for (index, cell) in header.iter().enumerate() {
            for field in schema.fields() {
                if !field.participates(policy) {
                    continue;
                }
                if field.matches_header(cell) {
                    if let Some(previous) = field_to_column.insert(field.id().to_string(), index) {
                        debug!(
                            "Field '{}' rebound from column {} to column {} ('{}')",
                            field.id(),
                            previous,
                            index,
                            cell
                        );
                    }
                }
            }
        }

        Ok(Self { field_to_column })
    }

    /// Column index bound to a field
    pub fn get(&self, field_id: &str) -> Option<usize> {
        self.field_to_column.get(field_id).copied()
    }

    /// Check if a field is bound to a column
    pub fn contains(&self, field_id: &str) -> bool {
        self.field_to_column.contains_key(field_id)
    }

    /// Number of bound fields
    pub fn len(&self) -> usize {
        self.field_to_column.len()
    }

    /// True when no field is bound
    pub fn is_empty(&self) -> bool {
        self.field_to_column.is_empty()
    }

    /// Bound fields and their columns, in column order
    pub fn bindings(&self) -> Vec<(&str, usize)> {
        let mut bindings: Vec<(&str, usize)> = self
            .field_to_column
            .iter()
            .map(|(field, &column)| (field.as_str(), column))
            .collect();
        bindings.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        bindings
    }

    /// Schema fields that no column feeds, in declaration order
    pub fn unbound_fields<'s, R>(&self, schema: &'s Schema<R>) -> Vec<&'s str> {
        schema
            .fields()
            .iter()
            .map(|field| field.id())
            .filter(|id| !self.contains(id))
            .collect()
    }
}

/// Reject a header row in which any cell text repeats
pub fn check_duplicate_headers(header: &[String]) -> Result<()> {
    let mut seen = HashSet::with_capacity(header.len());
    for name in header {
        if !seen.insert(name.as_str()) {
            return Err(Error::duplicate_header(name.as_str()));
        }
    }
    Ok(())
}
