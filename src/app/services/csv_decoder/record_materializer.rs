//! Record materialization
//!
//! This module populates one record per data row. Temporal fields go through
//! the date parser, text fields through their format directive, and each
//! finished record gets cross-field post-processing.

use tracing::debug;

use super::column_mapping::ColumnMap;
use super::post_processing::{split_full_name, split_zip_code};
use super::stats::DecodeStats;
use crate::app::services::domain_parsers::parse_date;
use crate::app::services::field_formatter::FormatDirective;
use crate::app::services::name_splitter::NameSplitter;
use crate::app::services::schema::{FieldAccessor, Schema};
use crate::config::{AnnotationPolicy, ShortRowPolicy};
use crate::{Error, Result};

/// Settings and collaborators shared by every row of one decode call
#[derive(Debug, Clone, Copy)]
pub struct MaterializeContext<'a> {
    pub annotation_policy: AnnotationPolicy,
    pub short_row_policy: ShortRowPolicy,
    pub name_splitter: &'a dyn NameSplitter,
}

/// Build one record per data row, preserving row order
///
/// `data_rows` excludes the header; row numbers in errors count the header
/// as row 0.
pub fn materialize<R: Default>(
    column_map: &ColumnMap,
    data_rows: &[Vec<String>],
    schema: &Schema<R>,
    context: &MaterializeContext<'_>,
    stats: &mut DecodeStats,
) -> Result<Vec<R>> {
    let mut records = Vec::with_capacity(data_rows.len());
    for (index, row) in data_rows.iter().enumerate() {
        records.push(materialize_row(
            row,
            index + 1,
            column_map,
            schema,
            context,
            stats,
        )?);
    }
    Ok(records)
}

/// Populate a single record from one data row
pub fn materialize_row<R: Default>(
    row: &[String],
    row_number: usize,
    column_map: &ColumnMap,
    schema: &Schema<R>,
    context: &MaterializeContext<'_>,
    stats: &mut DecodeStats,
) -> Result<R> {
    let mut record = R::default();

    for field in schema.fields() {
        let Some(column) = column_map.get(field.id()) else {
            continue;
        };

        match field.accessor() {
            FieldAccessor::Temporal { set, .. } => {
                let raw = cell(row, column, row_number, context.short_row_policy, stats)?;
                let timestamp = parse_date(raw);
                if timestamp.is_zero() && !raw.is_empty() {
                    stats.unparsed_dates += 1;
                    debug!(
                        "Row {}: unparseable date '{}' for field {}",
                        row_number,
                        raw,
                        field.id()
                    );
                }
                set(&mut record, timestamp);
            }
            FieldAccessor::Text { set, .. } => {
                let value = match field.directive() {
                    Some(directive) => {
                        let raw = cell(row, column, row_number, context.short_row_policy, stats)?;
                        let formatted = directive.apply(raw);
                        if directive == FormatDirective::Phone
                            && formatted.is_empty()
                            && !raw.is_empty()
                        {
                            stats.unformattable_phones += 1;
                            debug!(
                                "Row {}: unformattable phone '{}' for field {}",
                                row_number,
                                raw,
                                field.id()
                            );
                        }
                        formatted
                    }
                    None => match context.annotation_policy {
                        AnnotationPolicy::PassThrough => {
                            cell(row, column, row_number, context.short_row_policy, stats)?
                                .to_string()
                        }
                        AnnotationPolicy::Strict => continue,
                    },
                };
                set(&mut record, value);
            }
        }
    }

    if split_full_name(&mut record, schema, context.name_splitter) {
        stats.names_split += 1;
    }
    if split_zip_code(&mut record, schema) {
        stats.postal_codes_split += 1;
    }

    Ok(record)
}

/// Cell at `column`, resolving short rows according to `policy`
fn cell<'r>(
    row: &'r [String],
    column: usize,
    row_number: usize,
    policy: ShortRowPolicy,
    stats: &mut DecodeStats,
) -> Result<&'r str> {
    match row.get(column) {
        Some(value) => Ok(value.as_str()),
        None => match policy {
            ShortRowPolicy::Empty => {
                stats.missing_cells += 1;
                Ok("")
            }
            ShortRowPolicy::Error => Err(Error::short_row(row_number, column, row.len())),
        },
    }
}
