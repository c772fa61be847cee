//! Cross-field post-processing
//!
//! Runs once per record after every field has been populated. Fields are
//! found through their [`FieldRole`]; a schema without the relevant roles is
//! left untouched.

use crate::app::services::domain_parsers::split_postal_code;
use crate::app::services::name_splitter::NameSplitter;
use crate::app::services::schema::{FieldRole, Schema};

/// Fill first/middle/last from the full name when first or last is empty
///
/// Returns true when the name was split.
pub fn split_full_name<R>(record: &mut R, schema: &Schema<R>, splitter: &dyn NameSplitter) -> bool {
    let Some(full_name) = schema.role_text(record, FieldRole::FullName) else {
        return false;
    };
    if full_name.is_empty() {
        return false;
    }

    let first_empty = schema
        .role_text(record, FieldRole::FirstName)
        .is_some_and(str::is_empty);
    let last_empty = schema
        .role_text(record, FieldRole::LastName)
        .is_some_and(str::is_empty);
    if !first_empty && !last_empty {
        return false;
    }

    let parsed = splitter.split(full_name);
    schema.set_role_text(record, FieldRole::FirstName, parsed.first);
    schema.set_role_text(record, FieldRole::MiddleName, parsed.middle);
    schema.set_role_text(record, FieldRole::LastName, parsed.last);
    true
}

/// Normalize the ZIP code to its 5-digit part
///
/// A plus-4 field that already holds a value is overwritten with the split's
/// plus-4 part, which is empty when the ZIP code had none. An empty plus-4
/// field is never filled.
/// Returns true when the ZIP code was in ZIP+4 form.
pub fn split_zip_code<R>(record: &mut R, schema: &Schema<R>) -> bool {
    let Some(zip) = schema.role_text(record, FieldRole::PostalCode) else {
        return false;
    };
    if zip.is_empty() {
        return false;
    }

    let (zip5, plus_four) = split_postal_code(zip);
    let has_plus_four = schema
        .role_text(record, FieldRole::PlusFour)
        .is_some_and(|value| !value.is_empty());
    let recognized = !plus_four.is_empty();

    schema.set_role_text(record, FieldRole::PostalCode, zip5);
    if has_plus_four {
        schema.set_role_text(record, FieldRole::PlusFour, plus_four);
    }
    recognized
}
