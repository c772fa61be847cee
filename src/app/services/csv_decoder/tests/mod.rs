//! Test utilities for CSV decoder testing
//!
//! This module provides record types, schemas and helper functions used
//! across the decoder test modules.

use std::io::Write;
use tempfile::NamedTempFile;

use crate::app::models::Timestamp;
use crate::app::services::schema::{FieldRole, FieldSpec, Schema};

// Test modules
mod column_mapping_tests;
mod decoder_tests;

/// Minimal mailing-list record used throughout the decoder tests
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mailer {
    pub full_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub phone: String,
    pub zip: String,
    pub zip4: String,
    pub note: String,
    pub joined: Timestamp,
}

pub type MailerField = FieldSpec<Mailer>;

pub fn full_name_field() -> MailerField {
    MailerField::text("Name", |m| m.full_name.as_str(), |m, v| m.full_name = v)
        .role(FieldRole::FullName)
}

pub fn phone_field() -> MailerField {
    MailerField::text("Phone", |m| m.phone.as_str(), |m, v| m.phone = v).format("fp")
}

pub fn zip_field() -> MailerField {
    MailerField::text("Zip", |m| m.zip.as_str(), |m, v| m.zip = v).role(FieldRole::PostalCode)
}

pub fn zip4_field() -> MailerField {
    MailerField::text("Zip4", |m| m.zip4.as_str(), |m, v| m.zip4 = v).role(FieldRole::PlusFour)
}

pub fn first_name_field() -> MailerField {
    MailerField::text("First", |m| m.first_name.as_str(), |m, v| m.first_name = v)
        .role(FieldRole::FirstName)
}

pub fn middle_name_field() -> MailerField {
    MailerField::text("Middle", |m| m.middle_name.as_str(), |m, v| m.middle_name = v)
        .role(FieldRole::MiddleName)
}

pub fn last_name_field() -> MailerField {
    MailerField::text("Last", |m| m.last_name.as_str(), |m, v| m.last_name = v)
        .role(FieldRole::LastName)
}

pub fn note_field() -> MailerField {
    MailerField::text("Note", |m| m.note.as_str(), |m, v| m.note = v)
}

pub fn joined_field() -> MailerField {
    MailerField::temporal("Joined", |m| m.joined, |m, v| m.joined = v)
}

/// Name/Phone/Zip/Zip4 schema with no directives besides phone formatting
pub fn create_mailing_schema() -> Schema<Mailer> {
    Schema::builder()
        .field(full_name_field())
        .field(phone_field())
        .field(zip_field())
        .field(zip4_field())
        .build()
        .unwrap()
}

/// Schema with every test field and role
pub fn create_full_schema() -> Schema<Mailer> {
    Schema::builder()
        .field(full_name_field())
        .field(first_name_field())
        .field(middle_name_field())
        .field(last_name_field())
        .field(phone_field())
        .field(zip_field().binding("^Zip$"))
        .field(zip4_field())
        .field(note_field())
        .field(joined_field())
        .build()
        .unwrap()
}

/// Convert string slices into an owned row
pub fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|cell| cell.to_string()).collect()
}

/// Rows for the single-record Name/Phone/Zip example
pub fn create_example_rows() -> Vec<Vec<String>> {
    vec![
        row(&["Name", "Phone", "Zip"]),
        row(&["john doe", "9493237895", "92882-1234"]),
    ]
}

/// Helper to create a temporary CSV file
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
