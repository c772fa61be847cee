//! Data models for CSV decoding
//!
//! This module contains the timestamp type used by temporal fields and the
//! built-in [`Contact`] record decoded by the command-line tool.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::Result;
use crate::app::services::schema::{CsvRecord, FieldRole, FieldSpec, Schema};
use crate::constants::directives;

// =============================================================================
// Timestamp
// =============================================================================

/// Instant stored in temporal fields
///
/// The default value is [`Timestamp::ZERO`], the sentinel for "absent or
/// unparseable". It serializes as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Zero-value sentinel
    pub const ZERO: Timestamp = Timestamp(DateTime::<Utc>::MIN_UTC);

    /// Wrap a UTC instant
    pub fn new(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    /// Whether this is the zero-value sentinel
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// The instant, or `None` for the sentinel
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        if self.is_zero() { None } else { Some(self.0) }
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::new(datetime)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.datetime() {
            Some(datetime) => write!(f, "{}", datetime.to_rfc3339()),
            None => Ok(()),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.datetime() {
            Some(datetime) => serializer.serialize_some(&datetime),
            None => serializer.serialize_none(),
        }
    }
}

// =============================================================================
// Contact Record
// =============================================================================

/// Mailing-list contact, the record type decoded by the `csvparse` binary
///
/// Header cells are matched case-insensitively. Names are title-cased and a
/// full name is split into its parts when the file has no separate first or
/// last name column. ZIP codes are normalized to five digits.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Contact {
    pub full_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub zip4: String,
    pub phone: String,
    pub email: String,
    pub date: Timestamp,
}

type ContactField = FieldSpec<Contact>;

impl CsvRecord for Contact {
    fn schema() -> Result<Schema<Self>> {
        Schema::builder()
            .field(
                ContactField::text("Fullname", |c| c.full_name.as_str(), |c, v| c.full_name = v)
                    .binding(r"(?i)^(full[ _]?name|name)$")
                    .format(directives::TITLE_CASE)
                    .role(FieldRole::FullName),
            )
            .field(
                ContactField::text("Firstname", |c| c.first_name.as_str(), |c, v| c.first_name = v)
                    .binding(r"(?i)^first([ _]?name)?$")
                    .format(directives::TITLE_CASE)
                    .role(FieldRole::FirstName),
            )
            .field(
                ContactField::text("MI", |c| c.middle_name.as_str(), |c, v| c.middle_name = v)
                    .binding(r"(?i)^(mi|middle([ _]?(name|initial))?)$")
                    .format(directives::UPPER_CASE)
                    .role(FieldRole::MiddleName),
            )
            .field(
                ContactField::text("Lastname", |c| c.last_name.as_str(), |c, v| c.last_name = v)
                    .binding(r"(?i)^last([ _]?name)?$")
                    .format(directives::TITLE_CASE)
                    .role(FieldRole::LastName),
            )
            .field(
                ContactField::text("Address1", |c| c.address1.as_str(), |c, v| c.address1 = v)
                    .binding(r"(?i)^address[ _]?1?$")
                    .format(directives::TITLE_CASE),
            )
            .field(
                ContactField::text("Address2", |c| c.address2.as_str(), |c, v| c.address2 = v)
                    .binding(r"(?i)^address[ _]?2$")
                    .format(directives::TITLE_CASE),
            )
            .field(
                ContactField::text("City", |c| c.city.as_str(), |c, v| c.city = v)
                    .binding(r"(?i)^city$")
                    .format(directives::TITLE_CASE),
            )
            .field(
                ContactField::text("State", |c| c.state.as_str(), |c, v| c.state = v)
                    .binding(r"(?i)^(state|st)$")
                    .format(directives::UPPER_CASE),
            )
            .field(
                ContactField::text("Zip", |c| c.zip.as_str(), |c, v| c.zip = v)
                    .binding(r"(?i)^(zip|zip[ _]?code|postal[ _]?code)$")
                    .format(directives::RAW)
                    .role(FieldRole::PostalCode),
            )
            .field(
                ContactField::text("Zip4", |c| c.zip4.as_str(), |c, v| c.zip4 = v)
                    .binding(r"(?i)^(zip[ _]?4|plus[ _]?4)$")
                    .format(directives::RAW)
                    .role(FieldRole::PlusFour),
            )
            .field(
                ContactField::text("Phone", |c| c.phone.as_str(), |c, v| c.phone = v)
                    .binding(r"(?i)phone")
                    .format(directives::PHONE),
            )
            .field(
                ContactField::text("Email", |c| c.email.as_str(), |c, v| c.email = v)
                    .binding(r"(?i)e-?mail")
                    .format(directives::LOWER_CASE),
            )
            .field(
                ContactField::temporal("Date", |c| c.date, |c, v| c.date = v)
                    .binding(r"(?i)date"),
            )
            .build()
    }
}
