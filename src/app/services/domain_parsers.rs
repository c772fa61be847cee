//! Parsers for contact-data values: postal codes, phone numbers and dates
//!
//! None of these fail. Values that cannot be interpreted degrade to a
//! sentinel: the input itself for postal codes, an empty string for phone
//! numbers and [`Timestamp::ZERO`] for dates.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use regex::{Captures, Regex};

use super::field_formatter::strip_separators;
use crate::app::models::Timestamp;
use crate::constants::{
    DATE_LAYOUTS, PHONE_DIGITS_LOCAL, PHONE_DIGITS_WITH_AREA, TWO_DIGIT_YEAR_PIVOT,
};

static ZIP_NINE_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{5})([0-9]{4})$").unwrap());

static ZIP_HYPHENATED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{5})-([0-9]{4})$").unwrap());

static ZIP_SPACED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([0-9]{5}) ([0-9]{4})$").unwrap());

static DATE_LAYOUT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    DATE_LAYOUTS
        .iter()
        .map(|layout| Regex::new(layout).unwrap())
        .collect()
});

/// Split a ZIP code into its 5-digit and plus-4 parts
///
/// Accepts `928821234`, `92882-1234` and `92882 1234`. Both parts have their
/// leading zeros trimmed. Anything else comes back unchanged with an empty
/// plus-4 part.
pub fn split_postal_code(zip: &str) -> (String, String) {
    if zip.is_empty() {
        return (String::new(), String::new());
    }

    [&*ZIP_NINE_DIGITS, &*ZIP_HYPHENATED, &*ZIP_SPACED]
        .iter()
        .find_map(|pattern| pattern.captures(zip))
        .map(|caps| (trim_leading_zeros(&caps[1]), trim_leading_zeros(&caps[2])))
        .unwrap_or_else(|| (zip.to_string(), String::new()))
}

/// Remove all leading zeros; an all-zero string becomes empty
pub fn trim_leading_zeros(value: &str) -> String {
    value.trim_start_matches('0').to_string()
}

/// Re-format a phone number
///
/// Separators are stripped first. Ten digits become `(AAA) BBB-CCCC`, seven
/// become `BBB-CCCC`; any other shape yields an empty string.
pub fn format_phone(phone: &str) -> String {
    let digits = strip_separators(phone);
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return String::new();
    }

    match digits.len() {
        PHONE_DIGITS_WITH_AREA => format!(
            "({}) {}-{}",
            &digits[0..3],
            &digits[3..6],
            &digits[6..10]
        ),
        PHONE_DIGITS_LOCAL => format!("{}-{}", &digits[0..3], &digits[3..7]),
        _ => String::new(),
    }
}

/// Parse a date string using the first layout that matches
///
/// Date-only layouts resolve to midnight UTC; RFC 3339 timestamps are
/// converted to UTC. Empty or unrecognized input yields [`Timestamp::ZERO`].
pub fn parse_date(value: &str) -> Timestamp {
    if value.is_empty() {
        return Timestamp::ZERO;
    }

    DATE_LAYOUT_PATTERNS
        .iter()
        .filter_map(|pattern| pattern.captures(value))
        .find_map(|caps| date_from_captures(&caps))
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| Timestamp::new(dt.with_timezone(&Utc)))
        })
        .unwrap_or(Timestamp::ZERO)
}

fn date_from_captures(caps: &Captures<'_>) -> Option<Timestamp> {
    let year_digits = caps.name("year")?.as_str();
    let mut year: i32 = year_digits.parse().ok()?;
    if year_digits.len() == 2 {
        year += if year >= TWO_DIGIT_YEAR_PIVOT { 1900 } else { 2000 };
    }
    let month: u32 = caps.name("month")?.as_str().parse().ok()?;
    let day: u32 = caps.name("day")?.as_str().parse().ok()?;

    let midnight = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
    Some(Timestamp::new(Utc.from_utc_datetime(&midnight)))
}
