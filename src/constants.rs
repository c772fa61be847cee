//! Application constants for csvparse
//!
//! This module contains the directive tokens, separator sets, date layouts and
//! default settings used throughout the decoder.

// =============================================================================
// Schema Tags
// =============================================================================

/// Tag value meaning "use the default": the field identifier for a binding
/// pattern, or raw assignment for a format directive
pub const DEFAULT_TAG: &str = "-";

/// Format directive tokens
pub mod directives {
    /// Title case
    pub const TITLE_CASE: &str = "tc";
    /// Upper case
    pub const UPPER_CASE: &str = "uc";
    /// Lower case
    pub const LOWER_CASE: &str = "lc";
    /// Phone number formatting
    pub const PHONE: &str = "fp";
    /// Separator stripping
    pub const STRIP_SEPARATORS: &str = "ss";
    /// Raw assignment, no formatting
    pub const RAW: &str = super::DEFAULT_TAG;

    /// All canonical tokens, in the order they are listed in error messages
    pub const ALL: &[&str] = &[TITLE_CASE, UPPER_CASE, LOWER_CASE, PHONE, STRIP_SEPARATORS, RAW];
}

// =============================================================================
// Field Formatting
// =============================================================================

/// Characters removed by the separator-strip transform
pub const SEPARATOR_CHARS: &[char] = &[
    '\'', '#', '%', '$', '-', '+', '.', '*', '(', ')', ':', ';', '{', '}', '|', '&', ' ',
];

/// Digit count of a phone number with area code
pub const PHONE_DIGITS_WITH_AREA: usize = 10;

/// Digit count of a local phone number
pub const PHONE_DIGITS_LOCAL: usize = 7;

// =============================================================================
// Date Layouts
// =============================================================================

/// Date-only layouts tried in order: month/day/year with slashes then hyphens,
/// four-digit years before two-digit ones, then year-first layouts. Month and
/// day accept one or two digits.
pub const DATE_LAYOUTS: &[&str] = &[
    r"^(?P<month>[0-9]{1,2})/(?P<day>[0-9]{1,2})/(?P<year>[0-9]{4})$",
    r"^(?P<month>[0-9]{1,2})-(?P<day>[0-9]{1,2})-(?P<year>[0-9]{4})$",
    r"^(?P<month>[0-9]{1,2})/(?P<day>[0-9]{1,2})/(?P<year>[0-9]{2})$",
    r"^(?P<month>[0-9]{1,2})-(?P<day>[0-9]{1,2})-(?P<year>[0-9]{2})$",
    r"^(?P<year>[0-9]{4})/(?P<month>[0-9]{1,2})/(?P<day>[0-9]{1,2})$",
    r"^(?P<year>[0-9]{4})-(?P<month>[0-9]{1,2})-(?P<day>[0-9]{1,2})$",
];

/// Two-digit years at or above this value belong to the 1900s, below it to the 2000s
pub const TWO_DIGIT_YEAR_PIVOT: i32 = 69;

// =============================================================================
// Configuration
// =============================================================================

/// Directory name under the platform config directory
pub const CONFIG_DIR_NAME: &str = "csvparse";

/// Configuration file name looked up when no `--config` is given
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default CSV field delimiter
pub const DEFAULT_DELIMITER: u8 = b',';

/// Check whether a character is removed by the separator-strip transform
pub fn is_separator(c: char) -> bool {
    SEPARATOR_CHARS.contains(&c)
}
