//! String transforms applied to text fields during materialization
//!
//! Each transform is a pure function over `&str`. [`FormatDirective`] names
//! one of them and is what a field descriptor carries; [`format_value`] is the
//! token-level dispatcher used when the directive is only known as text.

use std::fmt;
use std::str::FromStr;

use super::domain_parsers::format_phone;
use crate::constants::{directives, is_separator};
use crate::{Error, Result};

/// Transform selected by a field's format tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatDirective {
    /// Lowercase, capitalize each whitespace-separated token, trim
    TitleCase,
    /// Trim and uppercase
    UpperCase,
    /// Trim and lowercase
    LowerCase,
    /// Format as `(AAA) BBB-CCCC` or `BBB-CCCC`, empty when unformattable
    Phone,
    /// Remove punctuation and spaces
    StripSeparators,
    /// Assign the raw cell unchanged
    Raw,
}

impl FormatDirective {
    /// Apply the transform to a value
    pub fn apply(&self, value: &str) -> String {
        match self {
            FormatDirective::TitleCase => title_case(value),
            FormatDirective::UpperCase => upper_case(value),
            FormatDirective::LowerCase => lower_case(value),
            FormatDirective::Phone => format_phone(value),
            FormatDirective::StripSeparators => strip_separators(value),
            FormatDirective::Raw => value.to_string(),
        }
    }

    /// Canonical tag token for this directive
    pub fn token(&self) -> &'static str {
        match self {
            FormatDirective::TitleCase => directives::TITLE_CASE,
            FormatDirective::UpperCase => directives::UPPER_CASE,
            FormatDirective::LowerCase => directives::LOWER_CASE,
            FormatDirective::Phone => directives::PHONE,
            FormatDirective::StripSeparators => directives::STRIP_SEPARATORS,
            FormatDirective::Raw => directives::RAW,
        }
    }
}

impl FromStr for FormatDirective {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            directives::TITLE_CASE | "title" => Ok(FormatDirective::TitleCase),
            directives::UPPER_CASE | "upper" => Ok(FormatDirective::UpperCase),
            directives::LOWER_CASE | "lower" => Ok(FormatDirective::LowerCase),
            directives::PHONE | "phone" => Ok(FormatDirective::Phone),
            directives::STRIP_SEPARATORS | "strip" => Ok(FormatDirective::StripSeparators),
            directives::RAW | "raw" => Ok(FormatDirective::Raw),
            other => Err(Error::invalid_directive(other)),
        }
    }
}

impl fmt::Display for FormatDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Apply the directive named by `directive` to `value`
///
/// Fails with [`Error::InvalidDirective`] when the token is not recognized.
pub fn format_value(directive: &str, value: &str) -> Result<String> {
    let directive: FormatDirective = directive.parse()?;
    Ok(directive.apply(value))
}

/// Transform to title case and trim leading & trailing white space
pub fn title_case(value: &str) -> String {
    let lowered = value.trim().to_lowercase();
    let mut titled = String::with_capacity(lowered.len());
    let mut at_token_start = true;

    for c in lowered.chars() {
        if c.is_whitespace() {
            at_token_start = true;
            titled.push(c);
        } else if at_token_start {
            titled.extend(c.to_uppercase());
            at_token_start = false;
        } else {
            titled.push(c);
        }
    }

    titled
}

/// Transform to upper case and trim leading & trailing white space
pub fn upper_case(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Transform to lower case and trim leading & trailing white space
pub fn lower_case(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Remove every separator character, wherever it appears
pub fn strip_separators(value: &str) -> String {
    value.chars().filter(|&c| !is_separator(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        let cases = [
            (" apPlE ", "Apple"),
            (" sUn ", "Sun"),
            (" nOaH  ", "Noah"),
            ("JOHN   o'BRIEN", "John   O'brien"),
            ("", ""),
        ];
        for (input, expected) in cases {
            assert_eq!(title_case(input), expected, "input {:?}", input);
        }
    }

    #[test]
    fn test_title_case_tokens() {
        let out = title_case("  the qUICK\tbrown FOX  ");
        assert_eq!(out, out.trim());
        for token in out.split_whitespace() {
            let mut chars = token.chars();
            let first = chars.next().unwrap();
            assert!(first.is_uppercase(), "token {:?}", token);
            assert!(chars.all(|c| !c.is_uppercase()), "token {:?}", token);
        }
    }

    #[test]
    fn test_upper_and_lower_case() {
        assert_eq!(upper_case(" aPPle  "), "APPLE");
        assert_eq!(upper_case("  sUN "), "SUN");
        assert_eq!(lower_case("   APPLE  "), "apple");
        assert_eq!(lower_case("  NOAH   "), "noah");
    }

    #[test]
    fn test_strip_separators() {
        assert_eq!(strip_separators("#$*string&()&"), "string");
        assert_eq!(strip_separators("#   $*   string   &()&   "), "string");
        assert_eq!(strip_separators("(949) 323-7895"), "9493237895");
        assert_eq!(strip_separators("a{b}c|d;e:f"), "abcdef");
    }

    #[test]
    fn test_directive_parsing() {
        assert_eq!("tc".parse::<FormatDirective>().unwrap(), FormatDirective::TitleCase);
        assert_eq!("upper".parse::<FormatDirective>().unwrap(), FormatDirective::UpperCase);
        assert_eq!("-".parse::<FormatDirective>().unwrap(), FormatDirective::Raw);
        assert_eq!(FormatDirective::Phone.to_string(), "fp");

        let err = "xx".parse::<FormatDirective>().unwrap_err();
        assert!(matches!(err, Error::InvalidDirective { ref directive } if directive == "xx"));
    }

    #[test]
    fn test_format_value_dispatch() {
        assert_eq!(format_value("tc", " jOHN ").unwrap(), "John");
        assert_eq!(format_value("uc", " ca ").unwrap(), "CA");
        assert_eq!(format_value("lc", " A@B.COM ").unwrap(), "a@b.com");
        assert_eq!(format_value("fp", "949.323.7895").unwrap(), "(949) 323-7895");
        assert_eq!(format_value("ss", "12-34").unwrap(), "1234");
        assert_eq!(format_value("-", " keep  ME ").unwrap(), " keep  ME ");
        assert!(format_value("bogus", "value").is_err());
    }
}
