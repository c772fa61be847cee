//! Full-name decomposition
//!
//! The decoder only depends on the [`NameSplitter`] trait; callers with a
//! better parser can inject it. [`HeuristicNameSplitter`] is the default and
//! covers the common mailing-list shapes:
//!
//! - `First Last`, `First Middle... Last`
//! - `Last, First Middle`
//! - salutations (`Mr.`, `Dr`) and suffixes (`Jr.`, `III`, `PhD`) are dropped
//! - surname particles (`van`, `de`, `St`) start the last name

use serde::Serialize;

const SALUTATIONS: &[&str] = &["mr", "mrs", "ms", "miss", "dr", "prof", "rev"];

const SUFFIXES: &[&str] = &["jr", "sr", "ii", "iii", "iv", "md", "phd", "esq"];

const SURNAME_PARTICLES: &[&str] = &["van", "von", "de", "del", "della", "da", "di", "la", "le", "st"];

/// Name parts produced by a [`NameSplitter`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedName {
    pub first: String,
    pub middle: String,
    pub last: String,
}

impl ParsedName {
    fn from_tokens(first: Option<&str>, middle: &[&str], last: &[&str]) -> Self {
        Self {
            first: first.unwrap_or_default().to_string(),
            middle: middle.join(" "),
            last: last.join(" "),
        }
    }
}

/// Splits a full name into first, middle and last parts
pub trait NameSplitter: std::fmt::Debug + Send + Sync {
    /// Best-effort split; never fails, unknown shapes yield partial or empty parts
    fn split(&self, full_name: &str) -> ParsedName;
}

/// Rule-based splitter for western name order
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicNameSplitter;

impl NameSplitter for HeuristicNameSplitter {
    fn split(&self, full_name: &str) -> ParsedName {
        if let Some((surname, given)) = full_name.split_once(',') {
            let given_tokens = tokens(given);
            if !given_tokens.iter().all(|token| is_suffix(token)) {
                return split_inverted(&tokens(surname), &given_tokens);
            }
            return split_natural(&tokens(surname));
        }

        split_natural(&tokens(full_name))
    }
}

fn tokens(part: &str) -> Vec<&str> {
    part.split_whitespace()
        .map(|token| token.trim_matches(','))
        .filter(|token| !token.is_empty())
        .collect()
}

fn normalized(token: &str) -> String {
    token.replace('.', "").to_lowercase()
}

fn is_salutation(token: &str) -> bool {
    SALUTATIONS.contains(&normalized(token).as_str())
}

fn is_suffix(token: &str) -> bool {
    SUFFIXES.contains(&normalized(token).as_str())
}

fn is_particle(token: &str) -> bool {
    SURNAME_PARTICLES.contains(&normalized(token).as_str())
}

/// Drop leading salutations and trailing suffixes, keeping at least one token
fn strip_decorations<'a>(mut tokens: &'a [&'a str]) -> &'a [&'a str] {
    while tokens.len() > 1 && is_salutation(tokens[0]) {
        tokens = &tokens[1..];
    }
    while tokens.len() > 1 && is_suffix(tokens[tokens.len() - 1]) {
        tokens = &tokens[..tokens.len() - 1];
    }
    tokens
}

fn split_natural(all: &[&str]) -> ParsedName {
    let tokens = strip_decorations(all);
    match tokens {
        [] => ParsedName::default(),
        [only] => ParsedName::from_tokens(Some(*only), &[], &[]),
        [first, rest @ ..] => {
            let surname_start = rest[..rest.len() - 1]
                .iter()
                .position(|token| is_particle(token))
                .unwrap_or(rest.len() - 1);
            ParsedName::from_tokens(
                Some(*first),
                &rest[..surname_start],
                &rest[surname_start..],
            )
        }
    }
}

fn split_inverted(surname: &[&str], given: &[&str]) -> ParsedName {
    let surname = strip_decorations(surname);
    let given = strip_decorations(given);
    match given {
        [] => ParsedName::from_tokens(None, &[], surname),
        [first, middle @ ..] => ParsedName::from_tokens(Some(*first), middle, surname),
    }
}
