//! Free-text query parsing and record matching.
//!
//! A query reduces to a single `{attribute, operator, value}` filter. The
//! parser is deterministic, tried in order:
//!
//! 1. An explicit comparison (`height > 100`, `stage != constructed`).
//!    `>=` and `<=` are accepted and treated as strict comparisons.
//! 2. A height phrase: a cue word (`over`, `under`, `taller`, ...)
//!    followed by a number. `feet`/`ft` after the number converts to
//!    metres; a bare number compares for equality.
//! 3. A stage phrase: any known stage synonym (`new`, `built`, ...),
//!    negated when preceded by `not`, `except`, or `without`.
//!
//! Text that fits none of these is rejected, and the rejection message is
//! what the client shows in its error slot.

use constants::buildings::BuildingRecord;
use constants::stage::stage_for_synonym;
use thiserror::Error;

const METRES_PER_FOOT: f64 = 0.3048;

const GREATER_CUES: &[&str] = &["over", "above", "taller", "higher", "more", "least", "exceeding"];
const LESS_CUES: &[&str] = &["under", "below", "shorter", "less", "fewer", "most"];
const NEGATION_CUES: &[&str] = &["not", "except", "without"];
const FOOT_UNITS: &[&str] = &["ft", "feet", "foot"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Greater,
    Less,
    Equal,
    NotEqual,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Number(f64),
    Text(String),
}

/// One attribute comparison extracted from the query text.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryFilter {
    pub attribute: String,
    pub op: FilterOp,
    pub value: FilterValue,
}

#[derive(Debug, Error)]
#[error("could not understand the query {0:?}")]
pub struct QueryParseError(pub String);

/// Parse free text into a filter.
pub fn parse_query(text: &str) -> Result<QueryFilter, QueryParseError> {
    let lowered = text.to_lowercase();

    if let Some(filter) = parse_explicit(&lowered) {
        return Ok(filter);
    }
    if let Some(filter) = parse_height_phrase(&lowered) {
        return Ok(filter);
    }
    if let Some(filter) = parse_stage_phrase(&lowered) {
        return Ok(filter);
    }

    Err(QueryParseError(text.trim().to_string()))
}

/// Apply a filter to one record.
///
/// Matching is permissive in the same way the API contract is: an unknown
/// attribute never matches, numeric attributes coerce (and a failed
/// coercion means no match), and stage compares as case-insensitive text
/// under `=`/`!=` only.
pub fn matches(record: &BuildingRecord, filter: &QueryFilter) -> bool {
    if filter.attribute == "stage" {
        let FilterValue::Text(expected) = &filter.value else {
            return false;
        };
        let equal = record.stage.trim().eq_ignore_ascii_case(expected.trim());
        return match filter.op {
            FilterOp::Equal => equal,
            FilterOp::NotEqual => !equal,
            _ => false,
        };
    }

    let actual = match filter.attribute.as_str() {
        "height" => Some(record.height),
        "struct_id" => record.struct_id.trim().parse::<f64>().ok(),
        _ => None,
    };
    let (Some(actual), FilterValue::Number(expected)) = (actual, &filter.value) else {
        return false;
    };
    match filter.op {
        FilterOp::Greater => actual > *expected,
        FilterOp::Less => actual < *expected,
        FilterOp::Equal => actual == *expected,
        FilterOp::NotEqual => actual != *expected,
    }
}

/// `attr op value` with a literal comparison operator somewhere in the text.
fn parse_explicit(text: &str) -> Option<QueryFilter> {
    // Two-character operators must be searched before their prefixes.
    const OPERATORS: &[(&str, FilterOp)] = &[
        ("!=", FilterOp::NotEqual),
        ("==", FilterOp::Equal),
        (">=", FilterOp::Greater),
        ("<=", FilterOp::Less),
        (">", FilterOp::Greater),
        ("<", FilterOp::Less),
        ("=", FilterOp::Equal),
    ];

    let (position, symbol, op) = OPERATORS
        .iter()
        .filter_map(|(symbol, op)| text.find(symbol).map(|at| (at, *symbol, *op)))
        .min_by_key(|(at, symbol, _)| (*at, std::cmp::Reverse(symbol.len())))?;

    let attribute = normalise_attribute(text[..position].split_whitespace().last());
    let value_text = text[position + symbol.len()..].trim();
    let value_token = clean_token(value_text.split_whitespace().next()?);
    let value = match parse_number_token(&value_token) {
        Some(number) => FilterValue::Number(number),
        None => {
            FilterValue::Text(stage_for_synonym(&value_token).unwrap_or(&value_token).to_string())
        }
    };

    Some(QueryFilter {
        attribute,
        op,
        value,
    })
}

/// A cue word and a number, read as a height comparison.
fn parse_height_phrase(text: &str) -> Option<QueryFilter> {
    let tokens: Vec<String> = text.split_whitespace().map(clean_token).collect();
    let (index, mut value) = tokens
        .iter()
        .enumerate()
        .find_map(|(i, token)| parse_number_token(token).map(|n| (i, n)))?;

    if is_foot_valued(&tokens, index) {
        value *= METRES_PER_FOOT;
    }

    let preceding = &tokens[..index];
    let op = if preceding.iter().any(|t| GREATER_CUES.contains(&t.as_str())) {
        FilterOp::Greater
    } else if preceding.iter().any(|t| LESS_CUES.contains(&t.as_str())) {
        FilterOp::Less
    } else {
        FilterOp::Equal
    };

    Some(QueryFilter {
        attribute: "height".to_string(),
        op,
        value: FilterValue::Number(value),
    })
}

/// A known stage synonym anywhere in the text.
fn parse_stage_phrase(text: &str) -> Option<QueryFilter> {
    let tokens: Vec<String> = text.split_whitespace().map(clean_token).collect();
    let (index, stage) = tokens
        .iter()
        .enumerate()
        .find_map(|(i, token)| stage_for_synonym(token).map(|s| (i, s)))?;

    let negated = tokens[..index]
        .iter()
        .any(|t| NEGATION_CUES.contains(&t.as_str()));

    Some(QueryFilter {
        attribute: "stage".to_string(),
        op: if negated {
            FilterOp::NotEqual
        } else {
            FilterOp::Equal
        },
        value: FilterValue::Text(stage.to_string()),
    })
}

fn normalise_attribute(word: Option<&str>) -> String {
    let attribute = clean_token(word.unwrap_or("height"));
    match attribute.as_str() {
        "" => "height".to_string(),
        // The overlay labels stage as "Status"; accept both spellings.
        "status" => "stage".to_string(),
        _ => attribute,
    }
}

/// Whether the number at `index` is given in feet, either as a glued
/// suffix (`100ft`) or as the following word (`100 feet`).
fn is_foot_valued(tokens: &[String], index: usize) -> bool {
    let token = &tokens[index];
    let suffix: String = token.chars().skip_while(|c| !c.is_alphabetic()).collect();
    if FOOT_UNITS.contains(&suffix.as_str()) {
        return true;
    }
    tokens
        .get(index + 1)
        .is_some_and(|next| FOOT_UNITS.contains(&next.as_str()))
}

/// Strip leading/trailing punctuation from a word token.
fn clean_token(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric() && c != '.' && c != '-')
        .to_string()
}

/// Parse a token as a number, tolerating a glued unit suffix (`100m`).
fn parse_number_token(token: &str) -> Option<f64> {
    let numeric: String = token
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if numeric.is_empty() {
        return None;
    }
    numeric.parse().ok()
}
