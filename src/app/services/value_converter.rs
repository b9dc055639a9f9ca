//! Culture-invariant conversion of raw tokens to typed values
//!
//! Every function is total: malformed input yields a [`ParseFailure`], never
//! a panic and never a silent default. Numbers always use `.` as decimal
//! separator and `e`/`E` as exponent marker, whatever the host locale.

use crate::app::models::{CellValue, ValueKind};
use crate::constants::{BOOL_FALSE, BOOL_TRUE, QUOTE, TIMESTAMP_FORMAT};
use chrono::{NaiveDateTime, TimeDelta};
use regex::Regex;
use std::sync::LazyLock;

/// Signed decimal or scientific number; digits may be absent on either side of the point
static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").expect("valid number pattern")
});

static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+$").expect("valid integer pattern"));

/// `ddd;hh;mm;ss` periodicity token
static PERIOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+);(\d{1,2});(\d{1,2});(\d{1,2})$").expect("valid period pattern")
});

/// A token that could not be converted to the requested kind
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot convert '{token}' to {kind}")]
pub struct ParseFailure {
    pub token: String,
    pub kind: &'static str,
}

impl ParseFailure {
    fn new(token: &str, kind: &'static str) -> Self {
        Self {
            token: token.to_string(),
            kind,
        }
    }
}

/// Remove one pair of surrounding single quotes, if present
pub fn strip_quotes(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix(QUOTE)
        .and_then(|inner| inner.strip_suffix(QUOTE))
        .unwrap_or(trimmed)
}

/// Parse a number such as `6`, `-1`, `.05` or `9.9999e+009`
pub fn to_number(text: &str) -> Result<f64, ParseFailure> {
    let token = text.trim();
    if !NUMBER.is_match(token) {
        return Err(ParseFailure::new(token, "number"));
    }
    token
        .parse::<f64>()
        .map_err(|_| ParseFailure::new(token, "number"))
}

/// Parse an optionally signed integer
pub fn to_integer(text: &str) -> Result<i64, ParseFailure> {
    let token = text.trim();
    if !INTEGER.is_match(token) {
        return Err(ParseFailure::new(token, "integer"));
    }
    token
        .parse::<i64>()
        .map_err(|_| ParseFailure::new(token, "integer"))
}

/// Parse a `1`/`0` flag; anything else is a failure
pub fn to_bool(text: &str) -> Result<bool, ParseFailure> {
    match strip_quotes(text) {
        BOOL_TRUE => Ok(true),
        BOOL_FALSE => Ok(false),
        other => Err(ParseFailure::new(other, "boolean")),
    }
}

/// Parse a `'YYYY/MM/DD;HH:MM:SS'` timestamp
pub fn to_timestamp(text: &str) -> Result<NaiveDateTime, ParseFailure> {
    let normalized: String = text
        .trim()
        .chars()
        .map(|c| if c == QUOTE || c == ';' { ' ' } else { c })
        .collect();
    NaiveDateTime::parse_from_str(normalized.trim(), TIMESTAMP_FORMAT)
        .map_err(|_| ParseFailure::new(text.trim(), "timestamp"))
}

/// Identity conversion
pub fn to_text(text: &str) -> Result<String, ParseFailure> {
    Ok(text.to_string())
}

/// Parse a `'ddd;hh;mm;ss'` period into a duration
pub fn to_period(text: &str) -> Result<TimeDelta, ParseFailure> {
    let token = strip_quotes(text);
    let failure = || ParseFailure::new(token, "period");

    let captures = PERIOD.captures(token).ok_or_else(failure)?;
    let field = |index: usize| -> Result<i64, ParseFailure> {
        captures[index].parse::<i64>().map_err(|_| failure())
    };
    let (days, hours, minutes, seconds) = (field(1)?, field(2)?, field(3)?, field(4)?);
    if hours > 23 || minutes > 59 || seconds > 59 {
        return Err(failure());
    }

    TimeDelta::try_days(days)
        .and_then(|d| d.checked_add(&TimeDelta::try_hours(hours)?))
        .and_then(|d| d.checked_add(&TimeDelta::try_minutes(minutes)?))
        .and_then(|d| d.checked_add(&TimeDelta::try_seconds(seconds)?))
        .ok_or_else(failure)
}

/// Convert a token to a cell value of the given kind
pub fn convert(text: &str, kind: ValueKind) -> Result<CellValue, ParseFailure> {
    match kind {
        ValueKind::Number => to_number(text).map(CellValue::Number),
        ValueKind::Integer => to_integer(text).map(CellValue::Integer),
        ValueKind::Text => to_text(text).map(CellValue::Text),
        ValueKind::Boolean => to_bool(text).map(CellValue::Boolean),
        ValueKind::Timestamp => to_timestamp(text).map(CellValue::Timestamp),
    }
}
