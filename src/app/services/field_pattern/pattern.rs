//! Field patterns and matches

use crate::app::models::{Occurrence, SelectionError};
use crate::app::services::lexer::{self, Token};
use crate::app::services::value_converter::{self, ParseFailure};
use crate::config::Substitution;
use crate::{Error, Result};

/// Shape of the value following a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// `bw 6`, `aw 1.23e-4`, `rd .05`
    ScalarNumber,
    /// `nm 'Trap Prof 01'`
    QuotedString,
    /// `ty 1`
    Integer,
    /// `ta 0 0 1 0`, exactly n numbers
    FixedNumericArray(usize),
    /// `gi '1' '2' '-1' '-1'`, tokens up to the next stop label or end of record
    VariableStringArray,
}

/// Typed value of a matched field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Integer(i64),
    Text(String),
    Numbers(Vec<f64>),
    Strings(Vec<String>),
}

/// Why a found field could not produce a value
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FieldFailure {
    #[error("required field '{label}' not found")]
    Absent { label: String },

    #[error("field '{label}' has no value")]
    MissingValue { label: String },

    #[error("field '{label}': {source}")]
    Unparsable {
        label: String,
        #[source]
        source: ParseFailure,
    },

    #[error("field '{label}' expects a quoted string, found {raw}")]
    NotQuoted { label: String, raw: String },

    #[error("field '{label}': {source}")]
    Selection {
        label: String,
        #[source]
        source: SelectionError,
    },
}

/// Result of applying a [`FieldPattern`] to one body
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
    label: String,
    occurrences: usize,
    raw: Option<String>,
    outcome: Option<std::result::Result<FieldValue, FieldFailure>>,
}

impl FieldMatch {
    fn absent(label: &str) -> Self {
        Self {
            label: label.to_string(),
            occurrences: 0,
            raw: None,
            outcome: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the label occurs in the body at all
    pub fn found(&self) -> bool {
        self.occurrences > 0
    }

    /// How many times the label occurs in the body
    pub fn occurrences(&self) -> usize {
        self.occurrences
    }

    /// Verbatim value text of the selected occurrence
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn value(&self) -> Option<&FieldValue> {
        self.outcome.as_ref().and_then(|o| o.as_ref().ok())
    }

    pub fn failure(&self) -> Option<&FieldFailure> {
        self.outcome.as_ref().and_then(|o| o.as_ref().err())
    }

    pub fn is_ok(&self) -> bool {
        self.value().is_some()
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self.value()? {
            FieldValue::Number(value) => Some(*value),
            FieldValue::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self.value()? {
            FieldValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self.value()? {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn numbers(&self) -> Option<&[f64]> {
        match self.value()? {
            FieldValue::Numbers(values) => Some(values),
            _ => None,
        }
    }

    pub fn strings(&self) -> Option<&[String]> {
        match self.value()? {
            FieldValue::Strings(values) => Some(values),
            _ => None,
        }
    }
}

/// Immutable matcher for one labeled field
///
/// Cheap to clone and safe to share between threads; applying it performs
/// no I/O and keeps no state between bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPattern {
    label: String,
    kind: FieldKind,
    occurrence: Occurrence,
    stop_labels: Vec<String>,
    substitution: Option<Substitution>,
}

impl FieldPattern {
    /// Build a pattern for a label and value kind
    pub fn build(label: impl Into<String>, kind: FieldKind) -> Result<Self> {
        let label = label.into();
        if label.is_empty() {
            return Err(Error::invalid_pattern(label, "label must not be empty"));
        }
        if label.chars().any(|c| c.is_whitespace() || c == '\'') {
            return Err(Error::invalid_pattern(
                label,
                "label must be a single bare token",
            ));
        }
        if kind == FieldKind::FixedNumericArray(0) {
            return Err(Error::invalid_pattern(
                label,
                "fixed numeric array needs at least one element",
            ));
        }
        Ok(Self {
            label,
            kind,
            occurrence: Occurrence::First,
            stop_labels: Vec::new(),
            substitution: None,
        })
    }

    pub fn number(label: impl Into<String>) -> Result<Self> {
        Self::build(label, FieldKind::ScalarNumber)
    }

    pub fn quoted(label: impl Into<String>) -> Result<Self> {
        Self::build(label, FieldKind::QuotedString)
    }

    pub fn integer(label: impl Into<String>) -> Result<Self> {
        Self::build(label, FieldKind::Integer)
    }

    pub fn numbers(label: impl Into<String>, count: usize) -> Result<Self> {
        Self::build(label, FieldKind::FixedNumericArray(count))
    }

    pub fn strings(label: impl Into<String>) -> Result<Self> {
        Self::build(label, FieldKind::VariableStringArray)
    }

    /// Select which occurrence to use when the label repeats
    pub fn with_occurrence(mut self, occurrence: Occurrence) -> Self {
        self.occurrence = occurrence;
        self
    }

    /// Labels that end a variable string array
    pub fn until<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_labels.extend(labels.into_iter().map(Into::into));
        self
    }

    /// Replace the identifier placeholder with its literal in extracted strings
    pub fn with_substitution(mut self, substitution: Substitution) -> Self {
        self.substitution = Some(substitution);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn occurrence(&self) -> Occurrence {
        self.occurrence
    }

    /// Locate the field in a body and extract its value
    pub fn apply(&self, body: &str) -> FieldMatch {
        let tokens = lexer::tokenize(body);

        let positions: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| token.text == self.label)
            .map(|(index, _)| index)
            .collect();
        if positions.is_empty() {
            return FieldMatch::absent(&self.label);
        }

        let mut found = FieldMatch {
            label: self.label.clone(),
            occurrences: positions.len(),
            raw: None,
            outcome: None,
        };
        let selected = match self.occurrence.index(positions.len()) {
            Ok(index) => positions[index],
            Err(source) => {
                found.outcome = Some(Err(FieldFailure::Selection {
                    label: self.label.clone(),
                    source,
                }));
                return found;
            }
        };

        let rest = match self.kind {
            FieldKind::VariableStringArray => {
                &tokens[selected + 1..record_end(&tokens).max(selected + 1)]
            }
            _ => &tokens[selected + 1..],
        };
        let values = self.value_tokens(rest);
        if let (Some(first), Some(last)) = (values.first(), values.last()) {
            found.raw = Some(body[first.start..last.end].to_string());
        }
        found.outcome = Some(self.convert(values));
        found
    }

    /// Tokens belonging to the value, by kind
    fn value_tokens<'t, 'a>(&self, rest: &'t [Token<'a>]) -> &'t [Token<'a>] {
        match self.kind {
            FieldKind::ScalarNumber | FieldKind::QuotedString | FieldKind::Integer => {
                &rest[..rest.len().min(1)]
            }
            FieldKind::FixedNumericArray(count) => &rest[..rest.len().min(count)],
            FieldKind::VariableStringArray => {
                let end = rest
                    .iter()
                    .position(|token| self.stop_labels.iter().any(|stop| stop == token.text))
                    .unwrap_or(rest.len());
                &rest[..end]
            }
        }
    }

    fn convert(&self, values: &[Token<'_>]) -> std::result::Result<FieldValue, FieldFailure> {
        let missing = || FieldFailure::MissingValue {
            label: self.label.clone(),
        };
        let unparsable = |source: ParseFailure| FieldFailure::Unparsable {
            label: self.label.clone(),
            source,
        };

        match self.kind {
            FieldKind::ScalarNumber => {
                let token = values.first().ok_or_else(missing)?;
                value_converter::to_number(token.text)
                    .map(FieldValue::Number)
                    .map_err(unparsable)
            }
            FieldKind::Integer => {
                let token = values.first().ok_or_else(missing)?;
                value_converter::to_integer(token.text)
                    .map(FieldValue::Integer)
                    .map_err(unparsable)
            }
            FieldKind::QuotedString => {
                let token = values.first().ok_or_else(missing)?;
                if !token.is_quoted() {
                    return Err(FieldFailure::NotQuoted {
                        label: self.label.clone(),
                        raw: token.text.to_string(),
                    });
                }
                Ok(FieldValue::Text(
                    self.restore(&token.unquoted()),
                ))
            }
            FieldKind::FixedNumericArray(count) => {
                if values.len() < count {
                    return Err(missing());
                }
                values
                    .iter()
                    .map(|token| value_converter::to_number(token.text))
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map(FieldValue::Numbers)
                    .map_err(unparsable)
            }
            FieldKind::VariableStringArray => Ok(FieldValue::Strings(
                values
                    .iter()
                    .map(|token| self.restore(&token.unquoted()))
                    .collect(),
            )),
        }
    }

    /// Replace the placeholder with the literal it stands for in an extracted string
    fn restore(&self, text: &str) -> String {
        match &self.substitution {
            Some(s) => text.replace(s.placeholder.as_str(), &s.literal),
            None => text.to_string(),
        }
    }
}

/// Token count without the record's own close tag
///
/// A body produced by the extractor starts with its uppercase open tag and
/// ends with the lowercase close tag of the same keyword.
fn record_end(tokens: &[Token<'_>]) -> usize {
    match (tokens.first(), tokens.last()) {
        (Some(open), Some(close))
            if tokens.len() > 1
                && !open.is_quoted()
                && !close.is_quoted()
                && open.text != close.text
                && open.text.to_ascii_lowercase() == close.text =>
        {
            tokens.len() - 1
        }
        _ => tokens.len(),
    }
}
