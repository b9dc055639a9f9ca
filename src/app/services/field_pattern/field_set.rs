//! Groups of field patterns applied together

use super::pattern::{FieldFailure, FieldMatch, FieldPattern};
use crate::config::Substitution;
use crate::constants::{ID_LABEL, NAME_LABEL};
use crate::Result;
use std::sync::LazyLock;

static ID_PATTERN: LazyLock<FieldPattern> =
    LazyLock::new(|| FieldPattern::quoted(ID_LABEL).expect("id label is a bare token"));

static NAME_PATTERN: LazyLock<FieldPattern> =
    LazyLock::new(|| FieldPattern::quoted(NAME_LABEL).expect("nm label is a bare token"));

/// Ordered collection of field patterns describing one record layout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    patterns: Vec<FieldPattern>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pattern, builder style
    pub fn with(mut self, pattern: FieldPattern) -> Self {
        self.patterns.push(pattern);
        self
    }

    /// Add several labels of the same kind
    pub fn with_numbers<I, S>(mut self, labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for label in labels {
            self.patterns.push(FieldPattern::number(label)?);
        }
        Ok(self)
    }

    pub fn patterns(&self) -> &[FieldPattern] {
        &self.patterns
    }

    /// Apply every pattern to the body
    pub fn apply(&self, body: &str) -> FieldValues {
        FieldValues {
            matches: self.patterns.iter().map(|p| p.apply(body)).collect(),
        }
    }
}

/// Matches produced by a [`FieldSet`], in pattern order
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValues {
    matches: Vec<FieldMatch>,
}

impl FieldValues {
    pub fn get(&self, label: &str) -> Option<&FieldMatch> {
        self.matches.iter().find(|m| m.label() == label)
    }

    pub fn number(&self, label: &str) -> Option<f64> {
        self.get(label)?.as_f64()
    }

    pub fn integer(&self, label: &str) -> Option<i64> {
        self.get(label)?.as_i64()
    }

    pub fn text(&self, label: &str) -> Option<&str> {
        self.get(label)?.as_str()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldMatch> {
        self.matches.iter()
    }

    /// True when every field was found and converted
    pub fn all_ok(&self) -> bool {
        self.matches.iter().all(FieldMatch::is_ok)
    }

    /// First field that is absent or unusable, as a failure
    pub fn first_failure(&self) -> Option<FieldFailure> {
        self.matches.iter().find_map(|m| match m.failure() {
            Some(failure) => Some(failure.clone()),
            None if !m.found() => Some(FieldFailure::Absent {
                label: m.label().to_string(),
            }),
            None => None,
        })
    }
}

/// The `id '...'` / `nm '...'` pair most records start with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordIdentity {
    pub id: String,
    pub name: Option<String>,
}

/// Read the record identifier (required) and name (optional)
///
/// Takes the first occurrence of each label, which is the record's own
/// when sub-records with their own `id` follow.
pub fn read_identity(
    body: &str,
    substitution: &Substitution,
) -> std::result::Result<RecordIdentity, FieldFailure> {
    let id = ID_PATTERN
        .clone()
        .with_substitution(substitution.clone())
        .apply(body);
    if let Some(failure) = id.failure() {
        return Err(failure.clone());
    }
    let id = id.as_str().ok_or_else(|| FieldFailure::Absent {
        label: ID_LABEL.to_string(),
    })?;

    let name = NAME_PATTERN
        .clone()
        .with_substitution(substitution.clone())
        .apply(body);
    if let Some(failure) = name.failure() {
        return Err(failure.clone());
    }

    Ok(RecordIdentity {
        id: id.to_string(),
        name: name.as_str().map(str::to_string),
    })
}
