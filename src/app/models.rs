//! Core value types shared by the record extractor, field matchers and table tokenizer.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One logical tag-delimited record as read from the input
///
/// Spans from the line holding the opening tag to the line holding the
/// closing tag, both inclusive, with original line breaks preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    text: String,
    start_line: usize,
    truncated: bool,
}

impl RawRecord {
    pub fn new(text: String, start_line: usize, truncated: bool) -> Self {
        Self {
            text,
            start_line,
            truncated,
        }
    }

    /// Record body, opening and closing tag lines included
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 1-based line number of the opening tag
    pub fn start_line(&self) -> usize {
        self.start_line
    }

    /// True when the input ended before the closing tag was seen
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

/// Target kind of a table column or converted token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Number,
    Integer,
    Text,
    Boolean,
    Timestamp,
}

impl ValueKind {
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Number => "number",
            ValueKind::Integer => "integer",
            ValueKind::Text => "text",
            ValueKind::Boolean => "boolean",
            ValueKind::Timestamp => "timestamp",
        }
    }

    /// Parse a kind name as used in column specifications (`x:number`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "number" | "double" | "f64" => Some(ValueKind::Number),
            "integer" | "int" | "i64" => Some(ValueKind::Integer),
            "text" | "string" | "str" => Some(ValueKind::Text),
            "boolean" | "bool" => Some(ValueKind::Boolean),
            "timestamp" | "date" | "datetime" => Some(ValueKind::Timestamp),
            _ => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed table cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Number(f64),
    Integer(i64),
    Text(String),
    Boolean(bool),
    Timestamp(NaiveDateTime),
}

impl CellValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            CellValue::Number(_) => ValueKind::Number,
            CellValue::Integer(_) => ValueKind::Integer,
            CellValue::Text(_) => ValueKind::Text,
            CellValue::Boolean(_) => ValueKind::Boolean,
            CellValue::Timestamp(_) => ValueKind::Timestamp,
        }
    }

    /// Numeric view; integers widen to f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            CellValue::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::Timestamp(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(value) => write!(f, "{}", value),
            CellValue::Integer(value) => write!(f, "{}", value),
            CellValue::Text(value) => write!(f, "'{}'", value),
            CellValue::Boolean(value) => write!(f, "{}", if *value { 1 } else { 0 }),
            CellValue::Timestamp(value) => write!(f, "{}", value.format("%Y/%m/%d;%H:%M:%S")),
        }
    }
}

/// Which occurrence to use when a label or block appears more than once
///
/// `Nth` is zero-based. Several record types carry a stale duplicate table
/// after a type switch, where the live one is `Nth(1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Occurrence {
    #[default]
    First,
    Nth(usize),
    Last,
    ExactlyOne,
}

/// Why an occurrence could not be selected
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no occurrence found")]
    Absent,

    #[error("{count} occurrences found where exactly one is required")]
    Ambiguous { count: usize },

    #[error("occurrence #{requested} requested but only {count} found")]
    OutOfRange { requested: usize, count: usize },
}

impl Occurrence {
    /// Resolve the policy against the number of occurrences found
    pub fn index(self, count: usize) -> Result<usize, SelectionError> {
        if count == 0 {
            return Err(SelectionError::Absent);
        }
        match self {
            Occurrence::First => Ok(0),
            Occurrence::Last => Ok(count - 1),
            Occurrence::Nth(n) if n < count => Ok(n),
            Occurrence::Nth(n) => Err(SelectionError::OutOfRange {
                requested: n,
                count,
            }),
            Occurrence::ExactlyOne if count == 1 => Ok(0),
            Occurrence::ExactlyOne => Err(SelectionError::Ambiguous { count }),
        }
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occurrence::First => f.write_str("first"),
            Occurrence::Nth(n) => write!(f, "#{}", n),
            Occurrence::Last => f.write_str("last"),
            Occurrence::ExactlyOne => f.write_str("exactly one"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occurrence_resolution() {
        assert_eq!(Occurrence::First.index(3), Ok(0));
        assert_eq!(Occurrence::Last.index(3), Ok(2));
        assert_eq!(Occurrence::Nth(1).index(2), Ok(1));
        assert_eq!(
            Occurrence::Nth(2).index(2),
            Err(SelectionError::OutOfRange {
                requested: 2,
                count: 2
            })
        );
        assert_eq!(Occurrence::ExactlyOne.index(1), Ok(0));
        assert_eq!(
            Occurrence::ExactlyOne.index(2),
            Err(SelectionError::Ambiguous { count: 2 })
        );
        assert_eq!(Occurrence::First.index(0), Err(SelectionError::Absent));
    }

    #[test]
    fn test_value_kind_names() {
        assert_eq!(ValueKind::from_name("Number"), Some(ValueKind::Number));
        assert_eq!(ValueKind::from_name("bool"), Some(ValueKind::Boolean));
        assert_eq!(ValueKind::from_name("blob"), None);
    }

    #[test]
    fn test_cell_value_accessors() {
        assert_eq!(CellValue::Integer(4).as_f64(), Some(4.0));
        assert_eq!(CellValue::Text("a".to_string()).as_f64(), None);
        assert_eq!(CellValue::Boolean(true).to_string(), "1");
    }
}
