//! Column schemas for embedded tables

use crate::app::models::ValueKind;
use crate::{Error, Result};
use std::collections::HashSet;

/// One named, typed table column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub kind: ValueKind,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Ordered list of columns typing the cells of a table
///
/// An empty schema is valid and means "infer from the first row": every
/// cell of that row becomes a numeric column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSchema {
    columns: Vec<Column>,
}

impl ColumnSchema {
    /// Schema to be inferred from the first row
    pub fn inferred() -> Self {
        Self::default()
    }

    /// Build a schema from `(name, kind)` pairs
    ///
    /// Fails on an empty column list or a repeated column name.
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, ValueKind)>,
        S: Into<String>,
    {
        let columns: Vec<Column> = columns
            .into_iter()
            .map(|(name, kind)| Column::new(name, kind))
            .collect();
        if columns.is_empty() {
            return Err(Error::invalid_schema(
                "at least one column is required; use ColumnSchema::inferred() to infer",
            ));
        }

        let mut seen = HashSet::new();
        for column in &columns {
            if column.name.trim().is_empty() {
                return Err(Error::invalid_schema("column names must not be empty"));
            }
            if !seen.insert(column.name.as_str()) {
                return Err(Error::invalid_schema(format!(
                    "duplicate column name '{}'",
                    column.name
                )));
            }
        }
        Ok(Self { columns })
    }

    /// `count` numeric columns named after their position
    pub fn numeric(count: usize) -> Self {
        Self {
            columns: (0..count)
                .map(|index| Column::new(index.to_string(), ValueKind::Number))
                .collect(),
        }
    }

    /// Append a column, builder style
    pub fn with_column(mut self, name: impl Into<String>, kind: ValueKind) -> Result<Self> {
        let column = Column::new(name, kind);
        if column.name.trim().is_empty() {
            return Err(Error::invalid_schema("column names must not be empty"));
        }
        if self.index_of(&column.name).is_some() {
            return Err(Error::invalid_schema(format!(
                "duplicate column name '{}'",
                column.name
            )));
        }
        self.columns.push(column);
        Ok(self)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True for a schema still to be inferred
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    pub fn kinds(&self) -> impl Iterator<Item = ValueKind> + '_ {
        self.columns.iter().map(|column| column.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_columns_rejects_bad_schemas() {
        let empty: Vec<(&str, ValueKind)> = Vec::new();
        assert!(matches!(
            ColumnSchema::from_columns(empty),
            Err(Error::InvalidSchema { .. })
        ));
        assert!(matches!(
            ColumnSchema::from_columns([("h", ValueKind::Number), ("h", ValueKind::Text)]),
            Err(Error::InvalidSchema { .. })
        ));
        assert!(matches!(
            ColumnSchema::from_columns([(" ", ValueKind::Number)]),
            Err(Error::InvalidSchema { .. })
        ));
    }

    #[test]
    fn test_builder_and_lookup() {
        let schema = ColumnSchema::inferred()
            .with_column("time", ValueKind::Timestamp)
            .unwrap()
            .with_column("level", ValueKind::Number)
            .unwrap();

        assert_eq!(schema.len(), 2);
        assert_eq!(schema.index_of("level"), Some(1));
        assert_eq!(
            schema.kinds().collect::<Vec<_>>(),
            vec![ValueKind::Timestamp, ValueKind::Number]
        );
        assert!(schema.with_column("time", ValueKind::Text).is_err());
    }

    #[test]
    fn test_numeric_schema() {
        let schema = ColumnSchema::numeric(3);
        assert_eq!(schema.len(), 3);
        assert!(schema.kinds().all(|kind| kind == ValueKind::Number));
        assert_eq!(schema.columns()[2].name, "2");
        assert!(ColumnSchema::inferred().is_empty());
    }
}
