//! Row and cell tokenization of table text

use super::schema::ColumnSchema;
use crate::app::models::CellValue;
use crate::app::services::lexer;
use crate::app::services::value_converter::{self, ParseFailure};
use crate::constants::{QUOTE, ROW_TERMINATOR, preview};
use std::borrow::Cow;
use std::str::Chars;
use tracing::{debug, warn};

/// One converted table row; cell count always equals the table's column count
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    cells: Vec<CellValue>,
}

impl Row {
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Why a row was dropped
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RowFault {
    #[error("expected {expected} cells, found {found}")]
    CellCount { expected: usize, found: usize },

    #[error("column '{column}': {source}")]
    Conversion {
        column: String,
        #[source]
        source: ParseFailure,
    },
}

/// A dropped row, kept for diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// Zero-based position among the non-blank rows of the table
    pub index: usize,
    pub text: String,
    pub fault: RowFault,
}

/// Tokenized table with its effective schema
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    schema: ColumnSchema,
    rows: Vec<Row>,
    skipped: Vec<SkippedRow>,
}

impl Table {
    /// Schema used for conversion, inferred when none was declared
    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows dropped because of a wrong cell count or a conversion failure
    pub fn skipped(&self) -> &[SkippedRow] {
        &self.skipped
    }

    /// Cells of one column, top to bottom
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &CellValue> + '_> {
        let index = self.schema.index_of(name)?;
        Some(self.rows.iter().filter_map(move |row| row.get(index)))
    }

    /// Numeric values of one column; integers are widened
    pub fn numbers(&self, name: &str) -> Option<Vec<f64>> {
        Some(self.column(name)?.filter_map(CellValue::as_f64).collect())
    }
}

/// Lazy splitter producing the text of each non-blank row
///
/// `<` outside a quoted string ends a row. Line breaks inside a quoted
/// string are dropped; outside one they become a space.
#[derive(Debug, Clone)]
pub struct RowTexts<'a> {
    chars: Chars<'a>,
}

impl<'a> RowTexts<'a> {
    pub fn new(table_text: &'a str) -> Self {
        Self {
            chars: table_text.chars(),
        }
    }
}

impl Iterator for RowTexts<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut row = String::new();
        let mut in_quote = false;

        while let Some(c) = self.chars.next() {
            match c {
                QUOTE => {
                    in_quote = !in_quote;
                    row.push(c);
                }
                '\r' | '\n' if in_quote => {}
                '\r' | '\n' => row.push(' '),
                ROW_TERMINATOR if !in_quote => {
                    if !row.trim().is_empty() {
                        return Some(row);
                    }
                    row.clear();
                }
                _ => row.push(c),
            }
        }

        // trailing row without terminator
        (!row.trim().is_empty()).then_some(row)
    }
}

/// Split a row into cell texts, quotes removed
///
/// `''` is an empty cell, not a missing one.
pub fn split_cells(row_text: &str) -> Vec<Cow<'_, str>> {
    lexer::tokenize(row_text)
        .into_iter()
        .map(|token| token.unquoted())
        .collect()
}

/// Convert one row against a non-empty schema
pub fn tokenize_row(row_text: &str, schema: &ColumnSchema) -> Result<Row, RowFault> {
    let cells = split_cells(row_text);
    if cells.len() != schema.len() {
        return Err(RowFault::CellCount {
            expected: schema.len(),
            found: cells.len(),
        });
    }

    let cells = cells
        .iter()
        .zip(schema.columns())
        .map(|(cell, column)| {
            value_converter::convert(cell, column.kind).map_err(|source| RowFault::Conversion {
                column: column.name.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Row { cells })
}

/// Tokenize the text between `TBLE` and `tble` into typed rows
///
/// With an empty schema the first row decides the column count and every
/// column is numeric. Rows that do not fit the schema are dropped with a
/// warning and listed in [`Table::skipped`]; the call itself never fails.
pub fn tokenize(table_text: &str, schema: &ColumnSchema) -> Table {
    let mut schema = schema.clone();
    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for (index, text) in RowTexts::new(table_text).enumerate() {
        if schema.is_empty() {
            schema = ColumnSchema::numeric(split_cells(&text).len());
            debug!("Inferred {} numeric table columns from first row", schema.len());
        }

        match tokenize_row(&text, &schema) {
            Ok(row) => rows.push(row),
            Err(fault) => {
                warn!("Dropping table row {} '{}': {}", index + 1, preview(&text), fault);
                skipped.push(SkippedRow {
                    index,
                    text: text.trim().to_string(),
                    fault,
                });
            }
        }
    }

    Table {
        schema,
        rows,
        skipped,
    }
}
