//! Tests for row and cell tokenization

use super::*;
use crate::app::models::CellValue;
use crate::app::services::table_tokenizer::{RowFault, RowTexts, split_cells, tokenize};

#[test]
fn test_quoted_empty_cell_is_kept() {
    let text = " 0 0 '' '1' '1_1' 0 0 < 10 0 '1_1' 'C4' '1_2' 10 0 < ";
    let table = tokenize(text, &create_structure_schema());

    assert_eq!(table.len(), 2);
    assert!(table.skipped().is_empty());
    for row in table.rows() {
        assert_eq!(row.len(), 7);
    }
    assert_eq!(table.rows()[0].get(2), Some(&CellValue::Text(String::new())));
    assert_eq!(table.rows()[0].get(3), Some(&CellValue::Text("1".to_string())));
    assert_eq!(table.rows()[1].get(3), Some(&CellValue::Text("C4".to_string())));
    assert_eq!(table.rows()[1].get(0), Some(&CellValue::Number(10.0)));
}

#[test]
fn test_short_row_is_dropped_not_fatal() {
    let schema = ColumnSchema::numeric(3);
    let table = tokenize("1 2 3 <\n4 5 <\n6 7 8 <", &schema);

    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[1].get(2), Some(&CellValue::Number(8.0)));
    assert_eq!(table.skipped().len(), 1);
    assert_eq!(table.skipped()[0].index, 1);
    assert_eq!(table.skipped()[0].text, "4 5");
    assert_eq!(
        table.skipped()[0].fault,
        RowFault::CellCount {
            expected: 3,
            found: 2
        }
    );
}

#[test]
fn test_unconvertible_cell_drops_row() {
    let schema = ColumnSchema::numeric(2);
    let table = tokenize("1 2 < 3 abc < 5 6 <", &schema);

    assert_eq!(table.len(), 2);
    assert!(matches!(
        &table.skipped()[0].fault,
        RowFault::Conversion { column, .. } if column == "1"
    ));
}

#[test]
fn test_schema_inferred_from_first_row() {
    let table = tokenize("\n0 10 <\n5 2 <\n7 <\n", &ColumnSchema::inferred());

    assert_eq!(table.schema().len(), 2);
    assert_eq!(table.len(), 2);
    assert_eq!(table.skipped().len(), 1);
    assert_eq!(table.numbers("1"), Some(vec![10.0, 2.0]));
    assert_eq!(table.numbers("missing"), None);
}

#[test]
fn test_trailing_row_without_terminator() {
    let table = tokenize("1 2 < 3 4", &ColumnSchema::inferred());
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[1].get(1), Some(&CellValue::Number(4.0)));
}

#[test]
fn test_terminator_inside_quotes_is_content() {
    let schema = ColumnSchema::from_columns([("label", ValueKind::Text), ("v", ValueKind::Number)])
        .unwrap();
    let table = tokenize("'a < b' 1 < 'c' 2 <", &schema);

    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[0].get(0), Some(&CellValue::Text("a < b".to_string())));
}

#[test]
fn test_line_breaks() {
    let rows: Vec<String> = RowTexts::new("1 2\n3 <\n'wrap\nped' 4 <").collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(split_cells(&rows[0]), vec!["1", "2", "3"]);
    assert_eq!(split_cells(&rows[1]), vec!["wrapped", "4"]);
}

#[test]
fn test_blank_rows_are_not_emitted() {
    let rows: Vec<String> = RowTexts::new(" < \n 1 < < \r\n").collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].trim(), "1");
}

#[test]
fn test_cells_keep_escaped_apostrophe() {
    assert_eq!(split_cells("'it''s' '' 3"), vec!["it's", "", "3"]);
    assert_eq!(split_cells("  1    2  "), vec!["1", "2"]);
}

#[test]
fn test_typed_columns() {
    let schema = ColumnSchema::from_columns([
        ("time", ValueKind::Timestamp),
        ("on", ValueKind::Boolean),
        ("count", ValueKind::Integer),
    ])
    .unwrap();
    let table = tokenize("'1996/01/02;12:30:00' 1 3 < '1996/01/03;00:00:00' yes 4 <", &schema);

    assert_eq!(table.len(), 1);
    let row = &table.rows()[0];
    assert_eq!(row.get(0).map(|c| c.to_string()), Some("1996/01/02;12:30:00".to_string()));
    assert_eq!(row.get(1).and_then(CellValue::as_bool), Some(true));
    assert_eq!(row.get(2).and_then(CellValue::as_i64), Some(3));
    assert_eq!(table.skipped().len(), 1);
}

#[test]
fn test_retokenizing_is_identical() {
    let text = " 0 0 '' '1' '1_1' 0 0 < 10 0 '1_1' 'C4' '1_2' 10 0 < 1 2 < ";
    let schema = create_structure_schema();

    let first = tokenize(text, &schema);
    let second = tokenize(text, &schema);
    assert_eq!(first, second);
    assert_eq!(first.skipped().len(), 1);
}

#[test]
fn test_empty_table() {
    let table = tokenize(" \n ", &ColumnSchema::inferred());
    assert!(table.is_empty());
    assert!(table.schema().is_empty());
}
