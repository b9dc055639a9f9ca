//! Tokenizer for embedded `TBLE ... tble` tables
//!
//! Tables carry rows separated by `<`, each row a run of bare or quoted
//! cells. Rows may be wrapped over several physical lines.
//!
//! ## Architecture
//!
//! - [`schema`] - column names and kinds, with inference from the first row
//! - [`tokenizer`] - row splitting, cell splitting and conversion
//! - [`blocks`] - locating `TBLE ... tble` and other sub-blocks in a record body
//!
//! ## Usage
//!
//! ```rust
//! use sobek_reader::app::models::Occurrence;
//! use sobek_reader::app::services::table_tokenizer::{ColumnSchema, parse_table};
//!
//! let body = "CRDS id '1' lt yz TBLE\n0 10 <\n5 2 <\ntble crds";
//! let table = parse_table(body, &ColumnSchema::inferred(), Occurrence::First).unwrap();
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.rows()[1].get(0).and_then(|c| c.as_f64()), Some(5.0));
//! ```

pub mod blocks;
pub mod schema;
pub mod tokenizer;

#[cfg(test)]
pub mod tests;

pub use blocks::{Block, find_blocks, parse_table, select_block};
pub use schema::{Column, ColumnSchema};
pub use tokenizer::{Row, RowFault, RowTexts, SkippedRow, Table, split_cells, tokenize, tokenize_row};
