//! Labeled field extraction from record bodies
//!
//! A [`FieldPattern`] is built once from a label and a [`FieldKind`] and can
//! then be applied to any number of record bodies. Matching works on the
//! quote-aware token stream of the body, so a label only matches as a bare
//! token and never inside a quoted string.
//!
//! ## Architecture
//!
//! - [`pattern`] - field kinds, patterns and the per-body [`FieldMatch`]
//! - [`field_set`] - named groups of patterns and record identity helpers
//!
//! ## Usage
//!
//! ```rust
//! use sobek_reader::app::services::field_pattern::FieldPattern;
//!
//! let bw = FieldPattern::number("bw").unwrap();
//! let found = bw.apply("CRDS id '21' ty 1 bw 6 bs 1 aw 16 crds");
//! assert_eq!(found.as_f64(), Some(6.0));
//! ```

pub mod field_set;
pub mod pattern;

#[cfg(test)]
pub mod tests;

pub use field_set::{FieldSet, FieldValues, RecordIdentity, read_identity};
pub use pattern::{FieldFailure, FieldKind, FieldMatch, FieldPattern, FieldValue};
