//! Streaming extraction of tag-delimited records
//!
//! SOBEK files are sequences of pseudo-records such as
//! `CRDS id '21' nm 'TrapProf01' ty 1 ... crds`, possibly spread over
//! several lines. The extractor reads the input line by line and yields one
//! [`RawRecord`](crate::app::models::RawRecord) per record, never holding
//! more than the record being assembled in memory.
//!
//! ## Architecture
//!
//! - [`tags`] - open/close tag sets and line classification
//! - [`extractor`] - the extractor and its lazy [`Records`] iterator
//! - [`stats`] - per-stream extraction counters
//!
//! ## Usage
//!
//! ```rust
//! use sobek_reader::app::services::record_extractor::{RecordExtractor, TagSet};
//!
//! let extractor = RecordExtractor::new(TagSet::from_keywords(["crds"]));
//! let mut records = extractor.stream_text("CRDS id '1'\ncrds\n");
//! let record = records.next().unwrap();
//! assert_eq!(record.text(), "CRDS id '1'\ncrds\n");
//! assert!(records.next().is_none());
//! ```

pub mod extractor;
pub mod stats;
pub mod tags;

#[cfg(test)]
pub mod tests;

pub use extractor::{RecordExtractor, Records};
pub use stats::ExtractionStats;
pub use tags::TagSet;
