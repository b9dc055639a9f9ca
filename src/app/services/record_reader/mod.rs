//! Driving domain record readers over SOBEK input
//!
//! A domain reader (cross sections, structures, controllers, ...) implements
//! [`RecordReader`]: it names the record keywords it understands and turns
//! one [`RawRecord`](crate::app::models::RawRecord) into a domain object,
//! or rejects it. The drivers here stream the input, feed every record to
//! the reader and keep [`ParseStats`].
//!
//! ## Architecture
//!
//! - [`reader`] - the trait and the `read_file` / `read_text` / `parse_records` drivers
//! - [`stats`] - read statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use sobek_reader::app::models::RawRecord;
//! use sobek_reader::app::services::field_pattern::FieldPattern;
//! use sobek_reader::app::services::record_reader::{RecordReader, read_text};
//! use sobek_reader::Config;
//!
//! struct BottomWidths(FieldPattern);
//!
//! impl RecordReader for BottomWidths {
//!     type Output = f64;
//!
//!     fn keywords(&self) -> &[&str] {
//!         &["crds"]
//!     }
//!
//!     fn read(&self, record: &RawRecord, _config: &Config) -> Option<f64> {
//!         self.0.apply(record.text()).as_f64()
//!     }
//! }
//!
//! let reader = BottomWidths(FieldPattern::number("bw").unwrap());
//! let result = read_text(&reader, "CRDS id '1' bw 6 crds\nCRDS id '2' crds\n", &Config::default()).unwrap();
//! assert_eq!(result.items, vec![6.0]);
//! assert_eq!(result.stats.records_skipped, 1);
//! ```

pub mod reader;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use reader::{RecordReader, parse_records, read_file, read_text};
pub use stats::{ParseResult, ParseStats};
