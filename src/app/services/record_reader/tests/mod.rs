//! Test readers and fixtures for the record reader drivers

use std::io::Write;
use tempfile::NamedTempFile;

use crate::app::models::RawRecord;
use crate::app::services::field_pattern::{FieldPattern, read_identity};
use crate::app::services::record_reader::RecordReader;
use crate::config::Config;

mod reader_tests;

/// Minimal cross-section as read by [`WidthReader`]
#[derive(Debug, Clone, PartialEq)]
pub struct Width {
    pub id: String,
    pub bottom_width: f64,
}

/// Reads `id` and `bw`; rejects records without a usable bottom width
pub struct WidthReader {
    bottom_width: FieldPattern,
}

impl WidthReader {
    pub fn new() -> Self {
        Self {
            bottom_width: FieldPattern::number("bw").unwrap(),
        }
    }
}

impl RecordReader for WidthReader {
    type Output = Width;

    fn keywords(&self) -> &[&str] {
        &["crds"]
    }

    fn read(&self, record: &RawRecord, config: &Config) -> Option<Width> {
        let identity = read_identity(record.text(), &config.id_substitution).ok()?;
        let bottom_width = self.bottom_width.apply(record.text()).as_f64()?;
        Some(Width {
            id: identity.id,
            bottom_width,
        })
    }
}

/// Counts the lines of the whole input
pub struct LineCounter;

impl RecordReader for LineCounter {
    type Output = usize;

    fn keywords(&self) -> &[&str] {
        &[]
    }

    fn read(&self, record: &RawRecord, _config: &Config) -> Option<usize> {
        Some(record.text().lines().count())
    }
}

/// Cross sections with one record lacking `bw` and one lacking its closing tag
pub fn create_width_file_content() -> String {
    r#"CRDS id '1' nm 'a' ty 0 bw 6 crds
CRDS id '2' nm 'b' ty 0
  bw 2.5 crds
CRDS id '3' nm 'no width' ty 4 rd .05 crds
CRDS id '4' bw 1
"#
    .to_string()
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}
