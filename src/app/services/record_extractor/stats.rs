//! Extraction counters for one stream

use serde::{Deserialize, Serialize};

/// Counters collected while streaming one input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Physical lines read
    pub lines_read: usize,

    /// Records yielded, truncated ones included
    pub records: usize,

    /// Records cut off by the end of input before their closing tag
    pub truncated_records: usize,

    /// Non-blank lines outside any record
    pub lines_ignored: usize,
}

impl ExtractionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that were closed by their tag
    pub fn complete_records(&self) -> usize {
        self.records - self.truncated_records
    }
}
