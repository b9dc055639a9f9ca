//! Read statistics and result structures for record readers

use serde::{Deserialize, Serialize};

/// Items read from one input together with statistics
#[derive(Debug, Clone)]
pub struct ParseResult<T> {
    /// Successfully read domain objects, in file order
    pub items: Vec<T>,

    /// Read statistics
    pub stats: ParseStats,
}

/// Simple read statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Physical lines consumed from the input
    pub lines_read: usize,

    /// Records handed to the reader
    pub total_records: usize,

    /// Records the reader turned into a domain object
    pub records_parsed: usize,

    /// Records the reader rejected
    pub records_skipped: usize,

    /// Records cut off by end of input before their closing tag
    pub truncated_records: usize,

    /// One message per rejected record
    pub errors: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            (self.records_parsed as f64 / self.total_records as f64) * 100.0
        }
    }

    /// Check if reading was mostly successful (>90% success rate)
    pub fn is_successful(&self) -> bool {
        self.success_rate() > 90.0
    }
}
