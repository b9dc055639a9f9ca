//! Line-based record extractor
//!
//! Scanning is single-pass and forward-only. A line whose tokens contain an
//! opening tag starts a record; lines are then accumulated, line breaks
//! preserved, up to and including the first line whose tokens contain a
//! closing tag. Blank lines between records are skipped.

use super::stats::ExtractionStats;
use super::tags::TagSet;
use crate::app::models::RawRecord;
use crate::config::Config;
use crate::constants::preview;
use crate::Result;
use encoding_rs::{Encoding, WINDOWS_1252};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, error, warn};

/// Streams records out of SOBEK text input
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    tags: TagSet,
    encoding: &'static Encoding,
}

impl RecordExtractor {
    /// Create an extractor for the given tags with the default fallback encoding
    pub fn new(tags: TagSet) -> Self {
        Self {
            tags,
            encoding: WINDOWS_1252,
        }
    }

    /// Create an extractor using the configured fallback encoding
    pub fn from_config(tags: TagSet, config: &Config) -> Result<Self> {
        Ok(Self {
            tags,
            encoding: config.resolve_encoding()?,
        })
    }

    /// Decode lines that are not valid UTF-8 with this encoding
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Stream records from a file
    ///
    /// A missing or unreadable file logs one error and yields nothing.
    pub fn stream_file(&self, path: &Path) -> Records<BufReader<File>> {
        let origin = path.display().to_string();
        match File::open(path) {
            Ok(file) => self.stream_reader(BufReader::new(file), origin),
            Err(e) => {
                error!("Cannot open SOBEK file {}: {}", origin, e);
                Records::exhausted(self.tags.clone(), self.encoding, origin)
            }
        }
    }

    /// Stream records from in-memory text
    pub fn stream_text<'a>(&self, text: &'a str) -> Records<&'a [u8]> {
        self.stream_reader(text.as_bytes(), "<text>".to_string())
    }

    /// Stream records from any buffered reader
    pub fn stream_reader<R: BufRead>(&self, reader: R, origin: String) -> Records<R> {
        Records {
            source: Some(reader),
            tags: self.tags.clone(),
            encoding: self.encoding,
            origin,
            line_number: 0,
            buffer: Vec::new(),
            stats: ExtractionStats::new(),
        }
    }
}

/// Lazy sequence of records from one input
///
/// The underlying reader is dropped as soon as the input is exhausted or a
/// read fails, so a file handle never outlives the extraction.
#[derive(Debug)]
pub struct Records<R> {
    source: Option<R>,
    tags: TagSet,
    encoding: &'static Encoding,
    origin: String,
    line_number: usize,
    buffer: Vec<u8>,
    stats: ExtractionStats,
}

/// Record being assembled
struct Pending {
    text: String,
    start_line: usize,
}

impl<R> Records<R> {
    fn exhausted(tags: TagSet, encoding: &'static Encoding, origin: String) -> Self {
        Self {
            source: None,
            tags,
            encoding,
            origin,
            line_number: 0,
            buffer: Vec::new(),
            stats: ExtractionStats::new(),
        }
    }

    /// Counters for what has been read so far
    pub fn stats(&self) -> &ExtractionStats {
        &self.stats
    }

    fn emit(&mut self, text: String, start_line: usize, truncated: bool) -> RawRecord {
        self.stats.records += 1;
        if truncated {
            self.stats.truncated_records += 1;
            warn!(
                "Record starting at line {} of {} has no closing tag before end of input: \"{}\"",
                start_line,
                self.origin,
                preview(&text)
            );
        } else {
            debug!("Record at line {} of {}", start_line, self.origin);
        }
        RawRecord::new(text, start_line, truncated)
    }

    fn finish(&mut self, pending: Option<Pending>) -> Option<RawRecord> {
        self.source = None;
        debug!(
            "Finished {}: {} records from {} lines",
            self.origin, self.stats.records, self.stats.lines_read
        );
        pending.map(|p| self.emit(p.text, p.start_line, true))
    }
}

impl<R: BufRead> Records<R> {
    /// Read the next physical line, line break included
    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        let Some(reader) = self.source.as_mut() else {
            return Ok(None);
        };
        self.buffer.clear();
        if reader.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        self.stats.lines_read += 1;

        let mut line = decode(&self.buffer, self.encoding);
        if self.line_number == 1 && line.starts_with('\u{feff}') {
            line.remove(0);
        }
        Ok(Some(line))
    }

    fn next_whole_input(&mut self) -> Option<RawRecord> {
        let mut reader = self.source.take()?;
        let mut bytes = Vec::new();
        if let Err(e) = reader.read_to_end(&mut bytes) {
            error!("Failed to read {}: {}", self.origin, e);
            return None;
        }
        let mut text = decode(&bytes, self.encoding);
        if text.starts_with('\u{feff}') {
            text.remove(0);
        }
        self.stats.lines_read = text.lines().count();
        if text.is_empty() {
            return None;
        }
        Some(self.emit(text, 1, false))
    }
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = RawRecord;

    fn next(&mut self) -> Option<RawRecord> {
        self.source.as_ref()?;
        if self.tags.is_empty() {
            return self.next_whole_input();
        }

        let mut pending: Option<Pending> = None;
        loop {
            let line = match self.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => return self.finish(pending),
                Err(e) => {
                    error!(
                        "Read error in {} after line {}: {}",
                        self.origin, self.line_number, e
                    );
                    return self.finish(pending);
                }
            };

            if let Some(record) = pending.as_mut() {
                record.text.push_str(&line);
                if self.tags.closes_after(&line, 0) {
                    if let Some(record) = pending.take() {
                        return Some(self.emit(record.text, record.start_line, false));
                    }
                }
                continue;
            }

            if line.trim().is_empty() {
                continue;
            }
            let Some(open_at) = self.tags.open_position(&line) else {
                self.stats.lines_ignored += 1;
                continue;
            };
            let start_line = self.line_number;
            if self.tags.closes_after(&line, open_at + 1) {
                return Some(self.emit(line, start_line, false));
            }
            pending = Some(Pending {
                text: line,
                start_line,
            });
        }
    }
}

/// Decode bytes as UTF-8, falling back to the legacy encoding when invalid
fn decode(bytes: &[u8], fallback: &'static Encoding) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => fallback.decode_without_bom_handling(bytes).0.into_owned(),
    }
}
