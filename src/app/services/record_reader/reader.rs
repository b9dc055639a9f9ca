//! Record reader trait and the drivers feeding it

use super::stats::{ParseResult, ParseStats};
use crate::Result;
use crate::app::models::RawRecord;
use crate::app::services::record_extractor::{RecordExtractor, Records, TagSet};
use crate::config::Config;
use crate::constants::preview;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info, warn};

/// Turns one raw record into a domain object
///
/// Implementations combine [`FieldPattern`](crate::FieldPattern)s, table
/// parsing and value conversion. Returning `None` rejects the record; the
/// driver logs it and moves on to the next one.
pub trait RecordReader {
    type Output;

    /// Lowercase keywords of the records this reader understands
    ///
    /// An empty list makes the whole input a single record.
    fn keywords(&self) -> &[&str];

    /// Tags used to split the input, derived from [`keywords`](Self::keywords)
    fn tags(&self) -> TagSet {
        TagSet::from_keywords(self.keywords().iter().copied())
    }

    /// Read one record under the given import configuration
    fn read(&self, record: &RawRecord, config: &Config) -> Option<Self::Output>;
}

/// Read every record of a file
///
/// A missing or unreadable file is logged and produces an empty result;
/// only an unusable configuration is an error.
pub fn read_file<R: RecordReader>(
    reader: &R,
    path: &Path,
    config: &Config,
) -> Result<ParseResult<R::Output>> {
    info!("Reading {} records from {}", describe(reader), path.display());
    let extractor = RecordExtractor::from_config(reader.tags(), config)?;
    let result = collect(reader, extractor.stream_file(path), config);

    info!(
        "Read {} of {} records from {} ({:.1}% success)",
        result.stats.records_parsed,
        result.stats.total_records,
        path.display(),
        result.stats.success_rate()
    );
    Ok(result)
}

/// Read every record of in-memory text
pub fn read_text<R: RecordReader>(
    reader: &R,
    text: &str,
    config: &Config,
) -> Result<ParseResult<R::Output>> {
    let extractor = RecordExtractor::from_config(reader.tags(), config)?;
    Ok(collect(reader, extractor.stream_text(text), config))
}

/// Lazily read records from any record source
///
/// Rejected records are logged and left out.
pub fn parse_records<'a, R, I>(
    reader: &'a R,
    records: I,
    config: &'a Config,
) -> impl Iterator<Item = R::Output> + 'a
where
    R: RecordReader,
    I: IntoIterator<Item = RawRecord>,
    I::IntoIter: 'a,
{
    records.into_iter().filter_map(move |record| {
        let item = reader.read(&record, config);
        if item.is_none() {
            warn!("{}", rejection(&record));
        }
        item
    })
}

fn collect<R: RecordReader, B: BufRead>(
    reader: &R,
    mut records: Records<B>,
    config: &Config,
) -> ParseResult<R::Output> {
    let mut stats = ParseStats::new();
    let mut items = Vec::new();

    for record in records.by_ref() {
        stats.total_records += 1;
        if record.is_truncated() {
            stats.truncated_records += 1;
        }

        match reader.read(&record, config) {
            Some(item) => {
                stats.records_parsed += 1;
                items.push(item);
            }
            None => {
                let message = rejection(&record);
                warn!("{}", message);
                stats.records_skipped += 1;
                stats.errors.push(message);
            }
        }
    }

    stats.lines_read = records.stats().lines_read;
    debug!(
        "{} lines read, {} lines outside records",
        stats.lines_read,
        records.stats().lines_ignored
    );
    ParseResult { items, stats }
}

fn rejection(record: &RawRecord) -> String {
    format!(
        "Record at line {} could not be read: \"{}\"",
        record.start_line(),
        preview(record.text())
    )
}

fn describe<R: RecordReader>(reader: &R) -> String {
    match reader.keywords() {
        [] => "whole-file".to_string(),
        keywords => keywords.join("/"),
    }
}
