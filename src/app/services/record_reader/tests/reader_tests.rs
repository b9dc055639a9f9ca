//! Tests for the record reader drivers

use super::*;
use crate::Error;
use crate::app::services::record_extractor::RecordExtractor;
use crate::app::services::record_reader::{parse_records, read_file, read_text};
use std::path::Path;

#[test]
fn test_read_text_collects_items_and_stats() {
    let result = read_text(&WidthReader::new(), &create_width_file_content(), &Config::default())
        .unwrap();

    assert_eq!(
        result.items,
        vec![
            Width {
                id: "1".to_string(),
                bottom_width: 6.0
            },
            Width {
                id: "2".to_string(),
                bottom_width: 2.5
            },
            Width {
                id: "4".to_string(),
                bottom_width: 1.0
            },
        ]
    );
    assert_eq!(result.stats.lines_read, 5);
    assert_eq!(result.stats.total_records, 4);
    assert_eq!(result.stats.records_parsed, 3);
    assert_eq!(result.stats.records_skipped, 1);
    assert_eq!(result.stats.truncated_records, 1);
    assert_eq!(result.stats.errors.len(), 1);
    assert!(result.stats.errors[0].contains("line 4"));
}

#[test]
fn test_read_file() {
    let file = create_temp_file(&create_width_file_content());
    let result = read_file(&WidthReader::new(), file.path(), &Config::default()).unwrap();

    assert_eq!(result.items.len(), 3);
    assert_eq!(result.stats.success_rate(), 75.0);
    assert!(!result.stats.is_successful());
}

#[test]
fn test_missing_file_is_empty_not_fatal() {
    let result = read_file(
        &WidthReader::new(),
        Path::new("/nonexistent/profile.def"),
        &Config::default(),
    )
    .unwrap();

    assert!(result.items.is_empty());
    assert_eq!(result.stats.total_records, 0);
}

#[test]
fn test_unknown_encoding_is_a_configuration_error() {
    let config = Config::default().with_encoding("no-such-encoding");
    let result = read_text(&WidthReader::new(), "CRDS id '1' bw 1 crds", &config);

    assert!(matches!(result, Err(Error::UnknownEncoding { .. })));
}

#[test]
fn test_whole_input_reader() {
    let result = read_text(&LineCounter, "GLFR id '1'\nBDFR id '2'\n", &Config::default()).unwrap();

    assert_eq!(result.items, vec![2]);
    assert_eq!(result.stats.total_records, 1);

    let empty = read_text(&LineCounter, "", &Config::default()).unwrap();
    assert!(empty.items.is_empty());
}

#[test]
fn test_parse_records_is_lazy() {
    let reader = WidthReader::new();
    let config = Config::default();
    let content = create_width_file_content();
    let extractor = RecordExtractor::new(reader.tags());

    let mut items = parse_records(&reader, extractor.stream_text(&content), &config);
    assert_eq!(items.next().map(|w| w.id), Some("1".to_string()));
    assert_eq!(items.next().map(|w| w.id), Some("2".to_string()));
    // record 3 is rejected and skipped
    assert_eq!(items.next().map(|w| w.id), Some("4".to_string()));
    assert!(items.next().is_none());
}

#[test]
fn test_identifier_substitution_comes_from_config() {
    let config = Config::default().with_id_substitution("@@", "%%");
    let result = read_text(&WidthReader::new(), "CRDS id 'a@@b' bw 3 crds\n", &config).unwrap();

    assert_eq!(result.items[0].id, "a%%b");
}
