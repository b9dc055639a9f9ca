//! Tests for field sets and record identity

use super::*;
use crate::app::services::field_pattern::{
    FieldFailure, FieldPattern, FieldSet, RecordIdentity, read_identity,
};
use crate::config::Substitution;

#[test]
fn test_field_set_reads_trapezium() {
    let fields = FieldSet::new()
        .with(FieldPattern::integer("ty").unwrap())
        .with_numbers(["bl", "bw", "bs", "aw"])
        .unwrap();
    let values = fields.apply(TRAPEZIUM);

    assert!(values.all_ok());
    assert_eq!(values.integer("ty"), Some(1));
    assert_eq!(values.number("bw"), Some(6.0));
    assert_eq!(values.number("aw"), Some(16.0));
    assert_eq!(values.iter().count(), 5);
    assert!(values.first_failure().is_none());
}

#[test]
fn test_field_set_reports_first_failure() {
    let fields = FieldSet::new().with_numbers(["bl", "rd"]).unwrap();
    let values = fields.apply(TRAPEZIUM);

    assert!(!values.all_ok());
    assert_eq!(values.number("bl"), Some(0.0));
    assert_eq!(
        values.first_failure(),
        Some(FieldFailure::Absent {
            label: "rd".to_string()
        })
    );
}

#[test]
fn test_read_identity() {
    let identity = read_identity(TRAPEZIUM, &Substitution::default()).unwrap();
    assert_eq!(
        identity,
        RecordIdentity {
            id: "21".to_string(),
            name: Some("TrapProf01".to_string())
        }
    );

    let unnamed = read_identity("CRDS id 'x 1' ty 0 crds", &Substitution::default()).unwrap();
    assert_eq!(unnamed.id, "x 1");
    assert_eq!(unnamed.name, None);
}

#[test]
fn test_read_identity_requires_id() {
    let result = read_identity("CRDS nm 'only name' crds", &Substitution::default());
    assert_eq!(
        result,
        Err(FieldFailure::Absent {
            label: "id".to_string()
        })
    );
}
