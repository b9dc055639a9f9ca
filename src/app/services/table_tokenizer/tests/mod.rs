//! Test fixtures for table tokenization

use crate::app::models::ValueKind;
use crate::app::services::table_tokenizer::ColumnSchema;

mod tokenizer_tests;

/// Structure table: two numbers, three quoted identifiers, two numbers
pub fn create_structure_schema() -> ColumnSchema {
    ColumnSchema::from_columns([
        ("x", ValueKind::Number),
        ("y", ValueKind::Number),
        ("from", ValueKind::Text),
        ("branch", ValueKind::Text),
        ("to", ValueKind::Text),
        ("width", ValueKind::Number),
        ("level", ValueKind::Number),
    ])
    .unwrap()
}

/// Controller record whose table was rewritten after a type switch;
/// the first table is the stale one
pub fn create_controller_record() -> String {
    r#"CNTL id '1' nm 'Crest control' ct 0 ac 1 ca 0 cf 1 cb '-1' cl 9.9999e+009 cp 0 mp 0 ti tv
PDIN 1 0 '365;00;00;00' pdin CLTT 'Time' 'Value' cltt CLID '(-)' '(-)' clid TBLE
'2000/01/01;00:00:00' 1 <
tble
mc 0 bl 1 ti tv PDIN 0 0 '' pdin CLTT 'Time' 'Value' cltt TBLE
'1996/01/01;00:00:00' 0.5 <
'1996/01/02;12:30:00' .75 <
tble
 cntl"#
        .to_string()
}
