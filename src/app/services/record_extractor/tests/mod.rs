//! Test fixtures for record extraction

use std::io::Write;
use tempfile::NamedTempFile;


/// Cross-section definitions as written by SOBEK 2.12 (profile.def)
pub fn create_profile_def() -> String {
    r#"CRDS id '21' nm 'TrapProf01' ty 1 bl 0 bw 6 bs 1 aw 16 sw 0  gl 0 gu 0 crds
CRDS id 'Round 100 mm' nm 'Round 100 mm' ty 4 bl 0 rd  .05 crds

CRDS id '3' nm 'yz' ty 10 st 0 lt sw 0 0 gl 0 gu 0 lt yz
TBLE
0 2 <
5 0 <
10 2 <
tble
 crds
"#
    .to_string()
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}
