//! Test fixtures for field extraction

mod field_set_tests;

/// Trapezoidal cross-section definition
pub const TRAPEZIUM: &str =
    "CRDS id '21' nm 'TrapProf01' ty 1 bl 0 bw 6 bs 1 aw 16 sw 0  gl 0 gu 0 crds";

/// River controller record with trigger lists
pub const CONTROLLER: &str = "CNTL id '1' nm 'Weir control' ct 0 ca 0 ac 1 cf 1 \
ta 1 0 0 0 gi '12' '-1' '-1' '-1' ao 1 1 1 1 mc 0.1 bl 1 ti tv PDIN 0 0 '' pdin cntl";
