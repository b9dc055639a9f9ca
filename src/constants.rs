//! Format constants for the SOBEK ASCII record format
//!
//! Keywords, markers and default values shared by the extractor, the field
//! matchers and the table tokenizer.

// =============================================================================
// Embedded Tables
// =============================================================================

/// Keyword opening an embedded table
pub const TABLE_OPEN: &str = "TBLE";

/// Keyword closing an embedded table
pub const TABLE_CLOSE: &str = "tble";

/// Row terminator inside a table body (only outside quoted strings)
pub const ROW_TERMINATOR: char = '<';

/// Quote character delimiting string values and cells
pub const QUOTE: char = '\'';

// =============================================================================
// Value Formats
// =============================================================================

/// Timestamp layout after quote stripping and `;` to space normalization
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Boolean token for true
pub const BOOL_TRUE: &str = "1";

/// Boolean token for false
pub const BOOL_FALSE: &str = "0";

// =============================================================================
// Identifier Placeholders
// =============================================================================

/// Stand-in written in model files for the literal below
pub const ID_PLACEHOLDER: &str = "##";

/// Literal text the placeholder stands for
pub const ID_LITERAL: &str = "~~";

/// Label of the record identifier field
pub const ID_LABEL: &str = "id";

/// Label of the optional record name field
pub const NAME_LABEL: &str = "nm";

// =============================================================================
// Defaults
// =============================================================================

/// Fallback encoding for lines that are not valid UTF-8
pub const DEFAULT_ENCODING: &str = "windows-1252";

/// Default model time step in seconds
pub const DEFAULT_TIME_STEP_SECONDS: u64 = 1;

/// Number of characters of a record shown in log messages
pub const LOG_PREVIEW_CHARS: usize = 80;

/// Shorten a record or row for log output
pub fn preview(text: &str) -> String {
    let single_line: String = text
        .chars()
        .map(|c| if c == '\r' || c == '\n' { ' ' } else { c })
        .collect();
    let trimmed = single_line.trim();
    if trimmed.chars().count() <= LOG_PREVIEW_CHARS {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(LOG_PREVIEW_CHARS).collect();
        format!("{}...", cut)
    }
}
