//! SOBEK Reader Library
//!
//! A Rust library for reading the legacy SOBEK ASCII model-exchange format:
//! flat text files made of tag-delimited pseudo-records (`CRDS ... crds`)
//! carrying labeled fields (`id '21'`, `bw 6`) and embedded `TBLE ... tble`
//! tables.
//!
//! This library provides tools for:
//! - Streaming one logical record at a time out of a file without loading it whole
//! - Extracting labeled fields from a record body into typed values
//! - Tokenizing embedded tables into typed rows with row-level fault tolerance
//! - Culture-invariant conversion of raw tokens to numbers, booleans and timestamps
//! - Driving domain-specific record readers over a file with parse statistics

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod field_pattern;
        pub mod lexer;
        pub mod record_extractor;
        pub mod record_reader;
        pub mod table_tokenizer;
        pub mod value_converter;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{CellValue, Occurrence, RawRecord, ValueKind};
pub use app::services::field_pattern::{FieldKind, FieldMatch, FieldPattern, FieldSet};
pub use app::services::record_extractor::{RecordExtractor, TagSet};
pub use app::services::record_reader::{ParseResult, ParseStats, RecordReader};
pub use app::services::table_tokenizer::{ColumnSchema, Row, Table};
pub use config::{Config, ImportConventions, SourceFormat};

/// Result type alias for the SOBEK reader
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for SOBEK reading operations
///
/// Malformed *data* is never reported through this type while streaming;
/// it surfaces as a failed [`FieldMatch`], a skipped table row or a logged
/// record skip. `Error` covers I/O, configuration and programmer errors.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Column schema is unusable (empty or duplicate column names)
    #[error("Invalid table schema: {message}")]
    InvalidSchema { message: String },

    /// Field pattern cannot be built (empty label, zero-length array)
    #[error("Invalid field pattern '{label}': {message}")]
    InvalidPattern { label: String, message: String },

    /// A mandatory embedded block was not present in a record body
    #[error("No {open}...{close} block matching {requested} ({found} found)")]
    MissingBlock {
        open: String,
        close: String,
        requested: String,
        found: usize,
    },

    /// Encoding label not known to encoding_rs
    #[error("Unknown text encoding: {label}")]
    UnknownEncoding { label: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Field extraction failure promoted to an error by a caller
    #[error(transparent)]
    Field(#[from] app::services::field_pattern::FieldFailure),
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create an invalid schema error
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Self::InvalidSchema {
            message: message.into(),
        }
    }

    /// Create an invalid field pattern error
    pub fn invalid_pattern(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            label: label.into(),
            message: message.into(),
        }
    }

    /// Create a missing block error
    pub fn missing_block(
        open: impl Into<String>,
        close: impl Into<String>,
        requested: Occurrence,
        found: usize,
    ) -> Self {
        Self::MissingBlock {
            open: open.into(),
            close: close.into(),
            requested: requested.to_string(),
            found,
        }
    }

    /// Create an unknown encoding error
    pub fn unknown_encoding(label: impl Into<String>) -> Self {
        Self::UnknownEncoding {
            label: label.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
