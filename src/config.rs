//! Configuration management and validation.
//!
//! Provides the reader configuration passed explicitly into every record
//! reader call: text decoding, identifier placeholder conventions and the
//! import conventions that depend on which SOBEK product wrote the files.

use crate::constants::{DEFAULT_ENCODING, DEFAULT_TIME_STEP_SECONDS, ID_LITERAL, ID_PLACEHOLDER};
use crate::{Error, Result};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// SOBEK product generation that wrote the model files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SourceFormat {
    /// SOBEK 2.12 (Rural/Urban)
    #[default]
    Sobek212,
    /// SOBEK-RE (River Engineering)
    SobekRe,
}

/// Conventions that differ between import runs
///
/// Readers that behave differently per product (field order of controller
/// records, for example) consult these instead of shared global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportConventions {
    /// Which product generation wrote the files
    pub source_format: SourceFormat,

    /// Model time step in seconds, needed by PID controllers
    pub model_time_step_seconds: u64,
}

impl Default for ImportConventions {
    fn default() -> Self {
        Self {
            source_format: SourceFormat::Sobek212,
            model_time_step_seconds: DEFAULT_TIME_STEP_SECONDS,
        }
    }
}

impl ImportConventions {
    pub fn model_time_step(&self) -> Duration {
        Duration::from_secs(self.model_time_step_seconds)
    }

    pub fn is_sobek2_import(&self) -> bool {
        self.source_format == SourceFormat::Sobek212
    }
}

/// Placeholder convention for quoted identifiers
///
/// Files write `placeholder` where an identifier holds `literal`. Matching
/// runs on the body as written and extracted strings have every placeholder
/// replaced by the literal. The format has no escaping grammar, this is the
/// only mechanism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub placeholder: String,
    pub literal: String,
}

impl Default for Substitution {
    fn default() -> Self {
        Self {
            placeholder: ID_PLACEHOLDER.to_string(),
            literal: ID_LITERAL.to_string(),
        }
    }
}

/// Main reader configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// WHATWG label of the fallback encoding for lines that are not UTF-8
    pub encoding: String,

    /// Import conventions handed to every reader call
    pub conventions: ImportConventions,

    /// Placeholder convention for quoted identifiers
    pub id_substitution: Substitution,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            encoding: DEFAULT_ENCODING.to_string(),
            conventions: ImportConventions::default(),
            id_substitution: Substitution::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file, missing keys take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config {}", path.display()), e)
        })?;
        let config: Config = serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!("Invalid config {}: {}", path.display(), e))
        })?;
        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Check the configuration for values the readers cannot work with
    pub fn validate(&self) -> Result<()> {
        self.resolve_encoding()?;
        if self.conventions.model_time_step_seconds == 0 {
            return Err(Error::configuration("model time step must be positive"));
        }
        if self.id_substitution.placeholder.is_empty() || self.id_substitution.literal.is_empty()
        {
            return Err(Error::configuration(
                "identifier placeholder and literal must not be empty",
            ));
        }
        Ok(())
    }

    /// Resolve the configured fallback encoding
    pub fn resolve_encoding(&self) -> Result<&'static Encoding> {
        Encoding::for_label(self.encoding.trim().as_bytes())
            .ok_or_else(|| Error::unknown_encoding(&self.encoding))
    }

    /// Set the fallback encoding label
    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = label.into();
        self
    }

    /// Set the product generation that wrote the files
    pub fn with_source_format(mut self, format: SourceFormat) -> Self {
        self.conventions.source_format = format;
        self
    }

    /// Set the model time step
    pub fn with_model_time_step(mut self, seconds: u64) -> Self {
        self.conventions.model_time_step_seconds = seconds;
        self
    }

    /// Set the identifier placeholder convention
    pub fn with_id_substitution(
        mut self,
        placeholder: impl Into<String>,
        literal: impl Into<String>,
    ) -> Self {
        self.id_substitution = Substitution {
            placeholder: placeholder.into(),
            literal: literal.into(),
        };
        self
    }
}
