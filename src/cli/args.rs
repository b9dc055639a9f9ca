//! Command-line argument definitions for sobek-inspect
//!
//! This module defines the CLI interface using the clap derive API. The
//! tool is a thin consumer of the library for looking into SOBEK files:
//! listing records, extracting one field, or tokenizing embedded tables.

use crate::app::models::{Occurrence, ValueKind};
use crate::app::services::field_pattern::FieldKind;
use crate::app::services::table_tokenizer::ColumnSchema;
use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for the SOBEK file inspector
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sobek-inspect",
    version,
    about = "Inspect legacy SOBEK ASCII model files",
    long_about = "Streams tag-delimited records (CRDS ... crds, STRU ... stru) out of legacy \
                  SOBEK model files and shows their records, individual labeled fields, or \
                  embedded TBLE ... tble tables as the reader library sees them."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// List the records of one or more files
    Records(RecordsArgs),
    /// Extract one labeled field from every record
    Field(FieldArgs),
    /// Tokenize the embedded table of every record
    Table(TableArgs),
}

/// Options shared by every subcommand
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CommonArgs {
    /// Path to a JSON configuration file
    ///
    /// Sets the fallback encoding, the identifier placeholder convention and
    /// the import conventions. Missing keys take their defaults.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress log output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the records command
#[derive(Debug, Clone, Parser)]
pub struct RecordsArgs {
    /// Files or glob patterns to scan
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<String>,

    /// Record keyword, lowercase (repeatable); none reads each file as one record
    #[arg(short = 't', long = "tag", value_name = "KEYWORD")]
    pub tags: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the field command
#[derive(Debug, Clone, Parser)]
pub struct FieldArgs {
    /// File to read
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Record keyword, lowercase (repeatable)
    #[arg(short = 't', long = "tag", value_name = "KEYWORD")]
    pub tags: Vec<String>,

    /// Field label, e.g. `bw` or `nm`
    #[arg(short = 'l', long = "label", value_name = "LABEL")]
    pub label: String,

    /// Value kind: number, integer, string, strings or array:N
    #[arg(short = 'k', long = "kind", value_name = "KIND", default_value = "number")]
    pub kind: KindSpec,

    /// Which occurrence to use when the label repeats: first, last, one, or an index
    #[arg(long = "occurrence", value_name = "WHICH", default_value = "first")]
    pub occurrence: OccurrenceSpec,

    /// Labels ending a `strings` value (comma-separated)
    #[arg(long = "until", value_name = "LABELS", value_delimiter = ',')]
    pub until: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the table command
#[derive(Debug, Clone, Parser)]
pub struct TableArgs {
    /// File to read
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Record keyword, lowercase (repeatable)
    #[arg(short = 't', long = "tag", value_name = "KEYWORD")]
    pub tags: Vec<String>,

    /// Column schema as `name:kind,...`; inferred from the first row when omitted
    #[arg(long = "columns", value_name = "SCHEMA")]
    pub columns: Option<SchemaSpec>,

    /// Which table to use when a record carries several: first, last, one, or an index
    #[arg(long = "occurrence", value_name = "WHICH", default_value = "first")]
    pub occurrence: OccurrenceSpec,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Field kind as written on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindSpec(pub FieldKind);

impl FromStr for KindSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let spec = s.trim().to_ascii_lowercase();
        let kind = match spec.as_str() {
            "number" => FieldKind::ScalarNumber,
            "integer" => FieldKind::Integer,
            "string" => FieldKind::QuotedString,
            "strings" => FieldKind::VariableStringArray,
            _ => {
                let count = spec
                    .strip_prefix("array:")
                    .and_then(|n| n.parse::<usize>().ok())
                    .filter(|&n| n > 0)
                    .ok_or_else(|| {
                        Error::configuration(format!(
                            "Unknown field kind '{}'. Expected number, integer, string, strings or array:N",
                            s
                        ))
                    })?;
                FieldKind::FixedNumericArray(count)
            }
        };
        Ok(KindSpec(kind))
    }
}

/// Occurrence policy as written on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccurrenceSpec(pub Occurrence);

impl FromStr for OccurrenceSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let occurrence = match s.trim() {
            "first" => Occurrence::First,
            "last" => Occurrence::Last,
            "one" => Occurrence::ExactlyOne,
            other => other.parse::<usize>().map(Occurrence::Nth).map_err(|_| {
                Error::configuration(format!(
                    "Unknown occurrence '{}'. Expected first, last, one or an index",
                    s
                ))
            })?,
        };
        Ok(OccurrenceSpec(occurrence))
    }
}

/// Column schema as written on the command line (`time:timestamp,value:number`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaSpec(pub ColumnSchema);

impl FromStr for SchemaSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut columns = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, kind) = match part.split_once(':') {
                Some((name, kind)) => {
                    let kind = ValueKind::from_name(kind).ok_or_else(|| {
                        Error::invalid_schema(format!(
                            "Unknown kind '{}' for column '{}'",
                            kind, name
                        ))
                    })?;
                    (name.trim(), kind)
                }
                None => (part, ValueKind::Number),
            };
            columns.push((name.to_string(), kind));
        }
        Ok(SchemaSpec(ColumnSchema::from_columns(columns)?))
    }
}

impl Commands {
    /// Options shared by every subcommand
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Records(args) => &args.common,
            Commands::Field(args) => &args.common,
            Commands::Table(args) => &args.common,
        }
    }
}

impl CommonArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_spec_parsing() {
        assert_eq!(
            KindSpec::from_str("number").unwrap().0,
            FieldKind::ScalarNumber
        );
        assert_eq!(
            KindSpec::from_str(" Strings ").unwrap().0,
            FieldKind::VariableStringArray
        );
        assert_eq!(
            KindSpec::from_str("array:4").unwrap().0,
            FieldKind::FixedNumericArray(4)
        );

        assert!(KindSpec::from_str("array:0").is_err());
        assert!(KindSpec::from_str("array:x").is_err());
        assert!(KindSpec::from_str("float").is_err());
    }

    #[test]
    fn test_occurrence_spec_parsing() {
        assert_eq!(OccurrenceSpec::from_str("first").unwrap().0, Occurrence::First);
        assert_eq!(OccurrenceSpec::from_str("last").unwrap().0, Occurrence::Last);
        assert_eq!(
            OccurrenceSpec::from_str("one").unwrap().0,
            Occurrence::ExactlyOne
        );
        assert_eq!(OccurrenceSpec::from_str("1").unwrap().0, Occurrence::Nth(1));
        assert!(OccurrenceSpec::from_str("second").is_err());
    }

    #[test]
    fn test_schema_spec_parsing() {
        let schema = SchemaSpec::from_str("time:timestamp, value").unwrap().0;
        assert_eq!(schema.len(), 2);
        assert_eq!(
            schema.kinds().collect::<Vec<_>>(),
            vec![ValueKind::Timestamp, ValueKind::Number]
        );

        assert!(SchemaSpec::from_str("").is_err());
        assert!(SchemaSpec::from_str("a,a").is_err());
        assert!(SchemaSpec::from_str("a:complex").is_err());
    }

    #[test]
    fn test_log_level() {
        let mut common = CommonArgs::default();
        assert_eq!(common.get_log_level(), "warn");

        common.verbose = 2;
        assert_eq!(common.get_log_level(), "debug");

        common.quiet = true;
        assert_eq!(common.get_log_level(), "error");
    }

    #[test]
    fn test_cli_parsing() {
        let args = Args::try_parse_from([
            "sobek-inspect",
            "table",
            "control.def",
            "-t",
            "cntl",
            "--columns",
            "time:timestamp,value:number",
            "--occurrence",
            "1",
            "-v",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Table(table)) => {
                assert_eq!(table.tags, vec!["cntl"]);
                assert_eq!(table.occurrence.0, Occurrence::Nth(1));
                assert_eq!(table.columns.map(|c| c.0.len()), Some(2));
                assert_eq!(table.common.verbose, 1);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
