//! Command implementations for sobek-inspect
//!
//! Each command streams the requested files through the reader library and
//! prints what it sees to stdout. Diagnostics go through `tracing` to stderr.

use crate::app::models::{CellValue, RawRecord};
use crate::app::services::field_pattern::{FieldMatch, FieldPattern, FieldValue, read_identity};
use crate::app::services::record_extractor::{RecordExtractor, TagSet};
use crate::app::services::table_tokenizer::{ColumnSchema, Table, parse_table};
use crate::cli::args::{Args, CommonArgs, Commands, FieldArgs, RecordsArgs, TableArgs};
use crate::config::Config;
use crate::constants::preview;
use anyhow::{Context, Result, anyhow, bail};
use colored::*;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Totals reported at the end of a command
#[derive(Debug, Clone, Default)]
pub struct InspectionStats {
    /// Number of input files scanned
    pub files_read: usize,
    /// Number of records extracted
    pub records: usize,
    /// Records cut off by end of input
    pub truncated_records: usize,
    /// Fields found or tables tokenized
    pub values: usize,
    /// Fields that failed to convert, or records without the requested table
    pub failures: usize,
    /// Total processing time
    pub elapsed: std::time::Duration,
}

/// Main command runner
pub fn run(args: Args) -> Result<InspectionStats> {
    let Some(command) = args.command else {
        bail!("No command given");
    };
    let start_time = Instant::now();

    setup_logging(command.common())?;
    debug!("Command line arguments: {:?}", command);
    let config = load_configuration(command.common())?;

    let mut stats = match &command {
        Commands::Records(records_args) => run_records(records_args, &config)?,
        Commands::Field(field_args) => run_field(field_args, &config)?,
        Commands::Table(table_args) => run_table(table_args, &config)?,
    };
    stats.elapsed = start_time.elapsed();

    print_summary(&stats);
    Ok(stats)
}

/// Log to stderr, filtered by `RUST_LOG` or the verbosity flags
///
/// Quiet runs use the compact layout without timestamps; `-vv` and up also
/// show the emitting module.
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt};

    let log_level = args.get_log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sobek_reader={}", log_level)));
    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(args.verbose > 1);

    let installed = if args.quiet {
        builder.compact().without_time().try_init()
    } else {
        builder.with_timer(fmt::time::uptime()).try_init()
    };
    installed.map_err(|e| anyhow!("Failed to initialise logging: {}", e))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load the configuration file, or defaults when none is given
pub fn load_configuration(args: &CommonArgs) -> Result<Config> {
    match &args.config_file {
        Some(path) => {
            let config = Config::from_json_file(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            info!("Using configuration from {}", path.display());
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

/// Expand glob patterns; plain paths are passed through unchanged
pub fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        if !pattern.contains(['*', '?', '[']) {
            files.push(PathBuf::from(pattern));
            continue;
        }

        let before = files.len();
        for entry in glob::glob(pattern).with_context(|| format!("Invalid pattern '{}'", pattern))? {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable path: {}", e),
            }
        }
        if files.len() == before {
            warn!("No files match '{}'", pattern);
        }
    }
    Ok(files)
}

/// Tag set for the given keywords; none means whole-file records
pub fn tag_set(keywords: &[String]) -> TagSet {
    if keywords.is_empty() {
        TagSet::whole_input()
    } else {
        TagSet::from_keywords(keywords)
    }
}

fn run_records(args: &RecordsArgs, config: &Config) -> Result<InspectionStats> {
    let files = expand_inputs(&args.files)?;
    let extractor = RecordExtractor::from_config(tag_set(&args.tags), config)?;
    let mut stats = InspectionStats::default();

    for path in &files {
        println!("{}", path.display().to_string().bright_cyan().bold());
        let mut records = extractor.stream_file(path);
        for record in records.by_ref() {
            let marker = if record.is_truncated() {
                " [truncated]".yellow().to_string()
            } else {
                String::new()
            };
            println!(
                "  {:>6}  {}{}",
                record.start_line(),
                first_line(&record),
                marker
            );
        }

        let extraction = records.stats();
        info!(
            "{}: {} records, {} lines, {} lines outside records",
            path.display(),
            extraction.records,
            extraction.lines_read,
            extraction.lines_ignored
        );
        stats.files_read += 1;
        stats.records += extraction.records;
        stats.truncated_records += extraction.truncated_records;
    }
    Ok(stats)
}

fn run_field(args: &FieldArgs, config: &Config) -> Result<InspectionStats> {
    let pattern = FieldPattern::build(args.label.as_str(), args.kind.0)?
        .with_occurrence(args.occurrence.0)
        .until(args.until.iter().cloned())
        .with_substitution(config.id_substitution.clone());
    let extractor = RecordExtractor::from_config(tag_set(&args.tags), config)?;
    let mut stats = InspectionStats {
        files_read: 1,
        ..InspectionStats::default()
    };

    for record in extractor.stream_file(&args.file) {
        stats.records += 1;
        stats.truncated_records += usize::from(record.is_truncated());

        let found = pattern.apply(record.text());
        if found.found() {
            stats.values += 1;
        }
        if found.failure().is_some() {
            stats.failures += 1;
        }
        println!(
            "  {:>6}  {:<20} {}",
            record.start_line(),
            record_id(&record, config),
            describe_match(&found)
        );
    }
    Ok(stats)
}

fn run_table(args: &TableArgs, config: &Config) -> Result<InspectionStats> {
    let schema = args
        .columns
        .as_ref()
        .map(|spec| spec.0.clone())
        .unwrap_or_else(ColumnSchema::inferred);
    let extractor = RecordExtractor::from_config(tag_set(&args.tags), config)?;
    let mut stats = InspectionStats {
        files_read: 1,
        ..InspectionStats::default()
    };

    for record in extractor.stream_file(&args.file) {
        stats.records += 1;
        stats.truncated_records += usize::from(record.is_truncated());

        println!(
            "{} {} (line {})",
            "Record".bright_cyan(),
            record_id(&record, config).bold(),
            record.start_line()
        );
        match parse_table(record.text(), &schema, args.occurrence.0) {
            Ok(table) => {
                stats.values += 1;
                print_table(&table);
            }
            Err(e) => {
                stats.failures += 1;
                println!("  {}", e.to_string().bright_red());
            }
        }
    }
    Ok(stats)
}

fn record_id(record: &RawRecord, config: &Config) -> String {
    read_identity(record.text(), &config.id_substitution)
        .map(|identity| identity.id)
        .unwrap_or_else(|_| "-".to_string())
}

fn first_line(record: &RawRecord) -> String {
    preview(record.text().lines().next().unwrap_or_default())
}

fn describe_match(found: &FieldMatch) -> String {
    if let Some(value) = found.value() {
        return format_value(value).bright_green().to_string();
    }
    match found.failure() {
        Some(failure) => failure.to_string().bright_red().to_string(),
        None => "absent".dimmed().to_string(),
    }
}

fn format_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Number(n) => n.to_string(),
        FieldValue::Integer(i) => i.to_string(),
        FieldValue::Text(text) => format!("'{}'", text),
        FieldValue::Numbers(numbers) => numbers
            .iter()
            .map(f64::to_string)
            .collect::<Vec<_>>()
            .join(" "),
        FieldValue::Strings(strings) => strings
            .iter()
            .map(|s| format!("'{}'", s))
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn print_table(table: &Table) {
    let header: Vec<String> = table
        .schema()
        .columns()
        .iter()
        .map(|column| format!("{}:{}", column.name, column.kind))
        .collect();
    println!("  {}", header.join("  ").dimmed());

    for row in table.rows() {
        let cells: Vec<String> = row.cells().iter().map(CellValue::to_string).collect();
        println!("  {}", cells.join("  "));
    }
    for skipped in table.skipped() {
        println!(
            "  {} {} ({})",
            "dropped:".yellow(),
            skipped.text,
            skipped.fault
        );
    }
}

fn print_summary(stats: &InspectionStats) {
    println!("\n{}", "Inspection Summary".bright_green().bold());
    println!(
        "  {} {:.2}s",
        "Time elapsed:".bright_cyan(),
        stats.elapsed.as_secs_f64()
    );
    println!(
        "  {} {}",
        "Files read:".bright_cyan(),
        stats.files_read.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Records:".bright_cyan(),
        stats.records.to_string().bright_white().bold()
    );
    if stats.truncated_records > 0 {
        println!(
            "  {} {}",
            "Truncated:".bright_yellow(),
            stats.truncated_records.to_string().bright_yellow().bold()
        );
    }
    if stats.values > 0 || stats.failures > 0 {
        println!(
            "  {} {}",
            "Values found:".bright_cyan(),
            stats.values.to_string().bright_white().bold()
        );
    }
    if stats.failures > 0 {
        println!(
            "  {} {}",
            "Failures:".bright_red(),
            stats.failures.to_string().bright_red().bold()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_expand_inputs() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["profile.def", "struct.def", "notes.txt"] {
            let mut file = std::fs::File::create(temp_dir.path().join(name)).unwrap();
            writeln!(file, "CRDS id '1' crds").unwrap();
        }

        let pattern = temp_dir.path().join("*.def").display().to_string();
        let mut files = expand_inputs(&[pattern]).unwrap();
        files.sort();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("profile.def"));

        let plain = expand_inputs(&["missing.def".to_string()]).unwrap();
        assert_eq!(plain, vec![PathBuf::from("missing.def")]);

        assert!(expand_inputs(&["[".to_string()]).is_err());
    }

    #[test]
    fn test_tag_set() {
        assert!(tag_set(&[]).is_empty());
        let tags = tag_set(&["crds".to_string()]);
        assert!(tags.is_open("CRDS"));
        assert!(tags.is_close("crds"));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&FieldValue::Number(0.05)), "0.05");
        assert_eq!(format_value(&FieldValue::Text("a b".to_string())), "'a b'");
        assert_eq!(
            format_value(&FieldValue::Numbers(vec![1.0, 0.0, 2.5])),
            "1 0 2.5"
        );
        assert_eq!(
            format_value(&FieldValue::Strings(vec!["12".to_string(), "-1".to_string()])),
            "'12' '-1'"
        );
    }

    #[test]
    fn test_logging_installs_once() {
        let args = CommonArgs {
            quiet: true,
            ..CommonArgs::default()
        };
        let _ = setup_logging(&args);
        assert!(setup_logging(&args).is_err());
    }

    #[test]
    fn test_load_default_configuration() {
        let config = load_configuration(&CommonArgs::default()).unwrap();
        assert_eq!(config, Config::default());

        let missing = CommonArgs {
            config_file: Some(PathBuf::from("/nonexistent/sobek.json")),
            ..CommonArgs::default()
        };
        assert!(load_configuration(&missing).is_err());
    }

    #[test]
    fn test_first_line_preview() {
        let record = RawRecord::new(
            "CRDS id '3' lt yz\nTBLE\n0 2 <\ntble crds\n".to_string(),
            4,
            false,
        );
        assert_eq!(first_line(&record), "CRDS id '3' lt yz");
    }
}
