//! EmoReport - emotion statistics for annotated CSV result files
//!
//! A CLI tool that lists the CSV files in a results folder and, for a
//! selected file, reports mean emotion scores, predominant and trend
//! frequencies, and valence averages.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (config, parse, I/O, etc.)
//!   2 - Requested dataset not found

mod analysis;
mod cli;
mod config;
mod dataset;
mod error;
mod labels;
mod models;
mod report;
mod scanner;

use analysis::{Aggregator, ColumnSpec};
use anyhow::{Context, Result};
use cli::Args;
use config::{Config, CONFIG_FILE_NAME};
use error::ReportError;
use labels::LabelMap;
use scanner::DatasetScanner;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

const EXIT_NOT_FOUND: i32 = 2;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Load config before logging so `verbose` in the file sets the level
    let (config, source) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(config.log_level(args.quiet));

    debug!("EmoReport v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    source.log();

    match run(&args, &config) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Report failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .emoreport.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize the results folder, columns, and labels.");
    Ok(())
}

/// Initialize logging at the given level.
///
/// Logs go to stderr so reports written to stdout stay clean.
fn init_logging(level: Level) {

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Run the selected command. Returns the process exit code.
fn run(args: &Args, config: &Config) -> Result<i32> {
    let scanner = DatasetScanner::new(config.general.results_dir.clone());

    match args.file {
        Some(ref name) if !args.list => run_report(&scanner, name, config),
        _ => run_list(&scanner),
    }
}

/// List the CSV files in the results folder.
fn run_list(scanner: &DatasetScanner) -> Result<i32> {
    let files = match scanner.scan() {
        Ok(files) => files,
        Err(e @ ReportError::DirectoryNotFound { .. }) => {
            eprintln!("❌ {}", e);
            return Ok(EXIT_NOT_FOUND);
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "📁 Archivos CSV en carpeta '{}'",
        scanner.root().display()
    );

    if files.is_empty() {
        println!("   (ninguno)");
    } else {
        for file in &files {
            println!("   📄 {} ({} bytes)", file.name, file.size);
        }
    }

    info!("{} CSV files found", files.len());
    Ok(0)
}

/// Build and emit the report for one CSV file.
fn run_report(scanner: &DatasetScanner, name: &str, config: &Config) -> Result<i32> {
    let dataset = match scanner.resolve(name).and_then(|path| dataset::load_file(&path)) {
        Ok(dataset) => dataset,
        Err(e) if e.is_not_found() => {
            warn!("{}", e);
            eprintln!("❌ Archivo no encontrado: {}", name);
            return Ok(EXIT_NOT_FOUND);
        }
        Err(e) => return Err(e.into()),
    };

    let labels = LabelMap::with_overrides(&config.labels);
    let aggregator = Aggregator::new(labels, ColumnSpec::from(&config.columns));
    let summary = aggregator.summarize(&dataset);

    let missing: Vec<&str> = aggregator
        .columns()
        .emotions
        .iter()
        .filter(|c| !dataset.has_column(c))
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        debug!("Emotion columns not in {}: {}", dataset.name, missing.join(", "));
    }

    let report = report::build_report(&dataset, summary, config.report.include_table);
    let output = report::render(&report, config.general.format, &config.report)?;

    match config.general.output {
        Some(ref path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report saved to: {}", path.display());
        }
        None => print!("{}", output),
    }

    Ok(0)
}

/// Where the active configuration came from.
///
/// Config is read before the subscriber exists, so the outcome is logged
/// afterwards.
enum ConfigSource {
    File(PathBuf),
    Defaults,
    Unreadable(anyhow::Error),
}

impl ConfigSource {
    fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded config from {}", path.display()),
            ConfigSource::Defaults => debug!("No config file found, using defaults"),
            ConfigSource::Unreadable(e) => warn!("Failed to load config: {:#}", e),
        }
    }
}

/// Load configuration from file or use defaults, then apply CLI overrides.
fn load_config(args: &Args) -> Result<(Config, ConfigSource)> {
    // Try explicit config path
    let (mut config, source) = if let Some(ref config_path) = args.config {
        (
            Config::load(config_path)?,
            ConfigSource::File(config_path.clone()),
        )
    } else {
        // Try default location
        match Config::load_default() {
            Ok(Some(config)) => (config, ConfigSource::File(PathBuf::from(CONFIG_FILE_NAME))),
            Ok(None) => (Config::default(), ConfigSource::Defaults),
            Err(e) => (Config::default(), ConfigSource::Unreadable(e)),
        }
    };

    config.merge_with_args(args);
    Ok((config, source))
}
