//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// EmoReport - emotion statistics for annotated CSV result files
///
/// Lists the CSV files in a results folder and summarizes one of them:
/// mean emotion scores, predominant and trend frequencies, and valence.
///
/// Examples:
///   emoreport
///   emoreport --file session_01.csv
///   emoreport --results-dir ./Results --file session_01.csv --format markdown -o report.md
///   emoreport --file session_01.csv --format json --no-table
///   emoreport --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// CSV file (name inside the results folder) to summarize
    ///
    /// When omitted, the available files are listed instead.
    #[arg(short, long, value_name = "NAME", conflicts_with = "list")]
    pub file: Option<String>,

    /// List the CSV files in the results folder
    #[arg(short, long)]
    pub list: bool,

    /// Folder containing the CSV result files
    ///
    /// Defaults to "Results", or the value in .emoreport.toml.
    #[arg(short, long, value_name = "DIR", env = "EMOREPORT_RESULTS_DIR")]
    pub results_dir: Option<PathBuf>,

    /// Output format (text, markdown, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Leave the full source table out of the report
    #[arg(long)]
    pub no_table: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .emoreport.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .emoreport.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain terminal text (default)
    #[default]
    Text,
    /// Markdown tables
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref name) = self.file {
            if name.trim().is_empty() {
                return Err("File name must not be empty".to_string());
            }
        }

        if self.file.is_none() && (self.output.is_some() || self.format.is_some()) {
            return Err("--output and --format require --file".to_string());
        }

        Ok(())
    }
}
