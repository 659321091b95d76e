//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.emoreport.toml` files.

use crate::analysis::ColumnSpec;
use crate::cli::OutputFormat;
use crate::labels;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = ".emoreport.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Dataset column names.
    #[serde(default)]
    pub columns: ColumnsConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,

    /// Extra or replacement display labels, keyed by source name.
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Folder holding the CSV result files.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,

    /// Default report format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Default output file; stdout when unset.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            format: OutputFormat::default(),
            output: None,
            verbose: false,
        }
    }
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("Results")
}

/// Which columns hold emotions, categories and valence metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnsConfig {
    /// Emotion columns, in report order.
    #[serde(default = "labels::default_emotion_columns")]
    pub emotions: Vec<String>,

    /// Predominant-category column.
    #[serde(default = "default_predominant")]
    pub predominant: String,

    /// Trend-category column.
    #[serde(default = "default_trend")]
    pub trend: String,

    /// Valence columns, in report order.
    #[serde(default = "labels::default_valence_columns")]
    pub valence: Vec<String>,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            emotions: labels::default_emotion_columns(),
            predominant: default_predominant(),
            trend: default_trend(),
            valence: labels::default_valence_columns(),
        }
    }
}

fn default_predominant() -> String {
    labels::PREDOMINANT_COLUMN.to_string()
}

fn default_trend() -> String {
    labels::TREND_COLUMN.to_string()
}

impl From<&ColumnsConfig> for ColumnSpec {
    fn from(config: &ColumnsConfig) -> Self {
        Self {
            emotions: config.emotions.clone(),
            predominant: config.predominant.clone(),
            trend: config.trend.clone(),
            valence: config.valence.clone(),
        }
    }
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include the full source table.
    #[serde(default = "default_true")]
    pub include_table: bool,

    /// Decimal places for means.
    #[serde(default = "default_mean_decimals")]
    pub mean_decimals: usize,

    /// Decimal places for percentages.
    #[serde(default = "default_percent_decimals")]
    pub percent_decimals: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_table: true,
            mean_decimals: default_mean_decimals(),
            percent_decimals: default_percent_decimals(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_mean_decimals() -> usize {
    4
}

fn default_percent_decimals() -> usize {
    2
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref dir) = args.results_dir {
            self.general.results_dir = dir.clone();
        }
        if let Some(format) = args.format {
            self.general.format = format;
        }
        if let Some(ref output) = args.output {
            self.general.output = Some(output.clone());
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
        if args.no_table {
            self.report.include_table = false;
        }
    }

    /// Log level from the merged settings. `quiet` comes from the command line only.
    pub fn log_level(&self, quiet: bool) -> tracing::Level {
        if quiet {
            tracing::Level::ERROR
        } else if self.general.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.results_dir, PathBuf::from("Results"));
        assert_eq!(config.general.format, OutputFormat::Text);
        assert_eq!(config.columns.predominant, "Predominant");
        assert_eq!(config.columns.trend, "Trend");
        assert!(config.columns.emotions.contains(&"Joy".to_string()));
        assert_eq!(config.report.mean_decimals, 4);
        assert_eq!(config.report.percent_decimals, 2);
        assert!(config.report.include_table);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
results_dir = "out"
format = "json"
verbose = true

[columns]
emotions = ["Joy", "Calm"]
predominant = "Main"

[report]
include_table = false

[labels]
Calm = "Calma"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.results_dir, PathBuf::from("out"));
        assert_eq!(config.general.format, OutputFormat::Json);
        assert!(config.general.verbose);
        assert_eq!(config.columns.emotions, vec!["Joy", "Calm"]);
        assert_eq!(config.columns.predominant, "Main");
        assert_eq!(config.columns.trend, "Trend");
        assert_eq!(config.columns.valence.len(), 3);
        assert!(!config.report.include_table);
        assert_eq!(config.labels.get("Calm").map(String::as_str), Some("Calma"));
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[columns]"));
        assert!(toml_str.contains("[report]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.columns.emotions.len(), labels::EMOTION_LABELS.len());
    }

    #[test]
    fn test_merge_with_args() {
        let mut config = Config::default();
        let args = Args::parse_from([
            "emoreport",
            "--results-dir",
            "data",
            "--format",
            "markdown",
            "--no-table",
        ]);
        config.merge_with_args(&args);

        assert_eq!(config.general.results_dir, PathBuf::from("data"));
        assert_eq!(config.general.format, OutputFormat::Markdown);
        assert!(!config.report.include_table);
        assert!(config.general.output.is_none());
    }

    #[test]
    fn test_merge_keeps_config_values_without_flags() {
        let mut config = Config::default();
        config.general.format = OutputFormat::Json;
        let args = Args::parse_from(["emoreport"]);
        config.merge_with_args(&args);

        assert_eq!(config.general.format, OutputFormat::Json);
        assert!(config.report.include_table);
    }

    #[test]
    fn test_verbose_from_config_or_flag() {
        let mut config: Config = toml::from_str("[general]\nverbose = true\n").unwrap();
        config.merge_with_args(&Args::parse_from(["emoreport"]));
        assert!(config.general.verbose);
        assert_eq!(config.log_level(false), tracing::Level::DEBUG);
        assert_eq!(config.log_level(true), tracing::Level::ERROR);

        let mut config = Config::default();
        assert_eq!(config.log_level(false), tracing::Level::INFO);
        config.merge_with_args(&Args::parse_from(["emoreport", "--verbose"]));
        assert!(config.general.verbose);
        assert_eq!(config.log_level(false), tracing::Level::DEBUG);
    }

    #[test]
    fn test_columns_into_spec() {
        let spec = ColumnSpec::from(&ColumnsConfig::default());
        assert_eq!(spec, ColumnSpec::default());
    }
}
