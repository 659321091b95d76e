//! Data models for emotion reports.
//!
//! Summary types are plain data: they carry full-precision numbers and no
//! presentation formatting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mean of one emotion column and its share of all emotion means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionSummary {
    /// Display label.
    pub label: String,
    /// Source column name.
    pub column: String,
    /// Arithmetic mean over the numeric cells of the column.
    pub mean: f64,
    /// `mean / sum(means) * 100`, or 0 when the sum is 0.
    pub percent_in_complex: f64,
}

/// Frequency of one distinct value of a category column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// Display label.
    pub label: String,
    /// Raw value as it appears in the dataset.
    pub value: String,
    /// Number of rows holding this value.
    pub count: usize,
    /// `count / total rows * 100`.
    pub percent_of_total: f64,
}

/// Mean of one valence column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValenceEntry {
    /// Display label.
    pub label: String,
    /// Source column name.
    pub column: String,
    pub mean: f64,
}

/// Valence means in fixed enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValenceSummary {
    pub entries: Vec<ValenceEntry>,
}

impl ValenceSummary {
    /// Mean for a display label.
    #[allow(dead_code)] // Lookup helper; reports iterate `entries`
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.mean)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Single-line rendering, e.g. `Valencia positiva: 0.5000 | Intensidad emocional: 0.2500`.
    pub fn to_line(&self, decimals: usize) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}: {:.*}", e.label, decimals, e.mean))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Everything the aggregator computes for one dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub emotions: Vec<EmotionSummary>,
    pub predominant: Vec<CategorySummary>,
    pub trend: Vec<CategorySummary>,
    pub valence: ValenceSummary,
}

/// Full-table passthrough of the source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Metadata about the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Source file name.
    pub source: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of data rows.
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// Emotion columns found in the file.
    pub emotion_columns_found: usize,
}

/// The complete report for one dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub summary: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableData>,
}
