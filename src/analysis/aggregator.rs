//! Emotion aggregation and statistics.
//!
//! This module computes column means and value frequencies over a dataset.
//! Columns missing from the dataset are skipped, never reported as errors.

use crate::dataset::{Dataset, Value};
use crate::labels::{self, LabelMap};
use crate::models::{CategorySummary, EmotionSummary, Summary, ValenceEntry, ValenceSummary};
use std::collections::HashMap;
use tracing::debug;

/// Which dataset columns feed each summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    /// Emotion columns, in output order.
    pub emotions: Vec<String>,
    /// Predominant-category column.
    pub predominant: String,
    /// Trend-category column.
    pub trend: String,
    /// Valence columns, in output order.
    pub valence: Vec<String>,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            emotions: labels::default_emotion_columns(),
            predominant: labels::PREDOMINANT_COLUMN.to_string(),
            trend: labels::TREND_COLUMN.to_string(),
            valence: labels::default_valence_columns(),
        }
    }
}

/// Computes summaries for datasets using a fixed label map and column spec.
#[derive(Debug, Clone)]
pub struct Aggregator {
    labels: LabelMap,
    columns: ColumnSpec,
}

impl Aggregator {
    pub fn new(labels: LabelMap, columns: ColumnSpec) -> Self {
        Self { labels, columns }
    }

    pub fn columns(&self) -> &ColumnSpec {
        &self.columns
    }

    /// Run every summary over `dataset`.
    pub fn summarize(&self, dataset: &Dataset) -> Summary {
        Summary {
            emotions: self.summarize_emotions(dataset),
            predominant: self.summarize_category(dataset, &self.columns.predominant),
            trend: self.summarize_category(dataset, &self.columns.trend),
            valence: self.summarize_valence(dataset),
        }
    }

    /// Mean of each present emotion column and its share of the summed means.
    pub fn summarize_emotions(&self, dataset: &Dataset) -> Vec<EmotionSummary> {
        let means: Vec<(&str, f64)> = self
            .columns
            .emotions
            .iter()
            .filter_map(|col| column_mean(dataset, col).map(|m| (col.as_str(), m)))
            .collect();

        let total: f64 = means.iter().map(|(_, m)| m).sum();
        debug!(
            "{}: {} emotion columns, summed mean {}",
            dataset.name,
            means.len(),
            total
        );

        means
            .into_iter()
            .map(|(col, mean)| EmotionSummary {
                label: self.labels.label(col).to_string(),
                column: col.to_string(),
                mean,
                percent_in_complex: if total == 0.0 {
                    0.0
                } else {
                    mean / total * 100.0
                },
            })
            .collect()
    }

    /// Frequency of each distinct value of `column`, most frequent first.
    ///
    /// Returns an empty list when the column is absent or the dataset has
    /// no rows.
    pub fn summarize_category(&self, dataset: &Dataset, column: &str) -> Vec<CategorySummary> {
        let total = dataset.row_count();
        if total == 0 {
            return Vec::new();
        }

        let Some(counts) = value_counts(dataset, column) else {
            debug!("{}: no '{}' column", dataset.name, column);
            return Vec::new();
        };

        counts
            .into_iter()
            .map(|(value, count)| CategorySummary {
                label: self.labels.label(&value).to_string(),
                count,
                percent_of_total: count as f64 / total as f64 * 100.0,
                value,
            })
            .collect()
    }

    /// Mean of each present valence column, in configured order.
    pub fn summarize_valence(&self, dataset: &Dataset) -> ValenceSummary {
        let entries = self
            .columns
            .valence
            .iter()
            .filter_map(|col| {
                column_mean(dataset, col).map(|mean| ValenceEntry {
                    label: self.labels.label(col).to_string(),
                    column: col.clone(),
                    mean,
                })
            })
            .collect();

        ValenceSummary { entries }
    }
}

/// Arithmetic mean of the numeric cells of `column`.
///
/// Empty and non-numeric cells are left out of both sum and count. A column
/// with no numeric cell has mean 0. Returns `None` if the column is absent.
pub fn column_mean(dataset: &Dataset, column: &str) -> Option<f64> {
    let values = dataset.values(column)?;

    let mut sum = 0.0;
    let mut count = 0usize;
    let mut skipped = 0usize;
    for value in values {
        match value.as_number() {
            Some(n) => {
                sum += n;
                count += 1;
            }
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(
            "{}: skipped {} non-numeric cells in '{}'",
            dataset.name, skipped, column
        );
    }

    Some(if count == 0 { 0.0 } else { sum / count as f64 })
}

/// Count each distinct value of `column`, leaving out missing cells.
///
/// Sorted by descending count; equal counts keep first-seen order.
pub fn value_counts(dataset: &Dataset, column: &str) -> Option<Vec<(String, usize)>> {
    let cells = dataset.cells(column)?;

    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for cell in cells {
        if Value::parse(cell).is_missing() {
            continue;
        }
        match index.get(cell) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(cell, counts.len());
                counts.push((cell.to_string(), 1));
            }
        }
    }

    // Stable sort keeps first-seen order among ties.
    counts.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
    Some(counts)
}
