//! In-memory tabular dataset.
//!
//! A dataset is an ordered list of rows over named columns. Cells keep
//! their raw text and are classified on access.

pub mod loader;

pub use loader::load_file;

/// Cell texts read as missing, matching the usual CSV NA markers.
const NA_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A single cell, classified from its raw text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// Parses as a float other than NaN.
    Number(f64),
    /// Any other non-empty text.
    Text(&'a str),
    /// Empty, whitespace-only, or an NA marker such as `NA` or `null`.
    Missing,
}

impl<'a> Value<'a> {
    /// Classify a raw cell.
    pub fn parse(raw: &'a str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || NA_MARKERS.contains(&trimmed) {
            return Value::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if !n.is_nan() => Value::Number(n),
            _ => Value::Text(trimmed),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Numeric value, if any.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Rows × named columns loaded from one CSV file.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Source file name.
    pub name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Build a dataset from headers and rows.
    ///
    /// Every row must have as many cells as there are headers; the loader
    /// guarantees this.
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Column names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Raw rows in file order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Index of the first column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Trimmed raw cells of a column, top to bottom. `None` if absent.
    pub fn cells<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a str> + 'a> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(move |row| row.get(idx).map(|c| c.trim()).unwrap_or("")),
        )
    }

    /// Classified cells of a column, top to bottom. `None` if absent.
    pub fn values<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = Value<'a>> + 'a> {
        Some(self.cells(name)?.map(Value::parse))
    }
}
