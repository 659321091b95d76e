//! CSV loading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use super::Dataset;
use crate::error::{ReportError, Result};

const UTF8_BOM: char = '\u{feff}';

/// Load a dataset from a CSV file with a header row.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ReportError::MissingFile { name: name.clone() }
        } else {
            ReportError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let dataset = parse_reader(&name, file)?;
    debug!(
        "Loaded {}: {} rows x {} columns",
        name,
        dataset.row_count(),
        dataset.column_count()
    );
    Ok(dataset)
}

/// Parse CSV text from any reader. `name` labels the dataset and errors.
pub fn parse_reader<R: Read>(name: &str, reader: R) -> Result<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| parse_error(name, &e))?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let h = if i == 0 { h.trim_start_matches(UTF8_BOM) } else { h };
            h.trim().to_string()
        })
        .collect();

    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(ReportError::NoHeader {
            name: name.to_string(),
        });
    }

    if let Some(dup) = first_duplicate(&headers) {
        warn!("{}: duplicate column '{}', only the first is used", name, dup);
    }

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|e| parse_error(name, &e))?;
        rows.push(record.iter().map(String::from).collect());
    }

    Ok(Dataset::new(name, headers, rows))
}

fn parse_error(name: &str, err: &csv::Error) -> ReportError {
    let message = match err.position() {
        Some(pos) => format!("line {}: {}", pos.line(), err),
        None => err.to_string(),
    };
    ReportError::Parse {
        name: name.to_string(),
        message,
    }
}

fn first_duplicate(headers: &[String]) -> Option<&str> {
    headers
        .iter()
        .enumerate()
        .find(|(i, h)| !h.is_empty() && headers[..*i].contains(*h))
        .map(|(_, h)| h.as_str())
}
