//! Results folder scanner.
//!
//! Lists the CSV files available for reporting and resolves a requested
//! file name to a path inside the results folder.

use crate::error::{ReportError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

const CSV_EXTENSION: &str = "csv";

/// A CSV file found in the results folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    /// File name, relative to the results folder.
    pub name: String,
    /// File size in bytes.
    pub size: u64,
}

/// Scanner over a single results folder (not recursive).
pub struct DatasetScanner {
    root: PathBuf,
}

impl DatasetScanner {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List CSV files in the folder, sorted by name.
    pub fn scan(&self) -> Result<Vec<ScannedFile>> {
        if !self.root.is_dir() {
            return Err(ReportError::DirectoryNotFound {
                path: self.root.clone(),
            });
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| ReportError::DirectoryRead {
                path: self.root.clone(),
                source: e,
            })?;

            // Symlinks count when they point at a file inside the folder,
            // the same rule `resolve` applies.
            let is_file = if entry.path_is_symlink() {
                entry.path().is_file() && self.is_within_root(entry.path())
            } else {
                entry.file_type().is_file()
            };
            if !is_file {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            if !is_csv_name(&name) {
                debug!("Skipping non-CSV file: {}", name);
                continue;
            }

            let size = fs::metadata(entry.path()).map(|m| m.len()).unwrap_or(0);
            files.push(ScannedFile { name, size });
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    /// Resolve `name` to a CSV file inside the folder.
    ///
    /// Anything that is not a plain `.csv` file name of an existing file in
    /// the folder is reported as missing.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let missing = || ReportError::MissingFile {
            name: name.to_string(),
        };

        if !is_csv_name(name) || !is_plain_file_name(name) {
            return Err(missing());
        }

        let path = self.root.join(name);
        if !path.is_file() || !self.is_within_root(&path) {
            return Err(missing());
        }

        Ok(path)
    }

    /// Check if a path is within the results folder.
    fn is_within_root(&self, path: &Path) -> bool {
        // Canonicalize paths to handle symlinks
        let canonical_root = fs::canonicalize(&self.root).unwrap_or_else(|_| self.root.clone());
        let canonical_path = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

        canonical_path.starts_with(canonical_root)
    }
}

fn is_csv_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(CSV_EXTENSION))
        .unwrap_or(false)
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains(['/', '\\'])
        && name != "."
        && name != ".."
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_results_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in ["b_run.csv", "a_run.csv", "notes.txt", "C_RUN.CSV"] {
            std::fs::write(dir.path().join(name), "Joy\n1\n").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.csv")).unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("deep.csv"), "Joy\n1\n").unwrap();
        dir
    }

    #[test]
    fn test_scan_lists_csv_files_sorted() {
        let dir = create_results_dir();
        let scanner = DatasetScanner::new(dir.path().to_path_buf());
        let files = scanner.scan().unwrap();

        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["C_RUN.CSV", "a_run.csv", "b_run.csv"]);
        assert!(files.iter().all(|f| f.size == 6));
    }

    #[test]
    fn test_scan_missing_folder() {
        let dir = TempDir::new().unwrap();
        let scanner = DatasetScanner::new(dir.path().join("Results"));
        let err = scanner.scan().unwrap_err();
        assert!(matches!(err, ReportError::DirectoryNotFound { .. }));
    }

    #[test]
    fn test_scan_empty_folder() {
        let dir = TempDir::new().unwrap();
        let scanner = DatasetScanner::new(dir.path().to_path_buf());
        assert!(scanner.scan().unwrap().is_empty());
    }

    #[test]
    fn test_resolve_existing() {
        let dir = create_results_dir();
        let scanner = DatasetScanner::new(dir.path().to_path_buf());
        let path = scanner.resolve("a_run.csv").unwrap();
        assert_eq!(path, dir.path().join("a_run.csv"));
    }

    #[test]
    fn test_resolve_rejects() {
        let dir = create_results_dir();
        let scanner = DatasetScanner::new(dir.path().to_path_buf());

        for name in [
            "missing.csv",
            "notes.txt",
            "nested.csv",
            "sub/deep.csv",
            "../a_run.csv",
            "",
        ] {
            let err = scanner.resolve(name).unwrap_err();
            assert!(err.is_not_found(), "{} should be rejected", name);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_inside_folder_is_listed_and_resolved() {
        let dir = create_results_dir();
        std::os::unix::fs::symlink(dir.path().join("a_run.csv"), dir.path().join("link.csv"))
            .unwrap();
        let scanner = DatasetScanner::new(dir.path().to_path_buf());

        let files = scanner.scan().unwrap();
        let link = files.iter().find(|f| f.name == "link.csv").unwrap();
        assert_eq!(link.size, 6);
        assert!(scanner.resolve("link.csv").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escaping_folder_is_rejected() {
        let outside = TempDir::new().unwrap();
        std::fs::write(outside.path().join("secret.csv"), "Joy\n1\n").unwrap();

        let dir = create_results_dir();
        std::os::unix::fs::symlink(
            outside.path().join("secret.csv"),
            dir.path().join("escape.csv"),
        )
        .unwrap();
        let scanner = DatasetScanner::new(dir.path().to_path_buf());

        let files = scanner.scan().unwrap();
        assert!(files.iter().all(|f| f.name != "escape.csv"));
        assert!(scanner.resolve("escape.csv").unwrap_err().is_not_found());
    }
}
