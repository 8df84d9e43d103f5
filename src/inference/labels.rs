//! Versioned species name table.

use crate::constants::UNVERSIONED_LABELS;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ordered species names indexed by model class index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassNameTable {
    /// Label set version.
    version: String,
    /// Species names, position = class index.
    names: Vec<String>,
}

impl ClassNameTable {
    /// Create a table from names already in memory.
    pub fn new(version: impl Into<String>, names: Vec<String>) -> Self {
        Self {
            version: version.into(),
            names,
        }
    }

    /// Load a table from disk.
    ///
    /// # File Formats
    /// - `.json`: `{ "version": "...", "names": ["...", ...] }`
    /// - anything else: one name per line, blank lines ignored
    ///
    /// # Errors
    /// - Returns error if the file is missing or cannot be read
    /// - Returns error if JSON is malformed
    /// - Returns error if no names were found
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::LabelsFileNotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|e| Error::LabelsRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let table = if is_json {
            serde_json::from_str::<Self>(&contents).map_err(|e| Error::LabelsParse {
                path: path.to_path_buf(),
                source: e,
            })?
        } else {
            Self::new(UNVERSIONED_LABELS, parse_text_labels(&contents))
        };

        if table.names.is_empty() {
            return Err(Error::LabelsEmpty {
                path: path.to_path_buf(),
            });
        }

        Ok(table)
    }

    /// Name for a class index, `None` if it is out of bounds.
    pub fn lookup(&self, class_id: i64) -> Option<&str> {
        usize::try_from(class_id)
            .ok()
            .and_then(|idx| self.names.get(idx))
            .map(String::as_str)
    }

    /// Whether `name` is one of the table's species.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Label set version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// All names in class-index order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of species.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table has no species.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Split a plain-text labels file into trimmed, non-empty names.
fn parse_text_labels(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn sample() -> ClassNameTable {
        ClassNameTable::new(
            "test",
            vec!["Barn Swallow".to_string(), "Rock Pigeon".to_string()],
        )
    }

    #[test]
    fn test_lookup_in_bounds() {
        let table = sample();
        assert_eq!(table.lookup(0), Some("Barn Swallow"));
        assert_eq!(table.lookup(1), Some("Rock Pigeon"));
    }

    #[test]
    fn test_lookup_out_of_bounds() {
        let table = sample();
        assert_eq!(table.lookup(2), None);
        assert_eq!(table.lookup(999), None);
        assert_eq!(table.lookup(-1), None);
    }

    #[test]
    fn test_load_text_labels() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Great Knot").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  Pied Avocet  ").unwrap();

        let table = ClassNameTable::from_path(file.path()).unwrap();
        assert_eq!(table.version(), UNVERSIONED_LABELS);
        assert_eq!(table.names(), ["Great Knot", "Pied Avocet"]);
    }

    #[test]
    fn test_load_json_labels() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"version": "2024.2", "names": ["Whiskered Tern", "Wood Sandpiper"]}}"#
        )
        .unwrap();

        let table = ClassNameTable::from_path(file.path()).unwrap();
        assert_eq!(table.version(), "2024.2");
        assert_eq!(table.len(), 2);
        assert!(table.contains("Wood Sandpiper"));
    }

    #[test]
    fn test_load_malformed_json() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "not json").unwrap();

        let err = ClassNameTable::from_path(file.path()).unwrap_err();
        assert!(matches!(err, Error::LabelsParse { .. }));
    }

    #[test]
    fn test_load_empty_labels() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "   ").unwrap();

        let err = ClassNameTable::from_path(file.path()).unwrap_err();
        assert!(matches!(err, Error::LabelsEmpty { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ClassNameTable::from_path(Path::new("/nonexistent/labels.txt")).unwrap_err();
        assert!(matches!(err, Error::LabelsFileNotFound { .. }));
    }

    #[test]
    fn test_bundled_table_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/labels/birds-15.json");
        let table = ClassNameTable::from_path(&path).unwrap();
        assert_eq!(table.len(), 15);
        assert_eq!(table.lookup(0), Some("Bar-tailed Godwit"));
        assert_eq!(table.lookup(14), Some("Wood Sandpiper"));
    }
}
