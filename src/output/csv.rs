//! CSV output format writer.

use crate::constants::confidence::DECIMAL_PLACES;
use crate::error::{Error, Result};
use crate::output::{ClassificationRecord, OutputWriter};
use std::io::Write;

const HEADER: [&str; 5] = ["File", "Species", "Confidence", "Class index", "Duration (ms)"];

/// CSV format output writer.
pub struct CsvWriter {
    writer: ::csv::Writer<Box<dyn Write>>,
    target: String,
}

impl CsvWriter {
    /// Create a CSV writer over any sink. `target` names it in errors.
    pub fn new(writer: Box<dyn Write>, target: impl Into<String>) -> Self {
        Self {
            writer: ::csv::Writer::from_writer(writer),
            target: target.into(),
        }
    }

    fn write_error(&self, e: ::csv::Error) -> Error {
        Error::OutputWrite {
            target: self.target.clone(),
            source: Box::new(e),
        }
    }
}

impl OutputWriter for CsvWriter {
    fn write_header(&mut self) -> Result<()> {
        self.writer
            .write_record(HEADER)
            .map_err(|e| self.write_error(e))
    }

    fn write_result(&mut self, record: &ClassificationRecord) -> Result<()> {
        let class_index = record
            .class_index
            .map(|idx| idx.to_string())
            .unwrap_or_default();

        self.writer
            .write_record([
                record.file_path.display().to_string(),
                record.species.clone(),
                format!("{:.decimal$}", record.confidence, decimal = DECIMAL_PLACES),
                class_index,
                format!("{:.1}", record.duration_ms),
            ])
            .map_err(|e| self.write_error(e))
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn write_records(records: &[ClassificationRecord]) -> String {
        let file = NamedTempFile::new().unwrap();
        let sink = Box::new(File::create(file.path()).unwrap());
        let mut writer = CsvWriter::new(sink, file.path().display().to_string());

        writer.write_header().unwrap();
        for record in records {
            writer.write_result(record).unwrap();
        }
        writer.finalize().unwrap();

        std::fs::read_to_string(file.path()).unwrap()
    }

    #[test]
    fn test_csv_writer_basic() {
        let contents = write_records(&[ClassificationRecord {
            file_path: PathBuf::from("/photos/plover.jpg"),
            species: "Black-bellied Plover".to_string(),
            confidence: 0.8542,
            class_index: Some(2),
            duration_ms: 33.3,
        }]);

        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some("File,Species,Confidence,Class index,Duration (ms)")
        );
        assert_eq!(
            lines.next(),
            Some("/photos/plover.jpg,Black-bellied Plover,0.8542,2,33.3")
        );
    }

    #[test]
    fn test_csv_writer_unknown_and_quoting() {
        let contents = write_records(&[ClassificationRecord {
            file_path: PathBuf::from("shots/a,b.png"),
            species: "Unknown".to_string(),
            confidence: 0.0,
            class_index: None,
            duration_ms: 5.0,
        }]);

        assert!(contents.contains("\"shots/a,b.png\",Unknown,0.0000,,5.0"));
    }
}
