//! JSON output format writer.

use crate::error::{Error, Result};
use crate::output::{ClassificationRecord, OutputWriter, RunInfo};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Write;

/// JSON result document.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonResultFile {
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Model used for classification.
    pub model: String,
    /// Label table version.
    pub labels_version: String,
    /// Classification settings.
    pub settings: JsonSettings,
    /// Per-image results.
    pub results: Vec<JsonResult>,
    /// Summary statistics.
    pub summary: JsonSummary,
}

/// Classification settings for JSON output.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonSettings {
    /// Minimum confidence threshold.
    pub min_confidence: f32,
}

/// Single image result in JSON format.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonResult {
    /// Source image path.
    pub file: String,
    /// Species name or `"Unknown"`.
    pub species: String,
    /// Confidence score.
    pub confidence: f32,
    /// Class index, omitted for unknown results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_index: Option<usize>,
    /// Processing time in milliseconds.
    pub duration_ms: f64,
}

/// Summary statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonSummary {
    /// Number of images classified.
    pub total_images: usize,
    /// Number of images with a known species.
    pub identified: usize,
    /// Number of distinct species identified.
    pub unique_species: usize,
}

/// Collects results and writes one JSON document on finalize.
pub struct JsonResultWriter {
    writer: Box<dyn Write>,
    target: String,
    run: RunInfo,
    records: Vec<ClassificationRecord>,
}

impl JsonResultWriter {
    /// Create a JSON writer over any sink. `target` names it in errors.
    pub fn new(writer: Box<dyn Write>, target: impl Into<String>, run: RunInfo) -> Self {
        Self {
            writer,
            target: target.into(),
            run,
            records: Vec::new(),
        }
    }

    fn compute_summary(&self) -> JsonSummary {
        let identified: Vec<&ClassificationRecord> = self
            .records
            .iter()
            .filter(|r| r.class_index.is_some())
            .collect();
        let unique_species: HashSet<&str> =
            identified.iter().map(|r| r.species.as_str()).collect();

        JsonSummary {
            total_images: self.records.len(),
            identified: identified.len(),
            unique_species: unique_species.len(),
        }
    }
}

impl OutputWriter for JsonResultWriter {
    fn write_header(&mut self) -> Result<()> {
        // Written as a whole in finalize
        Ok(())
    }

    fn write_result(&mut self, record: &ClassificationRecord) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        let results = self
            .records
            .iter()
            .map(|r| JsonResult {
                file: r.file_path.display().to_string(),
                species: r.species.clone(),
                confidence: r.confidence,
                class_index: r.class_index,
                duration_ms: r.duration_ms,
            })
            .collect();

        let document = JsonResultFile {
            generated_at: Utc::now(),
            model: self.run.model.clone(),
            labels_version: self.run.labels_version.clone(),
            settings: JsonSettings {
                min_confidence: self.run.min_confidence,
            },
            results,
            summary: self.compute_summary(),
        };

        serde_json::to_writer_pretty(&mut self.writer, &document).map_err(|e| {
            Error::OutputWrite {
                target: self.target.clone(),
                source: Box::new(e),
            }
        })?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
