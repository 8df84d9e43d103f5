//! Output type definitions.

use crate::inference::Classification;
use std::path::PathBuf;

/// Classification result for one image file.
#[derive(Debug, Clone)]
pub struct ClassificationRecord {
    /// Path to the source image.
    pub file_path: PathBuf,
    /// Species name, or `"Unknown"`.
    pub species: String,
    /// Confidence of the winning detection (0.0 - 1.0).
    pub confidence: f32,
    /// Class index when a known species was identified.
    pub class_index: Option<usize>,
    /// Decode plus inference time in milliseconds.
    pub duration_ms: f64,
}

impl ClassificationRecord {
    /// Build a record from a classifier result.
    pub fn new(file_path: PathBuf, classification: Classification, duration_ms: f64) -> Self {
        Self {
            file_path,
            species: classification.species,
            confidence: classification.confidence,
            class_index: classification.class_index,
            duration_ms,
        }
    }
}

/// Run-level settings echoed into structured output.
#[derive(Debug, Clone)]
pub struct RunInfo {
    /// Configured model name.
    pub model: String,
    /// Version of the label table in use.
    pub labels_version: String,
    /// Minimum confidence in effect.
    pub min_confidence: f32,
}
