//! Species classifier: image in, species name out.

use crate::config::{InferenceConfig, ModelConfig};
use crate::constants::UNKNOWN_SPECIES;
use crate::error::Result;
use crate::inference::{
    BestDetection, ClassNameTable, Detector, InputTensor, OnnxDetector,
};
use image::DynamicImage;
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of classifying one image.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Species name, or `"Unknown"`.
    pub species: String,
    /// Confidence of the winning candidate (`0.0` if there was none).
    pub confidence: f32,
    /// Class index, present only when it mapped to a known species.
    pub class_index: Option<usize>,
}

impl Classification {
    fn unknown(confidence: f32) -> Self {
        Self {
            species: UNKNOWN_SPECIES.to_string(),
            confidence,
            class_index: None,
        }
    }

    /// Whether no known species was identified.
    pub fn is_unknown(&self) -> bool {
        self.class_index.is_none()
    }
}

/// Bird species classifier around a detector model.
pub struct SpeciesClassifier<D = OnnxDetector> {
    detector: D,
    labels: Arc<ClassNameTable>,
    min_confidence: f32,
}

impl SpeciesClassifier<OnnxDetector> {
    /// Build a classifier from a configured model.
    pub fn from_config(
        model_config: &ModelConfig,
        inference: &InferenceConfig,
        min_confidence: f32,
    ) -> Result<Self> {
        let labels = ClassNameTable::from_path(&model_config.labels)?;
        info!(
            "Loaded {} species (labels version {})",
            labels.len(),
            labels.version()
        );

        let detector = OnnxDetector::load(&model_config.path, inference)?;
        Ok(Self::new(detector, Arc::new(labels)).with_min_confidence(min_confidence))
    }
}

impl<D: Detector> SpeciesClassifier<D> {
    /// Create a classifier from a detector and a shared label table.
    pub fn new(detector: D, labels: Arc<ClassNameTable>) -> Self {
        Self {
            detector,
            labels,
            min_confidence: 0.0,
        }
    }

    /// Report `"Unknown"` when the winning confidence is below `min_confidence`.
    #[must_use]
    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Identify the species in an image.
    ///
    /// Returns a name from the label table or `"Unknown"`.
    pub fn predict(&mut self, image: &DynamicImage) -> Result<String> {
        Ok(self.classify(image)?.species)
    }

    /// Identify the species in an image, keeping confidence and class index.
    pub fn classify(&mut self, image: &DynamicImage) -> Result<Classification> {
        let input = InputTensor::from_image(image)?;
        self.classify_tensor(&input)
    }

    /// Run the model on a prepared tensor and map the best detection.
    pub fn classify_tensor(&mut self, input: &InputTensor) -> Result<Classification> {
        let detections = self.detector.infer(input)?;
        let best = detections.best();
        debug!(
            "Best of {} candidates: class {} at {:.4} (row {:?})",
            detections.len(),
            best.class_id,
            best.confidence,
            best.row
        );
        Ok(resolve(best, &self.labels, self.min_confidence))
    }

    /// Shared label table.
    pub fn labels(&self) -> &Arc<ClassNameTable> {
        &self.labels
    }

    /// Minimum confidence in effect.
    pub fn min_confidence(&self) -> f32 {
        self.min_confidence
    }

    /// Tear down the classifier, handing back the detector.
    pub fn into_detector(self) -> D {
        self.detector
    }
}

/// Map a winning detection to a species name.
fn resolve(best: BestDetection, labels: &ClassNameTable, min_confidence: f32) -> Classification {
    if best.confidence < min_confidence {
        return Classification::unknown(best.confidence);
    }

    match labels.lookup(best.class_id) {
        Some(name) => Classification {
            species: name.to_string(),
            confidence: best.confidence,
            #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
            class_index: Some(best.class_id as usize),
        },
        None => Classification::unknown(best.confidence),
    }
}
