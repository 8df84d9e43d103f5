//! Inference module for bird species identification.

mod classifier;
mod detections;
mod detector;
mod labels;
mod tensor;

pub use classifier::{Classification, SpeciesClassifier};
pub use detections::{BestDetection, Detection, DetectionSet, NO_CLASS};
pub use detector::{Detector, OnnxDetector};
pub use labels::ClassNameTable;
pub use tensor::{InputTensor, resize_to_input};
