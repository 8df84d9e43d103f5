//! Single image processing.

use crate::error::{Error, Result};
use crate::inference::{Detector, SpeciesClassifier};
use crate::output::ClassificationRecord;
use image::DynamicImage;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Decode an image file.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|e| Error::ImageDecode {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Decode and classify a single image file.
pub fn process_file<D: Detector>(
    input_path: &Path,
    classifier: &mut SpeciesClassifier<D>,
) -> Result<ClassificationRecord> {
    let start_time = Instant::now();

    debug!("Processing: {}", input_path.display());

    let image = load_image(input_path)?;
    debug!("Decoded {}x{} image", image.width(), image.height());

    let classification = classifier.classify(&image)?;
    let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    info!(
        "{}: {} ({:.1}%) in {:.1} ms",
        input_path.display(),
        classification.species,
        classification.confidence * 100.0,
        duration_ms
    );

    Ok(ClassificationRecord::new(
        input_path.to_path_buf(),
        classification,
        duration_ms,
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::inference::{ClassNameTable, DetectionSet, InputTensor};
    use image::{Rgb, RgbImage};
    use std::sync::Arc;
    use tempfile::TempDir;

    struct Scripted(DetectionSet);

    impl Detector for Scripted {
        fn infer(&mut self, _input: &InputTensor) -> Result<DetectionSet> {
            Ok(self.0.clone())
        }
    }

    fn classifier() -> SpeciesClassifier<Scripted> {
        let mut set = DetectionSet::zeros(8);
        set.set(2, 0.66, 1.0);
        let labels = ClassNameTable::new(
            "test",
            vec!["Eurasian Tree Sparrow".to_string(), "Barn Swallow".to_string()],
        );
        SpeciesClassifier::new(Scripted(set), Arc::new(labels))
    }

    #[test]
    fn test_process_png_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("swallow.png");
        RgbImage::from_pixel(100, 50, Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();

        let record = process_file(&path, &mut classifier()).unwrap();
        assert_eq!(record.species, "Barn Swallow");
        assert_eq!(record.class_index, Some(1));
        assert_eq!(record.file_path, path);
    }

    #[test]
    fn test_process_corrupt_file_is_invalid_image() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();

        let err = process_file(&path, &mut classifier()).unwrap_err();
        assert!(err.is_invalid_image());
        assert!(matches!(err, Error::ImageDecode { .. }));
    }
}
