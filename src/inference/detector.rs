//! Model runtime boundary.
//!
//! The classifier only sees the [`Detector`] trait. [`OnnxDetector`] is the
//! production implementation on top of ONNX Runtime; tests use scripted
//! stand-ins.

use crate::config::{InferenceConfig, InferenceDevice};
use crate::error::{Error, Result};
use crate::inference::{DetectionSet, InputTensor};
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::TensorRef;
use std::path::Path;
use tracing::{debug, info};

/// Runs the detector model on one input tensor.
pub trait Detector {
    /// Invoke the model. Failures surface as [`Error::Inference`].
    fn infer(&mut self, input: &InputTensor) -> Result<DetectionSet>;
}

impl<D: Detector + ?Sized> Detector for Box<D> {
    fn infer(&mut self, input: &InputTensor) -> Result<DetectionSet> {
        (**self).infer(input)
    }
}

/// ONNX Runtime session owning one loaded model.
///
/// The session is released when the detector is dropped.
pub struct OnnxDetector {
    session: Session,
}

impl OnnxDetector {
    /// Load a model file and prepare a session for it.
    pub fn load(model_path: &Path, config: &InferenceConfig) -> Result<Self> {
        if !model_path.exists() {
            return Err(Error::ModelFileNotFound {
                path: model_path.to_path_buf(),
            });
        }

        let mut builder = Session::builder()
            .map_err(|e| load_error(model_path, e))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| load_error(model_path, e))?;

        if config.intra_threads > 0 {
            builder = builder
                .with_intra_threads(config.intra_threads)
                .map_err(|e| load_error(model_path, e))?;
        }

        let (mut builder, device_msg) = configure_device(builder, config.device, model_path)?;

        let session = builder
            .commit_from_file(model_path)
            .map_err(|e| load_error(model_path, e))?;

        info!(
            "Loaded model: {}, device: {}",
            model_path.display(),
            device_msg
        );

        Ok(Self { session })
    }
}

impl Detector for OnnxDetector {
    fn infer(&mut self, input: &InputTensor) -> Result<DetectionSet> {
        let tensor = TensorRef::from_array_view((InputTensor::SHAPE, input.as_slice()))
            .map_err(|e| Error::Inference {
                reason: format!("failed to create input tensor: {e}"),
            })?;

        let outputs = self
            .session
            .run(ort::inputs![tensor])
            .map_err(|e| Error::Inference {
                reason: e.to_string(),
            })?;

        let (shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| Error::Inference {
                reason: format!("failed to extract output: {e}"),
            })?;

        let dims: Vec<i64> = shape.iter().copied().collect();
        debug!("Model output shape: {:?}", dims);

        DetectionSet::from_raw(&dims, data.to_vec())
    }
}

fn load_error(path: &Path, e: impl std::fmt::Display) -> Error {
    Error::ModelLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

#[cfg(feature = "cuda")]
fn configure_device(
    builder: ort::session::builder::SessionBuilder,
    device: InferenceDevice,
    model_path: &Path,
) -> Result<(ort::session::builder::SessionBuilder, &'static str)> {
    use ort::execution_providers::CUDAExecutionProvider;

    match device {
        InferenceDevice::Cpu => Ok((builder, "CPU")),
        InferenceDevice::Auto => {
            // Registration failure falls back to CPU silently.
            let builder = builder
                .with_execution_providers([CUDAExecutionProvider::default().build()])
                .map_err(|e| load_error(model_path, e))?;
            Ok((builder, "Auto (CUDA if available)"))
        }
        InferenceDevice::Cuda => {
            let builder = builder
                .with_execution_providers([CUDAExecutionProvider::default()
                    .build()
                    .error_on_failure()])
                .map_err(|e| load_error(model_path, e))?;
            Ok((builder, "CUDA"))
        }
    }
}

#[cfg(not(feature = "cuda"))]
fn configure_device(
    builder: ort::session::builder::SessionBuilder,
    device: InferenceDevice,
    model_path: &Path,
) -> Result<(ort::session::builder::SessionBuilder, &'static str)> {
    match device {
        InferenceDevice::Cpu => Ok((builder, "CPU")),
        InferenceDevice::Auto => Ok((builder, "Auto (CPU)")),
        InferenceDevice::Cuda => Err(load_error(
            model_path,
            "CUDA requested but birdsnap was built without the `cuda` feature",
        )),
    }
}
