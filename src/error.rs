//! Error types for birdsnap.

/// Result type alias for birdsnap operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for birdsnap.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Model not found in configuration.
    #[error("model '{name}' not found in configuration")]
    ModelNotFound {
        /// Name of the missing model.
        name: String,
    },

    /// Model already exists in configuration.
    #[error("model '{name}' already exists in configuration")]
    ModelAlreadyExists {
        /// Name of the existing model.
        name: String,
    },

    /// Model file does not exist.
    #[error("model file does not exist: {path}")]
    ModelFileNotFound {
        /// Path to the missing model file.
        path: std::path::PathBuf,
    },

    /// Labels file does not exist.
    #[error("labels file does not exist: {path}")]
    LabelsFileNotFound {
        /// Path to the missing labels file.
        path: std::path::PathBuf,
    },

    /// Failed to read labels file.
    #[error("failed to read labels file '{path}'")]
    LabelsRead {
        /// Path to the labels file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a JSON labels file.
    #[error("failed to parse labels file '{path}'")]
    LabelsParse {
        /// Path to the labels file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Labels file contained no species names.
    #[error("labels file '{path}' contains no species names")]
    LabelsEmpty {
        /// Path to the labels file.
        path: std::path::PathBuf,
    },

    /// Failed to load the model into the runtime.
    #[error("failed to load model '{path}': {reason}")]
    ModelLoad {
        /// Path to the model file.
        path: std::path::PathBuf,
        /// Description of the load failure.
        reason: String,
    },

    /// Image could not be used as model input.
    #[error("invalid image: {reason}")]
    InvalidImage {
        /// Description of the problem.
        reason: String,
    },

    /// Image file could not be decoded.
    #[error("failed to decode image '{path}'")]
    ImageDecode {
        /// Path to the image file.
        path: std::path::PathBuf,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// Inference failed.
    #[error("inference failed: {reason}")]
    Inference {
        /// Description of the inference failure.
        reason: String,
    },

    /// No image files found in the provided paths.
    #[error("no image files found in the provided paths")]
    NoValidImageFiles,

    /// Failed to write result output.
    #[error("failed to write results to '{target}'")]
    OutputWrite {
        /// Output destination (file path or `stdout`).
        target: String,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to read preferences file.
    #[error("failed to read preferences file '{path}'")]
    PrefsRead {
        /// Path to the preferences file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse preferences file.
    #[error("failed to parse preferences file '{path}'")]
    PrefsParse {
        /// Path to the preferences file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to write preferences file.
    #[error("failed to write preferences file '{path}'")]
    PrefsWrite {
        /// Path to the preferences file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Whether this error means the input image was unusable.
    pub const fn is_invalid_image(&self) -> bool {
        matches!(self, Self::InvalidImage { .. } | Self::ImageDecode { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_image_classification() {
        let err = Error::InvalidImage {
            reason: "image has zero width".to_string(),
        };
        assert!(err.is_invalid_image());
        assert_eq!(err.to_string(), "invalid image: image has zero width");

        let err = Error::Inference {
            reason: "boom".to_string(),
        };
        assert!(!err.is_invalid_image());
    }
}
