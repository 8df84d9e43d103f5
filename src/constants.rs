//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "birdsnap";

/// Label returned when no detection maps to a known species.
pub const UNKNOWN_SPECIES: &str = "Unknown";

/// Default minimum confidence for the winning detection.
///
/// Zero keeps the plain arg-max behavior: any detection above 0.0 can win.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.0;

/// Model input tensor geometry (NHWC).
pub mod input {
    /// Input width in pixels.
    pub const WIDTH: u32 = 640;
    /// Input height in pixels.
    pub const HEIGHT: u32 = 640;
    /// Colour channels (RGB).
    pub const CHANNELS: usize = 3;
    /// Batch size fed to the model.
    pub const BATCH: usize = 1;
    /// Divisor mapping 8-bit channel values into `[0, 1]`.
    pub const PIXEL_SCALE: f32 = 255.0;
}

/// Model output layout.
pub mod detection {
    /// Candidate rows produced by the bundled model.
    pub const CANDIDATES: usize = 8400;
    /// Values per candidate row.
    pub const ROW_LEN: usize = 6;
    /// Offset of the confidence score inside a row.
    pub const CONFIDENCE_OFFSET: usize = 4;
    /// Offset of the class index inside a row.
    pub const CLASS_OFFSET: usize = 5;
}

/// Confidence value bounds.
pub mod confidence {
    /// Minimum valid confidence value.
    pub const MIN: f32 = 0.0;
    /// Maximum valid confidence value.
    pub const MAX: f32 = 1.0;
    /// Decimal places for confidence formatting.
    pub const DECIMAL_PLACES: usize = 4;
}

/// Image file extensions picked up when walking input directories.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp"];

/// Version reported for plain-text label files, which carry none.
pub const UNVERSIONED_LABELS: &str = "unversioned";

/// Configuration file name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Preferences file name inside the config directory.
pub const PREFS_FILE_NAME: &str = "state.toml";
