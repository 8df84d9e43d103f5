//! CLI argument definitions.

use crate::config::{InferenceDevice, OutputFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Bird species identification from photos.
#[derive(Debug, Parser)]
#[command(name = "birdsnap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Image files or directories to classify.
    pub inputs: Vec<PathBuf>,

    /// Common options for classification.
    #[command(flatten)]
    pub classify: ClassifyArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Manage models.
    Models {
        /// Models action to perform.
        #[command(subcommand)]
        action: ModelsAction,
    },
    /// Control the first-run guide.
    Welcome {
        /// Welcome action to perform.
        #[command(subcommand)]
        action: WelcomeAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Models subcommand actions.
#[derive(Debug, Subcommand)]
pub enum ModelsAction {
    /// List configured models.
    List,
    /// Add a new model to configuration.
    Add {
        /// Name for this model (e.g., "birds15").
        name: String,
        /// Path to the ONNX model file.
        #[arg(long)]
        path: PathBuf,
        /// Path to the labels file.
        #[arg(long)]
        labels: PathBuf,
        /// Set as the default model.
        #[arg(long)]
        default: bool,
    },
    /// Verify model files exist and labels load.
    Check,
    /// Show details and species list for a configured model.
    Info {
        /// Model name from configuration.
        name: String,
    },
}

/// Welcome subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum WelcomeAction {
    /// Show the first-run guide again on the next run.
    Reset,
}

/// Arguments for classification.
#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Model name from configuration.
    #[arg(short, long, env = "BIRDSNAP_MODEL")]
    pub model: Option<String>,

    /// Path to ONNX model file (overrides config).
    #[arg(long, env = "BIRDSNAP_MODEL_PATH", requires = "labels_path")]
    pub model_path: Option<PathBuf>,

    /// Path to labels file (overrides config).
    #[arg(long, env = "BIRDSNAP_LABELS_PATH", requires = "model_path")]
    pub labels_path: Option<PathBuf>,

    /// Output format (text, csv, json).
    #[arg(short, long, env = "BIRDSNAP_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write results to this file instead of stdout.
    #[arg(short, long, env = "BIRDSNAP_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Minimum confidence for an identification (0.0-1.0).
    #[arg(short = 'c', long, value_parser = parse_confidence, env = "BIRDSNAP_MIN_CONFIDENCE")]
    pub min_confidence: Option<f32>,

    /// Inference device.
    #[arg(long, value_enum)]
    pub device: Option<InferenceDevice>,

    /// Stop on first error.
    #[arg(long)]
    pub fail_fast: bool,

    /// Suppress progress output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace+ORT info, -vvv: trace+ORT debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse and validate confidence value.
fn parse_confidence(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(0.0..=1.0).contains(&value) {
        return Err(format!(
            "confidence must be between 0.0 and 1.0, got {value}"
        ));
    }

    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_confidence_valid() {
        assert_eq!(parse_confidence("0.5").ok(), Some(0.5));
        assert_eq!(parse_confidence("0.0").ok(), Some(0.0));
        assert_eq!(parse_confidence("1.0").ok(), Some(1.0));
    }

    #[test]
    fn test_parse_confidence_invalid() {
        assert!(parse_confidence("1.5").is_err());
        assert!(parse_confidence("-0.1").is_err());
        assert!(parse_confidence("abc").is_err());
    }

    #[test]
    fn test_cli_parse_simple() {
        let cli = Cli::try_parse_from(["birdsnap", "heron.jpg"]).unwrap();
        assert_eq!(cli.inputs.len(), 1);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_with_options() {
        let cli = Cli::try_parse_from([
            "birdsnap", "heron.jpg", "-m", "birds15", "-c", "0.25", "-f", "json", "-q",
        ])
        .unwrap();
        assert_eq!(cli.classify.model, Some("birds15".to_string()));
        assert_eq!(cli.classify.min_confidence, Some(0.25));
        assert_eq!(cli.classify.format, Some(OutputFormat::Json));
        assert!(cli.classify.quiet);
    }

    #[test]
    fn test_cli_parse_device() {
        let cli = Cli::try_parse_from(["birdsnap", "a.png", "--device", "cuda"]).unwrap();
        assert_eq!(cli.classify.device, Some(InferenceDevice::Cuda));
        assert!(Cli::try_parse_from(["birdsnap", "a.png", "--device", "tpu"]).is_err());
    }

    #[test]
    fn test_cli_model_path_requires_labels() {
        let cli = Cli::try_parse_from(["birdsnap", "a.png", "--model-path", "best.onnx"]);
        assert!(cli.is_err());

        let cli = Cli::try_parse_from([
            "birdsnap",
            "a.png",
            "--model-path",
            "best.onnx",
            "--labels-path",
            "labels.json",
        ]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_parse_subcommands() {
        assert!(Cli::try_parse_from(["birdsnap", "config", "show"]).is_ok());
        assert!(Cli::try_parse_from(["birdsnap", "models", "info", "birds15"]).is_ok());
        assert!(Cli::try_parse_from(["birdsnap", "welcome", "reset"]).is_ok());
    }
}
