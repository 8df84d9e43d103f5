//! Birdsnap - bird species identification from photos.
//!
//! This crate resizes and normalizes an image, runs an ONNX detector model on
//! it and maps the most confident detection to a species name.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod inference;
pub mod output;
pub mod pipeline;
pub mod prefs;

use clap::Parser;
use cli::{ClassifyArgs, Cli, Command};
use config::{
    Config, ModelConfig, config_file_path, load_default_config, save_default_config,
};
use inference::{ClassNameTable, SpeciesClassifier};
use output::RunInfo;
use pipeline::{classify_batch, collect_input_files};
use prefs::Preferences;
use std::path::PathBuf;
use tracing::{debug, info};

pub use error::{Error, Result};

/// Main entry point for birdsnap CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.classify.verbose, cli.classify.quiet);

    let config = load_default_config()?;

    if let Some(command) = cli.command {
        return handle_command(command, &config);
    }

    if cli.inputs.is_empty() {
        show_help(&config)?;
        return Ok(());
    }

    classify_files(&cli.inputs, &cli.classify, &config)
}

/// Classify input images with the given options.
fn classify_files(inputs: &[PathBuf], args: &ClassifyArgs, config: &Config) -> Result<()> {
    config::validate_config(config)?;

    let files = collect_input_files(inputs)?;
    if files.is_empty() {
        return Err(Error::NoValidImageFiles);
    }

    info!("Found {} image file(s) to classify", files.len());

    let (model_name, model_config) = resolve_model(args, config)?;

    let min_confidence = args
        .min_confidence
        .unwrap_or(config.defaults.min_confidence);
    let format = args.format.unwrap_or(config.defaults.format);

    let mut inference_config = config.inference.clone();
    if let Some(device) = args.device {
        inference_config.device = device;
    }

    info!("Loading model: {}", model_name);
    let mut classifier =
        SpeciesClassifier::from_config(&model_config, &inference_config, min_confidence)?;

    let run_info = RunInfo {
        model: model_name,
        labels_version: classifier.labels().version().to_string(),
        min_confidence: classifier.min_confidence(),
    };
    let mut writer = output::create_writer(format, args.output.as_deref(), run_info)?;

    classify_batch(
        &files,
        &mut classifier,
        writer.as_mut(),
        args.fail_fast,
        !args.quiet,
    )?;
    Ok(())
}

/// Resolve the model to use from explicit paths, `--model`, or the config default.
fn resolve_model(args: &ClassifyArgs, config: &Config) -> Result<(String, ModelConfig)> {
    if let (Some(path), Some(labels)) = (&args.model_path, &args.labels_path) {
        let name = path.file_stem().map_or_else(
            || "custom".to_string(),
            |s| s.to_string_lossy().into_owned(),
        );
        return Ok((
            name,
            ModelConfig {
                path: path.clone(),
                labels: labels.clone(),
            },
        ));
    }

    let model_name = args
        .model
        .clone()
        .or_else(|| config.defaults.model.clone())
        .ok_or_else(|| Error::ConfigValidation {
            message: "no model specified (use -m or set defaults.model in config)".to_string(),
        })?;

    let model_config = config::get_model(config, &model_name)?.clone();
    Ok((model_name, model_config))
}

/// Print the first-run guide once, then the short reminder.
fn show_help(config: &Config) -> Result<()> {
    let mut prefs = Preferences::load_default()?;
    let kind = cli::help::select_help(config, prefs.has_seen_welcome());
    cli::help::print_help(kind);

    if !prefs.has_seen_welcome() && !config.models.is_empty() {
        prefs.set_has_seen_welcome(true)?;
    }
    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // ORT logging is noisy at info level and suppressed unless -vv.
    let filter_str = if quiet {
        "warn,ort=off"
    } else {
        match verbose {
            0 => "info,ort=off",
            1 => "debug,ort=warn",
            2 => "trace,ort=info",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // Results go to stdout, so logs go to stderr.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[allow(clippy::print_stdout)]
fn handle_command(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action),
        Command::Models { action } => handle_models_command(action, config),
        Command::Welcome { action } => match action {
            cli::WelcomeAction::Reset => {
                let mut prefs = Preferences::load_default()?;
                prefs.reset_welcome()?;
                debug!("Cleared welcome flag in {}", prefs.path().display());
                println!("First-run guide will be shown on the next run.");
                Ok(())
            }
        },
    }
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: cli::ConfigAction) -> Result<()> {
    use cli::ConfigAction;

    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
                println!("Use 'birdsnap models add' to add models.");
            } else {
                let saved_path = save_default_config(&Config::default())?;
                println!("Created configuration file: {}", saved_path.display());
                println!("\nNext steps:");
                println!(
                    "  birdsnap models add <name> --path <model.onnx> --labels <labels.json> --default"
                );
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            let contents = toml::to_string_pretty(&config)
                .map_err(|e| Error::ConfigSerialize { source: e })?;
            println!("{contents}");
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", config_file_path()?.display());
            Ok(())
        }
    }
}

#[allow(clippy::print_stdout)]
fn handle_models_command(action: cli::ModelsAction, config: &Config) -> Result<()> {
    use cli::ModelsAction;

    match action {
        ModelsAction::List => {
            if config.models.is_empty() {
                println!("No models configured.");
            } else {
                println!("Configured models:");
                for (name, model) in &config.models {
                    let default_marker = config.defaults.model.as_ref().is_some_and(|d| d == name);
                    println!(
                        "  {} ({}){}",
                        name,
                        model.path.display(),
                        if default_marker { " [default]" } else { "" }
                    );
                }
            }
            Ok(())
        }
        ModelsAction::Add {
            name,
            path,
            labels,
            default,
        } => handle_models_add(name, path, labels, default),
        ModelsAction::Check => {
            if config.models.is_empty() {
                println!("No models configured.");
            }
            for (name, model) in &config.models {
                config::validate_model_config(model)?;
                let table = ClassNameTable::from_path(&model.labels)?;
                println!("  {name}: OK ({} species)", table.len());
            }
            Ok(())
        }
        ModelsAction::Info { name } => {
            let model = config::get_model(config, &name)?;
            let table = ClassNameTable::from_path(&model.labels)?;
            println!("Model: {name}");
            println!("  Path: {}", model.path.display());
            println!("  Labels: {}", model.labels.display());
            println!("  Labels version: {}", table.version());
            println!("  Species ({}):", table.len());
            for (idx, species) in table.names().iter().enumerate() {
                println!("    {idx:>3}  {species}");
            }
            Ok(())
        }
    }
}

/// Handle the `models add` command.
#[allow(clippy::print_stdout)]
fn handle_models_add(
    name: String,
    path: PathBuf,
    labels: PathBuf,
    set_default: bool,
) -> Result<()> {
    let model = ModelConfig { path, labels };
    config::validate_model_config(&model)?;
    // Fail early on unreadable or empty label tables.
    let table = ClassNameTable::from_path(&model.labels)?;

    let mut config = load_default_config()?;
    if config.models.contains_key(&name) {
        return Err(Error::ModelAlreadyExists { name });
    }

    let summary = format!(
        "  Model: {}\n  Labels: {} ({} species, version {})",
        model.path.display(),
        model.labels.display(),
        table.len(),
        table.version()
    );

    config.models.insert(name.clone(), model);
    if set_default {
        config.defaults.model = Some(name.clone());
    }
    config::validate_config(&config)?;

    println!("Added model '{name}'");
    println!("{summary}");
    println!("  Default: {}", if set_default { "yes" } else { "no" });

    let config_path = save_default_config(&config)?;
    println!("\nConfiguration saved to: {}", config_path.display());
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> ClassifyArgs {
        let mut argv = vec!["birdsnap", "photo.jpg"];
        argv.extend_from_slice(extra);
        Cli::try_parse_from(argv).unwrap().classify
    }

    fn config_with_model() -> Config {
        let mut config = Config::default();
        config.models.insert(
            "birds15".to_string(),
            ModelConfig {
                path: PathBuf::from("/models/best.onnx"),
                labels: PathBuf::from("/models/birds-15.json"),
            },
        );
        config.defaults.model = Some("birds15".to_string());
        config
    }

    #[test]
    fn test_resolve_model_from_default() {
        let (name, model) = resolve_model(&args(&[]), &config_with_model()).unwrap();
        assert_eq!(name, "birds15");
        assert_eq!(model.path, PathBuf::from("/models/best.onnx"));
    }

    #[test]
    fn test_resolve_model_explicit_paths_win() {
        let args = args(&["--model-path", "/tmp/yolo.onnx", "--labels-path", "/tmp/l.txt"]);
        let (name, model) = resolve_model(&args, &config_with_model()).unwrap();
        assert_eq!(name, "yolo");
        assert_eq!(model.labels, PathBuf::from("/tmp/l.txt"));
    }

    #[test]
    fn test_resolve_model_unknown_name() {
        let result = resolve_model(&args(&["-m", "gulls"]), &config_with_model());
        assert!(matches!(result, Err(Error::ModelNotFound { .. })));
    }

    #[test]
    fn test_resolve_model_none_configured() {
        let result = resolve_model(&args(&[]), &Config::default());
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }

    #[test]
    fn test_classify_rejects_invalid_config_first() {
        let mut config = config_with_model();
        config.defaults.min_confidence = 3.0;

        let result = classify_files(&[PathBuf::from("/nonexistent/photo.jpg")], &args(&[]), &config);
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }
}
