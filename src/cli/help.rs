//! Help message display for CLI.

#![allow(clippy::print_stdout)]

use crate::config::Config;

/// Which help text to show when run without inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpKind {
    /// Full setup guide.
    FirstTime,
    /// Short usage reminder.
    Configured,
}

/// Pick the help text for the current configuration and welcome flag.
///
/// The setup guide is shown until the user has seen it once and has at
/// least one model configured.
pub fn select_help(config: &Config, has_seen_welcome: bool) -> HelpKind {
    if config.models.is_empty() || !has_seen_welcome {
        HelpKind::FirstTime
    } else {
        HelpKind::Configured
    }
}

/// Detailed setup guide for first-time users.
pub fn first_time_help() -> String {
    [
        "Welcome to birdsnap! Identify bird species in your photos.",
        "",
        "1. Initialize configuration:",
        "   birdsnap config init",
        "",
        "2. Get an ONNX detector model and its labels file.",
        "   A sample 15-species label table ships in assets/labels/birds-15.json.",
        "",
        "3. Add your model to configuration:",
        "   birdsnap models add birds15 --path ./best.onnx --labels ./birds-15.json --default",
        "",
        "4. Classify photos:",
        "   birdsnap heron.jpg",
        "   birdsnap ./trip-photos -f csv -o results.csv",
        "",
        "Run 'birdsnap -h' for all options.",
    ]
    .join("\n")
}

/// Brief usage reminder for configured users.
pub fn configured_help() -> String {
    [
        "Usage: birdsnap [FILES]... [OPTIONS]",
        "",
        "Example: birdsnap heron.jpg -m birds15 -c 0.25",
        "",
        "Run 'birdsnap -h' for all options or 'birdsnap models list' to see configured models.",
    ]
    .join("\n")
}

/// Print the help text chosen by [`select_help`].
pub fn print_help(kind: HelpKind) {
    match kind {
        HelpKind::FirstTime => println!("{}", first_time_help()),
        HelpKind::Configured => println!("{}", configured_help()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use std::path::PathBuf;

    fn configured() -> Config {
        let mut config = Config::default();
        config.models.insert(
            "birds15".to_string(),
            ModelConfig {
                path: PathBuf::from("/tmp/best.onnx"),
                labels: PathBuf::from("/tmp/labels.json"),
            },
        );
        config
    }

    #[test]
    fn test_first_time_without_models() {
        assert_eq!(select_help(&Config::default(), true), HelpKind::FirstTime);
    }

    #[test]
    fn test_first_time_until_welcome_seen() {
        assert_eq!(select_help(&configured(), false), HelpKind::FirstTime);
        assert_eq!(select_help(&configured(), true), HelpKind::Configured);
    }

    #[test]
    fn test_help_texts_mention_commands() {
        assert!(first_time_help().contains("birdsnap config init"));
        assert!(first_time_help().contains("models add"));
        assert!(configured_help().contains("models list"));
    }
}
