//! Platform-specific configuration paths.

use crate::constants::{APP_NAME, CONFIG_FILE_NAME, PREFS_FILE_NAME};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Get the configuration directory for the current platform.
///
/// - Linux: `~/.config/birdsnap/`
/// - macOS: `~/Library/Application Support/birdsnap/`
/// - Windows: `%APPDATA%\birdsnap\`
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Get the full path to the preferences file.
pub fn prefs_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(PREFS_FILE_NAME))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_returns_path() {
        let path = config_dir().unwrap();
        assert!(path.to_string_lossy().contains("birdsnap"));
    }

    #[test]
    fn test_config_file_path_ends_with_toml() {
        let path = config_file_path().unwrap();
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn test_prefs_file_path_is_beside_config() {
        let prefs = prefs_file_path().unwrap();
        let config = config_file_path().unwrap();
        assert_eq!(prefs.parent(), config.parent());
    }
}
