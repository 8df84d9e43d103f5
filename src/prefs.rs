//! Persisted user preferences.
//!
//! A small TOML file beside the configuration that remembers one-off state,
//! such as whether the first-run guide has been shown.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Stored preference values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
struct PrefsData {
    has_seen_welcome: bool,
}

/// Preference store bound to one file.
#[derive(Debug, Clone)]
pub struct Preferences {
    path: PathBuf,
    data: PrefsData,
}

impl Preferences {
    /// Load preferences from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = if path.exists() {
            let contents = std::fs::read_to_string(path).map_err(|e| Error::PrefsRead {
                path: path.to_path_buf(),
                source: e,
            })?;
            toml::from_str(&contents).map_err(|e| Error::PrefsParse {
                path: path.to_path_buf(),
                source: e,
            })?
        } else {
            PrefsData::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    /// Load preferences from the default platform-specific path.
    pub fn load_default() -> Result<Self> {
        Self::load(&crate::config::prefs_file_path()?)
    }

    /// Whether the first-run guide has been shown.
    pub fn has_seen_welcome(&self) -> bool {
        self.data.has_seen_welcome
    }

    /// Record whether the first-run guide has been shown and persist it.
    pub fn set_has_seen_welcome(&mut self, value: bool) -> Result<()> {
        self.data.has_seen_welcome = value;
        self.save()
    }

    /// Show the first-run guide again on the next run.
    pub fn reset_welcome(&mut self) -> Result<()> {
        self.set_has_seen_welcome(false)
    }

    /// Write preferences to disk.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }
        let contents = toml::to_string_pretty(&self.data).map_err(|e| self.write_error(e))?;
        std::fs::write(&self.path, contents).map_err(|e| self.write_error(e))?;
        debug!("Saved preferences: {}", self.path.display());
        Ok(())
    }

    /// File backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, e: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::PrefsWrite {
            path: self.path.clone(),
            source: Box::new(e),
        }
    }
}
