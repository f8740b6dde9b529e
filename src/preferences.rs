//! Preferences - theme and mock settings persisted as YAML under ~/.quicksave

use crate::constants::{CONFIG_DIR_NAME, PREFERENCES_FILE};
use crate::models::Theme;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User preferences persisted across sessions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: Theme,
    /// When false the mock collaborators answer immediately
    pub simulate_latency: bool,
    /// Cap on saved media, in megabytes
    pub storage_quota_mb: Option<u64>,
    /// Seed for repeatable mock discovery
    pub seed: Option<u64>,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            theme: Theme::System,
            simulate_latency: true,
            storage_quota_mb: None,
            seed: None,
        }
    }
}

impl Preferences {
    pub fn storage_quota_bytes(&self) -> Option<u64> {
        self.storage_quota_mb.map(|mb| mb.saturating_mul(1024 * 1024))
    }
}

/// Loads and saves preferences in the config directory
pub struct PreferenceStore {
    pub preferences: Preferences,
    config_dir: PathBuf,
}

impl PreferenceStore {
    pub fn new() -> Self {
        let config_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME);
        Self::in_dir(config_dir)
    }

    /// Store rooted at `config_dir`, loading whatever is already there
    pub fn in_dir(config_dir: impl Into<PathBuf>) -> Self {
        let mut store = PreferenceStore {
            preferences: Preferences::default(),
            config_dir: config_dir.into(),
        };

        // Missing or unreadable files fall back to defaults
        if let Err(e) = store.load() {
            tracing::warn!(error = %e, "Could not load preferences, using defaults");
        }
        store
    }

    pub fn path(&self) -> PathBuf {
        self.config_dir.join(PREFERENCES_FILE)
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Ensure config directory exists
    fn ensure_dir(&self) -> Result<()> {
        if !self.config_dir.exists() {
            fs::create_dir_all(&self.config_dir)?;
        }
        Ok(())
    }

    /// Load preferences from disk, keeping defaults if the file is absent
    pub fn load(&mut self) -> Result<()> {
        let path = self.path();
        if !path.exists() {
            return Ok(());
        }

        let content = fs::read_to_string(&path)?;
        self.preferences = serde_yaml::from_str(&content)?;
        Ok(())
    }

    /// Write current preferences to disk
    pub fn save(&self) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_yaml::to_string(&self.preferences)?;
        fs::write(self.path(), content)?;
        tracing::info!(path = %self.path().display(), "Saved preferences");
        Ok(())
    }

    /// Position of the current theme in `Theme::ALL`
    pub fn theme_index(&self) -> usize {
        Theme::ALL
            .iter()
            .position(|t| *t == self.preferences.theme)
            .unwrap_or(0)
    }

    /// Change the theme and persist it
    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.preferences.theme = theme;
        self.save()
    }
}

impl Default for PreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let store = PreferenceStore::in_dir(dir.path().join("nested"));
        assert_eq!(store.preferences, Preferences::default());
    }

    #[test]
    fn test_theme_persists_across_sessions() {
        let dir = tempdir().unwrap();
        let mut store = PreferenceStore::in_dir(dir.path());
        store.set_theme(Theme::Dark).unwrap();

        let reopened = PreferenceStore::in_dir(dir.path());
        assert_eq!(reopened.preferences.theme, Theme::Dark);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(PREFERENCES_FILE), "storage_quota_mb: 2\n").unwrap();

        let store = PreferenceStore::in_dir(dir.path());
        assert_eq!(store.preferences.theme, Theme::System);
        assert!(store.preferences.simulate_latency);
        assert_eq!(store.preferences.storage_quota_bytes(), Some(2 * 1024 * 1024));
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(PREFERENCES_FILE), "theme: [not, a, theme]").unwrap();

        let store = PreferenceStore::in_dir(dir.path());
        assert_eq!(store.preferences, Preferences::default());
    }
}
