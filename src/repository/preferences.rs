//! Persisted theme preference.
//!
//! A single `{"theme": "dark"}` file in the plugin data directory, read once at
//! startup and rewritten on every toggle.

use crate::domain::error::{Result, TierdexError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Parses a configuration value; anything but `dark` is light.
    #[must_use]
    pub fn from_config(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("dark") {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferenceFile {
    #[serde(default)]
    theme: ThemeMode,
}

pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Stored theme, or light when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<ThemeMode> {
        if !self.path.exists() {
            tracing::debug!(path = ?self.path, "no stored preference, using default");
            return Ok(ThemeMode::default());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let file: PreferenceFile = serde_json::from_str(&contents)
            .map_err(|e| TierdexError::Storage(format!("failed to parse preferences: {e}")))?;
        tracing::debug!(theme = ?file.theme, "preference loaded");
        Ok(file.theme)
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, theme: ThemeMode) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&PreferenceFile { theme })?;
        let tmp_path = self.path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(theme = ?theme, "preference saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_light() {
        let dir = TempDir::new().unwrap();
        let store = PreferenceStore::new(dir.path().join("preferences.json"));
        assert_eq!(store.load().unwrap(), ThemeMode::Light);
    }

    #[test]
    fn saved_theme_is_loaded_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("preferences.json");
        let store = PreferenceStore::new(path.clone());

        store.save(ThemeMode::Dark).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("\"dark\""));
        assert_eq!(store.load().unwrap(), ThemeMode::Dark);
    }

    #[test]
    fn config_values() {
        assert_eq!(ThemeMode::from_config("Dark"), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_config("solarized"), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
    }
}
