use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::compose::AuthMode;

/// Returns the resto config directory, creating it if needed.
/// Location: `~/.config/resto` (XDG-compliant)
pub fn config_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "resto").context("Could not determine config directory")?;
    let dir = dirs.config_dir();
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
    Ok(dir.to_path_buf())
}

/// Returns the resto data directory (log file), creating it if needed.
/// Location: `~/.local/share/resto`
pub fn data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "resto").context("Could not determine data directory")?;
    let dir = dirs.data_dir();
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
    Ok(dir.to_path_buf())
}

pub fn settings_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("settings.json"))
}

/// The request body file edited by the Body button.
pub fn body_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("request_body"))
}

pub fn log_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("resto.log"))
}

// ── Settings document ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestBodySettings {
    pub theme: String,
}

impl Default for RequestBodySettings {
    fn default() -> Self {
        Self {
            theme: "railscast".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub request_body: RequestBodySettings,
    pub enable_mouse: bool,
    pub show_update: bool,
    pub default_auth: AuthMode,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            request_body: RequestBodySettings::default(),
            enable_mouse: false,
            show_update: true,
            default_auth: AuthMode::None,
        }
    }
}

/// The settings file. Everything lives under `rs_settings`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rs_settings: Preferences,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings at {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid settings JSON in {}", path.display()))
    }

    /// Load the settings file, writing the defaults first if it is missing.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if !path.exists() {
            let settings = Self::default();
            settings.save(path)?;
            info!(path = %path.display(), "created default settings");
            return Ok(settings);
        }
        Self::load(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write settings at {}", path.display()))
    }

    pub fn theme(&self) -> &str {
        &self.rs_settings.request_body.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let settings = Settings::load_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.theme(), "railscast");
        assert!(settings.rs_settings.show_update);
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"rs_settings": {"enable_mouse": true, "default_auth": "bearer"}}"#,
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert!(settings.rs_settings.enable_mouse);
        assert!(settings.rs_settings.show_update);
        assert_eq!(settings.rs_settings.default_auth, AuthMode::BearerToken);
        assert_eq!(settings.theme(), "railscast");
    }

    #[test]
    fn test_save_round_trips_show_update() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut settings = Settings::default();
        settings.rs_settings.show_update = false;
        settings.save(&path).unwrap();

        assert!(!Settings::load(&path).unwrap().rs_settings.show_update);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(Settings::load(&path).is_err());
    }
}
