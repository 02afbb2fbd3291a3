use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// User preferences read at startup. Filter choices are never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// File opened automatically when the window starts.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    /// Currency code shown next to sales figures.
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default = "default_window_height")]
    pub window_height: f32,
}

fn default_currency() -> String {
    "AED".to_string()
}

fn default_window_width() -> f32 {
    1200.0
}

fn default_window_height() -> f32 {
    800.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: None,
            currency: default_currency(),
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("sales-lens")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// Load settings from `path`, falling back to defaults when the file is
/// missing. A malformed file is an error so typos are not silently ignored.
pub fn load_from(path: &std::path::Path) -> Result<Settings, SettingsError> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    match load_from(&path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Ignoring {}: {e}", path.display());
            Settings::default()
        }
    }
}
