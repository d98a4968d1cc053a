//! Application configuration.
//!
//! These are editor defaults (colour, font, where exports land), not
//! per-poster state. Poster layouts are never written to disk.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Shared text styling applied to a fresh poster.
    pub style: StyleDefaults,

    /// Font discovery settings.
    pub fonts: FontConfig,

    /// Export destination.
    pub export: ExportDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Text styling a new poster starts with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleDefaults {
    /// Text colour as a hex string (for example `#eece69`).
    pub text_color: String,

    /// Font family name.
    pub font_family: String,
}

/// Font discovery settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Extra directories scanned for font files in addition to system fonts.
    pub extra_dirs: Vec<PathBuf>,
}

/// Export destination settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportDefaults {
    /// Directory downloaded posters are written to.
    pub directory: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "rateposter=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            text_color: "#eece69".to_string(),
            font_family: "Kantumruy Pro".to_string(),
        }
    }
}

impl Default for ExportDefaults {
    fn default() -> Self {
        Self {
            directory: default_download_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load_from(config_path: &Path) -> Self {
        if config_path.exists() {
            match std::fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, config_path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"));
    base.join("rateposter").join("config.json")
}

/// Default download directory for exported posters.
fn default_download_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("XDG_DOWNLOAD_DIR") {
        return PathBuf::from(dir);
    }
    let downloads = home_dir().join("Downloads");
    if downloads.is_dir() {
        downloads
    } else {
        PathBuf::from(".")
    }
}

fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string()))
}
