//! Configuration and settings management for GlyphKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Sanitize settings (default fill, canvas, nesting test)
//! - Batch settings (icon extension, failure handling)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{SettingsError, SettingsResult};

/// Nesting test used by the winding normalizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContainmentMode {
    /// Strict axis-aligned bounding-box containment
    #[default]
    BoundingBox,
    /// Bounding-box containment refined by an outline hit test
    Polygon,
}

impl std::fmt::Display for ContainmentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BoundingBox => write!(f, "bounding_box"),
            Self::Polygon => write!(f, "polygon"),
        }
    }
}

/// Per-icon sanitizer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizeSettings {
    /// Fill given to shapes that have none
    pub default_fill: String,
    /// Width and height of the icon canvas in user units
    pub canvas_size: f64,
    /// Slack allowed when matching a rect against the full canvas
    pub background_tolerance: f64,
    /// Rewrite even-odd compound paths for non-zero filling
    pub normalize_even_odd: bool,
    /// Nesting test for even-odd normalization
    pub containment: ContainmentMode,
}

impl Default for SanitizeSettings {
    fn default() -> Self {
        Self {
            default_fill: "#000".to_string(),
            canvas_size: 24.0,
            background_tolerance: 0.1,
            normalize_even_odd: true,
            containment: ContainmentMode::default(),
        }
    }
}

/// Directory batch settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Icon file extension, matched case-insensitively
    pub extension: String,
    /// Copy the original icon when sanitizing it fails
    pub copy_on_failure: bool,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            extension: "svg".to_string(),
            copy_on_failure: true,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Sanitizer settings
    pub sanitize: SanitizeSettings,
    /// Batch settings
    pub batch: BatchSettings,
}

fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config location, e.g. `~/.config/glyphkit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or(SettingsError::NoConfigDirectory)?;
        path.push("glyphkit");
        path.push("config.toml");
        Ok(path)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = match extension_of(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => {
                return Err(SettingsError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        config.validate()?;
        debug!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Load from `path` when it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension_of(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            _ => {
                return Err(SettingsError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let sanitize = &self.sanitize;
        if sanitize.default_fill.trim().is_empty() {
            return Err(SettingsError::invalid(
                "sanitize.default_fill",
                "must not be empty",
            ));
        }

        if !sanitize.canvas_size.is_finite() || sanitize.canvas_size <= 0.0 {
            return Err(SettingsError::invalid(
                "sanitize.canvas_size",
                "must be > 0",
            ));
        }

        if !sanitize.background_tolerance.is_finite() || sanitize.background_tolerance < 0.0 {
            return Err(SettingsError::invalid(
                "sanitize.background_tolerance",
                "must be >= 0",
            ));
        }

        let extension = self.batch.extension.trim_start_matches('.');
        if extension.is_empty() || extension.contains(['/', '\\']) {
            return Err(SettingsError::invalid(
                "batch.extension",
                "must be a plain file extension",
            ));
        }

        Ok(())
    }

    /// Extension without a leading dot
    pub fn icon_extension(&self) -> &str {
        self.batch.extension.trim_start_matches('.')
    }

    /// Merge another config into this one (keeps existing values where the
    /// other holds defaults)
    pub fn merge(&mut self, other: &Config) {
        if other.sanitize != SanitizeSettings::default() {
            self.sanitize = other.sanitize.clone();
        }
        if other.batch != BatchSettings::default() {
            self.batch = other.batch.clone();
        }
    }
}
