//! Error types for the sanitize crate.

use std::io;
use std::path::PathBuf;

use glyphkit_settings::SettingsError;
use thiserror::Error;

/// Errors that can occur while sanitizing icons.
#[derive(Error, Debug)]
pub enum SanitizeError {
    /// The icon is not well-formed XML.
    #[error("Failed to parse SVG: {0}")]
    Parse(#[from] roxmltree::Error),

    /// The document root is not an `<svg>` element.
    #[error("Root element is <{0}>, expected <svg>")]
    NotSvg(String),

    /// No icons were found in the input directory.
    #[error("No .{extension} icons found in {}", dir.display())]
    NoIcons { dir: PathBuf, extension: String },

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid sanitizer settings.
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Result type alias for sanitize operations.
pub type SanitizeResult<T> = Result<T, SanitizeError>;
