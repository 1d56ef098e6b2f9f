//! GlyphKit Settings Crate
//!
//! Handles sanitizer configuration, batch options and settings persistence.

pub mod config;
pub mod error;

pub use config::{BatchSettings, Config, ContainmentMode, SanitizeSettings};
pub use error::{SettingsError, SettingsResult};
