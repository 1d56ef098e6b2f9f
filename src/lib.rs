//! # GlyphKit
//!
//! Normalizes SVG icon artwork into outlines an icon-font builder can use
//! directly.
//!
//! ## Architecture
//!
//! GlyphKit is organized as a workspace with multiple crates:
//!
//! 1. **glyphkit-outline** - Path data, winding analysis, reversal, mask flattening
//! 2. **glyphkit-sanitize** - SVG document rewriting and directory batches
//! 3. **glyphkit-settings** - Configuration model and file I/O
//! 4. **glyphkit** - Command-line binary that ties the crates together

pub mod cli;

pub use glyphkit_outline::{
    BoundingBox, CompoundPath, FillRule, FlattenedPath, MaskFlattener, MaskFragment,
    OutlineEngine, OutlineError, OutlineResult, WindingNormalizer, WindingSign,
};
pub use glyphkit_sanitize::{
    sanitize_directory, BatchReport, IconFailure, SanitizeError, SanitizeResult, Sanitizer,
};
pub use glyphkit_settings::{
    BatchSettings, Config, ContainmentMode, SanitizeSettings, SettingsError, SettingsResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatted output on stderr, keeping stdout for reports
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
