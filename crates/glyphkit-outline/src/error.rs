//! Error types for the outline engine.
//!
//! Every error here is local to a single path. Callers recover by passing the
//! original path data through unchanged, so none of these abort an icon.

use thiserror::Error;

/// Errors raised while turning path data into subpaths.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OutlineError {
    /// A command survived the geometry primitive that the decomposer cannot
    /// turn into edges (smooth curves or arcs that were not expanded).
    #[error("Unsupported path command '{command}'")]
    UnsupportedCommand {
        /// The SVG command letter.
        command: char,
    },

    /// The path data could not be tokenized or absolutized.
    #[error("Invalid path data: {reason}")]
    InvalidPathData {
        /// What was wrong with the input.
        reason: String,
    },

    /// The engine was built without a path-geometry primitive.
    #[error("No path geometry primitive available")]
    MissingGeometry,
}

impl OutlineError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidPathData {
            reason: reason.into(),
        }
    }
}

/// Result type alias for outline operations.
pub type OutlineResult<T> = Result<T, OutlineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_error_display() {
        let err = OutlineError::UnsupportedCommand { command: 'A' };
        assert_eq!(err.to_string(), "Unsupported path command 'A'");

        let err = OutlineError::invalid("dangling number '3'");
        assert_eq!(err.to_string(), "Invalid path data: dangling number '3'");

        assert_eq!(
            OutlineError::MissingGeometry.to_string(),
            "No path geometry primitive available"
        );
    }
}
