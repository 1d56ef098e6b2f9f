//! # GlyphKit Sanitize
//!
//! Prepares SVG icons for font building: masked groups are flattened into
//! plain paths, background rects and `<defs>` are removed, and even-odd
//! compound paths are rewritten so they fill correctly under the non-zero
//! rule.
//!
//! ```rust
//! use glyphkit_sanitize::Sanitizer;
//!
//! let svg = r##"<svg xmlns="http://www.w3.org/2000/svg"><rect width="24" height="24" fill="none"/><path d="M1 1L5 1L5 5Z"/></svg>"##;
//! let out = Sanitizer::default().sanitize(svg).unwrap();
//! assert!(!out.contains("<rect"));
//! assert!(out.contains(r##"fill="#000""##));
//! ```

pub mod batch;
pub mod document;
pub mod error;
pub mod extract;
pub mod sanitize;

pub use batch::{list_icons, sanitize_directory, BatchReport, IconFailure};
pub use document::{XmlElement, XmlNode};
pub use error::{SanitizeError, SanitizeResult};
pub use extract::{collect_masks, mask_reference, MaskMap};
pub use sanitize::Sanitizer;
