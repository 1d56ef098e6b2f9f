//! # GlyphKit Outline
//!
//! Path normalization engine for turning icon artwork into font-ready
//! outlines. Every contour of an icon must wind so that a rasterizer using
//! the non-zero fill rule draws the intended solids and holes.
//!
//! ## Core Components
//!
//! - **Path data**: parsing, absolutizing, smooth-curve and arc expansion
//! - **Decomposer**: absolute commands into subpaths of typed edges
//! - **Orientation**: shoelace signed area and winding sign
//! - **Bounding boxes**: on-curve extent and strict containment
//! - **Reverser**: the same outline traced the other way
//! - **Winding normalizer**: even-odd compound paths made non-zero safe
//! - **Mask flattener**: mask fragments resolved into filled paths
//!
//! ## Architecture
//!
//! ```text
//! MaskFlattener
//!   └── OutlineEngine (path data in, path data out)
//!         ├── PathGeometry (parse, unshort, unarc)
//!         ├── decompose
//!         ├── orientation / bbox / reverse
//!         ├── WindingNormalizer ── Containment
//!         └── fallback (raw coordinate pairs)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use glyphkit_outline::{OutlineEngine, WindingSign};
//!
//! let engine = OutlineEngine::new();
//! assert_eq!(engine.orientation("M0 0L10 0L10 10L0 10Z"), WindingSign::Positive);
//!
//! let d = engine.normalize_even_odd("M0 0L10 0L10 10L0 10Z M2 2L8 2L8 8L2 8Z");
//! assert_eq!(d, "M0 0L10 0L10 10L0 10L0 0Z M2 2L2 8L8 8L8 2L2 2Z");
//! ```

pub mod bbox;
pub mod containment;
pub mod decompose;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod mask;
pub mod model;
pub mod orientation;
pub mod path_data;
pub mod reverse;
pub mod winding;

pub use bbox::BoundingBox;
pub use containment::{BoundingBoxContainment, Containment, PolygonContainment};
pub use decompose::decompose;
pub use engine::OutlineEngine;
pub use error::{OutlineError, OutlineResult};
pub use mask::{
    is_white, select_fill, FillContext, FillSource, FlattenedPath, FragmentShape, MaskFlattener,
    MaskFragment, MULTI_FRAGMENT_FILL_CHAIN, NO_COLORED_FILL_CHAIN, SINGLE_FRAGMENT_FILL_CHAIN,
};
pub use model::{CompoundPath, Edge, FillRule, Point, Subpath, WindingSign};
pub use orientation::{signed_area, winding_sign};
pub use path_data::{parse_path_data, unarc, unshort, PathCommand, PathGeometry, SvgPathGeometry};
pub use reverse::reverse_subpath;
pub use winding::{reference_sign, required_sign, SubpathMeta, WindingNormalizer};
