//! # Outline Engine
//!
//! String-level facade over the geometry modules: path data goes in, path
//! data or a classification comes out.
//!
//! Every operation first asks the [`PathGeometry`] primitive for absolute
//! commands. When there is no primitive, or it rejects the data, measurement
//! degrades to the raw coordinate-pair analysis in [`crate::fallback`] and
//! rewriting operations hand the original data back untouched.

use tracing::{debug, warn};

use crate::bbox::BoundingBox;
use crate::containment::Containment;
use crate::decompose::decompose;
use crate::error::{OutlineError, OutlineResult};
use crate::fallback;
use crate::model::{Point, Subpath, WindingSign};
use crate::orientation::signed_area_of_points;
use crate::path_data::{PathGeometry, SvgPathGeometry};
use crate::reverse::reverse_subpath;
use crate::winding::WindingNormalizer;

#[derive(Debug)]
pub struct OutlineEngine {
    geometry: Option<Box<dyn PathGeometry>>,
    normalizer: WindingNormalizer,
}

impl Default for OutlineEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineEngine {
    /// Engine backed by [`SvgPathGeometry`] and box containment.
    pub fn new() -> Self {
        Self {
            geometry: Some(Box::new(SvgPathGeometry::default())),
            normalizer: WindingNormalizer::default(),
        }
    }

    /// Engine with no path-geometry primitive at all.
    pub fn degraded() -> Self {
        Self {
            geometry: None,
            normalizer: WindingNormalizer::default(),
        }
    }

    pub fn with_geometry(mut self, geometry: Box<dyn PathGeometry>) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_containment(mut self, containment: Box<dyn Containment>) -> Self {
        self.normalizer = WindingNormalizer::new(containment);
        self
    }

    pub fn is_degraded(&self) -> bool {
        self.geometry.is_none()
    }

    pub fn normalizer(&self) -> &WindingNormalizer {
        &self.normalizer
    }

    /// Decomposes `d` into subpaths through the primitive.
    pub fn subpaths(&self, d: &str) -> OutlineResult<Vec<Subpath>> {
        let geometry = self.geometry.as_ref().ok_or(OutlineError::MissingGeometry)?;
        decompose(&geometry.absolutize(d)?)
    }

    /// On-curve vertices of every subpath, concatenated in order.
    fn vertices(&self, d: &str) -> OutlineResult<Vec<Point>> {
        Ok(self
            .subpaths(d)?
            .iter()
            .flat_map(Subpath::vertices)
            .collect())
    }

    /// Shoelace area over all on-curve vertices of `d`.
    pub fn signed_area(&self, d: &str) -> f64 {
        match self.vertices(d) {
            Ok(points) => signed_area_of_points(&points),
            Err(err) => {
                debug!("Raw orientation for path data: {}", err);
                fallback::raw_signed_area(d)
            }
        }
    }

    pub fn orientation(&self, d: &str) -> WindingSign {
        WindingSign::from_area(self.signed_area(d))
    }

    pub fn bounding_box(&self, d: &str) -> Option<BoundingBox> {
        match self.vertices(d) {
            Ok(points) => BoundingBox::from_points(&points),
            Err(err) => {
                debug!("Raw bounding box for path data: {}", err);
                fallback::raw_bounding_box(d)
            }
        }
    }

    /// Number of subpaths; counts absolute moves when degraded.
    pub fn subpath_count(&self, d: &str) -> usize {
        match self.subpaths(d) {
            Ok(subpaths) => subpaths.len(),
            Err(_) => fallback::split_raw_subpaths(d).len(),
        }
    }

    /// Reverses every subpath of `d`. Subpaths without edges are dropped; if
    /// nothing remains, `d` comes back as given.
    pub fn reverse(&self, d: &str) -> OutlineResult<String> {
        let parts: Vec<String> = self
            .subpaths(d)?
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| reverse_subpath(s).to_path_data())
            .collect();
        if parts.is_empty() {
            Ok(d.to_string())
        } else {
            Ok(parts.join(" "))
        }
    }

    /// Like [`reverse`](Self::reverse), passing `d` through on failure.
    pub fn reverse_or_passthrough(&self, d: &str) -> String {
        self.reverse(d).unwrap_or_else(|err| {
            debug!("Path left unreversed: {}", err);
            d.to_string()
        })
    }

    /// Rewrites even-odd path data so that it fills the same under non-zero.
    ///
    /// Fewer than two subpaths, or data the primitive cannot handle, comes
    /// back unchanged.
    pub fn normalize_even_odd(&self, d: &str) -> String {
        match self.subpaths(d) {
            Ok(subpaths) if subpaths.len() < 2 => d.to_string(),
            Ok(subpaths) => self
                .normalizer
                .normalize_subpaths(&subpaths)
                .iter()
                .map(Subpath::to_path_data)
                .collect::<Vec<_>>()
                .join(" "),
            Err(err) => {
                let metas = fallback::raw_analysis(d);
                if metas.len() >= 2 {
                    warn!(
                        subpaths = metas.len(),
                        "Cannot normalize winding ({}), path data left as is", err
                    );
                }
                d.to_string()
            }
        }
    }
}
