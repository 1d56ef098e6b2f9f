//! Nesting predicates used by the winding normalizer.

use std::fmt::Debug;

use lyon::algorithms::hit_test::hit_test_path;
use lyon::math::point;
use lyon::path::{FillRule as LyonFillRule, Path};

use crate::model::{Edge, Subpath};
use crate::winding::SubpathMeta;

/// Decides whether one subpath lies inside another.
pub trait Containment: Send + Sync + Debug {
    fn contains(&self, outer: &SubpathMeta<'_>, inner: &SubpathMeta<'_>) -> bool;
}

/// Strict axis-aligned box containment on all four sides.
///
/// Subpaths without a box neither contain nor are contained.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundingBoxContainment;

impl Containment for BoundingBoxContainment {
    fn contains(&self, outer: &SubpathMeta<'_>, inner: &SubpathMeta<'_>) -> bool {
        match (&outer.bbox, &inner.bbox) {
            (Some(outer_box), Some(inner_box)) => outer_box.strictly_contains(inner_box),
            _ => false,
        }
    }
}

/// Box containment refined by hit-testing every inner vertex against the
/// outer outline, curves included.
#[derive(Debug, Clone, Copy)]
pub struct PolygonContainment {
    pub tolerance: f32,
}

impl Default for PolygonContainment {
    fn default() -> Self {
        Self { tolerance: 0.01 }
    }
}

impl Containment for PolygonContainment {
    fn contains(&self, outer: &SubpathMeta<'_>, inner: &SubpathMeta<'_>) -> bool {
        if !BoundingBoxContainment.contains(outer, inner) {
            return false;
        }
        let outline = to_lyon_path(outer.subpath);
        inner.subpath.vertices().iter().all(|v| {
            hit_test_path(
                &point(v.x as f32, v.y as f32),
                outline.iter(),
                LyonFillRule::NonZero,
                self.tolerance,
            )
        })
    }
}

/// Builds a closed lyon path tracing `subpath`.
fn to_lyon_path(subpath: &Subpath) -> Path {
    let mut builder = Path::builder();
    let start = subpath.start();
    builder.begin(point(start.x as f32, start.y as f32));
    for edge in subpath.edges() {
        match *edge {
            Edge::Line { to, .. } => {
                builder.line_to(point(to.x as f32, to.y as f32));
            }
            Edge::Quad { ctrl, to, .. } => {
                builder.quadratic_bezier_to(
                    point(ctrl.x as f32, ctrl.y as f32),
                    point(to.x as f32, to.y as f32),
                );
            }
            Edge::Cubic {
                ctrl1, ctrl2, to, ..
            } => {
                builder.cubic_bezier_to(
                    point(ctrl1.x as f32, ctrl1.y as f32),
                    point(ctrl2.x as f32, ctrl2.y as f32),
                    point(to.x as f32, to.y as f32),
                );
            }
        }
    }
    // Hit testing treats the outline as filled, so it is always closed here.
    builder.close();
    builder.build()
}
