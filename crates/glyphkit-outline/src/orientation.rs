//! Winding direction from the shoelace signed area.

use crate::model::{Point, Subpath, WindingSign};

/// Signed area of the polygon through `points`, wrapping last to first.
///
/// Fewer than three points has no area and yields `0.0`.
pub fn signed_area_of_points(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for (i, p1) in points.iter().enumerate() {
        let p2 = points[(i + 1) % points.len()];
        area += p1.x * p2.y - p2.x * p1.y;
    }
    area / 2.0
}

/// Signed area over the subpath's on-curve vertices.
pub fn signed_area(subpath: &Subpath) -> f64 {
    signed_area_of_points(&subpath.vertices())
}

pub fn sign_of_points(points: &[Point]) -> WindingSign {
    WindingSign::from_area(signed_area_of_points(points))
}

/// Winding sign of one subpath. Control points never participate.
pub fn winding_sign(subpath: &Subpath) -> WindingSign {
    WindingSign::from_area(signed_area(subpath))
}
