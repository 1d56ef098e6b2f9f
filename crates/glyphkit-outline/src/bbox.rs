//! Axis-aligned extent of a subpath's on-curve vertices.

use serde::{Deserialize, Serialize};

use crate::model::{Point, Subpath};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub area: f64,
}

impl BoundingBox {
    /// `None` when there are no points.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in rest {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self {
            min_x,
            min_y,
            max_x,
            max_y,
            area: (max_x - min_x).max(0.0) * (max_y - min_y).max(0.0),
        })
    }

    pub fn of_subpath(subpath: &Subpath) -> Option<Self> {
        Self::from_points(&subpath.vertices())
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// True when `other` lies strictly inside `self` on all four sides.
    pub fn strictly_contains(&self, other: &BoundingBox) -> bool {
        other.min_x > self.min_x
            && other.max_x < self.max_x
            && other.min_y > self.min_y
            && other.max_y < self.max_y
    }
}
