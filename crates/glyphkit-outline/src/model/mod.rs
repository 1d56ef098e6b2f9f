use serde::{Deserialize, Serialize};
use std::fmt;

mod edge;
mod subpath;

pub use edge::Edge;
pub use subpath::{CompoundPath, Subpath};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Reflects `self` through `center`, as smooth curve commands do with
    /// the previous control point.
    pub fn reflect_about(&self, center: Point) -> Point {
        Point::new(2.0 * center.x - self.x, 2.0 * center.y - self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

/// Fill rule declared by source artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillRule {
    NonZero,
    EvenOdd,
}

impl FillRule {
    /// Parses a `fill-rule` or `clip-rule` attribute value.
    pub fn from_attribute(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("evenodd") {
            Some(Self::EvenOdd)
        } else if value.eq_ignore_ascii_case("nonzero") {
            Some(Self::NonZero)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NonZero => "nonzero",
            Self::EvenOdd => "evenodd",
        }
    }
}

impl fmt::Display for FillRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of travel around a subpath, from the sign of its shoelace area.
///
/// With SVG's y-down canvas a positive area is a clockwise traversal on
/// screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindingSign {
    Positive,
    Negative,
    Degenerate,
}

impl WindingSign {
    pub fn from_area(area: f64) -> Self {
        if area > 0.0 {
            Self::Positive
        } else if area < 0.0 {
            Self::Negative
        } else {
            Self::Degenerate
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
            Self::Degenerate => Self::Degenerate,
        }
    }

    pub fn is_degenerate(self) -> bool {
        self == Self::Degenerate
    }
}
