use std::fmt::{self, Write};

use super::Point;

/// One drawing primitive between two on-curve points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edge {
    Line {
        from: Point,
        to: Point,
    },
    Quad {
        from: Point,
        ctrl: Point,
        to: Point,
    },
    Cubic {
        from: Point,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
}

impl Edge {
    /// The on-curve point this edge leaves from.
    pub fn start(&self) -> Point {
        match *self {
            Edge::Line { from, .. } | Edge::Quad { from, .. } | Edge::Cubic { from, .. } => from,
        }
    }

    /// The on-curve point this edge arrives at.
    pub fn end(&self) -> Point {
        match *self {
            Edge::Line { to, .. } | Edge::Quad { to, .. } | Edge::Cubic { to, .. } => to,
        }
    }

    /// Same curve, traversed from its former end. Cubic controls swap order.
    pub fn reversed(&self) -> Edge {
        match *self {
            Edge::Line { from, to } => Edge::Line { from: to, to: from },
            Edge::Quad { from, ctrl, to } => Edge::Quad {
                from: to,
                ctrl,
                to: from,
            },
            Edge::Cubic {
                from,
                ctrl1,
                ctrl2,
                to,
            } => Edge::Cubic {
                from: to,
                ctrl1: ctrl2,
                ctrl2: ctrl1,
                to: from,
            },
        }
    }

    /// Writes the drawing command for this edge. The start point is implied
    /// by the running current point.
    pub(crate) fn write_command(&self, out: &mut impl Write) -> fmt::Result {
        match self {
            Edge::Line { to, .. } => write!(out, "L{}", to),
            Edge::Quad { ctrl, to, .. } => write!(out, "Q{} {}", ctrl, to),
            Edge::Cubic {
                ctrl1, ctrl2, to, ..
            } => write!(out, "C{} {} {}", ctrl1, ctrl2, to),
        }
    }
}
