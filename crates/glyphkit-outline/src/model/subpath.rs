use std::fmt;

use super::{Edge, FillRule, Point};

/// One continuous trace: contiguous edges from a start point.
///
/// Invariant: `edges[i].end() == edges[i + 1].start()` and the first edge
/// starts at `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct Subpath {
    start: Point,
    edges: Vec<Edge>,
    closed: bool,
}

impl Subpath {
    /// An open subpath with no edges yet.
    pub fn new(start: Point) -> Self {
        Self {
            start,
            edges: Vec::new(),
            closed: false,
        }
    }

    /// Builds a subpath from already-contiguous edges.
    pub fn from_parts(start: Point, edges: Vec<Edge>, closed: bool) -> Self {
        let subpath = Self {
            start,
            edges,
            closed,
        };
        debug_assert!(subpath.is_contiguous(), "edges must be contiguous");
        subpath
    }

    /// A polyline through `points`; a closed polyline gets a closing line
    /// unless its last point is already the first.
    pub fn from_points(points: &[Point], closed: bool) -> Option<Self> {
        let (&first, rest) = points.split_first()?;
        let mut subpath = Self::new(first);
        for &to in rest {
            subpath.line_to(to);
        }
        if closed {
            subpath.close();
        }
        Some(subpath)
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Where the next edge would start.
    pub fn current_point(&self) -> Point {
        self.edges.last().map(Edge::end).unwrap_or(self.start)
    }

    pub fn push(&mut self, edge: Edge) {
        debug_assert_eq!(edge.start(), self.current_point());
        self.edges.push(edge);
    }

    pub fn line_to(&mut self, to: Point) {
        let from = self.current_point();
        self.push(Edge::Line { from, to });
    }

    /// Marks the subpath closed, adding a line back to the start when the
    /// trace has not already returned there.
    pub fn close(&mut self) {
        if self.current_point() != self.start {
            self.line_to(self.start);
        }
        self.closed = true;
    }

    /// On-curve vertices in traversal order: the start, then each edge's end.
    /// Control points never appear.
    pub fn vertices(&self) -> Vec<Point> {
        std::iter::once(self.start)
            .chain(self.edges.iter().map(Edge::end))
            .collect()
    }

    fn is_contiguous(&self) -> bool {
        let mut current = self.start;
        for edge in &self.edges {
            if edge.start() != current {
                return false;
            }
            current = edge.end();
        }
        true
    }

    /// Compact absolute path data, e.g. `M0 0L10 0L10 10Z`.
    pub fn to_path_data(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Subpath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{}", self.start)?;
        for edge in &self.edges {
            edge.write_command(f)?;
        }
        if self.closed {
            f.write_str("Z")?;
        }
        Ok(())
    }
}

/// One logical shape made of several subpaths.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundPath {
    pub subpaths: Vec<Subpath>,
    pub fill: Option<String>,
    pub fill_rule: Option<FillRule>,
}

impl CompoundPath {
    pub fn new(subpaths: Vec<Subpath>) -> Self {
        Self {
            subpaths,
            fill: None,
            fill_rule: None,
        }
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = Some(fill_rule);
        self
    }

    /// Subpaths serialized in order, separated by a space.
    pub fn to_path_data(&self) -> String {
        self.subpaths
            .iter()
            .map(Subpath::to_path_data)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
