//! Reverses the direction of travel of a subpath.

use crate::model::{Edge, Subpath};

/// Traces the same outline backwards.
///
/// The new start is the old last edge's end. Edges come out in reverse order
/// with their endpoints swapped, cubic controls swapped, and the closed flag
/// carried over. A subpath without edges is returned as is. Reversing twice
/// gives back the identical edge list.
pub fn reverse_subpath(subpath: &Subpath) -> Subpath {
    let Some(last) = subpath.edges().last() else {
        return subpath.clone();
    };
    let edges: Vec<Edge> = subpath.edges().iter().rev().map(Edge::reversed).collect();
    Subpath::from_parts(last.end(), edges, subpath.is_closed())
}
