//! # Winding Normalizer
//!
//! Rewrites an even-odd compound path so that it renders the same under the
//! non-zero rule.
//!
//! Every subpath is classified by winding sign, bounding box and nesting
//! depth. The largest non-degenerate subpath sets the reference sign; even
//! depths must match it and odd depths must oppose it. Subpaths that disagree
//! are reversed, degenerate ones pass through.

use tracing::debug;

use crate::bbox::BoundingBox;
use crate::containment::{BoundingBoxContainment, Containment};
use crate::model::{CompoundPath, Subpath, WindingSign};
use crate::orientation::winding_sign;
use crate::reverse::reverse_subpath;

/// A subpath with its computed classification.
#[derive(Debug, Clone, PartialEq)]
pub struct SubpathMeta<'a> {
    pub subpath: &'a Subpath,
    pub sign: WindingSign,
    pub bbox: Option<BoundingBox>,
    pub nesting_depth: usize,
}

impl<'a> SubpathMeta<'a> {
    /// Classifies `subpath` with depth zero.
    pub fn new(subpath: &'a Subpath) -> Self {
        Self {
            subpath,
            sign: winding_sign(subpath),
            bbox: BoundingBox::of_subpath(subpath),
            nesting_depth: 0,
        }
    }

    fn area(&self) -> f64 {
        self.bbox.map(|b| b.area).unwrap_or(0.0)
    }
}

/// The sign every subpath at `depth` must wind with.
pub fn required_sign(reference: WindingSign, depth: usize) -> WindingSign {
    if depth % 2 == 0 {
        reference
    } else {
        reference.opposite()
    }
}

/// Sign of the non-degenerate subpath with the largest box area. Ties go to
/// the earliest; with none, `Positive`.
pub fn reference_sign(metas: &[SubpathMeta<'_>]) -> WindingSign {
    let mut best: Option<&SubpathMeta<'_>> = None;
    for meta in metas.iter().filter(|m| !m.sign.is_degenerate()) {
        if best.is_none_or(|b| meta.area() > b.area()) {
            best = Some(meta);
        }
    }
    best.map(|m| m.sign).unwrap_or(WindingSign::Positive)
}

#[derive(Debug)]
pub struct WindingNormalizer {
    containment: Box<dyn Containment>,
}

impl Default for WindingNormalizer {
    fn default() -> Self {
        Self::new(Box::new(BoundingBoxContainment))
    }
}

impl WindingNormalizer {
    pub fn new(containment: Box<dyn Containment>) -> Self {
        Self { containment }
    }

    /// Sign, box and nesting depth of each subpath, in order.
    pub fn analyze<'a>(&self, subpaths: &'a [Subpath]) -> Vec<SubpathMeta<'a>> {
        let mut metas: Vec<SubpathMeta<'a>> = subpaths.iter().map(SubpathMeta::new).collect();
        let depths: Vec<usize> = (0..metas.len())
            .map(|i| {
                (0..metas.len())
                    .filter(|&j| j != i && self.containment.contains(&metas[j], &metas[i]))
                    .count()
            })
            .collect();
        for (meta, depth) in metas.iter_mut().zip(depths) {
            meta.nesting_depth = depth;
        }
        metas
    }

    /// Reverses every subpath whose sign disagrees with its required sign.
    /// A single subpath is returned unchanged.
    pub fn normalize_subpaths(&self, subpaths: &[Subpath]) -> Vec<Subpath> {
        if subpaths.len() < 2 {
            return subpaths.to_vec();
        }
        let metas = self.analyze(subpaths);
        let reference = reference_sign(&metas);

        metas
            .iter()
            .enumerate()
            .map(|(index, meta)| {
                if meta.sign.is_degenerate() {
                    return meta.subpath.clone();
                }
                let required = required_sign(reference, meta.nesting_depth);
                if meta.sign == required {
                    meta.subpath.clone()
                } else {
                    debug!(
                        index,
                        depth = meta.nesting_depth,
                        "Reversing subpath to {:?} winding",
                        required
                    );
                    reverse_subpath(meta.subpath)
                }
            })
            .collect()
    }

    /// Normalizes a compound path. The result carries no fill rule, since it
    /// is meant for non-zero filling.
    pub fn normalize(&self, path: &CompoundPath) -> CompoundPath {
        if path.subpaths.len() < 2 {
            return path.clone();
        }
        CompoundPath {
            subpaths: self.normalize_subpaths(&path.subpaths),
            fill: path.fill.clone(),
            fill_rule: None,
        }
    }
}
