//! Degraded analysis over raw coordinate pairs.
//!
//! Used when no path-geometry primitive is available or it rejects the path
//! data. Every number in the string is taken in order and paired up as a
//! vertex, with no awareness of commands, curves or arcs. Arc radii and flags
//! therefore leak into the vertex list; results are best effort.

use regex::Regex;

use crate::bbox::BoundingBox;
use crate::model::{Point, WindingSign};
use crate::orientation::signed_area_of_points;

/// Below this many numbers there are fewer than three vertices.
const MIN_ORIENTATION_NUMBERS: usize = 6;

fn number_regex() -> &'static Regex {
    static NUMBER_REGEX: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    NUMBER_REGEX.get_or_init(|| Regex::new(r"-?[\d.]+").expect("invalid regex pattern"))
}

/// Every number-looking run in `d`, in order. Runs that do not parse (such
/// as `1.2.3`) are skipped.
pub fn raw_numbers(d: &str) -> Vec<f64> {
    number_regex()
        .find_iter(d)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// Consecutive number pairs as points. A trailing odd number is ignored.
pub fn coordinate_pairs(d: &str) -> Vec<Point> {
    raw_numbers(d)
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect()
}

pub fn raw_signed_area(d: &str) -> f64 {
    if raw_numbers(d).len() < MIN_ORIENTATION_NUMBERS {
        return 0.0;
    }
    signed_area_of_points(&coordinate_pairs(d))
}

pub fn raw_winding_sign(d: &str) -> WindingSign {
    WindingSign::from_area(raw_signed_area(d))
}

/// Needs at least one pair.
pub fn raw_bounding_box(d: &str) -> Option<BoundingBox> {
    BoundingBox::from_points(&coordinate_pairs(d))
}

/// Splits before every absolute move. Relative moves are not recognized.
pub fn split_raw_subpaths(d: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut begin = 0;
    for (index, _) in d.match_indices('M') {
        if index > begin {
            parts.push(&d[begin..index]);
        }
        begin = index;
    }
    if begin < d.len() {
        parts.push(&d[begin..]);
    }
    parts.retain(|part| !part.trim().is_empty());
    parts
}

/// Degraded classification of one raw part.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSubpathMeta<'a> {
    pub d: &'a str,
    pub sign: WindingSign,
    pub bbox: Option<BoundingBox>,
    pub nesting_depth: usize,
}

/// Sign, box and box-nesting depth for each raw part of `d`.
pub fn raw_analysis(d: &str) -> Vec<RawSubpathMeta<'_>> {
    let mut metas: Vec<RawSubpathMeta<'_>> = split_raw_subpaths(d)
        .into_iter()
        .map(|part| RawSubpathMeta {
            d: part,
            sign: raw_winding_sign(part),
            bbox: raw_bounding_box(part),
            nesting_depth: 0,
        })
        .collect();

    let depths: Vec<usize> = metas
        .iter()
        .enumerate()
        .map(|(i, inner)| {
            metas
                .iter()
                .enumerate()
                .filter(|(j, outer)| {
                    *j != i
                        && matches!(
                            (&outer.bbox, &inner.bbox),
                            (Some(o), Some(b)) if o.strictly_contains(b)
                        )
                })
                .count()
        })
        .collect();
    for (meta, depth) in metas.iter_mut().zip(depths) {
        meta.nesting_depth = depth;
    }
    metas
}
