//! # Mask Flattener
//!
//! Resolves the fragments of one mask into plain filled paths.
//!
//! White fragments are cutouts. When both colored and white fragments are
//! present they merge into a single even-odd path. Otherwise colored
//! fragments are kept apart with their windings aligned, so that overlapping
//! parts add up instead of cancelling under the non-zero rule.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::OutlineEngine;
use crate::model::{FillRule, WindingSign};

/// True for `white`, `#fff` and `#ffffff`, ignoring case and surrounding
/// whitespace.
pub fn is_white(fill: &str) -> bool {
    let fill = fill.trim();
    fill.eq_ignore_ascii_case("white")
        || fill.eq_ignore_ascii_case("#fff")
        || fill.eq_ignore_ascii_case("#ffffff")
}

/// Geometry of a mask fragment as it appeared in the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FragmentShape {
    Path { d: String },
    Circle { cx: f64, cy: f64, r: f64 },
    Ellipse { cx: f64, cy: f64, rx: f64, ry: f64 },
    Rect { x: f64, y: f64, width: f64, height: f64 },
}

impl FragmentShape {
    /// Path data for the shape. Circles and ellipses become two half arcs and
    /// need positive, finite radii; otherwise there is no shape.
    pub fn to_path_data(&self) -> Option<String> {
        match *self {
            FragmentShape::Path { ref d } => Some(d.clone()),
            FragmentShape::Circle { cx, cy, r } => ellipse_path(cx, cy, r, r),
            FragmentShape::Ellipse { cx, cy, rx, ry } => ellipse_path(cx, cy, rx, ry),
            FragmentShape::Rect {
                x,
                y,
                width,
                height,
            } => Some(format!("M{x} {y}h{width}v{height}h-{width}Z")),
        }
    }
}

fn ellipse_path(cx: f64, cy: f64, rx: f64, ry: f64) -> Option<String> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !(cx.is_finite() && cy.is_finite() && valid(rx) && valid(ry)) {
        return None;
    }
    Some(format!(
        "M {} {cy} A {rx} {ry} 0 1 0 {} {cy} A {rx} {ry} 0 1 0 {} {cy} Z",
        cx + rx,
        cx - rx,
        cx + rx
    ))
}

/// One shape taken from a mask definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskFragment {
    pub shape: FragmentShape,
    pub fill: Option<String>,
    pub fill_rule: Option<String>,
    pub clip_rule: Option<String>,
}

impl MaskFragment {
    pub fn new(shape: FragmentShape) -> Self {
        Self {
            shape,
            fill: None,
            fill_rule: None,
            clip_rule: None,
        }
    }

    pub fn path(d: impl Into<String>) -> Self {
        Self::new(FragmentShape::Path { d: d.into() })
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn with_fill_rule(mut self, rule: impl Into<String>) -> Self {
        self.fill_rule = Some(rule.into());
        self
    }

    pub fn with_clip_rule(mut self, rule: impl Into<String>) -> Self {
        self.clip_rule = Some(rule.into());
        self
    }

    /// A missing fill counts as colored.
    pub fn is_white(&self) -> bool {
        self.fill.as_deref().is_some_and(is_white)
    }

    /// Whether either the fill-rule or the clip-rule is even-odd.
    pub fn declares_even_odd(&self) -> bool {
        [&self.fill_rule, &self.clip_rule]
            .into_iter()
            .flatten()
            .any(|rule| FillRule::from_attribute(rule) == Some(FillRule::EvenOdd))
    }
}

/// Where a flattened path's fill color may come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillSource {
    /// The masked group's background rect, when it is not white.
    BackgroundRect,
    /// The first fragment with a non-white fill.
    FirstColoredFragment,
    /// The sole fragment's own fill.
    FragmentOwn,
    /// The configured default color.
    Default,
}

pub const MULTI_FRAGMENT_FILL_CHAIN: &[FillSource] = &[
    FillSource::BackgroundRect,
    FillSource::FirstColoredFragment,
    FillSource::Default,
];

pub const SINGLE_FRAGMENT_FILL_CHAIN: &[FillSource] = &[
    FillSource::FragmentOwn,
    FillSource::BackgroundRect,
    FillSource::Default,
];

pub const NO_COLORED_FILL_CHAIN: &[FillSource] = &[FillSource::Default];

/// Inputs the fill rules draw from.
#[derive(Debug, Clone, Copy)]
pub struct FillContext<'a> {
    pub background: Option<&'a str>,
    pub fragments: &'a [MaskFragment],
    pub default_fill: &'a str,
}

impl FillSource {
    pub fn resolve(&self, ctx: &FillContext<'_>) -> Option<String> {
        match self {
            FillSource::BackgroundRect => ctx
                .background
                .map(str::trim)
                .filter(|fill| !fill.is_empty() && !is_white(fill))
                .map(str::to_string),
            FillSource::FirstColoredFragment => ctx
                .fragments
                .iter()
                .filter_map(|f| f.fill.as_deref())
                .find(|fill| !is_white(fill))
                .map(str::to_string),
            FillSource::FragmentOwn => match ctx.fragments {
                [only] => only.fill.clone(),
                _ => None,
            },
            FillSource::Default => Some(ctx.default_fill.to_string()),
        }
    }
}

/// First color produced along `chain`, else the default.
pub fn select_fill(chain: &[FillSource], ctx: &FillContext<'_>) -> String {
    chain
        .iter()
        .find_map(|source| source.resolve(ctx))
        .unwrap_or_else(|| ctx.default_fill.to_string())
}

/// One output `path` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlattenedPath {
    pub d: String,
    pub fill: String,
    pub fill_rule: Option<String>,
    pub clip_rule: Option<String>,
}

impl FlattenedPath {
    fn plain(d: String, fill: String) -> Self {
        Self {
            d,
            fill,
            fill_rule: None,
            clip_rule: None,
        }
    }
}

impl fmt::Display for FlattenedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<path d=\"{}\" fill=\"{}\"", self.d, self.fill)?;
        if let Some(rule) = &self.fill_rule {
            write!(f, " fill-rule=\"{}\"", rule)?;
        }
        if let Some(rule) = &self.clip_rule {
            write!(f, " clip-rule=\"{}\"", rule)?;
        }
        f.write_str(" />")
    }
}

#[derive(Debug)]
pub struct MaskFlattener<'e> {
    engine: &'e OutlineEngine,
    default_fill: String,
}

impl<'e> MaskFlattener<'e> {
    pub fn new(engine: &'e OutlineEngine, default_fill: impl Into<String>) -> Self {
        Self {
            engine,
            default_fill: default_fill.into(),
        }
    }

    pub fn default_fill(&self) -> &str {
        &self.default_fill
    }

    /// Flattens the fragments of one mask. `background_fill` is the fill of
    /// the masked group's background rect, if it has one.
    pub fn flatten(
        &self,
        fragments: &[MaskFragment],
        background_fill: Option<&str>,
    ) -> Vec<FlattenedPath> {
        // Shapes without usable geometry contribute nothing.
        let resolved: Vec<(MaskFragment, String)> = fragments
            .iter()
            .filter_map(|f| f.shape.to_path_data().map(|d| (f.clone(), d)))
            .collect();
        let all: Vec<MaskFragment> = resolved.iter().map(|(f, _)| f.clone()).collect();
        let ctx = FillContext {
            background: background_fill,
            fragments: &all,
            default_fill: &self.default_fill,
        };

        let (white, colored): (Vec<_>, Vec<_>) = resolved.iter().partition(|(f, _)| f.is_white());

        match (colored.len(), white.is_empty()) {
            (0, _) => {
                let fill = select_fill(NO_COLORED_FILL_CHAIN, &ctx);
                resolved
                    .iter()
                    .map(|(fragment, d)| FlattenedPath {
                        d: d.clone(),
                        fill: fill.clone(),
                        fill_rule: fragment.fill_rule.clone(),
                        clip_rule: fragment.clip_rule.clone(),
                    })
                    .collect()
            }
            (_, false) => {
                let d = colored
                    .iter()
                    .chain(white.iter())
                    .map(|(_, d)| d.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                debug!(
                    colored = colored.len(),
                    white = white.len(),
                    "Merging mask cutouts into an even-odd path"
                );
                vec![FlattenedPath {
                    d,
                    fill: select_fill(MULTI_FRAGMENT_FILL_CHAIN, &ctx),
                    fill_rule: Some(FillRule::EvenOdd.as_str().to_string()),
                    clip_rule: None,
                }]
            }
            (1, true) => {
                let (fragment, d) = colored[0];
                let fill = select_fill(SINGLE_FRAGMENT_FILL_CHAIN, &ctx);
                vec![self.emit_single(fragment, d, fill)]
            }
            (_, true) => {
                let fill = select_fill(MULTI_FRAGMENT_FILL_CHAIN, &ctx);
                self.align_colored(&colored, &fill)
            }
        }
    }

    fn is_even_odd_compound(&self, fragment: &MaskFragment, d: &str) -> bool {
        fragment.declares_even_odd() && self.engine.subpath_count(d) > 1
    }

    fn emit_single(&self, fragment: &MaskFragment, d: &str, fill: String) -> FlattenedPath {
        if self.is_even_odd_compound(fragment, d) {
            return FlattenedPath::plain(self.engine.normalize_even_odd(d), fill);
        }
        FlattenedPath {
            d: d.to_string(),
            fill,
            fill_rule: fragment.fill_rule.clone(),
            clip_rule: fragment.clip_rule.clone(),
        }
    }

    /// Emits each colored fragment on its own, reversing later fragments to
    /// the first non-degenerate sign. Even-odd compounds are normalized
    /// instead.
    fn align_colored(&self, colored: &[&(MaskFragment, String)], fill: &str) -> Vec<FlattenedPath> {
        let mut target: Option<WindingSign> = None;

        colored
            .iter()
            .enumerate()
            .map(|(index, (fragment, d))| {
                let even_odd = fragment.declares_even_odd();
                let d = if self.is_even_odd_compound(fragment, d) {
                    self.engine.normalize_even_odd(d)
                } else {
                    self.aligned(index, d, &mut target)
                };

                if even_odd {
                    FlattenedPath::plain(d, fill.to_string())
                } else {
                    FlattenedPath {
                        d,
                        fill: fill.to_string(),
                        fill_rule: fragment.fill_rule.clone(),
                        clip_rule: fragment.clip_rule.clone(),
                    }
                }
            })
            .collect()
    }

    fn aligned(&self, index: usize, d: &str, target_sign: &mut Option<WindingSign>) -> String {
        let sign = self.engine.orientation(d);
        if sign.is_degenerate() {
            return d.to_string();
        }
        let target = *target_sign.get_or_insert(sign);
        if sign == target {
            return d.to_string();
        }

        let reversed = self.engine.reverse_or_passthrough(d);
        if self.engine.orientation(&reversed) == target {
            debug!(index, "Reversed mask fragment to {:?} winding", target);
            reversed
        } else {
            d.to_string()
        }
    }
}
