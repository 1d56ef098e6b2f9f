//! # Icon Sanitizer
//!
//! Rewrites one SVG icon into plain filled paths for font building.
//!
//! ## Steps
//!
//! 1. Masks are collected and dropped from the tree
//! 2. Masked groups are replaced by their flattened mask fragments
//! 3. `mask` and `clip-path` attributes are removed
//! 4. Canvas-sized background rects are dropped, other rects become paths
//! 5. `<defs>` is removed and its paths are hoisted to the end of the root
//! 6. A colored path followed by a white one merges into an even-odd path
//! 7. Even-odd compound paths are rewritten for non-zero filling; paths
//!    the engine cannot read keep their fill rule
//! 8. Shapes without a fill get the default fill

use glyphkit_outline::{
    is_white, BoundingBoxContainment, Containment, FillRule, FlattenedPath, MaskFlattener,
    OutlineEngine, PolygonContainment,
};
use glyphkit_settings::{ContainmentMode, SanitizeSettings};
use tracing::{debug, warn};

use crate::document::{self, XmlElement, XmlNode};
use crate::error::SanitizeResult;
use crate::extract::{self, MaskMap};

/// Shapes that get the default fill when they declare none.
const FILLED_SHAPES: &[&str] = &["path", "circle", "ellipse", "polygon", "polyline"];

/// Per-document inputs gathered before the rewrite.
struct DocumentContext {
    masks: MaskMap,
    first_rect_fill: Option<String>,
}

#[derive(Debug)]
pub struct Sanitizer {
    engine: OutlineEngine,
    settings: SanitizeSettings,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(SanitizeSettings::default())
    }
}

impl Sanitizer {
    pub fn new(settings: SanitizeSettings) -> Self {
        let containment: Box<dyn Containment> = match settings.containment {
            ContainmentMode::BoundingBox => Box::new(BoundingBoxContainment),
            ContainmentMode::Polygon => Box::new(PolygonContainment::default()),
        };
        Self {
            engine: OutlineEngine::new().with_containment(containment),
            settings,
        }
    }

    /// Uses `engine` as is, e.g. a degraded one.
    pub fn with_engine(settings: SanitizeSettings, engine: OutlineEngine) -> Self {
        Self { engine, settings }
    }

    pub fn settings(&self) -> &SanitizeSettings {
        &self.settings
    }

    pub fn engine(&self) -> &OutlineEngine {
        &self.engine
    }

    /// Sanitizes one SVG document.
    pub fn sanitize(&self, svg_text: &str) -> SanitizeResult<String> {
        let doc = document::parse(svg_text)?;
        let context = DocumentContext {
            masks: extract::collect_masks(&doc),
            first_rect_fill: extract::first_rect_fill(&doc),
        };
        let mut root = document::from_document(&doc)?;

        let mut hoisted = Vec::new();
        self.rewrite_children(&mut root, &context, &mut hoisted);
        let default_fill = self.settings.default_fill.clone();
        root.children.extend(hoisted.into_iter().map(|d| {
            XmlNode::Element(
                XmlElement::new("path")
                    .with_attr("d", d)
                    .with_attr("fill", default_fill.as_str()),
            )
        }));

        root.walk_mut(&mut |element| merge_cutout_pairs(element, &context));
        if self.settings.normalize_even_odd {
            root.walk_mut(&mut |element| self.normalize_even_odd(element));
        }
        root.walk_mut(&mut |element| self.ensure_fill(element));

        Ok(root.to_svg_element().to_string())
    }

    /// Drops masks and defs, replaces masked groups, converts rects and
    /// strips mask/clip references, recursively. Path data found in defs is
    /// pushed to `hoisted`.
    fn rewrite_children(
        &self,
        element: &mut XmlElement,
        context: &DocumentContext,
        hoisted: &mut Vec<String>,
    ) {
        let children = std::mem::take(&mut element.children);
        for node in children {
            let mut child = match node {
                XmlNode::Element(child) => child,
                text => {
                    element.children.push(text);
                    continue;
                }
            };

            if child.name == "g" {
                if let Some(paths) = self.masked_fragments(&child, context) {
                    element
                        .children
                        .extend(paths.into_iter().map(|p| XmlNode::Element(path_element(p))));
                    continue;
                }
            }

            match child.name.as_str() {
                "mask" => {}
                "rect" => {
                    if let Some(path) = self.rect_to_path(&child) {
                        element.children.push(XmlNode::Element(path));
                    }
                }
                "defs" => {
                    let mut nested = Vec::new();
                    self.rewrite_children(&mut child, context, &mut nested);
                    hoisted.extend(
                        child
                            .descendants()
                            .into_iter()
                            .filter(|e| e.name == "path")
                            .filter_map(|e| e.attr("d").map(str::to_string)),
                    );
                    hoisted.extend(nested);
                }
                _ => {
                    child.remove_attr("mask");
                    child.remove_attr("clip-path");
                    self.rewrite_children(&mut child, context, hoisted);
                    element.children.push(XmlNode::Element(child));
                }
            }
        }
    }

    /// Flattened replacement for a group whose mask was recorded.
    fn masked_fragments(
        &self,
        group: &XmlElement,
        context: &DocumentContext,
    ) -> Option<Vec<FlattenedPath>> {
        let id = extract::mask_reference(group.attr("mask")?)?;
        let fragments = context.masks.get(id)?;
        let background = extract::group_background_fill(group);
        let flattener = MaskFlattener::new(&self.engine, self.settings.default_fill.as_str());
        let paths = flattener.flatten(fragments, background.as_deref());
        debug!(mask = id, paths = paths.len(), "Flattened masked group");
        Some(paths)
    }

    /// `None` for a background rect covering the canvas or an empty rect.
    fn rect_to_path(&self, rect: &XmlElement) -> Option<XmlElement> {
        let number = |name: &str| {
            rect.attr(name)
                .and_then(extract::parse_number)
                .unwrap_or(0.0)
        };
        let (x, y, width, height) = (number("x"), number("y"), number("width"), number("height"));

        let size = self.settings.canvas_size;
        let tol = self.settings.background_tolerance;
        let is_background = (width - size).abs() <= tol
            && (height - size).abs() <= tol
            && x <= tol
            && y <= tol;
        if is_background || (width == 0.0 && height == 0.0) {
            debug!(width, height, "Dropping background rect");
            return None;
        }

        let fill = rect
            .attr("fill")
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(self.settings.default_fill.as_str());
        Some(
            XmlElement::new("path")
                .with_attr("d", format!("M{x} {y}h{width}v{height}h-{width}Z"))
                .with_attr("fill", fill),
        )
    }

    fn normalize_even_odd(&self, element: &mut XmlElement) {
        if element.name != "path" {
            return;
        }
        let even_odd = element
            .attr("fill-rule")
            .and_then(FillRule::from_attribute)
            == Some(FillRule::EvenOdd);
        let Some(d) = element.attr("d").filter(|_| even_odd) else {
            return;
        };
        match self.engine.subpaths(d) {
            Ok(subpaths) if subpaths.len() > 1 => {}
            Ok(_) => return,
            Err(err) => {
                warn!("Keeping even-odd path as is: {}", err);
                return;
            }
        }
        let normalized = self.engine.normalize_even_odd(d);
        element.set_attr("d", normalized);
        element.remove_attr("fill-rule");
        element.remove_attr("clip-rule");
    }

    fn ensure_fill(&self, element: &mut XmlElement) {
        if FILLED_SHAPES.contains(&element.name.as_str()) && !element.has_attr("fill") {
            element.set_attr("fill", self.settings.default_fill.as_str());
        }
    }
}

fn path_element(path: FlattenedPath) -> XmlElement {
    let mut element = XmlElement::new("path")
        .with_attr("d", path.d)
        .with_attr("fill", path.fill);
    if let Some(rule) = path.fill_rule {
        element.set_attr("fill-rule", rule);
    }
    if let Some(rule) = path.clip_rule {
        element.set_attr("clip-rule", rule);
    }
    element
}

/// A path with a colored fill directly followed by a path with a white fill.
fn cutout_pair<'a>(
    first: &'a XmlNode,
    second: &'a XmlNode,
) -> Option<(&'a XmlElement, &'a XmlElement)> {
    let (outer, inner) = (first.as_element()?, second.as_element()?);
    if outer.name != "path" || inner.name != "path" {
        return None;
    }
    outer.attr("d")?;
    inner.attr("d")?;
    let outer_fill = outer.attr("fill")?;
    let inner_fill = inner.attr("fill")?;
    (!is_white(outer_fill) && is_white(inner_fill)).then_some((outer, inner))
}

/// Merges every colored/white sibling pair into one even-odd path, until no
/// pair is left.
fn merge_cutout_pairs(element: &mut XmlElement, context: &DocumentContext) {
    let mut index = 0;
    while index + 1 < element.children.len() {
        let merged = cutout_pair(&element.children[index], &element.children[index + 1]).map(
            |(outer, inner)| {
                let fill = context
                    .first_rect_fill
                    .as_deref()
                    .filter(|f| !is_white(f))
                    .or(outer.attr("fill"))
                    .unwrap_or_default()
                    .to_string();
                XmlElement::new("path")
                    .with_attr(
                        "d",
                        format!(
                            "{} {}",
                            outer.attr("d").unwrap_or_default(),
                            inner.attr("d").unwrap_or_default()
                        ),
                    )
                    .with_attr("fill", fill)
                    .with_attr("fill-rule", FillRule::EvenOdd.as_str())
            },
        );

        match merged {
            Some(path) => {
                debug!("Merged colored path with white cutout");
                element.children[index] = XmlNode::Element(path);
                element.children.remove(index + 1);
            }
            None => index += 1,
        }
    }
}
