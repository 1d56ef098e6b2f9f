//! Mask and fill extraction from a parsed SVG document.

use std::collections::HashMap;

use glyphkit_outline::{FragmentShape, MaskFragment};
use regex::Regex;

use crate::document::XmlElement;

/// Fragments of every mask with at least one usable shape, keyed by id.
pub type MaskMap = HashMap<String, Vec<MaskFragment>>;

fn number_prefix_regex() -> &'static Regex {
    static NUMBER_PREFIX_REGEX: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    NUMBER_PREFIX_REGEX.get_or_init(|| {
        Regex::new(r"^\s*[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?")
            .expect("invalid regex pattern")
    })
}

/// Reads the leading number of an attribute value, ignoring trailing units
/// (`"24px"` is 24).
pub fn parse_number(value: &str) -> Option<f64> {
    number_prefix_regex()
        .find(value)
        .and_then(|m| m.as_str().trim().parse().ok())
}

/// Missing attributes read as zero; present but non-numeric ones as `None`.
fn number_attribute(node: roxmltree::Node<'_, '_>, name: &str) -> Option<f64> {
    match node.attribute(name) {
        Some(value) => parse_number(value),
        None => Some(0.0),
    }
}

/// Trimmed, lowercased fill. Empty values count as missing.
pub fn normalized_fill(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

/// The id inside a `url(#id)` reference.
pub fn mask_reference(value: &str) -> Option<&str> {
    let inner = value
        .trim()
        .strip_prefix("url(")?
        .strip_suffix(')')?
        .trim()
        .trim_matches(|c| c == '"' || c == '\'');
    inner.strip_prefix('#').filter(|id| !id.is_empty())
}

fn mask_fragments(mask: roxmltree::Node<'_, '_>) -> Vec<MaskFragment> {
    let shapes: Vec<roxmltree::Node<'_, '_>> =
        mask.descendants().filter(|n| n.is_element()).collect();
    let of_kind = |kind: &'static str| {
        shapes
            .iter()
            .copied()
            .filter(move |n| n.tag_name().name() == kind)
    };
    let mut fragments = Vec::new();

    for node in of_kind("path") {
        let Some(d) = trimmed(node.attribute("d")) else {
            continue;
        };
        let mut fragment = MaskFragment::path(d);
        fragment.fill = normalized_fill(node.attribute("fill"));
        fragment.fill_rule = trimmed(node.attribute("fill-rule"));
        fragment.clip_rule = trimmed(node.attribute("clip-rule"));
        fragments.push(fragment);
    }

    for node in of_kind("circle") {
        let (Some(cx), Some(cy), Some(r)) = (
            number_attribute(node, "cx"),
            number_attribute(node, "cy"),
            number_attribute(node, "r"),
        ) else {
            continue;
        };
        let shape = FragmentShape::Circle { cx, cy, r };
        if shape.to_path_data().is_some() {
            let mut fragment = MaskFragment::new(shape);
            fragment.fill = normalized_fill(node.attribute("fill"));
            fragments.push(fragment);
        }
    }

    for node in of_kind("ellipse") {
        let (Some(cx), Some(cy), Some(rx), Some(ry)) = (
            number_attribute(node, "cx"),
            number_attribute(node, "cy"),
            number_attribute(node, "rx"),
            number_attribute(node, "ry"),
        ) else {
            continue;
        };
        let shape = FragmentShape::Ellipse { cx, cy, rx, ry };
        if shape.to_path_data().is_some() {
            let mut fragment = MaskFragment::new(shape);
            fragment.fill = normalized_fill(node.attribute("fill"));
            fragments.push(fragment);
        }
    }

    for node in of_kind("rect") {
        let mut fragment = MaskFragment::new(FragmentShape::Rect {
            x: number_attribute(node, "x").unwrap_or(0.0),
            y: number_attribute(node, "y").unwrap_or(0.0),
            width: number_attribute(node, "width").unwrap_or(0.0),
            height: number_attribute(node, "height").unwrap_or(0.0),
        });
        fragment.fill = normalized_fill(node.attribute("fill"));
        fragments.push(fragment);
    }

    fragments
}

/// Collects every `<mask id=...>` in the document. Paths come first, then
/// circles, ellipses and rects, each in document order.
pub fn collect_masks(doc: &roxmltree::Document<'_>) -> MaskMap {
    let mut masks = MaskMap::new();
    for mask in doc.descendants().filter(|n| n.has_tag_name("mask")) {
        let Some(id) = mask.attribute("id").map(str::trim) else {
            continue;
        };
        let fragments = mask_fragments(mask);
        if !fragments.is_empty() {
            masks.insert(id.to_string(), fragments);
        }
    }
    masks
}

/// Fill of the first `<rect>` in the source document that declares one.
pub fn first_rect_fill(doc: &roxmltree::Document<'_>) -> Option<String> {
    doc.descendants()
        .filter(|n| n.has_tag_name("rect"))
        .find_map(|n| trimmed(n.attribute("fill")))
}

/// Fill of the first `<rect>` inside a masked group.
pub fn group_background_fill(group: &XmlElement) -> Option<String> {
    group
        .descendants()
        .into_iter()
        .filter(|e| e.name == "rect")
        .find_map(|e| trimmed(e.attr("fill")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("24"), Some(24.0));
        assert_eq!(parse_number(" 24.5px"), Some(24.5));
        assert_eq!(parse_number("-.5"), Some(-0.5));
        assert_eq!(parse_number("1e2"), Some(100.0));
        assert_eq!(parse_number("100%"), Some(100.0));
        assert_eq!(parse_number("auto"), None);
    }

    #[test]
    fn test_mask_reference() {
        assert_eq!(mask_reference("url(#mask0)"), Some("mask0"));
        assert_eq!(mask_reference(" url( '#m-1' ) "), Some("m-1"));
        assert_eq!(mask_reference("none"), None);
        assert_eq!(mask_reference("url(#)"), None);
    }

    #[test]
    fn test_collect_masks() {
        let text = r##"<svg xmlns="http://www.w3.org/2000/svg">
            <mask id="m">
                <rect width="4" height="4" fill="white"/>
                <circle cx="12" cy="12" r="3" fill=" #FFF "/>
                <circle cx="1" cy="1" r="0"/>
                <path d=" M0 0L5 5 " fill="#112233" fill-rule="evenodd"/>
                <path fill="#000"/>
            </mask>
            <mask id="empty"><g/></mask>
        </svg>"##;
        let doc = roxmltree::Document::parse(text).unwrap();
        let masks = collect_masks(&doc);
        assert_eq!(masks.len(), 1);
        let fragments = &masks["m"];
        assert_eq!(fragments.len(), 3);
        assert_eq!(
            fragments[0].shape,
            FragmentShape::Path {
                d: "M0 0L5 5".to_string()
            }
        );
        assert_eq!(fragments[0].fill_rule.as_deref(), Some("evenodd"));
        assert_eq!(fragments[1].fill.as_deref(), Some("#fff"));
        assert!(matches!(fragments[2].shape, FragmentShape::Rect { width, .. } if width == 4.0));
    }

    #[test]
    fn test_first_rect_fill() {
        let text = r##"<svg xmlns="http://www.w3.org/2000/svg"><rect width="1"/><g><rect fill="#abc"/></g></svg>"##;
        let doc = roxmltree::Document::parse(text).unwrap();
        assert_eq!(first_rect_fill(&doc).as_deref(), Some("#abc"));
    }

    #[test]
    fn test_group_background_fill() {
        let group = XmlElement::new("g").with_attr("mask", "url(#m)");
        let mut group = group;
        group.children.push(crate::document::XmlNode::Element(
            XmlElement::new("rect").with_attr("fill", "#1C1B1F"),
        ));
        assert_eq!(group_background_fill(&group).as_deref(), Some("#1C1B1F"));
    }
}
