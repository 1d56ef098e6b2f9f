use glyphkit_outline::{OutlineEngine, WindingSign};
use glyphkit_sanitize::{SanitizeError, Sanitizer};
use glyphkit_settings::{ContainmentMode, SanitizeSettings};

fn svg(body: &str) -> String {
    format!(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24">{body}</svg>"#)
}

fn path_elements(out: &str) -> Vec<(Option<String>, Option<String>, Option<String>)> {
    let doc = roxmltree::Document::parse(out).unwrap();
    doc.descendants()
        .filter(|n| n.has_tag_name("path"))
        .map(|n| {
            (
                n.attribute("d").map(str::to_string),
                n.attribute("fill").map(str::to_string),
                n.attribute("fill-rule").map(str::to_string),
            )
        })
        .collect()
}

#[test]
fn test_even_odd_path_loses_rule_and_inner_is_reversed() {
    let input = svg(
        r##"<path fill-rule="evenodd" clip-rule="evenodd" d="M0 0L20 0L20 20L0 20Z M5 5L15 5L15 15L5 15Z" fill="#123456"/>"##,
    );
    let out = Sanitizer::default().sanitize(&input).unwrap();
    assert!(!out.contains("fill-rule"));
    assert!(!out.contains("clip-rule"));

    let paths = path_elements(&out);
    assert_eq!(paths.len(), 1);
    let d = paths[0].0.clone().unwrap();
    assert_eq!(d, "M0 0L20 0L20 20L0 20L0 0Z M5 5L5 15L15 15L15 5L5 5Z");

    let engine = OutlineEngine::new();
    let parts: Vec<&str> = d.split(" M").collect();
    assert_eq!(engine.orientation(parts[0]), WindingSign::Positive);
    assert_eq!(
        engine.orientation(&format!("M{}", parts[1])),
        WindingSign::Negative
    );
}

#[test]
fn test_uppercase_even_odd_is_recognized() {
    let input = svg(r#"<path fill-rule="EvenOdd" d="M0 0L20 0L20 20L0 20Z M5 5L15 5L15 15L5 15Z"/>"#);
    let out = Sanitizer::default().sanitize(&input).unwrap();
    assert_eq!(path_elements(&out)[0].2, None);
}

#[test]
fn test_unparsable_even_odd_path_keeps_rule() {
    let d = "M0 0L20 0L20 20L0 20Z M5 5Q15 5Z";
    let input = svg(&format!(r#"<path fill-rule="evenodd" d="{d}"/>"#));
    let out = Sanitizer::default().sanitize(&input).unwrap();
    let paths = path_elements(&out);
    assert_eq!(paths[0].0.as_deref(), Some(d));
    assert_eq!(paths[0].1.as_deref(), Some("#000"));
    assert_eq!(paths[0].2.as_deref(), Some("evenodd"));
}

#[test]
fn test_masked_group_with_two_colored_fragments() {
    let input = svg(
        r##"<mask id="cut"><path d="M0 0L10 0L10 10L0 10Z" fill="black"/><path d="M12 0L12 10L22 10L22 0Z" fill="black"/></mask><g mask="url(#cut)"><rect width="24" height="24" fill="#0a0"/></g>"##,
    );
    let out = Sanitizer::default().sanitize(&input).unwrap();
    let paths = path_elements(&out);
    assert_eq!(paths.len(), 2);
    assert!(paths.iter().all(|(_, fill, _)| fill.as_deref() == Some("#0a0")));

    let engine = OutlineEngine::new();
    let signs: Vec<WindingSign> = paths
        .iter()
        .map(|(d, _, _)| engine.orientation(d.as_deref().unwrap()))
        .collect();
    assert_eq!(signs, vec![WindingSign::Positive, WindingSign::Positive]);
}

#[test]
fn test_mask_without_fragments_leaves_group() {
    let input = svg(r#"<mask id="empty"/><g mask="url(#empty)"><path d="M0 0L1 1"/></g>"#);
    let out = Sanitizer::default().sanitize(&input).unwrap();
    let doc = roxmltree::Document::parse(&out).unwrap();
    let group = doc.descendants().find(|n| n.has_tag_name("g")).unwrap();
    assert_eq!(group.attribute("mask"), None);
    assert_eq!(path_elements(&out).len(), 1);
}

#[test]
fn test_custom_canvas_size() {
    let settings = SanitizeSettings {
        canvas_size: 48.0,
        ..SanitizeSettings::default()
    };
    let sanitizer = Sanitizer::new(settings);
    let small = sanitizer
        .sanitize(&svg(r#"<rect width="24" height="24" fill="red"/>"#))
        .unwrap();
    assert_eq!(path_elements(&small).len(), 1);
    let full = sanitizer
        .sanitize(&svg(r#"<rect width="48" height="48" fill="red"/>"#))
        .unwrap();
    assert!(path_elements(&full).is_empty());
}

#[test]
fn test_polygon_containment_setting() {
    let settings = SanitizeSettings {
        containment: ContainmentMode::Polygon,
        ..SanitizeSettings::default()
    };
    let input = svg(r#"<path fill-rule="evenodd" d="M0 0L20 0L20 20L0 20Z M5 5L15 5L15 15L5 15Z"/>"#);
    let out = Sanitizer::new(settings).sanitize(&input).unwrap();
    assert_eq!(
        path_elements(&out)[0].0.as_deref(),
        Some("M0 0L20 0L20 20L0 20L0 0Z M5 5L5 15L15 15L15 5L5 5Z")
    );
}

#[test]
fn test_text_and_namespaces_survive() {
    let input = r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink"><title>Add</title><use xlink:href="#p"/></svg>"##;
    let out = Sanitizer::default().sanitize(input).unwrap();
    let doc = roxmltree::Document::parse(&out).unwrap();
    let title = doc.descendants().find(|n| n.has_tag_name("title")).unwrap();
    assert_eq!(title.text(), Some("Add"));
    let used = doc.descendants().find(|n| n.has_tag_name("use")).unwrap();
    assert_eq!(
        used.attribute(("http://www.w3.org/1999/xlink", "href")),
        Some("#p")
    );
}

#[test]
fn test_non_svg_document_is_rejected() {
    assert!(matches!(
        Sanitizer::default().sanitize("<html><body/></html>"),
        Err(SanitizeError::NotSvg(_))
    ));
}

#[test]
fn test_degraded_engine_keeps_even_odd_paths() {
    let sanitizer = Sanitizer::with_engine(SanitizeSettings::default(), OutlineEngine::degraded());
    let d = "M0 0L20 0L20 20L0 20Z M5 5L15 5L15 15L5 15Z";
    let out = sanitizer
        .sanitize(&svg(&format!(r#"<path fill-rule="evenodd" d="{d}"/>"#)))
        .unwrap();
    let paths = path_elements(&out);
    assert_eq!(paths[0].0.as_deref(), Some(d));
    assert_eq!(paths[0].2.as_deref(), Some("evenodd"));
}

#[test]
fn test_attribute_markup_survives_a_round_trip() {
    let input = svg(r#"<g id="a&amp;b" data-x='say "hi"'><path d="M0 0L1 1"/></g>"#);
    let out = Sanitizer::default().sanitize(&input).unwrap();
    let doc = roxmltree::Document::parse(&out).unwrap();
    let group = doc.descendants().find(|n| n.has_tag_name("g")).unwrap();
    assert_eq!(group.attribute("id"), Some("a&b"));
    assert_eq!(group.attribute("data-x"), Some(r#"say "hi""#));
}

#[test]
fn test_first_rect_fill_colors_merged_cutout() {
    let input = svg(
        r##"<rect x="1" y="1" width="2" height="2" fill="#e91e63"/><path d="M4 4L20 4L20 20L4 20Z" fill="#333"/><path d="M8 8L16 8L16 16L8 16Z" fill="#fff"/>"##,
    );
    let out = Sanitizer::default().sanitize(&input).unwrap();
    let paths = path_elements(&out);
    assert_eq!(paths.len(), 2);
    assert_eq!(paths[0].0.as_deref(), Some("M1 1h2v2h-2Z"));
    assert_eq!(paths[1].1.as_deref(), Some("#e91e63"));
    assert_eq!(paths[1].2, None);
}

#[test]
fn test_white_first_rect_fill_keeps_outer_fill() {
    let input = svg(
        r##"<rect x="1" y="1" width="2" height="2" fill="white"/><path d="M4 4L20 4L20 20L4 20Z" fill="#333"/><path d="M8 8L16 8L16 16L8 16Z" fill="#fff"/>"##,
    );
    let out = Sanitizer::default().sanitize(&input).unwrap();
    let paths = path_elements(&out);
    assert_eq!(paths.len(), 2);
    assert_eq!(paths[1].1.as_deref(), Some("#333"));
}
