use glyphkit_outline::{FlattenedPath, MaskFlattener, MaskFragment, OutlineEngine, WindingSign};

const SQUARE: &str = "M0 0L10 0L10 10L0 10Z";

#[test]
fn test_known_square_orientation_and_reversal() {
    let engine = OutlineEngine::new();
    assert_eq!(engine.orientation(SQUARE), WindingSign::Positive);

    let reversed = engine.reverse(SQUARE).unwrap();
    assert_eq!(engine.orientation(&reversed), WindingSign::Negative);

    let before = engine.bounding_box(SQUARE).unwrap();
    let after = engine.bounding_box(&reversed).unwrap();
    assert_eq!(before, after);
    assert_eq!(
        (after.min_x, after.min_y, after.max_x, after.max_y),
        (0.0, 0.0, 10.0, 10.0)
    );
}

#[test]
fn test_colored_with_white_cutout_becomes_one_even_odd_path() {
    let engine = OutlineEngine::new();
    let flattener = MaskFlattener::new(&engine, "#000");
    let colored = "M2 2h20v20h-20Z";
    let hole = "M8 8h8v8h-8Z";

    let out = flattener.flatten(
        &[
            MaskFragment::path(colored).with_fill("#112233"),
            MaskFragment::path(hole).with_fill("white"),
        ],
        None,
    );

    assert_eq!(
        out,
        vec![FlattenedPath {
            d: format!("{colored} {hole}"),
            fill: "#112233".to_string(),
            fill_rule: Some("evenodd".to_string()),
            clip_rule: None,
        }]
    );
}

#[test]
fn test_two_colored_fragments_share_first_sign() {
    let engine = OutlineEngine::new();
    let flattener = MaskFlattener::new(&engine, "#000");
    let first = "M2 2L10 2L10 10L2 10Z";
    let second = "m12 2v8h8v-8z";
    assert_eq!(engine.orientation(first), WindingSign::Positive);
    assert_eq!(engine.orientation(second), WindingSign::Negative);

    let out = flattener.flatten(
        &[
            MaskFragment::path(first).with_fill("#445566"),
            MaskFragment::path(second).with_fill("#445566"),
        ],
        Some("#445566"),
    );

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].d, first);
    assert_eq!(out[0].fill, out[1].fill);
    assert_eq!(engine.orientation(&out[1].d), WindingSign::Positive);
}

#[test]
fn test_even_odd_compound_inner_is_reversed() {
    let engine = OutlineEngine::new();
    let d = "M0 0L20 0L20 20L0 20Z M5 5L15 5L15 15L5 15Z";
    let subpaths = engine.subpaths(d).unwrap();
    assert_eq!(glyphkit_outline::winding_sign(&subpaths[0]), WindingSign::Positive);
    assert_eq!(glyphkit_outline::winding_sign(&subpaths[1]), WindingSign::Positive);

    let normalized = engine.normalize_even_odd(d);
    let out = engine.subpaths(&normalized).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(glyphkit_outline::winding_sign(&out[0]), WindingSign::Positive);
    assert_eq!(glyphkit_outline::winding_sign(&out[1]), WindingSign::Negative);
    assert_eq!(engine.normalize_even_odd(&normalized), normalized);
}

#[test]
fn test_minified_even_odd_compound_is_normalized() {
    let engine = OutlineEngine::new();
    let d = "M0 0L20 0L20 20L0 20Z M.5.5L19.5.5L19.5 19.5L.5 19.5Z";

    let normalized = engine.normalize_even_odd(d);
    assert_ne!(normalized, d);
    let out = engine.subpaths(&normalized).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(glyphkit_outline::winding_sign(&out[0]), WindingSign::Positive);
    assert_eq!(glyphkit_outline::winding_sign(&out[1]), WindingSign::Negative);
}

#[test]
fn test_circle_fragments_survive_arc_expansion() {
    let engine = OutlineEngine::new();
    let flattener = MaskFlattener::new(&engine, "#000");
    let out = flattener.flatten(
        &[
            MaskFragment::new(glyphkit_outline::FragmentShape::Circle {
                cx: 6.0,
                cy: 6.0,
                r: 4.0,
            }),
            MaskFragment::new(glyphkit_outline::FragmentShape::Circle {
                cx: 18.0,
                cy: 6.0,
                r: 4.0,
            }),
        ],
        None,
    );
    assert_eq!(out.len(), 2);
    let first = engine.orientation(&out[0].d);
    assert_ne!(first, WindingSign::Degenerate);
    assert_eq!(engine.orientation(&out[1].d), first);
}
