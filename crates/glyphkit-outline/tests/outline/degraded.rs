use glyphkit_outline::{
    MaskFlattener, MaskFragment, OutlineEngine, OutlineError, SvgPathGeometry, WindingSign,
};

#[test]
fn test_degraded_measurement_uses_coordinate_pairs() {
    let engine = OutlineEngine::degraded();
    assert_eq!(engine.orientation("M0 0L10 0L10 10L0 10Z"), WindingSign::Positive);
    assert_eq!(engine.orientation("M0 0L0 10L10 10L10 0Z"), WindingSign::Negative);
    assert_eq!(engine.orientation("M0 0L10 0"), WindingSign::Degenerate);

    let bbox = engine.bounding_box("M1 1L4 6").unwrap();
    assert_eq!((bbox.min_x, bbox.max_y), (1.0, 6.0));
    assert!(engine.bounding_box("Z").is_none());
}

#[test]
fn test_degraded_rewrites_pass_through() {
    let engine = OutlineEngine::degraded();
    let d = "M0 0L10 0L10 10L0 10Z M2 2L8 2L8 8L2 8Z";
    assert_eq!(engine.reverse(d), Err(OutlineError::MissingGeometry));
    assert_eq!(engine.reverse_or_passthrough(d), d);
    assert_eq!(engine.normalize_even_odd(d), d);
}

#[test]
fn test_degraded_flattener_keeps_fragments_intact() {
    let engine = OutlineEngine::degraded();
    let flattener = MaskFlattener::new(&engine, "#000");
    let out = flattener.flatten(
        &[
            MaskFragment::path("M0 0L10 0L10 10L0 10Z").with_fill("#123456"),
            MaskFragment::path("M20 0L20 10L30 10L30 0Z").with_fill("#123456"),
        ],
        None,
    );
    // Signs disagree, but nothing can be reversed without a primitive.
    assert_eq!(out[1].d, "M20 0L20 10L30 10L30 0Z");
}

#[test]
fn test_arc_data_without_expansion_is_opaque() {
    let engine = OutlineEngine::new().with_geometry(Box::new(SvgPathGeometry::without_arcs()));
    let d = "M0 0A4 4 0 0 1 8 0L8 8L0 8Z M2 2L6 2L6 6L2 6Z";
    assert!(matches!(
        engine.subpaths(d),
        Err(OutlineError::UnsupportedCommand { command: 'A' })
    ));
    assert_eq!(engine.normalize_even_odd(d), d);
    // Arc parameters leak into the raw vertex list but measurement still answers.
    assert!(engine.bounding_box(d).is_some());
}
