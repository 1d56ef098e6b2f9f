use glyphkit_outline::{
    reverse_subpath, signed_area, winding_sign, BoundingBox, Edge, Point, Subpath,
    WindingNormalizer, WindingSign,
};
use proptest::prelude::*;

fn point() -> impl Strategy<Value = Point> {
    (-100.0f64..100.0, -100.0f64..100.0).prop_map(|(x, y)| Point::new(x, y))
}

/// Open or closed subpaths mixing lines, quadratics and cubics.
fn subpath() -> impl Strategy<Value = Subpath> {
    (
        point(),
        prop::collection::vec((0u8..3, point(), point(), point()), 1..8),
        any::<bool>(),
    )
        .prop_map(|(start, steps, closed)| {
            let mut subpath = Subpath::new(start);
            for (kind, a, b, c) in steps {
                let from = subpath.current_point();
                let edge = match kind {
                    0 => Edge::Line { from, to: a },
                    1 => Edge::Quad {
                        from,
                        ctrl: a,
                        to: b,
                    },
                    _ => Edge::Cubic {
                        from,
                        ctrl1: a,
                        ctrl2: b,
                        to: c,
                    },
                };
                subpath.push(edge);
            }
            if closed {
                subpath.close();
            }
            subpath
        })
}

fn square(x: f64, y: f64, size: f64, clockwise: bool) -> Subpath {
    let mut points = vec![
        Point::new(x, y),
        Point::new(x + size, y),
        Point::new(x + size, y + size),
        Point::new(x, y + size),
    ];
    if !clockwise {
        points.reverse();
    }
    Subpath::from_points(&points, true).unwrap()
}

proptest! {
    #[test]
    fn reversal_is_an_involution(s in subpath()) {
        prop_assert_eq!(reverse_subpath(&reverse_subpath(&s)), s);
    }

    #[test]
    fn reversal_flips_sign(s in subpath()) {
        prop_assume!(signed_area(&s).abs() > 1e-6);
        prop_assert_eq!(winding_sign(&reverse_subpath(&s)), winding_sign(&s).opposite());
    }

    #[test]
    fn reversal_keeps_bounding_box(s in subpath()) {
        prop_assert_eq!(
            BoundingBox::of_subpath(&reverse_subpath(&s)),
            BoundingBox::of_subpath(&s)
        );
    }

    #[test]
    fn reversal_keeps_closure(s in subpath()) {
        prop_assert_eq!(reverse_subpath(&s).is_closed(), s.is_closed());
    }

    #[test]
    fn normalizer_is_idempotent(
        squares in prop::collection::vec(
            (-50.0f64..50.0, -50.0f64..50.0, 1.0f64..40.0, any::<bool>()),
            2..6,
        )
    ) {
        let subpaths: Vec<Subpath> = squares
            .iter()
            .map(|&(x, y, size, cw)| square(x, y, size, cw))
            .collect();
        let normalizer = WindingNormalizer::default();
        let once = normalizer.normalize_subpaths(&subpaths);
        let twice = normalizer.normalize_subpaths(&once);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn nested_squares_end_with_opposite_signs(
        size in 4.0f64..100.0,
        inset in 0.1f64..0.4,
        outer_cw in any::<bool>(),
        inner_cw in any::<bool>(),
    ) {
        let margin = size * inset;
        let subpaths = vec![
            square(0.0, 0.0, size, outer_cw),
            square(margin, margin, size - 2.0 * margin, inner_cw),
        ];
        let out = WindingNormalizer::default().normalize_subpaths(&subpaths);
        let outer = winding_sign(&out[0]);
        prop_assert_ne!(outer, WindingSign::Degenerate);
        prop_assert_eq!(winding_sign(&out[1]), outer.opposite());
        // The outer shape sets the reference and is never touched.
        prop_assert_eq!(&out[0], &subpaths[0]);
    }
}
