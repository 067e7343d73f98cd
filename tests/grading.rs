use block_mesher::definition::grading::{EdgeGrading, resolve_edge_gradings};
use block_mesher::topology::cell_type::CellType;
use proptest::prelude::*;

fn segments(pos: &[f64]) -> Vec<f64> {
    pos.windows(2).map(|w| w[1] - w[0]).collect()
}

#[test]
fn per_axis_grading_expands_to_parallel_edges() {
    let gradings = [
        EdgeGrading::Ratio(2.0),
        EdgeGrading::UNIFORM,
        EdgeGrading::Ratio(0.5),
    ];
    let edges = resolve_edge_gradings(CellType::Hexahedron, &gradings).unwrap();
    assert_eq!(edges.len(), 12);
    assert!(edges[..4].iter().all(|g| *g == EdgeGrading::Ratio(2.0)));
    assert!(edges[4..8].iter().all(EdgeGrading::is_uniform));
    assert!(edges[8..].iter().all(|g| *g == EdgeGrading::Ratio(0.5)));
}

#[test]
fn wrong_grading_count_is_rejected() {
    let gradings = [EdgeGrading::UNIFORM; 5];
    assert!(resolve_edge_gradings(CellType::Hexahedron, &gradings).is_err());
    assert!(resolve_edge_gradings(CellType::Quadrilateral, &gradings[..3]).is_err());
    assert_eq!(
        resolve_edge_gradings(CellType::Quadrilateral, &gradings[..4])
            .unwrap()
            .len(),
        4
    );
}

#[test]
fn non_positive_ratios_are_rejected() {
    for r in [0.0, -2.0, f64::NAN, f64::INFINITY] {
        assert!(EdgeGrading::Ratio(r).validate().is_err(), "ratio {r}");
    }
    let g = EdgeGrading::TwoSided {
        first: 2.0,
        second: 0.0,
    };
    assert!(g.validate().is_err());
}

proptest! {
    #[test]
    fn prop_ratio_is_last_over_first(n in 2usize..60, r in 0.05f64..20.0) {
        let pos = EdgeGrading::Ratio(r).distribution(n);
        prop_assert_eq!(pos.len(), n + 1);
        prop_assert_eq!(pos[0], 0.0);
        prop_assert_eq!(pos[n], 1.0);
        let seg = segments(&pos);
        prop_assert!(seg.iter().all(|&s| s > 0.0));
        prop_assert!((seg[n - 1] / seg[0] - r).abs() < 1e-8 * r.max(1.0));
    }

    #[test]
    fn prop_uniform_is_even(n in 1usize..60) {
        let pos = EdgeGrading::UNIFORM.distribution(n);
        for (i, t) in pos.iter().enumerate() {
            prop_assert!((t - i as f64 / n as f64).abs() < 1e-14);
        }
    }

    #[test]
    fn prop_two_sided_is_monotone(n in 1usize..40, a in 0.1f64..10.0, b in 0.1f64..10.0) {
        let pos = EdgeGrading::TwoSided { first: a, second: b }.distribution(n);
        prop_assert_eq!(pos.len(), n + 1);
        prop_assert_eq!(pos[0], 0.0);
        prop_assert_eq!(pos[n], 1.0);
        prop_assert!(pos.windows(2).all(|w| w[1] > w[0]));
    }
}
