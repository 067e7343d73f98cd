mod util;

use block_mesher::prelude::*;
use proptest::prelude::*;
use util::{flat_plate, two_squares};

#[test]
fn repeated_generation_is_identical() {
    let def = flat_plate();
    let first = generate(&def).unwrap();
    for _ in 0..3 {
        assert_eq!(generate(&def).unwrap(), first);
    }
}

#[test]
fn description_round_trip_gives_same_mesh() {
    let def = flat_plate();
    let replayed = BlockMeshDefinition::from_description(def.to_description()).unwrap();
    assert_eq!(generate(&replayed).unwrap(), generate(&def).unwrap());
}

#[test]
fn first_block_owns_shared_points() {
    // The shared edge 1-4 is numbered while walking block 0.
    let mut b = two_squares();
    b.add_block(0, &[0, 1, 4, 3], &[1, 1], &[]).unwrap();
    b.add_block(1, &[1, 2, 5, 4], &[1, 1], &[]).unwrap();
    let mesh = generate_with(
        &b.build().unwrap(),
        &GenerationOptions {
            unpatched: UnpatchedFaces::Ignore,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(mesh.point_count(), 6);
    assert_eq!(mesh.cell(0), Some(&[0, 1, 3, 2][..]));
    assert_eq!(mesh.cell(1), Some(&[1, 4, 5, 3][..]));
}

proptest! {
    #[test]
    fn prop_side_by_side_point_count(
        nx0 in 1usize..8,
        nx1 in 1usize..8,
        ny in 1usize..8,
        ratio in 0.2f64..5.0,
    ) {
        let mut b = two_squares();
        let grading = [EdgeGrading::UNIFORM, EdgeGrading::Ratio(ratio)];
        b.add_block(0, &[0, 1, 4, 3], &[nx0, ny], &grading).unwrap();
        b.add_block(1, &[1, 2, 5, 4], &[nx1, ny], &grading).unwrap();
        b.add_patch("bottom", &[&[0, 1], &[1, 2]]).unwrap();
        let def = b.build().unwrap();
        let mesh = generate(&def).unwrap();
        prop_assert_eq!(mesh.point_count(), (nx0 + nx1 + 1) * (ny + 1));
        prop_assert_eq!(mesh.cell_count(), (nx0 + nx1) * ny);
        prop_assert_eq!(mesh.patch("bottom").unwrap().faces.len(), nx0 + nx1);
        prop_assert!(mesh.validate_invariants().is_ok());
        let stats = mesh.statistics();
        prop_assert!((stats.total_measure - 2.0).abs() < 1e-9);
        prop_assert_eq!(generate(&def).unwrap(), mesh);
    }
}
