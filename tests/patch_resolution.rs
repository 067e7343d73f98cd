mod util;

use block_mesher::prelude::*;
use util::{assert_outward, two_cubes_points, two_squares};

fn pair() -> BlockMeshBuilder {
    let mut b = two_squares();
    b.add_block(0, &[0, 1, 4, 3], &[2, 2], &[]).unwrap();
    b.add_block(1, &[1, 2, 5, 4], &[3, 2], &[]).unwrap();
    b
}

fn ids(raw: &[u32]) -> Vec<ControlPointId> {
    raw.iter().copied().map(ControlPointId::new).collect()
}

#[test]
fn patch_face_must_match_a_block_face() {
    let mut b = pair();
    b.add_patch("diagonal", &[&[0, 1], &[0, 4]]).unwrap();
    let err = generate(&b.build().unwrap()).unwrap_err();
    assert_eq!(
        err,
        MeshError::UnresolvedPatchFace {
            patch: "diagonal".into(),
            face_index: 1,
            corners: ids(&[0, 4]),
        }
    );
}

#[test]
fn patch_on_shared_face_is_rejected() {
    let mut b = pair();
    b.add_patch("middle", &[&[4, 1]]).unwrap();
    let err = generate(&b.build().unwrap()).unwrap_err();
    assert_eq!(
        err,
        MeshError::PatchOnInteriorFace {
            patch: "middle".into(),
            face_index: 0,
            corners: ids(&[4, 1]),
            blocks: [BlockId::new(0), BlockId::new(1)],
        }
    );
}

#[test]
fn face_claimed_twice_is_rejected() {
    let mut b = pair();
    b.add_patch("a", &[&[0, 1]]).unwrap();
    b.add_patch("b", &[&[1, 0]]).unwrap();
    let err = generate(&b.build().unwrap()).unwrap_err();
    assert_eq!(
        err,
        MeshError::DuplicatePatchFace {
            corners: ids(&[0, 1]),
            first: "a".into(),
            second: "b".into(),
        }
    );
}

#[test]
fn orientation_of_patch_face_does_not_matter() {
    let mut forward = pair();
    forward.add_patch("bottom", &[&[0, 1], &[1, 2]]).unwrap();
    let mut reversed = pair();
    reversed.add_patch("bottom", &[&[1, 0], &[2, 1]]).unwrap();
    let a = generate(&forward.build().unwrap()).unwrap();
    let b = generate(&reversed.build().unwrap()).unwrap();
    assert_eq!(a.patch("bottom"), b.patch("bottom"));
    assert_eq!(a.patch("bottom").unwrap().faces.len(), 5);
    assert_outward(&a);
}

#[test]
fn boundary_faces_carry_owning_cells() {
    let mut b = pair();
    b.add_patch("right", &[&[2, 5]]).unwrap();
    let mesh = generate(&b.build().unwrap()).unwrap();
    let right = mesh.patch("right").unwrap();
    assert_eq!(right.faces.len(), 2);
    for face in &right.faces {
        assert_eq!(mesh.cell_block(face.cell), Some(BlockId::new(1)));
        let cell = mesh.cell(face.cell).unwrap();
        assert!(face.vertices.iter().all(|v| cell.contains(v)));
        for &v in &face.vertices {
            assert!((mesh.point(v).unwrap()[0] - 2.0).abs() < 1e-14);
        }
    }
}

#[test]
fn unpatched_policy_error() {
    let mut b = pair();
    b.add_patch("bottom", &[&[0, 1], &[1, 2]]).unwrap();
    let options = GenerationOptions {
        unpatched: UnpatchedFaces::Error,
        ..Default::default()
    };
    let err = generate_with(&b.build().unwrap(), &options).unwrap_err();
    // First unclaimed boundary face in block order: block 0's left side.
    assert_eq!(
        err,
        MeshError::UnpatchedBoundaryFace {
            block: BlockId::new(0),
            corners: ids(&[0, 3]),
        }
    );
}

#[test]
fn unpatched_policy_warn_and_ignore() {
    let def = {
        let mut b = pair();
        b.add_patch("bottom", &[&[0, 1], &[1, 2]]).unwrap();
        b.build().unwrap()
    };
    let warned = generate(&def).unwrap();
    let unpatched: Vec<_> = warned
        .warnings()
        .iter()
        .filter(|w| matches!(w, MeshWarning::UnpatchedBoundaryFace { .. }))
        .collect();
    assert_eq!(unpatched.len(), 4);

    let ignored = generate_with(
        &def,
        &GenerationOptions {
            unpatched: UnpatchedFaces::Ignore,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(ignored.warnings().is_empty());
    assert_eq!(ignored.points_xyz(), warned.points_xyz());
}

#[test]
fn default_patch_name_must_be_free() {
    let mut b = pair();
    b.add_patch("walls", &[&[0, 1]]).unwrap();
    let options = GenerationOptions {
        unpatched: UnpatchedFaces::DefaultPatch("walls".into()),
        ..Default::default()
    };
    let err = generate_with(&b.build().unwrap(), &options).unwrap_err();
    assert_eq!(err, MeshError::DuplicatePatch("walls".into()));
}

#[test]
fn fully_patched_mesh_has_closed_boundary() {
    let mut b = pair();
    b.add_patch("walls", &[&[0, 1], &[1, 2], &[2, 5], &[5, 4], &[4, 3], &[3, 0]])
        .unwrap();
    let options = GenerationOptions {
        unpatched: UnpatchedFaces::Error,
        ..Default::default()
    };
    let mesh = generate_with(&b.build().unwrap(), &options).unwrap();
    assert_eq!(mesh.statistics().boundary_faces, 2 * (5 + 2));
    assert_outward(&mesh);
}

fn cube(face: &[u32]) -> Result<GlobalMesh, MeshError> {
    let mut b = two_cubes_points();
    b.add_block(0, &[0, 1, 2, 3, 4, 5, 6, 7], &[1, 2, 3], &[])
        .unwrap();
    b.add_patch("left", &[face]).unwrap();
    generate(&b.build().unwrap())
}

#[test]
fn hex_patch_face_must_follow_the_face_winding() {
    // Any starting corner, either direction.
    for face in [[0, 4, 7, 3], [7, 3, 0, 4], [3, 7, 4, 0], [4, 0, 3, 7]] {
        let mesh = cube(&face).unwrap();
        assert_eq!(mesh.patch("left").unwrap().faces.len(), 2 * 3);
    }
    // Same corners, but 0-7 and 3-4 are diagonals of the face.
    let err = cube(&[0, 7, 3, 4]).unwrap_err();
    assert_eq!(
        err,
        MeshError::CrossedPatchFace {
            patch: "left".into(),
            face_index: 0,
            corners: ids(&[0, 7, 3, 4]),
        }
    );
    assert!(matches!(cube(&[0, 3, 4, 7]), Err(MeshError::CrossedPatchFace { .. })));
}
