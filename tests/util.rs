#![allow(dead_code)]
use block_mesher::prelude::*;

/// Two unit squares side by side, sharing edge 1-4:
///
/// ```text
/// 3 --- 4 --- 5
/// |  0  |  1  |
/// 0 --- 1 --- 2
/// ```
pub fn two_squares() -> BlockMeshBuilder {
    let mut b = BlockMeshBuilder::new(2).unwrap();
    for (id, xy) in [
        (0, [0.0, 0.0]),
        (1, [1.0, 0.0]),
        (2, [2.0, 0.0]),
        (3, [0.0, 1.0]),
        (4, [1.0, 1.0]),
        (5, [2.0, 1.0]),
    ] {
        b.add_point(id, xy).unwrap();
    }
    b
}

/// Unit cube corners 0..8 plus the cube at `x in [1, 2]` (ids 8..12).
pub fn two_cubes_points() -> BlockMeshBuilder {
    let mut b = BlockMeshBuilder::new(3).unwrap();
    for (id, xyz) in [
        (0, [0.0, 0.0, 0.0]),
        (1, [1.0, 0.0, 0.0]),
        (2, [1.0, 1.0, 0.0]),
        (3, [0.0, 1.0, 0.0]),
        (4, [0.0, 0.0, 1.0]),
        (5, [1.0, 0.0, 1.0]),
        (6, [1.0, 1.0, 1.0]),
        (7, [0.0, 1.0, 1.0]),
        (8, [2.0, 0.0, 0.0]),
        (9, [2.0, 1.0, 0.0]),
        (10, [2.0, 0.0, 1.0]),
        (11, [2.0, 1.0, 1.0]),
    ] {
        b.add_point(id, xyz).unwrap();
    }
    b
}

/// Laminar flat plate layout: 12 points, 6 blocks of 20x10 cells, 6 patches.
pub fn flat_plate() -> BlockMeshDefinition {
    let mut b = BlockMeshBuilder::new(2).unwrap();
    for (id, xy) in [
        (0, [0.0, 0.0]),
        (1, [1.0, 0.0]),
        (2, [0.0, 0.2]),
        (3, [1.0, 0.2]),
        (4, [0.0, 1.1]),
        (5, [1.0, 1.2]),
        (6, [2.0, 0.0]),
        (7, [2.0, 0.2]),
        (8, [2.0, 1.3]),
        (9, [-1.0, 0.0]),
        (10, [-1.0, 0.2]),
        (11, [-1.0, 1.0]),
    ] {
        b.add_point(id, xy).unwrap();
    }
    let near = [
        EdgeGrading::UNIFORM,
        EdgeGrading::UNIFORM,
        EdgeGrading::Ratio(5.0),
        EdgeGrading::Ratio(5.0),
    ];
    let far = [
        EdgeGrading::UNIFORM,
        EdgeGrading::UNIFORM,
        EdgeGrading::Ratio(10.0),
        EdgeGrading::Ratio(10.0),
    ];
    let blocks: [(u32, [u32; 4], &[EdgeGrading]); 6] = [
        (0, [0, 1, 3, 2], &near),
        (1, [2, 3, 5, 4], &far),
        (2, [1, 6, 7, 3], &near),
        (3, [3, 7, 8, 5], &far),
        (4, [9, 0, 2, 10], &near),
        (5, [10, 2, 4, 11], &far),
    ];
    for (id, corners, grading) in blocks {
        b.add_block(id, &corners, &[20, 10], grading).unwrap();
    }
    b.add_patch("inlet", &[&[10, 9], &[11, 10]]).unwrap();
    b.add_patch("bottom1", &[&[0, 1]]).unwrap();
    b.add_patch("bottom2", &[&[1, 6]]).unwrap();
    b.add_patch("bottom3", &[&[9, 0]]).unwrap();
    b.add_patch("outlet", &[&[6, 7], &[7, 8]]).unwrap();
    b.add_patch("top", &[&[5, 4], &[8, 5], &[4, 11]]).unwrap();
    b.build().unwrap()
}

pub fn centroid(points: &[[f64; 3]]) -> [f64; 3] {
    let n = points.len() as f64;
    let mut c = [0.0; 3];
    for p in points {
        for axis in 0..3 {
            c[axis] += p[axis] / n;
        }
    }
    c
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Unnormalized face normal implied by the vertex order.
pub fn face_normal(mesh: &GlobalMesh, face: &BoundaryFace) -> [f64; 3] {
    let p: Vec<[f64; 3]> = face.vertices.iter().map(|&v| mesh.points_xyz()[v]).collect();
    match p.len() {
        // Edge a -> b of a counter-clockwise cell: outward is (dy, -dx).
        2 => [p[1][1] - p[0][1], p[0][0] - p[1][0], 0.0],
        4 => cross(sub(p[2], p[0]), sub(p[3], p[1])),
        n => panic!("unexpected face arity {n}"),
    }
}

/// Asserts every patch face points away from its owning cell.
pub fn assert_outward(mesh: &GlobalMesh) {
    for patch in mesh.patches() {
        for face in &patch.faces {
            let cell = centroid(&mesh.cell_vertices(face.cell).unwrap());
            let pts: Vec<[f64; 3]> = face.vertices.iter().map(|&v| mesh.points_xyz()[v]).collect();
            let d = sub(centroid(&pts), cell);
            let n = face_normal(mesh, face);
            let dot = n[0] * d[0] + n[1] * d[1] + n[2] * d[2];
            assert!(dot > 0.0, "patch {} face {:?} points inward", patch.name, face);
        }
    }
}

/// Asserts no two mesh points coincide.
pub fn assert_no_duplicate_points(mesh: &GlobalMesh) {
    let mut keys: Vec<[i64; 3]> = mesh
        .points_xyz()
        .iter()
        .map(|p| p.map(|c| (c * 1e9).round() as i64))
        .collect();
    keys.sort_unstable();
    let before = keys.len();
    keys.dedup();
    assert_eq!(keys.len(), before, "mesh contains coincident points");
}
