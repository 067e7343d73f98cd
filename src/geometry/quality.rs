//! Cell quality utilities for generated quadrilaterals and hexahedra.
//!
//! # Coordinate layout
//! Vertices are passed as `[x, y, z]`; 2D meshes live in the XY plane with
//! `z = 0` and their measure is the signed XY area.
//!
//! # Supported cell types
//! - **Quadrilateral**: `[v0, v1, v2, v3]` (counter-clockwise in XY).
//! - **Hexahedron**: `[v0, ..., v7]` with bottom face `[0, 1, 2, 3]` and top
//!   face `[4, 5, 6, 7]`.
//!
//! # Examples
//! ```rust
//! use block_mesher::geometry::quality::{cell_quality, signed_measure};
//! use block_mesher::topology::cell_type::CellType;
//!
//! let quad = [[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 1.0, 0.0], [0.0, 1.0, 0.0]];
//! assert!((signed_measure(CellType::Quadrilateral, &quad) - 2.0).abs() < 1e-12);
//! let quality = cell_quality(CellType::Quadrilateral, &quad);
//! assert!((quality.aspect_ratio - 2.0).abs() < 1e-12);
//! ```

use crate::topology::cell_type::CellType;

/// Basic quality metrics for a single cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellQuality {
    /// Ratio of the longest edge length to the shortest edge length.
    pub aspect_ratio: f64,
    /// Signed area (2D) or volume (3D). Negative values indicate inverted
    /// orientation; zero indicates degenerate geometry.
    pub measure: f64,
}

/// Compute quality metrics from explicit vertex coordinates.
pub fn cell_quality(cell_type: CellType, vertices: &[[f64; 3]]) -> CellQuality {
    CellQuality {
        aspect_ratio: aspect_ratio(cell_type, vertices),
        measure: signed_measure(cell_type, vertices),
    }
}

/// Signed area/volume of a cell.
pub fn signed_measure(cell_type: CellType, vertices: &[[f64; 3]]) -> f64 {
    match cell_type {
        CellType::Quadrilateral => {
            signed_area_xy(vertices[0], vertices[1], vertices[2])
                + signed_area_xy(vertices[0], vertices[2], vertices[3])
        }
        CellType::Hexahedron => hex_signed_volume(vertices),
    }
}

/// `true` when `measure` is non-finite or not above `tolerance`.
pub fn is_degenerate(measure: f64, tolerance: f64) -> bool {
    !measure.is_finite() || measure <= tolerance
}

/// Longest over shortest cell edge; infinite when an edge collapses.
pub fn aspect_ratio(cell_type: CellType, vertices: &[[f64; 3]]) -> f64 {
    let edges: &[(usize, usize)] = match cell_type {
        CellType::Quadrilateral => &QUAD_EDGES,
        CellType::Hexahedron => &HEX_EDGES,
    };
    let mut min_len = f64::INFINITY;
    let mut max_len = 0.0f64;
    for &(a, b) in edges {
        let len = norm(sub(vertices[a], vertices[b]));
        min_len = min_len.min(len);
        max_len = max_len.max(len);
    }
    if min_len <= 0.0 {
        f64::INFINITY
    } else {
        max_len / min_len
    }
}

fn signed_area_xy(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> f64 {
    let abx = b[0] - a[0];
    let aby = b[1] - a[1];
    let acx = c[0] - a[0];
    let acy = c[1] - a[1];
    0.5 * (abx * acy - aby * acx)
}

fn signed_volume(a: [f64; 3], b: [f64; 3], c: [f64; 3], d: [f64; 3]) -> f64 {
    let ab = sub(b, a);
    let ac = sub(c, a);
    let ad = sub(d, a);
    dot(ab, cross(ac, ad)) / 6.0
}

fn hex_signed_volume(vertices: &[[f64; 3]]) -> f64 {
    signed_volume(vertices[0], vertices[1], vertices[3], vertices[4])
        + signed_volume(vertices[1], vertices[2], vertices[3], vertices[6])
        + signed_volume(vertices[1], vertices[3], vertices[4], vertices[6])
        + signed_volume(vertices[1], vertices[4], vertices[5], vertices[6])
        + signed_volume(vertices[3], vertices[4], vertices[6], vertices[7])
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

const QUAD_EDGES: [(usize, usize); 4] = [(0, 1), (1, 2), (2, 3), (3, 0)];
const HEX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];
