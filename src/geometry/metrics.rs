//! Reference-element mappings for tensor-product cells.
//!
//! The reference elements use the corner ordering of
//! [`CellType`](crate::topology::cell_type::CellType):
//! - Quadrilateral: `[v0, v1, v2, v3]` with `(ξ, η)` in `[0, 1]^2`.
//! - Hexahedron: `[v0, ..., v7]` with `(ξ, η, ζ)` in `[0, 1]^3`.
//!
//! Blocks are filled by evaluating the same multilinear map at the graded
//! parametric positions of each grid point.

use crate::topology::cell_type::CellType;

/// Multilinear shape function weights at `reference_point`.
///
/// Returns one weight per corner; only the first `2^dim` entries are used.
/// Missing reference components are treated as zero.
pub fn shape_weights(cell_type: CellType, reference_point: &[f64]) -> [f64; 8] {
    let dim = cell_type.dimension();
    let mut weights = [0.0; 8];
    for (corner, w) in weights.iter_mut().enumerate().take(cell_type.vertex_count()) {
        let pos = cell_type.corner_position(corner);
        *w = (0..dim)
            .map(|axis| {
                let t = reference_point.get(axis).copied().unwrap_or(0.0);
                if pos[axis] == 1 { t } else { 1.0 - t }
            })
            .product();
    }
    weights
}

/// Map a point in reference coordinates to physical coordinates.
///
/// `vertices` must hold at least `2^dim` corners.
pub fn reference_to_physical(
    cell_type: CellType,
    vertices: &[[f64; 3]],
    reference_point: &[f64],
) -> [f64; 3] {
    let weights = shape_weights(cell_type, reference_point);
    let mut out = [0.0; 3];
    for (weight, vertex) in weights.iter().zip(vertices.iter()) {
        out[0] += weight * vertex[0];
        out[1] += weight * vertex[1];
        out[2] += weight * vertex[2];
    }
    out
}
