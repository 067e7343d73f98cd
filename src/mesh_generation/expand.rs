//! Block expansion: one block in, one structured local grid out.
//!
//! Each grid point gets a parametric position per axis by blending the
//! graded distributions of that axis' parallel edges, weighted by the
//! uniform index fractions of the other axes. On a block edge the blend
//! reduces to that edge's own distribution, and on a block face it only
//! involves the face's own edges, so neighbouring blocks with matching edge
//! gradings produce the same interface points. The physical position is the
//! multilinear blend of the block corners at that parametric position.
//!
//! Expansion depends only on the block's own data and may run concurrently.

use crate::definition::Block;
use crate::geometry::metrics::reference_to_physical;
use crate::mesh_error::MeshError;
use crate::topology::cell_type::CellType;
use crate::topology::point::BlockId;

/// Structured grid of one block, before global numbering.
///
/// Points are numbered with `i` fastest, then `j`, then `k`; cells likewise.
#[derive(Clone, Debug)]
pub struct LocalGrid {
    pub block: BlockId,
    pub cell_type: CellType,
    /// Cells per axis; axes beyond the dimension hold zero.
    pub n: [usize; 3],
    pub points: Vec<[f64; 3]>,
    /// Flat local connectivity, `cell_type.vertex_count()` entries per cell.
    pub cells: Vec<usize>,
}

impl LocalGrid {
    /// Local index of grid point `(i, j, k)`.
    #[inline]
    pub fn point_index(&self, idx: [usize; 3]) -> usize {
        idx[0] + (self.n[0] + 1) * (idx[1] + (self.n[1] + 1) * idx[2])
    }

    /// Local index of the cell whose lowest corner is `(i, j, k)`.
    #[inline]
    pub fn cell_index(&self, base: [usize; 3]) -> usize {
        base[0] + self.n[0] * (base[1] + self.n[1] * base[2])
    }

    /// Cells along each axis, with unused axes reported as one layer.
    #[inline]
    pub fn cell_layers(&self) -> [usize; 3] {
        [self.n[0].max(1), self.n[1].max(1), self.n[2].max(1)]
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len() / self.cell_type.vertex_count()
    }

    /// Local point indices of cell `index`.
    pub fn cell(&self, index: usize) -> &[usize] {
        let stride = self.cell_type.vertex_count();
        &self.cells[index * stride..(index + 1) * stride]
    }
}

/// Expands `block` with corner coordinates `corners` into its local grid.
pub fn expand_block(
    cell_type: CellType,
    block: &Block,
    corners: &[[f64; 3]],
) -> Result<LocalGrid, MeshError> {
    let dim = cell_type.dimension();
    let id = block.id();
    if corners.len() != cell_type.vertex_count() {
        return Err(MeshError::DimensionMismatch {
            what: format!("block {id} corner coordinates"),
            expected: cell_type.vertex_count(),
            found: corners.len(),
        });
    }
    let mut n = [0usize; 3];
    for (axis, &count) in block.subdivisions().iter().enumerate() {
        if count < 1 {
            return Err(MeshError::InvalidSubdivision {
                block: id,
                axis,
                count,
            });
        }
        n[axis] = count;
    }
    for g in block.edge_gradings() {
        g.validate()
            .map_err(|reason| MeshError::InvalidGrading { block: id, reason })?;
    }

    let per_axis = cell_type.edges_per_axis();
    let edges = cell_type.edges();
    let distributions: Vec<Vec<f64>> = block
        .edge_gradings()
        .iter()
        .enumerate()
        .map(|(e, g)| g.distribution(n[e / per_axis]))
        .collect();
    let edge_sides: Vec<[usize; 3]> = edges
        .iter()
        .map(|&(start, _)| cell_type.corner_position(start))
        .collect();

    let np = [n[0] + 1, n[1] + 1, n[2] + 1];
    let mut points = Vec::with_capacity(np[0] * np[1] * np[2]);
    for k in 0..np[2] {
        for j in 0..np[1] {
            for i in 0..np[0] {
                let idx = [i, j, k];
                let mut frac = [0.0; 3];
                for axis in 0..dim {
                    frac[axis] = idx[axis] as f64 / n[axis] as f64;
                }
                let mut t = [0.0; 3];
                for axis in 0..dim {
                    for e in axis * per_axis..(axis + 1) * per_axis {
                        let weight: f64 = (0..dim)
                            .filter(|&b| b != axis)
                            .map(|b| {
                                if edge_sides[e][b] == 1 {
                                    frac[b]
                                } else {
                                    1.0 - frac[b]
                                }
                            })
                            .product();
                        t[axis] += weight * distributions[e][idx[axis]];
                    }
                }
                points.push(reference_to_physical(cell_type, corners, &t[..dim]));
            }
        }
    }

    let mut grid = LocalGrid {
        block: id,
        cell_type,
        n,
        points,
        cells: Vec::with_capacity(block.cell_count() * cell_type.vertex_count()),
    };
    let layers = grid.cell_layers();
    let offsets: Vec<[usize; 3]> = (0..cell_type.vertex_count())
        .map(|c| cell_type.corner_position(c))
        .collect();
    for k in 0..layers[2] {
        for j in 0..layers[1] {
            for i in 0..layers[0] {
                for off in &offsets {
                    let v = grid.point_index([i + off[0], j + off[1], k + off[2]]);
                    grid.cells.push(v);
                }
            }
        }
    }
    Ok(grid)
}
