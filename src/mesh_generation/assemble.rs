//! Global numbering and cell assembly.
//!
//! Blocks are visited in declaration order and their points in local order.
//! A shareable point takes the global index of the first block that produced
//! it; every other point gets a fresh index. The resulting numbering depends
//! only on the input order, never on hashing or thread scheduling.
//!
//! Geometry checks run on the assembled cells, so a cell is measured with
//! the stitched coordinates it actually ends up with.

use crate::geometry::quality::{is_degenerate, signed_measure};
use crate::mesh_error::MeshWarning;
use crate::mesh_generation::GenerationOptions;
use crate::mesh_generation::connectivity::{PointKey, point_key};
use crate::mesh_generation::expand::LocalGrid;
use crate::topology::cell_type::CellType;
use crate::topology::point::{BlockId, ControlPointId};
use hashbrown::HashMap;

/// Output of the sequential assembly step.
#[derive(Clone, Debug)]
pub struct Assembly {
    pub points: Vec<[f64; 3]>,
    pub cells: Vec<usize>,
    pub cell_blocks: Vec<BlockId>,
    /// `(block, first cell, end cell)` per block.
    pub block_ranges: Vec<(BlockId, usize, usize)>,
    /// Local-to-global point map per block.
    pub local_to_global: Vec<Vec<usize>>,
    pub warnings: Vec<MeshWarning>,
}

impl Assembly {
    /// First global cell index of block `b` (declaration position).
    pub fn cell_offset(&self, b: usize) -> usize {
        self.block_ranges[b].1
    }
}

/// Merges the local grids of all blocks into one globally numbered mesh.
///
/// `block_corners[b]` are the corner ids of the block that produced `grids[b]`.
pub fn assemble(
    cell_type: CellType,
    grids: &[LocalGrid],
    block_corners: &[&[ControlPointId]],
    options: &GenerationOptions,
) -> Assembly {
    let total_points: usize = grids.iter().map(LocalGrid::point_count).sum();
    let total_cells: usize = grids.iter().map(LocalGrid::cell_count).sum();
    let mut shared: HashMap<PointKey, usize> = HashMap::new();
    let mut points = Vec::with_capacity(total_points);
    let mut local_to_global = Vec::with_capacity(grids.len());

    for (grid, corners) in grids.iter().zip(block_corners) {
        let mut map = Vec::with_capacity(grid.point_count());
        let np = [grid.n[0] + 1, grid.n[1] + 1, grid.n[2] + 1];
        for k in 0..np[2] {
            for j in 0..np[1] {
                for i in 0..np[0] {
                    let local = grid.point_index([i, j, k]);
                    let global = match point_key(cell_type, corners, grid.n, [i, j, k]) {
                        Some(key) => *shared.entry(key).or_insert_with(|| {
                            points.push(grid.points[local]);
                            points.len() - 1
                        }),
                        None => {
                            points.push(grid.points[local]);
                            points.len() - 1
                        }
                    };
                    map.push(global);
                }
            }
        }
        local_to_global.push(map);
    }

    let mut cells = Vec::with_capacity(total_cells * cell_type.vertex_count());
    let mut cell_blocks = Vec::with_capacity(total_cells);
    let mut block_ranges = Vec::with_capacity(grids.len());
    let mut warnings = Vec::new();
    for (grid, map) in grids.iter().zip(&local_to_global) {
        let start = cell_blocks.len();
        cells.extend(grid.cells.iter().map(|&v| map[v]));
        cell_blocks.extend(std::iter::repeat_n(grid.block, grid.cell_count()));
        let end = cell_blocks.len();
        block_ranges.push((grid.block, start, end));
    }

    let stride = cell_type.vertex_count();
    if options.check_geometry {
        let mut vertices = Vec::with_capacity(stride);
        for (cell, ids) in cells.chunks_exact(stride).enumerate() {
            vertices.clear();
            vertices.extend(ids.iter().map(|&v| points[v]));
            let measure = signed_measure(cell_type, &vertices);
            if is_degenerate(measure, options.degenerate_tolerance) {
                let warning = MeshWarning::DegenerateGeometry {
                    block: cell_blocks[cell],
                    cell,
                    measure,
                };
                log::warn!("{warning}");
                warnings.push(warning);
            }
        }
    }

    log::debug!(
        "assembled {} blocks: {} local points -> {} global points, {} cells",
        grids.len(),
        total_points,
        points.len(),
        cell_blocks.len()
    );

    Assembly {
        points,
        cells,
        cell_blocks,
        block_ranges,
        local_to_global,
        warnings,
    }
}
