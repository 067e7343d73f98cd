//! The assembled global mesh handed to solvers and writers.
//!
//! A [`GlobalMesh`] is produced once per successful generation and is
//! immutable afterwards. It exposes:
//! - a deduplicated point list with stable indices,
//! - cell connectivity (fixed arity, consistent winding),
//! - named boundary patches, each an ordered list of outward-oriented
//!   [`BoundaryFace`]s carrying their owning cell,
//! - non-fatal [`MeshWarning`]s raised while generating.

use crate::geometry::quality::{aspect_ratio, signed_measure};
use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::{MeshError, MeshWarning};
use crate::topology::cell_type::CellType;
use crate::topology::point::BlockId;
use std::ops::Range;

/// One fine boundary face of the mesh.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BoundaryFace {
    /// Global point indices, outward oriented.
    pub vertices: Vec<usize>,
    /// Global index of the cell owning this face.
    pub cell: usize,
}

/// A named, ordered set of boundary faces.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Patch {
    pub name: String,
    pub faces: Vec<BoundaryFace>,
}

/// Summary numbers for a generated mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshStatistics {
    pub points: usize,
    pub cells: usize,
    pub boundary_faces: usize,
    /// `(name, face count)` in patch order.
    pub patch_faces: Vec<(String, usize)>,
    /// Axis-aligned bounds `(min, max)`; unused components are zero.
    pub bounding_box: ([f64; 3], [f64; 3]),
    /// Sum of signed cell areas/volumes.
    pub total_measure: f64,
    pub max_aspect_ratio: f64,
}

/// Deduplicated, globally numbered block mesh.
///
/// Deserializing a mesh runs the same invariant checks as generation, so a
/// loaded mesh upholds the guarantees of a generated one.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "MeshRecord")]
pub struct GlobalMesh {
    pub(crate) dimension: usize,
    pub(crate) cell_type: CellType,
    pub(crate) points: Vec<[f64; 3]>,
    /// Flat connectivity, `cell_type.vertex_count()` entries per cell.
    pub(crate) cells: Vec<usize>,
    pub(crate) cell_blocks: Vec<BlockId>,
    /// `(block, first cell, end cell)` in block declaration order.
    pub(crate) block_ranges: Vec<(BlockId, usize, usize)>,
    pub(crate) patches: Vec<Patch>,
    pub(crate) warnings: Vec<MeshWarning>,
}

#[derive(serde::Deserialize)]
struct MeshRecord {
    dimension: usize,
    cell_type: CellType,
    points: Vec<[f64; 3]>,
    cells: Vec<usize>,
    cell_blocks: Vec<BlockId>,
    block_ranges: Vec<(BlockId, usize, usize)>,
    patches: Vec<Patch>,
    warnings: Vec<MeshWarning>,
}

impl TryFrom<MeshRecord> for GlobalMesh {
    type Error = MeshError;

    fn try_from(record: MeshRecord) -> Result<Self, MeshError> {
        let mesh = GlobalMesh {
            dimension: record.dimension,
            cell_type: record.cell_type,
            points: record.points,
            cells: record.cells,
            cell_blocks: record.cell_blocks,
            block_ranges: record.block_ranges,
            patches: record.patches,
            warnings: record.warnings,
        };
        mesh.validate_invariants()?;
        Ok(mesh)
    }
}

static_assertions::assert_impl_all!(GlobalMesh: Send, Sync);

impl GlobalMesh {
    /// Spatial dimension (2 or 3).
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Type of every cell in the mesh.
    #[inline]
    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Coordinates of point `index`, `dimension()` components long.
    pub fn point(&self, index: usize) -> Option<&[f64]> {
        self.points.get(index).map(|p| &p[..self.dimension])
    }

    /// All points padded to three components.
    pub fn points_xyz(&self) -> &[[f64; 3]] {
        &self.points
    }

    /// Point coordinates as one flat array, `dimension()` values per point.
    pub fn coordinates(&self) -> Vec<f64> {
        self.points
            .iter()
            .flat_map(|p| p[..self.dimension].iter().copied())
            .collect()
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cell_blocks.len()
    }

    /// Global point indices of cell `index`.
    pub fn cell(&self, index: usize) -> Option<&[usize]> {
        let stride = self.cell_type.vertex_count();
        self.cells.get(index * stride..(index + 1) * stride)
    }

    /// Iterates cells in global order.
    pub fn cells(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.cells.chunks_exact(self.cell_type.vertex_count())
    }

    /// Flat connectivity array.
    pub fn connectivity(&self) -> &[usize] {
        &self.cells
    }

    /// Block that produced cell `index`.
    pub fn cell_block(&self, index: usize) -> Option<BlockId> {
        self.cell_blocks.get(index).copied()
    }

    /// Contiguous range of cells generated from `block`.
    pub fn block_cell_range(&self, block: BlockId) -> Option<Range<usize>> {
        self.block_ranges
            .iter()
            .find(|(id, _, _)| *id == block)
            .map(|&(_, start, end)| start..end)
    }

    /// Patches in declaration order (a default patch, if any, comes last).
    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    /// Patch by name.
    pub fn patch(&self, name: &str) -> Option<&Patch> {
        self.patches.iter().find(|p| p.name == name)
    }

    pub fn patch_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.patches.iter().map(|p| p.name.as_str())
    }

    /// Non-fatal findings from generation.
    pub fn warnings(&self) -> &[MeshWarning] {
        &self.warnings
    }

    /// Coordinates of every vertex of cell `index`.
    pub fn cell_vertices(&self, index: usize) -> Option<Vec<[f64; 3]>> {
        self.cell(index)
            .map(|cell| cell.iter().map(|&v| self.points[v]).collect())
    }

    /// Computes summary statistics.
    pub fn statistics(&self) -> MeshStatistics {
        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];
        for p in &self.points {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        if self.points.is_empty() {
            min = [0.0; 3];
            max = [0.0; 3];
        }
        let mut total_measure = 0.0;
        let mut max_aspect_ratio = 0.0f64;
        let mut buf = Vec::with_capacity(self.cell_type.vertex_count());
        for cell in self.cells() {
            buf.clear();
            buf.extend(cell.iter().map(|&v| self.points[v]));
            total_measure += signed_measure(self.cell_type, &buf);
            max_aspect_ratio = max_aspect_ratio.max(aspect_ratio(self.cell_type, &buf));
        }
        let patch_faces: Vec<(String, usize)> = self
            .patches
            .iter()
            .map(|p| (p.name.clone(), p.faces.len()))
            .collect();
        MeshStatistics {
            points: self.point_count(),
            cells: self.cell_count(),
            boundary_faces: patch_faces.iter().map(|(_, n)| n).sum(),
            patch_faces,
            bounding_box: (min, max),
            total_measure,
            max_aspect_ratio,
        }
    }
}
