use crate::mesh::GlobalMesh;
use crate::mesh_error::MeshError;
use itertools::Itertools;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), MeshError>;
}

/// Helper macro to run a fallible check and panic on error when invariant
/// checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}

impl DebugInvariants for GlobalMesh {
    fn debug_assert_invariants(&self) {
        debug_invariants!(self.validate_invariants(), "GlobalMesh");
    }

    fn validate_invariants(&self) -> Result<(), MeshError> {
        let violation =
            |msg: String| -> Result<(), MeshError> { Err(MeshError::InvariantViolation(msg)) };
        let stride = self.cell_type.vertex_count();
        let n_points = self.points.len();
        let n_cells = self.cell_blocks.len();

        if self.dimension != self.cell_type.dimension() {
            return violation(format!(
                "dimension {} does not match {:?} cells",
                self.dimension, self.cell_type
            ));
        }
        if let Some(p) = self.points.iter().position(|x| x.iter().any(|c| !c.is_finite())) {
            return violation(format!("point {p} has a non-finite coordinate"));
        }
        if self.cells.len() != n_cells * stride {
            return violation(format!(
                "connectivity holds {} entries for {n_cells} cells of arity {stride}",
                self.cells.len()
            ));
        }
        for (c, cell) in self.cells.chunks_exact(stride).enumerate() {
            if let Some(&v) = cell.iter().find(|&&v| v >= n_points) {
                return violation(format!("cell {c} references point {v} of {n_points}"));
            }
            if !cell.iter().all_unique() {
                return violation(format!("cell {c} repeats a vertex: {cell:?}"));
            }
        }

        let mut next = 0;
        for &(block, start, end) in &self.block_ranges {
            if start != next || end < start || end > n_cells {
                return violation(format!(
                    "block {block} cell range {start}..{end} is not contiguous"
                ));
            }
            if self.cell_blocks[start..end].iter().any(|&b| b != block) {
                return violation(format!(
                    "cells {start}..{end} are not all from block {block}"
                ));
            }
            next = end;
        }
        if next != n_cells {
            return violation(format!("block ranges cover {next} of {n_cells} cells"));
        }

        let face_arity = stride / 2;
        let mut seen = hashbrown::HashMap::new();
        for patch in &self.patches {
            for face in &patch.faces {
                if face.vertices.len() != face_arity {
                    return violation(format!(
                        "patch {} has a face with {} vertices",
                        patch.name,
                        face.vertices.len()
                    ));
                }
                if face.cell >= n_cells {
                    return violation(format!(
                        "patch {} face owned by missing cell {}",
                        patch.name, face.cell
                    ));
                }
                let owner = &self.cells[face.cell * stride..(face.cell + 1) * stride];
                if !face.vertices.iter().all(|v| owner.contains(v)) {
                    return violation(format!(
                        "patch {} face {:?} is not on cell {}",
                        patch.name, face.vertices, face.cell
                    ));
                }
                let key: Vec<usize> = face.vertices.iter().copied().sorted_unstable().collect();
                if let Some(first) = seen.insert(key, patch.name.as_str()) {
                    return violation(format!(
                        "face {:?} is in patches {first} and {}",
                        face.vertices, patch.name
                    ));
                }
            }
        }
        Ok(())
    }
}
