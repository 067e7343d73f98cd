//! MeshError: Unified error type for block-mesher public APIs
//!
//! Every fatal condition aborts generation; no partial mesh is ever returned.
//! Variants carry enough context (block, patch, face) to locate the offending
//! input record. Non-fatal findings are reported as [`MeshWarning`] on the
//! generated mesh instead.

use crate::topology::point::{BlockId, ControlPointId};
use thiserror::Error;

/// Unified error type for block-mesher operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// Grading ratio is non-positive, not finite, or the grading list has the wrong length.
    #[error("Invalid grading on block {block}: {reason}")]
    InvalidGrading { block: BlockId, reason: String },
    /// A block axis was given fewer than one subdivision.
    #[error("Invalid subdivision on block {block}: axis {axis} has {count} cells (must be >= 1)")]
    InvalidSubdivision {
        block: BlockId,
        axis: usize,
        count: usize,
    },
    /// A patch face does not coincide with any block face.
    #[error("Patch `{patch}` face {face_index} {corners:?} matches no block face")]
    UnresolvedPatchFace {
        patch: String,
        face_index: usize,
        corners: Vec<ControlPointId>,
    },
    /// A patch face has the corners of a block face but not in a winding order.
    #[error("Patch `{patch}` face {face_index} {corners:?} does not list its corners around the face")]
    CrossedPatchFace {
        patch: String,
        face_index: usize,
        corners: Vec<ControlPointId>,
    },
    /// A patch face lies between two blocks.
    #[error("Patch `{patch}` face {face_index} {corners:?} is shared by blocks {blocks:?}")]
    PatchOnInteriorFace {
        patch: String,
        face_index: usize,
        corners: Vec<ControlPointId>,
        blocks: [BlockId; 2],
    },
    /// The same block face was claimed more than once by patches.
    #[error("Block face {corners:?} claimed by patch `{first}` and again by patch `{second}`")]
    DuplicatePatchFace {
        corners: Vec<ControlPointId>,
        first: String,
        second: String,
    },
    /// Two blocks disagree on the number of cells along a shared edge.
    #[error(
        "Subdivision mismatch on edge {a}-{b}: block {first_block} has {first} cells, block {second_block} has {second}"
    )]
    SubdivisionMismatch {
        a: ControlPointId,
        b: ControlPointId,
        first_block: BlockId,
        first: usize,
        second_block: BlockId,
        second: usize,
    },
    /// Two blocks grade a shared edge differently, so its points would not coincide.
    #[error(
        "Grading mismatch on edge {a}-{b}: blocks {first_block} and {second_block} place its points up to {deviation} apart in edge parameter"
    )]
    GradingMismatch {
        a: ControlPointId,
        b: ControlPointId,
        first_block: BlockId,
        second_block: BlockId,
        deviation: f64,
    },
    /// A block references a missing control point, or a patch a missing point.
    #[error("Dangling reference: {owner} references missing control point {point}")]
    DanglingReference { owner: String, point: ControlPointId },
    /// Coordinates or records have a dimension other than the mesh dimension.
    #[error("Dimension mismatch for {what}: expected {expected}, got {found}")]
    DimensionMismatch {
        what: String,
        expected: usize,
        found: usize,
    },
    /// A control point coordinate is NaN or infinite.
    #[error("Control point {0} has a non-finite coordinate")]
    NonFiniteCoordinate(ControlPointId),
    /// An id or name was registered twice.
    #[error("Duplicate definition: {0}")]
    DuplicateId(String),
    /// A patch name was registered twice or is empty.
    #[error("Duplicate or empty patch name `{0}`")]
    DuplicatePatch(String),
    /// A face or block has the wrong arity or repeated corners.
    #[error("Invalid face: {0}")]
    InvalidFace(String),
    /// A block face is shared by more than two blocks.
    #[error("Block face {corners:?} is shared by {count} blocks")]
    NonManifoldFace {
        corners: Vec<ControlPointId>,
        count: usize,
    },
    /// A boundary block face is in no patch while unpatched faces are rejected.
    #[error("Block {block} face {corners:?} is on the boundary but in no patch")]
    UnpatchedBoundaryFace {
        block: BlockId,
        corners: Vec<ControlPointId>,
    },
    /// The definition contains no blocks.
    #[error("Block mesh definition contains no blocks")]
    EmptyDefinition,
    /// Output writer failure.
    #[error("I/O error: {0}")]
    Io(String),
    /// A mesh invariant was violated.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

impl From<std::io::Error> for MeshError {
    fn from(err: std::io::Error) -> Self {
        MeshError::Io(err.to_string())
    }
}

/// Non-fatal findings produced during generation.
#[derive(Debug, Error, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum MeshWarning {
    /// A generated cell has zero, negative, or non-finite area/volume.
    #[error("degenerate geometry in block {block}: cell {cell} has measure {measure}")]
    DegenerateGeometry {
        block: BlockId,
        /// Global cell index.
        cell: usize,
        measure: f64,
    },
    /// A boundary block face belongs to no patch.
    #[error("block {block} boundary face {corners:?} is in no patch")]
    UnpatchedBoundaryFace {
        block: BlockId,
        corners: Vec<ControlPointId>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_display_their_location() {
        let w = MeshWarning::DegenerateGeometry {
            block: BlockId::new(2),
            cell: 17,
            measure: -0.5,
        };
        assert_eq!(
            w.to_string(),
            "degenerate geometry in block 2: cell 17 has measure -0.5"
        );
        let w = MeshWarning::UnpatchedBoundaryFace {
            block: BlockId::new(0),
            corners: vec![ControlPointId::new(3), ControlPointId::new(0)],
        };
        assert_eq!(w.to_string(), "block 0 boundary face [p3, p0] is in no patch");
        let _: &dyn std::error::Error = &w;
    }

    #[test]
    fn grading_mismatch_names_the_edge() {
        let err = MeshError::GradingMismatch {
            a: ControlPointId::new(1),
            b: ControlPointId::new(4),
            first_block: BlockId::new(0),
            second_block: BlockId::new(1),
            deviation: 0.25,
        };
        assert!(err.to_string().starts_with("Grading mismatch on edge 1-4: blocks 0 and 1"));
    }
}
