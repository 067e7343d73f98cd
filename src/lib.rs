#![cfg_attr(docsrs, feature(doc_cfg))]
//! # block-mesher
//!
//! block-mesher generates block-structured quadrilateral (2D) and hexahedral
//! (3D) meshes for PDE codes. A handful of hand-placed control points, the
//! block topology over them, per-block subdivision counts, and per-edge
//! grading ratios are expanded into one connected mesh with no duplicated
//! points and named boundary patches.
//!
//! ## Features
//! - Transfinite interpolation with geometric and two-sided edge grading
//! - Stitching of neighbouring blocks by index identification, never by
//!   comparing coordinates
//! - Deterministic global numbering given the same input order
//! - Patch resolution into outward-oriented fine boundary faces with owning cells
//! - Optional parallel block expansion (`rayon` feature)
//! - Serde-serializable input description and legacy VTK output
//!
//! ## Usage
//!
//! ```
//! use block_mesher::prelude::*;
//!
//! let mut b = BlockMeshBuilder::new(2)?;
//! b.add_point(0, [0.0, 0.0])?;
//! b.add_point(1, [1.0, 0.0])?;
//! b.add_point(2, [1.0, 1.0])?;
//! b.add_point(3, [0.0, 1.0])?;
//! b.add_block(0, &[0, 1, 2, 3], &[4, 2], &[])?;
//! b.add_patch("wall", &[&[0, 1]])?;
//! let mesh = generate(&b.build()?)?;
//! assert_eq!(mesh.point_count(), 15);
//! assert_eq!(mesh.patch("wall").map(|p| p.faces.len()), Some(4));
//! # Ok::<(), MeshError>(())
//! ```

pub mod debug_invariants;
pub mod definition;
pub mod geometry;
pub mod io;
pub mod mesh;
pub mod mesh_error;
pub mod mesh_generation;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::definition::grading::EdgeGrading;
    pub use crate::definition::{
        BlockMeshBuilder, BlockMeshDefinition, BlockMeshDescription,
    };
    pub use crate::io::MeshWriter;
    pub use crate::io::vtk::VtkWriter;
    pub use crate::mesh::{BoundaryFace, GlobalMesh, MeshStatistics, Patch};
    pub use crate::mesh_error::{MeshError, MeshWarning};
    pub use crate::mesh_generation::{
        GenerationOptions, UnpatchedFaces, generate, generate_with,
    };
    pub use crate::topology::cell_type::CellType;
    pub use crate::topology::point::{BlockId, ControlPointId};
}
