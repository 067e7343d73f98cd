//! Block-structured mesh generation.
//!
//! [`generate`] turns a validated [`BlockMeshDefinition`] into a
//! [`GlobalMesh`]:
//! 1. block connectivity is built and shared edges are checked for matching
//!    subdivision counts and gradings,
//! 2. patch faces are resolved against block boundary faces,
//! 3. every block is expanded into a local structured grid (in parallel with
//!    the `rayon` feature),
//! 4. local grids are stitched into one globally numbered mesh and the
//!    stitched cells are checked for degenerate geometry,
//! 5. patches are expanded into fine boundary faces.
//!
//! Steps 1 and 2 run before any expansion, so inconsistent input fails
//! without allocating the fine grid.

pub mod assemble;
pub mod connectivity;
pub mod expand;
pub mod patches;

use crate::definition::BlockMeshDefinition;
use crate::mesh::GlobalMesh;
use crate::mesh_error::MeshError;
use crate::mesh_generation::assemble::assemble;
use crate::mesh_generation::connectivity::BlockConnectivity;
use crate::mesh_generation::expand::{LocalGrid, expand_block};
use crate::mesh_generation::patches::{expand_patches, resolve_patch_faces};
use crate::topology::point::ControlPointId;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// What to do with block boundary faces that no patch claims.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum UnpatchedFaces {
    /// Leave them out of every patch.
    Ignore,
    /// Leave them out and record a [`MeshWarning`](crate::mesh_error::MeshWarning).
    #[default]
    Warn,
    /// Fail with [`MeshError::UnpatchedBoundaryFace`].
    Error,
    /// Collect them into an extra patch with this name, appended last.
    DefaultPatch(String),
}

/// Optional configuration for mesh generation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    pub unpatched: UnpatchedFaces,
    /// Compute signed cell measures and warn on degenerate cells.
    pub check_geometry: bool,
    /// Cells with measure at or below this value are reported as degenerate.
    pub degenerate_tolerance: f64,
    /// Expand blocks on the rayon thread pool. Ignored without the `rayon`
    /// feature; the mesh is the same either way.
    pub parallel: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            unpatched: UnpatchedFaces::Warn,
            check_geometry: true,
            degenerate_tolerance: 1e-12,
            parallel: true,
        }
    }
}

/// Generates the global mesh with default [`GenerationOptions`].
pub fn generate(def: &BlockMeshDefinition) -> Result<GlobalMesh, MeshError> {
    generate_with(def, &GenerationOptions::default())
}

/// Generates the global mesh.
///
/// The result is identical for identical input, whether or not blocks are
/// expanded in parallel.
pub fn generate_with(
    def: &BlockMeshDefinition,
    options: &GenerationOptions,
) -> Result<GlobalMesh, MeshError> {
    let cell_type = def.cell_type();
    let connectivity = BlockConnectivity::build(def)?;
    log::debug!(
        "{} blocks, {} interior block faces",
        def.blocks().len(),
        connectivity.interior_face_count()
    );
    let (resolved, mut warnings) =
        resolve_patch_faces(def, &connectivity, &options.unpatched)?;

    let grids = expand_blocks(def, options.parallel)?;
    let block_corners: Vec<&[ControlPointId]> =
        def.blocks().iter().map(|b| b.corners()).collect();
    let assembly = assemble(cell_type, &grids, &block_corners, options);
    let patches = expand_patches(cell_type, &resolved, &grids, &assembly);

    warnings.extend(assembly.warnings);
    log::debug!(
        "generated mesh: {} points, {} cells, {} patches, {} warnings",
        assembly.points.len(),
        assembly.cell_blocks.len(),
        patches.len(),
        warnings.len()
    );
    let mesh = GlobalMesh {
        dimension: def.dimension(),
        cell_type,
        points: assembly.points,
        cells: assembly.cells,
        cell_blocks: assembly.cell_blocks,
        block_ranges: assembly.block_ranges,
        patches,
        warnings,
    };
    crate::debug_invariants!(
        crate::debug_invariants::DebugInvariants::validate_invariants(&mesh),
        "generated mesh"
    );
    Ok(mesh)
}

fn expand_one(def: &BlockMeshDefinition, index: usize) -> Result<LocalGrid, MeshError> {
    let block = &def.blocks()[index];
    let corners = block
        .corners()
        .iter()
        .map(|&c| def.point_xyz(c))
        .collect::<Result<Vec<_>, _>>()?;
    expand_block(def.cell_type(), block, &corners)
}

fn expand_serial(def: &BlockMeshDefinition) -> Result<Vec<LocalGrid>, MeshError> {
    (0..def.blocks().len())
        .map(|b| expand_one(def, b))
        .collect()
}

#[cfg(feature = "rayon")]
fn expand_blocks(def: &BlockMeshDefinition, parallel: bool) -> Result<Vec<LocalGrid>, MeshError> {
    if !parallel {
        return expand_serial(def);
    }
    (0..def.blocks().len())
        .into_par_iter()
        .map(|b| expand_one(def, b))
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn expand_blocks(def: &BlockMeshDefinition, _parallel: bool) -> Result<Vec<LocalGrid>, MeshError> {
    expand_serial(def)
}
