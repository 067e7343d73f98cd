//! Patch resolution: declared patch faces → concrete fine boundary faces.
//!
//! Resolution runs in two phases. [`resolve_patch_faces`] maps every declared
//! face onto exactly one boundary block face before any expansion happens,
//! so bad patch input fails fast. A declared face must list the block face's
//! corners in winding order, starting anywhere and in either direction. [`expand_patches`] then walks the boundary
//! layer of each claimed block face and emits the fine faces with their
//! owning cells, in patch declaration order.

use crate::definition::BlockMeshDefinition;
use crate::mesh::{BoundaryFace, Patch};
use crate::mesh_error::{MeshError, MeshWarning};
use crate::mesh_generation::UnpatchedFaces;
use crate::mesh_generation::assemble::Assembly;
use crate::mesh_generation::connectivity::{
    BlockConnectivity, BlockFace, FaceKey, face_key, same_cycle,
};
use crate::mesh_generation::expand::LocalGrid;
use crate::topology::cell_type::CellType;
use hashbrown::HashMap;
use itertools::iproduct;

/// A patch whose faces have been matched to block faces.
#[derive(Clone, Debug)]
pub struct ResolvedPatch {
    pub name: String,
    pub faces: Vec<BlockFace>,
}

/// Matches declared patch faces to boundary block faces and applies the
/// unpatched-face policy.
pub fn resolve_patch_faces(
    def: &BlockMeshDefinition,
    connectivity: &BlockConnectivity,
    unpatched: &UnpatchedFaces,
) -> Result<(Vec<ResolvedPatch>, Vec<MeshWarning>), MeshError> {
    let mut claimed: HashMap<FaceKey, &str> = HashMap::new();
    let mut resolved = Vec::with_capacity(def.patches().len());

    for patch in def.patches() {
        let mut faces = Vec::with_capacity(patch.faces.len());
        for (face_index, corners) in patch.faces.iter().enumerate() {
            let key = face_key(corners);
            let Some(owners) = connectivity.owners(&key) else {
                return Err(MeshError::UnresolvedPatchFace {
                    patch: patch.name.clone(),
                    face_index,
                    corners: corners.clone(),
                });
            };
            let first = owners[0];
            let block_corners = def.blocks()[first.block].corners();
            let winding: Vec<_> = def.cell_type().faces()[first.face]
                .iter()
                .map(|&c| block_corners[c])
                .collect();
            if !same_cycle(corners, &winding) {
                return Err(MeshError::CrossedPatchFace {
                    patch: patch.name.clone(),
                    face_index,
                    corners: corners.clone(),
                });
            }
            let owner = match owners {
                [only] => *only,
                _ => {
                    let blocks = [
                        def.blocks()[owners[0].block].id(),
                        def.blocks()[owners[1].block].id(),
                    ];
                    return Err(MeshError::PatchOnInteriorFace {
                        patch: patch.name.clone(),
                        face_index,
                        corners: corners.clone(),
                        blocks,
                    });
                }
            };
            if let Some(first) = claimed.insert(key.clone(), patch.name.as_str()) {
                return Err(MeshError::DuplicatePatchFace {
                    corners: key,
                    first: first.to_string(),
                    second: patch.name.clone(),
                });
            }
            faces.push(owner);
        }
        resolved.push(ResolvedPatch {
            name: patch.name.clone(),
            faces,
        });
    }

    let mut warnings = Vec::new();
    let mut default_faces = Vec::new();
    for (key, owner) in connectivity.boundary_faces() {
        if claimed.contains_key(key) {
            continue;
        }
        let block = def.blocks()[owner.block].id();
        match unpatched {
            UnpatchedFaces::Ignore => {}
            UnpatchedFaces::Warn => {
                log::warn!("block {block} boundary face {key:?} is in no patch");
                warnings.push(MeshWarning::UnpatchedBoundaryFace {
                    block,
                    corners: key.clone(),
                });
            }
            UnpatchedFaces::Error => {
                return Err(MeshError::UnpatchedBoundaryFace {
                    block,
                    corners: key.clone(),
                });
            }
            UnpatchedFaces::DefaultPatch(_) => default_faces.push(owner),
        }
    }
    if let UnpatchedFaces::DefaultPatch(name) = unpatched {
        if name.is_empty() || resolved.iter().any(|p| &p.name == name) {
            return Err(MeshError::DuplicatePatch(name.clone()));
        }
        if !default_faces.is_empty() {
            resolved.push(ResolvedPatch {
                name: name.clone(),
                faces: default_faces,
            });
        }
    }
    Ok((resolved, warnings))
}

/// Expands resolved patches into fine, outward-oriented boundary faces.
pub fn expand_patches(
    cell_type: CellType,
    resolved: &[ResolvedPatch],
    grids: &[LocalGrid],
    assembly: &Assembly,
) -> Vec<Patch> {
    resolved
        .iter()
        .map(|patch| {
            let mut faces = Vec::new();
            for owner in &patch.faces {
                expand_block_face(cell_type, *owner, grids, assembly, &mut faces);
            }
            Patch {
                name: patch.name.clone(),
                faces,
            }
        })
        .collect()
}

fn expand_block_face(
    cell_type: CellType,
    owner: BlockFace,
    grids: &[LocalGrid],
    assembly: &Assembly,
    out: &mut Vec<BoundaryFace>,
) {
    let grid = &grids[owner.block];
    let offset = assembly.cell_offset(owner.block);
    let stride = cell_type.vertex_count();
    let local_face = cell_type.faces()[owner.face];
    let axis = owner.face / 2;
    let layers = grid.cell_layers();
    let mut range = [0..layers[0], 0..layers[1], 0..layers[2]];
    let layer = if owner.face % 2 == 0 { 0 } else { grid.n[axis] - 1 };
    range[axis] = layer..layer + 1;

    let [ri, rj, rk] = range;
    for (k, j, i) in iproduct!(rk, rj, ri) {
        let cell = offset + grid.cell_index([i, j, k]);
        let vertices = &assembly.cells[cell * stride..(cell + 1) * stride];
        out.push(BoundaryFace {
            vertices: local_face.iter().map(|&c| vertices[c]).collect(),
            cell,
        });
    }
}
