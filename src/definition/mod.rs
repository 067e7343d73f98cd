//! Declarative input for the block mesher: control points, blocks, patches.
//!
//! Definitions are assembled through [`BlockMeshBuilder`], which validates
//! every record as it is inserted. Records must be added leaf-first (points,
//! then blocks, then patches) since each insertion checks its references.
//! [`BlockMeshBuilder::build`] freezes the result into an immutable
//! [`BlockMeshDefinition`] that the generator consumes.
//!
//! The plain record types ([`ControlPoint`], [`BlockDef`], [`PatchDef`],
//! [`BlockMeshDescription`]) derive serde traits so a configuration layer can
//! deserialize them and feed them through [`BlockMeshDefinition::from_description`].

pub mod grading;

use crate::mesh_error::MeshError;
use crate::topology::cell_type::CellType;
use crate::topology::point::{BlockId, ControlPointId};
use grading::{EdgeGrading, resolve_edge_gradings};
use hashbrown::HashMap;
use itertools::Itertools;

/// A user-placed block corner.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ControlPoint {
    pub id: ControlPointId,
    pub coords: Vec<f64>,
}

/// Block record as supplied by the caller.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlockDef {
    pub id: BlockId,
    /// `2^D` corners in canonical winding order.
    pub corners: Vec<ControlPointId>,
    /// Cell count per logical axis.
    pub subdivisions: Vec<usize>,
    /// Empty (uniform), one per axis, or one per edge.
    #[serde(default)]
    pub grading: Vec<EdgeGrading>,
}

/// Named group of boundary faces, each given by its corner control points.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PatchDef {
    pub name: String,
    pub faces: Vec<Vec<ControlPointId>>,
}

/// Complete, serializable description of a block mesh.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlockMeshDescription {
    pub dimension: usize,
    pub points: Vec<ControlPoint>,
    pub blocks: Vec<BlockDef>,
    #[serde(default)]
    pub patches: Vec<PatchDef>,
}

/// A validated block with its edge gradings resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    id: BlockId,
    corners: Vec<ControlPointId>,
    subdivisions: Vec<usize>,
    edge_gradings: Vec<EdgeGrading>,
}

impl Block {
    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn corners(&self) -> &[ControlPointId] {
        &self.corners
    }

    pub fn subdivisions(&self) -> &[usize] {
        &self.subdivisions
    }

    /// One grading per edge, in [`CellType::edges`] order.
    pub fn edge_gradings(&self) -> &[EdgeGrading] {
        &self.edge_gradings
    }

    /// Number of cells this block expands into.
    pub fn cell_count(&self) -> usize {
        self.subdivisions.iter().product()
    }

    /// Number of grid points this block expands into, shared ones included.
    pub fn point_count(&self) -> usize {
        self.subdivisions.iter().map(|n| n + 1).product()
    }
}

/// Immutable, validated input to mesh generation.
#[derive(Clone, Debug)]
pub struct BlockMeshDefinition {
    dimension: usize,
    cell_type: CellType,
    points: Vec<ControlPoint>,
    point_index: HashMap<ControlPointId, usize>,
    blocks: Vec<Block>,
    patches: Vec<PatchDef>,
}

static_assertions::assert_impl_all!(BlockMeshDefinition: Send, Sync);

impl BlockMeshDefinition {
    /// Validates a deserialized description by replaying it through the builder.
    pub fn from_description(desc: BlockMeshDescription) -> Result<Self, MeshError> {
        let mut builder = BlockMeshBuilder::new(desc.dimension)?;
        for p in desc.points {
            builder.add_point(p.id.get(), p.coords)?;
        }
        for b in &desc.blocks {
            let corners: Vec<u32> = b.corners.iter().map(|c| c.get()).collect();
            builder.add_block(b.id.get(), &corners, &b.subdivisions, &b.grading)?;
        }
        for patch in desc.patches {
            let faces: Vec<Vec<u32>> = patch
                .faces
                .iter()
                .map(|f| f.iter().map(|c| c.get()).collect())
                .collect();
            let faces: Vec<&[u32]> = faces.iter().map(Vec::as_slice).collect();
            builder.add_patch(patch.name, &faces)?;
        }
        builder.build()
    }

    /// Spatial dimension (2 or 3).
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Volume cell type generated for this dimension.
    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    /// Control points in declaration order.
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Coordinates of control point `id`.
    pub fn point(&self, id: ControlPointId) -> Option<&[f64]> {
        self.point_index
            .get(&id)
            .map(|&i| self.points[i].coords.as_slice())
    }

    /// Coordinates of control point `id`, padded to three components.
    pub(crate) fn point_xyz(&self, id: ControlPointId) -> Result<[f64; 3], MeshError> {
        let coords = self.point(id).ok_or_else(|| MeshError::DanglingReference {
            owner: "definition".into(),
            point: id,
        })?;
        let mut xyz = [0.0; 3];
        xyz[..coords.len()].copy_from_slice(coords);
        Ok(xyz)
    }

    /// Blocks in declaration order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Block by id.
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Patches in declaration order.
    pub fn patches(&self) -> &[PatchDef] {
        &self.patches
    }

    /// Converts back into plain records.
    pub fn to_description(&self) -> BlockMeshDescription {
        BlockMeshDescription {
            dimension: self.dimension,
            points: self.points.clone(),
            blocks: self
                .blocks
                .iter()
                .map(|b| BlockDef {
                    id: b.id,
                    corners: b.corners.clone(),
                    subdivisions: b.subdivisions.clone(),
                    grading: b.edge_gradings.clone(),
                })
                .collect(),
            patches: self.patches.clone(),
        }
    }
}

/// Incremental, validating builder for [`BlockMeshDefinition`].
#[derive(Clone, Debug)]
pub struct BlockMeshBuilder {
    dimension: usize,
    cell_type: CellType,
    points: Vec<ControlPoint>,
    point_index: HashMap<ControlPointId, usize>,
    blocks: Vec<Block>,
    block_ids: HashMap<BlockId, usize>,
    patches: Vec<PatchDef>,
}

impl BlockMeshBuilder {
    /// Starts an empty definition of spatial dimension `dimension` (2 or 3).
    pub fn new(dimension: usize) -> Result<Self, MeshError> {
        let cell_type =
            CellType::for_dimension(dimension).ok_or_else(|| MeshError::DimensionMismatch {
                what: "mesh dimension (2 or 3)".into(),
                expected: 3,
                found: dimension,
            })?;
        Ok(Self {
            dimension,
            cell_type,
            points: Vec::new(),
            point_index: HashMap::new(),
            blocks: Vec::new(),
            block_ids: HashMap::new(),
            patches: Vec::new(),
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Registers control point `id` at `coords`.
    pub fn add_point(
        &mut self,
        id: u32,
        coords: impl Into<Vec<f64>>,
    ) -> Result<&mut Self, MeshError> {
        let id = ControlPointId::new(id);
        let coords = coords.into();
        if coords.len() != self.dimension {
            return Err(MeshError::DimensionMismatch {
                what: format!("control point {id}"),
                expected: self.dimension,
                found: coords.len(),
            });
        }
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(MeshError::NonFiniteCoordinate(id));
        }
        if self.point_index.contains_key(&id) {
            return Err(MeshError::DuplicateId(format!("control point {id}")));
        }
        self.point_index.insert(id, self.points.len());
        self.points.push(ControlPoint { id, coords });
        Ok(self)
    }

    /// Registers a block over `corners` with per-axis `subdivisions` and `grading`.
    pub fn add_block(
        &mut self,
        id: u32,
        corners: &[u32],
        subdivisions: &[usize],
        grading: &[EdgeGrading],
    ) -> Result<&mut Self, MeshError> {
        let id = BlockId::new(id);
        let corners: Vec<ControlPointId> =
            corners.iter().copied().map(ControlPointId::new).collect();

        if self.block_ids.contains_key(&id) {
            return Err(MeshError::DuplicateId(format!("block {id}")));
        }
        let n_corners = self.cell_type.vertex_count();
        if corners.len() != n_corners {
            return Err(MeshError::DimensionMismatch {
                what: format!("block {id} corners"),
                expected: n_corners,
                found: corners.len(),
            });
        }
        if subdivisions.len() != self.dimension {
            return Err(MeshError::DimensionMismatch {
                what: format!("block {id} subdivisions"),
                expected: self.dimension,
                found: subdivisions.len(),
            });
        }
        for &c in &corners {
            if !self.point_index.contains_key(&c) {
                return Err(MeshError::DanglingReference {
                    owner: format!("block {id}"),
                    point: c,
                });
            }
        }
        if !corners.iter().all_unique() {
            return Err(MeshError::InvalidFace(format!(
                "block {id} repeats a corner: {corners:?}"
            )));
        }
        if let Some((axis, &count)) = subdivisions.iter().find_position(|&&n| n < 1) {
            return Err(MeshError::InvalidSubdivision {
                block: id,
                axis,
                count,
            });
        }
        let edge_gradings = resolve_edge_gradings(self.cell_type, grading)
            .map_err(|reason| MeshError::InvalidGrading { block: id, reason })?;

        self.block_ids.insert(id, self.blocks.len());
        self.blocks.push(Block {
            id,
            corners,
            subdivisions: subdivisions.to_vec(),
            edge_gradings,
        });
        Ok(self)
    }

    /// Registers patch `name` made of `faces`, each given by its corner points.
    pub fn add_patch(
        &mut self,
        name: impl Into<String>,
        faces: &[&[u32]],
    ) -> Result<&mut Self, MeshError> {
        let name = name.into();
        if name.is_empty() || self.patches.iter().any(|p| p.name == name) {
            return Err(MeshError::DuplicatePatch(name));
        }
        let arity = self.cell_type.vertex_count() / 2;
        let mut resolved = Vec::with_capacity(faces.len());
        for (face_index, face) in faces.iter().enumerate() {
            let face: Vec<ControlPointId> = face.iter().copied().map(ControlPointId::new).collect();
            if face.len() != arity {
                return Err(MeshError::InvalidFace(format!(
                    "patch `{name}` face {face_index} has {} points, expected {arity}",
                    face.len()
                )));
            }
            for &c in &face {
                if !self.point_index.contains_key(&c) {
                    return Err(MeshError::DanglingReference {
                        owner: format!("patch `{name}` face {face_index}"),
                        point: c,
                    });
                }
            }
            if !face.iter().all_unique() {
                return Err(MeshError::InvalidFace(format!(
                    "patch `{name}` face {face_index} repeats a point: {face:?}"
                )));
            }
            resolved.push(face);
        }
        self.patches.push(PatchDef {
            name,
            faces: resolved,
        });
        Ok(self)
    }

    /// Freezes the accumulated records.
    pub fn build(self) -> Result<BlockMeshDefinition, MeshError> {
        if self.blocks.is_empty() {
            return Err(MeshError::EmptyDefinition);
        }
        Ok(BlockMeshDefinition {
            dimension: self.dimension,
            cell_type: self.cell_type,
            points: self.points,
            point_index: self.point_index,
            blocks: self.blocks,
            patches: self.patches,
        })
    }
}
