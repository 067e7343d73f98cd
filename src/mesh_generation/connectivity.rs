//! Block-level connectivity: shared faces, shared edges, stitching keys.
//!
//! Blocks are stitched by index identification, never by comparing
//! coordinates. Every grid point lying on a block corner, edge, or face is
//! given a [`PointKey`] built solely from control-point ids and integer
//! offsets; two blocks produce the same key for the same logical point
//! whenever their subdivision counts agree along the shared entity. Since a
//! shared point keeps the coordinates of the first block that produced it,
//! [`BlockConnectivity::build`] also requires the blocks to place the points
//! of a shared edge at the same parameters, compared in the edge's `lo -> hi`
//! direction.

use crate::definition::BlockMeshDefinition;
use crate::mesh_error::MeshError;
use crate::topology::cell_type::CellType;
use crate::topology::point::{BlockId, ControlPointId};
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

/// Largest difference in edge parameter two blocks may disagree by on a
/// shared edge.
pub const EDGE_PARAMETER_TOLERANCE: f64 = 1e-9;

/// Canonical identity of a block face: its corner ids, sorted.
pub type FaceKey = Vec<ControlPointId>;

/// Builds the [`FaceKey`] for a face given in any orientation.
pub fn face_key(corners: &[ControlPointId]) -> FaceKey {
    let mut key = corners.to_vec();
    key.sort_unstable();
    key
}

/// Whether `declared` walks the same cycle as `face`, in either direction.
///
/// Sorted keys cannot tell a face from a crossed listing of its corners, so
/// declared faces are checked against the block face with this.
pub fn same_cycle(declared: &[ControlPointId], face: &[ControlPointId]) -> bool {
    let n = face.len();
    if declared.len() != n {
        return false;
    }
    (0..n).any(|shift| {
        (0..n).all(|i| declared[i] == face[(i + shift) % n])
            || (0..n).all(|i| declared[i] == face[(shift + n - i) % n])
    })
}

/// A face of a particular block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockFace {
    /// Position of the block in declaration order.
    pub block: usize,
    /// Local face index into [`CellType::faces`].
    pub face: usize,
}

/// Registry of block faces, keyed by their corner ids.
#[derive(Clone, Debug)]
pub struct BlockConnectivity {
    faces: HashMap<FaceKey, Vec<BlockFace>>,
    /// Face keys in first-seen order, for deterministic iteration.
    order: Vec<FaceKey>,
}

impl BlockConnectivity {
    /// Registers every block face and checks shared edges for conforming
    /// subdivision counts and gradings.
    pub fn build(def: &BlockMeshDefinition) -> Result<Self, MeshError> {
        let cell_type = def.cell_type();
        let per_axis = cell_type.edges_per_axis();
        let mut edges: HashMap<(ControlPointId, ControlPointId), (BlockId, usize, Vec<f64>)> =
            HashMap::new();
        let mut faces: HashMap<FaceKey, Vec<BlockFace>> = HashMap::new();
        let mut order = Vec::new();

        for (b, block) in def.blocks().iter().enumerate() {
            let corners = block.corners();
            for (e, &(s, t)) in cell_type.edges().iter().enumerate() {
                let count = block.subdivisions()[e / per_axis];
                let (lo, hi) = ordered(corners[s], corners[t]);
                let mut params = block.edge_gradings()[e].distribution(count);
                if corners[s] != lo {
                    params = params.iter().rev().map(|x| 1.0 - x).collect();
                }
                match edges.entry((lo, hi)) {
                    Entry::Vacant(slot) => {
                        slot.insert((block.id(), count, params));
                    }
                    Entry::Occupied(slot) => {
                        let (first_block, first, first_params) = slot.get();
                        if *first != count {
                            return Err(MeshError::SubdivisionMismatch {
                                a: lo,
                                b: hi,
                                first_block: *first_block,
                                first: *first,
                                second_block: block.id(),
                                second: count,
                            });
                        }
                        let deviation = first_params
                            .iter()
                            .zip(&params)
                            .map(|(p, q)| (p - q).abs())
                            .fold(0.0, f64::max);
                        if deviation > EDGE_PARAMETER_TOLERANCE {
                            return Err(MeshError::GradingMismatch {
                                a: lo,
                                b: hi,
                                first_block: *first_block,
                                second_block: block.id(),
                                deviation,
                            });
                        }
                    }
                }
            }

            for (f, local) in cell_type.faces().iter().enumerate() {
                let ids: Vec<ControlPointId> = local.iter().map(|&c| corners[c]).collect();
                let key = face_key(&ids);
                let owners = faces.entry(key.clone()).or_insert_with(|| {
                    order.push(key.clone());
                    Vec::new()
                });
                owners.push(BlockFace { block: b, face: f });
                if owners.len() > 2 {
                    return Err(MeshError::NonManifoldFace {
                        corners: key,
                        count: owners.len(),
                    });
                }
            }
        }
        log::debug!(
            "block connectivity: {} distinct faces, {} distinct edges",
            order.len(),
            edges.len()
        );
        Ok(Self { faces, order })
    }

    /// Blocks owning the face with `key` (one for boundary, two for interior).
    pub fn owners(&self, key: &FaceKey) -> Option<&[BlockFace]> {
        self.faces.get(key).map(Vec::as_slice)
    }

    /// Faces owned by a single block, in first-seen order.
    pub fn boundary_faces(&self) -> impl Iterator<Item = (&FaceKey, BlockFace)> + '_ {
        self.order.iter().filter_map(|key| match self.faces[key].as_slice() {
            [only] => Some((key, *only)),
            _ => None,
        })
    }

    /// Number of faces shared by two blocks.
    pub fn interior_face_count(&self) -> usize {
        self.faces.values().filter(|owners| owners.len() == 2).count()
    }
}

fn ordered(a: ControlPointId, b: ControlPointId) -> (ControlPointId, ControlPointId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Identity of a grid point that may be shared between blocks.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointKey {
    /// A block corner.
    Vertex(ControlPointId),
    /// Interior of the edge `(lo, hi)`, `offset` cells from `lo`.
    Edge(ControlPointId, ControlPointId, usize),
    /// Interior of a 3D block face, in the face's canonical frame.
    Face([ControlPointId; 4], usize, usize),
}

/// Classifies grid point `idx` of a block with `n` cells per axis.
///
/// Returns `None` for points strictly inside the block, which are never shared.
pub fn point_key(
    cell_type: CellType,
    corners: &[ControlPointId],
    n: [usize; 3],
    idx: [usize; 3],
) -> Option<PointKey> {
    let dim = cell_type.dimension();
    let mut side = [0usize; 3];
    let mut free = [0usize; 3];
    let mut n_free = 0;
    for axis in 0..dim {
        if idx[axis] == 0 {
            side[axis] = 0;
        } else if idx[axis] == n[axis] {
            side[axis] = 1;
        } else {
            free[n_free] = axis;
            n_free += 1;
        }
    }
    let corner_id = |pos: [usize; 3]| corners[cell_type.corner_at(pos)];

    match n_free {
        0 => Some(PointKey::Vertex(corner_id(side))),
        1 => {
            let axis = free[0];
            let mut start = side;
            start[axis] = 0;
            let mut end = side;
            end[axis] = 1;
            let (a, b) = (corner_id(start), corner_id(end));
            if a < b {
                Some(PointKey::Edge(a, b, idx[axis]))
            } else {
                Some(PointKey::Edge(b, a, n[axis] - idx[axis]))
            }
        }
        2 if dim == 3 => {
            let (u_axis, v_axis) = (free[0], free[1]);
            let at = |u: usize, v: usize| {
                let mut pos = side;
                pos[u_axis] = u;
                pos[v_axis] = v;
                corner_id(pos)
            };
            let quad = [at(0, 0), at(1, 0), at(0, 1), at(1, 1)];
            // Anchor the frame at the smallest corner id.
            let (mut ou, mut ov, mut origin) = (0, 0, quad[0]);
            for (q, &id) in quad.iter().enumerate() {
                if id < origin {
                    origin = id;
                    ou = q & 1;
                    ov = q >> 1;
                }
            }
            let du = if ou == 0 {
                idx[u_axis]
            } else {
                n[u_axis] - idx[u_axis]
            };
            let dv = if ov == 0 {
                idx[v_axis]
            } else {
                n[v_axis] - idx[v_axis]
            };
            let along_u = at(1 - ou, ov);
            let along_v = at(ou, 1 - ov);
            let mut sorted = quad;
            sorted.sort_unstable();
            if along_u < along_v {
                Some(PointKey::Face(sorted, du, dv))
            } else {
                Some(PointKey::Face(sorted, dv, du))
            }
        }
        _ => None,
    }
}
