//! Cell type metadata and reference-element tables.
//!
//! Blocks and the fine cells generated inside them share the same reference
//! element, so the tables here serve both: a block's corner list is read with
//! the same corner/edge/face conventions as a single generated cell.
//!
//! # Corner ordering
//! - **Quadrilateral**: `[c0, c1, c2, c3]` counter-clockwise, at logical
//!   `(0,0) (1,0) (1,1) (0,1)`.
//! - **Hexahedron**: bottom face `[c0..c3]` as the quadrilateral at `ζ = 0`,
//!   top face `[c4..c7]` directly above at `ζ = 1`.

/// Cell types produced by the block mesher.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CellType {
    /// 2D tensor-product cell (quad).
    Quadrilateral,
    /// 3D tensor-product cell (hex).
    Hexahedron,
}

impl CellType {
    /// Volume cell type for a mesh of spatial dimension `dim`.
    pub fn for_dimension(dim: usize) -> Option<Self> {
        match dim {
            2 => Some(CellType::Quadrilateral),
            3 => Some(CellType::Hexahedron),
            _ => None,
        }
    }

    /// Returns the topological dimension of the cell.
    pub fn dimension(self) -> usize {
        match self {
            CellType::Quadrilateral => 2,
            CellType::Hexahedron => 3,
        }
    }

    /// Number of corner vertices.
    pub fn vertex_count(self) -> usize {
        1 << self.dimension()
    }

    /// Logical position (`0` or `1` per axis) of corner `corner`.
    pub fn corner_position(self, corner: usize) -> [usize; 3] {
        let planar = corner & 3;
        let x = usize::from(planar == 1 || planar == 2);
        let y = usize::from(planar >= 2);
        [x, y, corner >> 2]
    }

    /// Corner index at logical position `pos` (inverse of [`CellType::corner_position`]).
    pub fn corner_at(self, pos: [usize; 3]) -> usize {
        let planar = match (pos[0], pos[1]) {
            (0, 0) => 0,
            (1, 0) => 1,
            (1, 1) => 2,
            _ => 3,
        };
        match self {
            CellType::Quadrilateral => planar,
            CellType::Hexahedron => planar + 4 * pos[2],
        }
    }

    /// Graded edges as `(start, end)` corner pairs, grouped by axis.
    ///
    /// Edges of axis `a` occupy `a * n .. (a + 1) * n` with `n` =
    /// [`CellType::edges_per_axis`]; each runs in the positive axis direction.
    pub fn edges(self) -> &'static [(usize, usize)] {
        match self {
            CellType::Quadrilateral => &QUAD_EDGES,
            CellType::Hexahedron => &HEX_EDGES,
        }
    }

    /// Number of parallel edges along each axis.
    pub fn edges_per_axis(self) -> usize {
        1 << (self.dimension() - 1)
    }

    /// Faces as outward-oriented corner lists.
    ///
    /// Face `f` lies on the plane `axis = f / 2` at side `f % 2`.
    pub fn faces(self) -> &'static [&'static [usize]] {
        match self {
            CellType::Quadrilateral => &QUAD_FACES,
            CellType::Hexahedron => &HEX_FACES,
        }
    }
}

const QUAD_EDGES: [(usize, usize); 4] = [(0, 1), (3, 2), (0, 3), (1, 2)];
const HEX_EDGES: [(usize, usize); 12] = [
    // ξ
    (0, 1),
    (3, 2),
    (7, 6),
    (4, 5),
    // η
    (0, 3),
    (1, 2),
    (5, 6),
    (4, 7),
    // ζ
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

const QUAD_FACES: [&[usize]; 4] = [&[3, 0], &[1, 2], &[0, 1], &[2, 3]];
const HEX_FACES: [&[usize]; 6] = [
    &[0, 4, 7, 3],
    &[1, 2, 6, 5],
    &[0, 1, 5, 4],
    &[3, 7, 6, 2],
    &[0, 3, 2, 1],
    &[4, 5, 6, 7],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_surface_and_volume_meshes_have_a_cell_type() {
        assert_eq!(CellType::for_dimension(1), None);
        assert_eq!(CellType::for_dimension(2), Some(CellType::Quadrilateral));
        assert_eq!(CellType::for_dimension(3), Some(CellType::Hexahedron));
        assert_eq!(CellType::for_dimension(4), None);
    }

    #[test]
    fn corner_positions_round_trip() {
        for ct in [CellType::Quadrilateral, CellType::Hexahedron] {
            for c in 0..ct.vertex_count() {
                assert_eq!(ct.corner_at(ct.corner_position(c)), c);
            }
        }
    }

    #[test]
    fn edges_run_along_their_axis() {
        for ct in [CellType::Quadrilateral, CellType::Hexahedron] {
            let per_axis = ct.edges_per_axis();
            for (e, &(s, t)) in ct.edges().iter().enumerate() {
                let axis = e / per_axis;
                let ps = ct.corner_position(s);
                let pt = ct.corner_position(t);
                for a in 0..ct.dimension() {
                    if a == axis {
                        assert_eq!((ps[a], pt[a]), (0, 1));
                    } else {
                        assert_eq!(ps[a], pt[a]);
                    }
                }
            }
        }
    }

    #[test]
    fn faces_lie_on_their_plane() {
        for ct in [CellType::Quadrilateral, CellType::Hexahedron] {
            for (f, face) in ct.faces().iter().enumerate() {
                assert_eq!(face.len(), ct.vertex_count() / 2);
                for &c in face.iter() {
                    assert_eq!(ct.corner_position(c)[f / 2], f % 2);
                }
            }
        }
    }
}
