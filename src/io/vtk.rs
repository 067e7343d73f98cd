//! Legacy VTK (`.vtk`) writer for generated meshes.
//!
//! Output is an ASCII `UNSTRUCTURED_GRID` dataset with the block id of every
//! cell stored as `CELL_DATA`. Point coordinates are always written with
//! three components; 2D meshes get `z = 0`.

use crate::io::MeshWriter;
use crate::mesh::GlobalMesh;
use crate::mesh_error::MeshError;
use crate::topology::cell_type::CellType;
use std::io::Write;

const BLOCK_ID_FIELD: &str = "block_id";

#[derive(Debug, Clone)]
pub struct VtkWriter {
    /// Second header line of the file.
    pub title: String,
}

impl Default for VtkWriter {
    fn default() -> Self {
        Self {
            title: "block-mesher".to_string(),
        }
    }
}

impl VtkWriter {
    fn vtk_cell_type(cell_type: CellType) -> i32 {
        match cell_type {
            CellType::Quadrilateral => 9,
            CellType::Hexahedron => 12,
        }
    }
}

impl MeshWriter for VtkWriter {
    fn write<W: Write>(&self, mut writer: W, mesh: &GlobalMesh) -> Result<(), MeshError> {
        if self.title.contains('\n') {
            return Err(MeshError::Io("VTK title must be a single line".into()));
        }
        let arity = mesh.cell_type().vertex_count();
        let vtk_type = Self::vtk_cell_type(mesh.cell_type());

        writeln!(writer, "# vtk DataFile Version 3.0")?;
        writeln!(writer, "{}", self.title)?;
        writeln!(writer, "ASCII")?;
        writeln!(writer, "DATASET UNSTRUCTURED_GRID")?;
        writeln!(writer, "POINTS {} double", mesh.point_count())?;
        for p in mesh.points_xyz() {
            writeln!(writer, "{} {} {}", p[0], p[1], p[2])?;
        }

        writeln!(
            writer,
            "CELLS {} {}",
            mesh.cell_count(),
            mesh.cell_count() * (arity + 1)
        )?;
        for cell in mesh.cells() {
            write!(writer, "{arity}")?;
            for v in cell {
                write!(writer, " {v}")?;
            }
            writeln!(writer)?;
        }

        writeln!(writer, "CELL_TYPES {}", mesh.cell_count())?;
        for _ in 0..mesh.cell_count() {
            writeln!(writer, "{vtk_type}")?;
        }

        writeln!(writer, "CELL_DATA {}", mesh.cell_count())?;
        writeln!(writer, "SCALARS {BLOCK_ID_FIELD} int 1")?;
        writeln!(writer, "LOOKUP_TABLE default")?;
        for c in 0..mesh.cell_count() {
            let block = mesh.cell_block(c).map_or(0, |b| b.get());
            writeln!(writer, "{block}")?;
        }
        Ok(())
    }
}
