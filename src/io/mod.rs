//! Mesh output adapters.
//!
//! Writers consume a finished [`GlobalMesh`]; encoding details stay out of
//! the generator.

pub mod vtk;

use crate::mesh::GlobalMesh;
use crate::mesh_error::MeshError;
use std::io::Write;

/// Trait for mesh writers that serialize a generated mesh.
pub trait MeshWriter {
    /// Write `mesh` to `writer`.
    fn write<W: Write>(&self, writer: W, mesh: &GlobalMesh) -> Result<(), MeshError>;

    /// Write `mesh` to a freshly created file at `path`.
    fn write_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
        mesh: &GlobalMesh,
    ) -> Result<(), MeshError> {
        let file = std::fs::File::create(path)?;
        let mut out = std::io::BufWriter::new(file);
        self.write(&mut out, mesh)?;
        out.flush()?;
        Ok(())
    }
}
