//! Wavefront OBJ writer.

use std::io::Write;

use crate::error::Result;
use crate::exec::ExecConfig;
use crate::mesh::Mesh;

/// Writes a mesh as Wavefront OBJ.
///
/// Emits one `v` record per vertex, one `vn` record per face (the flat face
/// normal), and one `f` record per face referencing positions and normals
/// with OBJ's 1-based `index//normal` syntax.
pub fn write_obj(mesh: &Mesh, cfg: &ExecConfig, out: &mut impl Write) -> Result<()> {
    writeln!(out, "# {}", mesh.name())?;
    for v in mesh.vertices() {
        writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for n in mesh.normals(cfg)? {
        writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for (i, face) in mesh.faces().iter().enumerate() {
        write!(out, "f")?;
        for &v in face {
            write!(out, " {}//{}", v + 1, i + 1)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
