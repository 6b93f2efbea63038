//! Kis operator: raise a pyramid on every matching face.

use log::debug;

use crate::error::Result;
use crate::exec::ExecConfig;
use crate::flag::FlagSet;
use crate::mesh::Mesh;
use crate::ops::vertex_name;

/// Builds the kis mesh.
///
/// Every face whose side count equals `n` (every face when `n == 0`) gains
/// an apex vertex offset from the face center along the outward normal by
/// `apex_dist`, and is replaced by a fan of triangles, one per original
/// edge. Faces with a different side count pass through unchanged. Built
/// faces carry class tags: 1 for fan triangles, 0 for pass-through faces.
pub fn kis(mesh: &Mesh, n: u32, apex_dist: f64, cfg: &ExecConfig) -> Result<Mesh> {
    let centers = mesh.centers(cfg)?.to_vec();
    let normals = mesh.normals(cfg)?.to_vec();

    let mut flags = FlagSet::new();
    for (v, &position) in mesh.vertices().iter().enumerate() {
        flags.declare_vertex(vertex_name(v as u32), position);
    }

    for (i, face) in mesh.faces().iter().enumerate() {
        let Some(&last) = face.last() else { continue };
        let mut v1 = last;
        if n == 0 || face.len() == n as usize {
            let apex = format!("apex{i}");
            flags.declare_vertex(apex.clone(), centers[i] + normals[i] * apex_dist);
            for &v2 in face {
                let fan = format!("{i}v{v1}");
                flags.tag_face(fan.clone(), 1);
                flags.declare_arc(fan.clone(), vertex_name(v1), vertex_name(v2));
                flags.declare_arc(fan.clone(), vertex_name(v2), apex.clone());
                flags.declare_arc(fan, apex.clone(), vertex_name(v1));
                v1 = v2;
            }
        } else {
            flags.tag_face(format!("{i}"), 0);
            for &v2 in face {
                flags.declare_arc(format!("{i}"), vertex_name(v1), vertex_name(v2));
                v1 = v2;
            }
        }
    }

    let prefix = if n > 0 {
        format!("k{n}")
    } else {
        "k".to_string()
    };
    let (out, stats) = flags.build(format!("{prefix}{}", mesh.name()));
    if stats.faces_dropped > 0 {
        debug!("kis dropped {} unclosed faces", stats.faces_dropped);
    }
    Ok(out)
}
