//! Dual operator: faces become vertices, vertices become faces.

use std::collections::HashMap;

use log::debug;

use crate::error::Result;
use crate::exec::ExecConfig;
use crate::flag::FlagSet;
use crate::mesh::Mesh;
use crate::ops::{center_name, vertex_name};

/// Builds the dual of a mesh.
///
/// One vertex per original face, placed at the face centroid; one face per
/// original vertex, walking the centroids of its incident faces in their
/// rotational order. The rotational order falls out of a directed-edge →
/// containing-face table: the face across directed edge `(v2, v1)` is the
/// predecessor of face `i` around vertex `v1`.
///
/// The name prefix `d` toggles, so the dual of `"dC"` is `"C"`.
pub fn dual(mesh: &Mesh, cfg: &ExecConfig) -> Result<Mesh> {
    let centers = mesh.centers(cfg)?.to_vec();

    // Directed edge (v1 → v2) → index of the face containing it. Assumes no
    // two faces share an edge in the same orientation, which holds for any
    // properly wound closed mesh.
    let mut face_of: HashMap<(u32, u32), usize> = HashMap::new();
    for (i, face) in mesh.faces().iter().enumerate() {
        let Some(&last) = face.last() else { continue };
        let mut v1 = last;
        for &v2 in face {
            face_of.insert((v1, v2), i);
            v1 = v2;
        }
    }

    let mut flags = FlagSet::new();
    for (i, &center) in centers.iter().enumerate() {
        flags.declare_vertex(center_name(i), center);
    }
    for (i, face) in mesh.faces().iter().enumerate() {
        let Some(&last) = face.last() else { continue };
        let mut v1 = last;
        for &v2 in face {
            match face_of.get(&(v2, v1)) {
                Some(&neighbor) => {
                    flags.declare_arc(vertex_name(v1), center_name(neighbor), center_name(i));
                }
                // Boundary edge of an open mesh; the dual face around v1
                // cannot close and will be dropped at build time.
                None => debug!("no face across directed edge ({v2}, {v1})"),
            }
            v1 = v2;
        }
    }

    let (out, stats) = flags.build(toggled_name(mesh.name()));
    if stats.faces_dropped > 0 {
        debug!("dual dropped {} unclosed faces", stats.faces_dropped);
    }
    Ok(out)
}

/// Toggles the leading `d`: applying dual twice round-trips the name.
fn toggled_name(name: &str) -> String {
    match name.strip_prefix('d') {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => format!("d{name}"),
    }
}
