//! Gyro operator: chiral pentagonal subdivision of every corner.

use log::debug;

use crate::error::Result;
use crate::exec::ExecConfig;
use crate::flag::FlagSet;
use crate::mesh::Mesh;
use crate::ops::{center_name, one_third, third_name, vertex_name};

/// Builds the gyro mesh.
///
/// New vertices: every original vertex (projected to the unit sphere), the
/// center of every face (also projected), and two points per original edge
/// at one third of the way along each traversal direction. Each corner
/// `(face, vertex)` incidence becomes one irregular pentagon:
///
/// ```text
/// center → ⅓(v1→v2) → ⅓(v2→v1) → v2 → ⅓(v2→v3) → center
/// ```
///
/// The result is chiral: gyro of a mirrored mesh is the mirror of the gyro.
/// Each pentagon carries the index of the face it subdivides as its class
/// tag.
pub fn gyro(mesh: &Mesh, cfg: &ExecConfig) -> Result<Mesh> {
    let centers = mesh.centers(cfg)?.to_vec();

    let mut flags = FlagSet::new();
    for (v, &position) in mesh.vertices().iter().enumerate() {
        flags.declare_vertex(vertex_name(v as u32), position.normalize_or_zero());
    }
    for (i, &center) in centers.iter().enumerate() {
        flags.declare_vertex(center_name(i), center.normalize_or_zero());
    }

    for (i, face) in mesh.faces().iter().enumerate() {
        if face.len() < 3 {
            continue;
        }
        let mut v1 = face[face.len() - 2];
        let mut v2 = face[face.len() - 1];
        for &v3 in face {
            flags.declare_vertex(
                third_name(v1, v2),
                one_third(mesh.vertex(v1), mesh.vertex(v2)),
            );
            let pent = format!("{i}c{v1}");
            flags.tag_face(pent.clone(), i as u32);
            flags.declare_arc(pent.clone(), center_name(i), third_name(v1, v2));
            flags.declare_arc(pent.clone(), third_name(v1, v2), third_name(v2, v1));
            flags.declare_arc(pent.clone(), third_name(v2, v1), vertex_name(v2));
            flags.declare_arc(pent.clone(), vertex_name(v2), third_name(v2, v3));
            flags.declare_arc(pent, third_name(v2, v3), center_name(i));
            v1 = v2;
            v2 = v3;
        }
    }

    let (out, stats) = flags.build(format!("g{}", mesh.name()));
    if stats.faces_dropped > 0 {
        debug!("gyro dropped {} unclosed faces", stats.faces_dropped);
    }
    Ok(out)
}
