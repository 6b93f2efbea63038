//! Ambo operator: rectification. One vertex per edge, faces from both
//! original faces and original vertices.

use log::debug;

use crate::error::Result;
use crate::flag::FlagSet;
use crate::mesh::Mesh;
use crate::ops::{midpoint, midpoint_name};

/// Builds the ambo (rectified) mesh.
///
/// Every original edge contributes its midpoint as a new vertex. Walking a
/// window of three consecutive face vertices `(v1, v2, v3)` links midpoint
/// `(v1,v2)` to midpoint `(v2,v3)`: forward for the face shrunk from the
/// original face, and backward for the face surrounding original vertex
/// `v2`, which keeps both windings consistent.
///
/// Resulting counts: vertices = original edges; faces = original faces +
/// original vertices.
pub fn ambo(mesh: &Mesh) -> Result<Mesh> {
    let mut flags = FlagSet::new();

    for (i, face) in mesh.faces().iter().enumerate() {
        if face.len() < 2 {
            continue;
        }
        let mut v1 = face[face.len() - 2];
        let mut v2 = face[face.len() - 1];
        for &v3 in face {
            flags.declare_vertex(
                midpoint_name(v1, v2),
                midpoint(mesh.vertex(v1), mesh.vertex(v2)),
            );
            // Face shrunk from original face i.
            flags.declare_arc(
                format!("orig{i}"),
                midpoint_name(v1, v2),
                midpoint_name(v2, v3),
            );
            // Face surrounding (the truncated) original vertex v2.
            flags.declare_arc(
                format!("vert{v2}"),
                midpoint_name(v2, v3),
                midpoint_name(v1, v2),
            );
            v1 = v2;
            v2 = v3;
        }
    }

    let (out, stats) = flags.build(format!("a{}", mesh.name()));
    if stats.faces_dropped > 0 {
        debug!("ambo dropped {} unclosed faces", stats.faces_dropped);
    }
    Ok(out)
}
