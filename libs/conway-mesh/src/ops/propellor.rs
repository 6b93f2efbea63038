//! Propellor operator: rotated inset face with a pinwheel of quads.

use log::debug;

use crate::error::Result;
use crate::flag::FlagSet;
use crate::mesh::Mesh;
use crate::ops::{one_third, third_name, vertex_name};

/// Builds the propellor mesh.
///
/// Like gyro, two one-third points are inserted per original edge, but the
/// face pattern differs: the points nearest each face's winding direction
/// form a rotated inset copy of the face (the "hub"), and each corner is
/// filled by one quad blade:
///
/// ```text
/// hub:   ⅓(v1→v2) → ⅓(v2→v3) → …          (one per original face)
/// blade: ⅓(v1→v2) → ⅓(v2→v1) → v2 → ⅓(v2→v3)   (one per corner)
/// ```
///
/// Counts: vertices = originals + 2 per edge; faces = originals + one blade
/// per corner incidence.
pub fn propellor(mesh: &Mesh) -> Result<Mesh> {
    let mut flags = FlagSet::new();
    for (v, &position) in mesh.vertices().iter().enumerate() {
        flags.declare_vertex(vertex_name(v as u32), position.normalize_or_zero());
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
            let blade = format!("{i}c{v2}");
            flags.declare_arc(format!("hub{i}"), third_name(v1, v2), third_name(v2, v3));
            flags.declare_arc(blade.clone(), third_name(v1, v2), third_name(v2, v1));
            flags.declare_arc(blade.clone(), third_name(v2, v1), vertex_name(v2));
            flags.declare_arc(blade.clone(), vertex_name(v2), third_name(v2, v3));
            flags.declare_arc(blade, third_name(v2, v3), third_name(v1, v2));
            v1 = v2;
            v2 = v3;
        }
    }

    let (out, stats) = flags.build(format!("p{}", mesh.name()));
    if stats.faces_dropped > 0 {
        debug!("propellor dropped {} unclosed faces", stats.faces_dropped);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bases;

    #[test]
    fn test_propellor_of_cube() {
        let cube = bases::cube();
        let result = propellor(&cube).unwrap();
        // 8 originals + 24 edge-third points.
        assert_eq!(result.vertex_count(), 32);
        // 6 hubs + 24 corner blades.
        assert_eq!(result.face_count(), 30);
        assert_eq!(result.name(), "pC");
        assert!(result.validate());
    }

    #[test]
    fn test_propellor_face_shapes() {
        let cube = bases::cube();
        let result = propellor(&cube).unwrap();
        let mut hubs = 0;
        let mut blades = 0;
        for face in result.faces() {
            match face.len() {
                4 => {
                    // Both hubs (rotated squares) and blades are quads on a
                    // cube; distinguish by whether an original vertex (index
                    // < 8) participates.
                    if face.iter().any(|&v| v < 8) {
                        blades += 1;
                    } else {
                        hubs += 1;
                    }
                }
                n => panic!("unexpected {n}-gon in propellor of cube"),
            }
        }
        assert_eq!(hubs, 6);
        assert_eq!(blades, 24);
    }

    #[test]
    fn test_propellor_of_tetrahedron() {
        let tetra = bases::tetrahedron();
        let result = propellor(&tetra).unwrap();
        // 4 + 12 vertices; 4 hubs + 12 blades.
        assert_eq!(result.vertex_count(), 16);
        assert_eq!(result.face_count(), 16);
    }
}
