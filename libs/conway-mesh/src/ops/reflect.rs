//! Reflect operator: mirror the mesh through the origin.

use crate::error::Result;
use crate::mesh::Mesh;

/// Negates every vertex coordinate and reverses every face cycle.
///
/// Mirroring flips orientation, so reversing the cycles restores the
/// counterclockwise-from-outside winding. Vertex and face counts are
/// unchanged,
/// and applying the operator twice restores the original coordinates and
/// winding exactly.
pub fn reflect(mesh: &Mesh) -> Result<Mesh> {
    let vertices = mesh.vertices().iter().map(|&v| -v).collect();
    let faces = mesh
        .faces()
        .iter()
        .map(|face| face.iter().rev().copied().collect())
        .collect();
    Ok(Mesh::new(vertices, faces, format!("r{}", mesh.name())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bases;

    #[test]
    fn test_reflect_preserves_counts() {
        let cube = bases::cube();
        let mirrored = reflect(&cube).unwrap();
        assert_eq!(mirrored.vertex_count(), cube.vertex_count());
        assert_eq!(mirrored.face_count(), cube.face_count());
        assert_eq!(mirrored.name(), "rC");
    }

    #[test]
    fn test_reflect_twice_is_identity() {
        let cube = bases::cube();
        let twice = reflect(&reflect(&cube).unwrap()).unwrap();
        assert_eq!(twice.vertices(), cube.vertices());
        assert_eq!(twice.faces(), cube.faces());
    }

    #[test]
    fn test_reflect_negates_coordinates() {
        let tetra = bases::tetrahedron();
        let mirrored = reflect(&tetra).unwrap();
        for (orig, moved) in tetra.vertices().iter().zip(mirrored.vertices()) {
            assert_eq!(*moved, -*orig);
        }
    }
}
