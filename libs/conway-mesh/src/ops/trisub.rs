//! Trisub operator: barycentric subdivision of triangular faces.

use log::debug;

use crate::error::{ConwayError, Result};
use crate::flag::FlagSet;
use crate::mesh::Mesh;
use crate::ops::vertex_name;

/// Builds the trisub mesh.
///
/// Every triangular face `(a, b, c)` is subdivided into a barycentric grid
/// of `n²` smaller triangles over `n + 1` rows of evenly interpolated
/// points. Grid corners reuse the original vertices unmoved; points on a
/// shared edge are named canonically by the edge's endpoints and fraction,
/// so adjacent triangles collapse to the same vertex. Non-triangular faces
/// pass through unchanged, keeping mixed-topology meshes intact.
pub fn trisub(mesh: &Mesh, n: u32) -> Result<Mesh> {
    if n == 0 {
        return Err(ConwayError::invalid_parameter(
            "u",
            "subdivision level must be >= 1",
        ));
    }

    let mut flags = FlagSet::new();
    for (v, &position) in mesh.vertices().iter().enumerate() {
        flags.declare_vertex(vertex_name(v as u32), position);
    }

    for (f, face) in mesh.faces().iter().enumerate() {
        let [a, b, c] = match face.as_slice() {
            &[a, b, c] => [a, b, c],
            _ => {
                // Pass-through for non-triangular faces. The first arc leaves
                // the first listed vertex, so the rebuilt cycle is bit-equal
                // to the input, not a rotation of it.
                for (w, &v1) in face.iter().enumerate() {
                    let v2 = face[(w + 1) % face.len()];
                    flags.declare_arc(format!("{f}"), vertex_name(v1), vertex_name(v2));
                }
                continue;
            }
        };

        let pa = mesh.vertex(a);
        let ab = mesh.vertex(b) - pa;
        let ac = mesh.vertex(c) - pa;
        let step = 1.0 / f64::from(n);

        // Rows of evenly interpolated grid points; i walks toward b, j
        // toward c. Corner names collapse to the originals.
        for i in 0..=n {
            for j in 0..=(n - i) {
                let point = pa + ab * (f64::from(i) * step) + ac * (f64::from(j) * step);
                flags.declare_vertex(grid_name(f, [a, b, c], i, j, n), point);
            }
        }

        // Upward triangles.
        for i in 0..n {
            for j in 0..(n - i) {
                emit_triangle(
                    &mut flags,
                    format!("{f}u{i}_{j}"),
                    [
                        grid_name(f, [a, b, c], i, j, n),
                        grid_name(f, [a, b, c], i + 1, j, n),
                        grid_name(f, [a, b, c], i, j + 1, n),
                    ],
                );
            }
        }
        // Downward triangles filling the gaps between rows.
        for i in 1..n {
            for j in 0..(n - i) {
                emit_triangle(
                    &mut flags,
                    format!("{f}d{i}_{j}"),
                    [
                        grid_name(f, [a, b, c], i, j, n),
                        grid_name(f, [a, b, c], i, j + 1, n),
                        grid_name(f, [a, b, c], i - 1, j + 1, n),
                    ],
                );
            }
        }
    }

    let (out, stats) = flags.build(format!("u{n}{}", mesh.name()));
    if stats.faces_dropped > 0 {
        debug!("trisub dropped {} unclosed faces", stats.faces_dropped);
    }
    Ok(out)
}

fn emit_triangle(flags: &mut FlagSet, face: String, corners: [String; 3]) {
    let [p, q, r] = corners;
    flags.declare_arc(face.clone(), p.clone(), q.clone());
    flags.declare_arc(face.clone(), q, r.clone());
    flags.declare_arc(face, r, p);
}

/// Canonical name for grid point `(i, j)` of the subdivided face `f` with
/// corners `[a, b, c]`.
///
/// Corners map to original-vertex names; edge points are named by the
/// undirected edge plus the fraction measured from its smaller endpoint, so
/// both incident triangles produce the same name; interior points are
/// private to the face.
fn grid_name(f: usize, [a, b, c]: [u32; 3], i: u32, j: u32, n: u32) -> String {
    match (i, j) {
        (0, 0) => vertex_name(a),
        (i, 0) if i == n => vertex_name(b),
        (0, j) if j == n => vertex_name(c),
        (i, 0) => edge_fraction_name(a, b, i, n),
        (0, j) => edge_fraction_name(a, c, j, n),
        (i, j) if i + j == n => edge_fraction_name(b, c, j, n),
        (i, j) => format!("g{f}_{i}_{j}"),
    }
}

/// Name of the point `k/n` of the way from `a` to `b`, canonicalized so
/// both traversal directions agree.
fn edge_fraction_name(a: u32, b: u32, k: u32, n: u32) -> String {
    if a < b {
        format!("e{a}_{b}_{k}")
    } else {
        format!("e{b}_{a}_{}", n - k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bases;
    use crate::exec::ExecConfig;

    #[test]
    fn test_trisub_is_identity_on_non_triangular_mesh() {
        let cube = bases::cube();
        let result = trisub(&cube, 2).unwrap();
        assert_eq!(result.vertices(), cube.vertices());
        assert_eq!(result.faces(), cube.faces());
        assert_eq!(result.name(), "u2C");
    }

    #[test]
    fn test_trisub_level_two_on_tetrahedron() {
        let tetra = bases::tetrahedron();
        let result = trisub(&tetra, 2).unwrap();
        // 4 originals + one midpoint per edge (6 edges).
        assert_eq!(result.vertex_count(), 10);
        // n² = 4 triangles per original face.
        assert_eq!(result.face_count(), 16);
        for face in result.faces() {
            assert_eq!(face.len(), 3);
        }
    }

    #[test]
    fn test_trisub_level_three_on_icosahedron() {
        let icosa = bases::icosahedron();
        let edges = icosa.edges(&ExecConfig::default()).unwrap().len();
        let result = trisub(&icosa, 3).unwrap();
        // Per edge: 2 interior points; per face: 1 interior point.
        assert_eq!(
            result.vertex_count(),
            icosa.vertex_count() + 2 * edges + icosa.face_count()
        );
        assert_eq!(result.face_count(), 9 * icosa.face_count());
    }

    #[test]
    fn test_trisub_preserves_original_vertices_exactly() {
        let tetra = bases::tetrahedron();
        let result = trisub(&tetra, 4).unwrap();
        assert_eq!(&result.vertices()[..4], tetra.vertices());
    }

    #[test]
    fn test_trisub_level_one_is_identity_on_triangles() {
        let tetra = bases::tetrahedron();
        let result = trisub(&tetra, 1).unwrap();
        assert_eq!(result.vertices(), tetra.vertices());
        assert_eq!(result.faces(), tetra.faces());
    }

    #[test]
    fn test_trisub_rejects_zero_level() {
        let result = trisub(&bases::tetrahedron(), 0);
        assert!(matches!(result, Err(ConwayError::InvalidParameter { .. })));
    }
}
