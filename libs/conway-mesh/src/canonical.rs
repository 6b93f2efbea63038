//! # Canonicalizer
//!
//! Iterative relaxation of vertex coordinates toward the "canonical" form of
//! a polyhedron: every edge tangent to the unit sphere, every face planar.
//! Topology is never touched; input and output vertex/face counts are
//! identical, only coordinates move.
//!
//! Two procedures exist:
//!
//! - [`adjust`]: a cheap dual-reciprocation nudge, enough to tidy up ruled
//!   solids (prisms, antiprisms) that are topologically exact but
//!   numerically rough;
//! - [`canonicalize`]: the full loop, running per iteration a tangency pass
//!   over the edge list, a recentering, and finally a planarization pass
//!   against freshly computed face centers and normals.
//!
//! Edge lists, centers and normals are recomputed once per iteration through
//! the geometry calculators; that recomputation dominates the cost, which is
//! why it is routed through the chunked executor.

use glam::DVec3;

use config::constants::{EPSILON, TANGENT_STABILITY};

use crate::error::{ConwayError, Result};
use crate::exec::ExecConfig;
use crate::geometry;
use crate::mesh::{EdgeKey, Mesh};
use crate::ops::dual;

// =============================================================================
// QUICK ADJUST
// =============================================================================

/// Quick coordinate adjustment by dual reciprocation.
///
/// Each iteration replaces the dual's vertices with the reciprocals of this
/// mesh's face centers, then this mesh's vertices with the reciprocals of
/// the dual's face centers. A single iteration is usually enough to make a
/// freshly generated ruled solid look tidy.
pub fn adjust(mesh: &Mesh, iterations: usize, cfg: &ExecConfig) -> Result<Mesh> {
    let mut poly = mesh.clone();
    let mut dual_poly = dual::dual(&poly, cfg)?;
    if dual_poly.face_count() != poly.vertex_count() {
        return Err(ConwayError::internal(
            "adjust requires a closed mesh with a well-formed dual",
        ));
    }

    for _ in 0..iterations {
        dual_poly = replace_vertices(&dual_poly, reciprocal_centers(&poly, cfg)?)?;
        poly = replace_vertices(&poly, reciprocal_centers(&dual_poly, cfg)?)?;
    }
    Ok(poly)
}

/// Face centers reciprocated through the unit sphere.
fn reciprocal_centers(mesh: &Mesh, cfg: &ExecConfig) -> Result<Vec<DVec3>> {
    Ok(mesh
        .centers(cfg)?
        .iter()
        .map(|&c| c / c.length_squared().max(EPSILON))
        .collect())
}

fn replace_vertices(mesh: &Mesh, vertices: Vec<DVec3>) -> Result<Mesh> {
    if vertices.len() != mesh.vertex_count() {
        return Err(ConwayError::internal(
            "reciprocation produced a mismatched vertex count",
        ));
    }
    Ok(mesh.with_vertices(vertices))
}

// =============================================================================
// FULL CANONICALIZATION
// =============================================================================

/// Full canonicalization loop.
///
/// Per iteration: (1) nudge every edge toward tangency with the unit sphere
/// and recenter the mesh over the edge tangent points, then (2) project
/// every vertex toward the best-fit plane of each incident face. No hard
/// convergence guarantee is claimed; for typical convex, low-genus inputs a
/// handful of iterations settles well below visual tolerance.
pub fn canonicalize(mesh: &Mesh, iterations: usize, cfg: &ExecConfig) -> Result<Mesh> {
    // Topology is constant, so the edge list survives across iterations.
    let edges = mesh.edges(cfg)?.to_vec();
    let mut current = mesh.clone();

    for _ in 0..iterations {
        let mut positions = tangentify(current.vertices(), &edges);
        recenter(&mut positions, &edges);
        let moved = current.with_vertices(positions);

        let centers = geometry::centers_of(&moved, cfg)?;
        let normals = geometry::normals_of(&moved, cfg)?;
        let planar = planarize(moved.vertices(), moved.faces(), &centers, &normals);
        current = moved.with_vertices(planar);
    }
    Ok(current)
}

/// Closest point to the origin on the infinite line through `a` and `b`.
pub(crate) fn tangent_point(a: DVec3, b: DVec3) -> DVec3 {
    let d = b - a;
    let dd = d.length_squared();
    if dd < EPSILON {
        return a;
    }
    a - d * (a.dot(d) / dd)
}

/// Nudges each edge's endpoints toward unit-sphere tangency, damped to keep
/// successive iterations stable.
fn tangentify(vertices: &[DVec3], edges: &[EdgeKey]) -> Vec<DVec3> {
    let mut out = vertices.to_vec();
    for edge in edges {
        let t = tangent_point(out[edge.0 as usize], out[edge.1 as usize]);
        let correction = t * (0.5 * TANGENT_STABILITY * (1.0 - t.length()));
        out[edge.0 as usize] += correction;
        out[edge.1 as usize] += correction;
    }
    out
}

/// Recenters so the mean of the edge tangent points sits at the origin.
fn recenter(vertices: &mut [DVec3], edges: &[EdgeKey]) {
    if edges.is_empty() {
        return;
    }
    let center = edges
        .iter()
        .map(|e| tangent_point(vertices[e.0 as usize], vertices[e.1 as usize]))
        .sum::<DVec3>()
        / edges.len() as f64;
    for v in vertices.iter_mut() {
        *v -= center;
    }
}

/// Moves each vertex toward the plane of every face it belongs to.
///
/// The projection amount is measured against the pre-pass coordinates while
/// corrections accumulate, so a vertex shared by several faces receives the
/// sum of their adjustments.
fn planarize(
    vertices: &[DVec3],
    faces: &[Vec<u32>],
    centers: &[DVec3],
    normals: &[DVec3],
) -> Vec<DVec3> {
    let mut out = vertices.to_vec();
    for (f, face) in faces.iter().enumerate() {
        let mut normal = normals[f];
        let center = centers[f];
        if normal.dot(center) < 0.0 {
            normal = -normal;
        }
        for &v in face {
            let vi = v as usize;
            out[vi] -= normal * normal.dot(vertices[vi] - center);
        }
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bases;
    use crate::ops;
    use approx::assert_relative_eq;
    use conway_notation::OpSpec;

    fn all_finite(mesh: &Mesh) -> bool {
        mesh.vertices().iter().all(|v| v.is_finite())
    }

    fn tangency_residual(mesh: &Mesh, cfg: &ExecConfig) -> f64 {
        let edges = mesh.edges(cfg).unwrap();
        edges
            .iter()
            .map(|e| {
                let t = tangent_point(mesh.vertex(e.0), mesh.vertex(e.1));
                (1.0 - t.length()).abs()
            })
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_tangent_point_is_perpendicular() {
        let a = DVec3::new(1.0, -1.0, 0.0);
        let b = DVec3::new(1.0, 1.0, 0.0);
        let t = tangent_point(a, b);
        assert_relative_eq!(t.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(t.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(t.dot(b - a), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_canonicalize_preserves_topology() {
        let cfg = ExecConfig::default();
        let kis_cube = ops::apply(&OpSpec::kis(0), &bases::cube(), &cfg).unwrap();
        let relaxed = canonicalize(&kis_cube, 3, &cfg).unwrap();
        assert_eq!(relaxed.vertex_count(), kis_cube.vertex_count());
        assert_eq!(relaxed.face_count(), kis_cube.face_count());
        assert_eq!(relaxed.faces(), kis_cube.faces());
        assert!(all_finite(&relaxed));
    }

    #[test]
    fn test_canonicalize_improves_edge_tangency() {
        let cfg = ExecConfig::default();
        let kis_cube = ops::apply(&OpSpec::kis(0), &bases::cube(), &cfg).unwrap();
        let before = tangency_residual(&kis_cube, &cfg);
        let relaxed = canonicalize(&kis_cube, 10, &cfg).unwrap();
        let after = tangency_residual(&relaxed, &cfg);
        assert!(
            after < before,
            "residual did not improve: {before} -> {after}"
        );
    }

    #[test]
    fn test_adjust_preserves_topology_and_finiteness() {
        let cfg = ExecConfig::default();
        let prism = bases::prism(5, &cfg).unwrap();
        let adjusted = adjust(&prism, 2, &cfg).unwrap();
        assert_eq!(adjusted.vertex_count(), prism.vertex_count());
        assert_eq!(adjusted.face_count(), prism.face_count());
        assert!(all_finite(&adjusted));
    }

    #[test]
    fn test_out_of_range_index_is_internal_error() {
        // A face referencing a missing vertex must surface as a structural
        // error, matching the geometry calculators, not as a panic.
        let broken = Mesh::new(vec![DVec3::X, DVec3::Y], vec![vec![0, 1, 9]], "broken");
        let cfg = ExecConfig::serial();
        assert!(matches!(
            canonicalize(&broken, 1, &cfg),
            Err(ConwayError::Internal { .. })
        ));
        assert!(matches!(
            adjust(&broken, 1, &cfg),
            Err(ConwayError::Internal { .. })
        ));
    }

    #[test]
    fn test_zero_iterations_is_identity() {
        let cfg = ExecConfig::default();
        let cube = bases::cube();
        let same = canonicalize(&cube, 0, &cfg).unwrap();
        assert_eq!(same.vertices(), cube.vertices());
    }
}
