//! # Geometry Calculators
//!
//! Read-only per-face calculators (edge list, centroids, normals) used by
//! operators, the canonicalizer, and exporters. Each calculator maps face
//! indices independently through the chunked executor and merges the results
//! in face order, so the output never depends on the parallel configuration.

use std::collections::HashSet;

use glam::DVec3;

use config::constants::EPSILON;

use crate::error::{ConwayError, Result};
use crate::exec::{try_map_chunked, ExecConfig};
use crate::mesh::{EdgeKey, Mesh};

// =============================================================================
// PER-FACE PRIMITIVES
// =============================================================================

/// Centroid of a face's vertex positions.
pub fn face_center(points: &[DVec3]) -> DVec3 {
    if points.is_empty() {
        return DVec3::ZERO;
    }
    points.iter().sum::<DVec3>() / points.len() as f64
}

/// Unit normal of a face, averaged over all cyclic vertex triples.
///
/// With the mesh winding convention (counterclockwise seen from outside) the
/// result points outward. Degenerate faces yield the zero vector rather
/// than a non-finite one.
pub fn face_normal(points: &[DVec3]) -> DVec3 {
    let n = points.len();
    if n < 3 {
        return DVec3::ZERO;
    }
    let mut sum = DVec3::ZERO;
    let mut v1 = points[n - 2];
    let mut v2 = points[n - 1];
    for &v3 in points {
        sum += (v2 - v1).cross(v3 - v2);
        v1 = v2;
        v2 = v3;
    }
    if sum.length_squared() < EPSILON {
        return DVec3::ZERO;
    }
    sum.normalize()
}

/// Resolves a face's vertex positions, verifying index bounds.
fn face_points(mesh: &Mesh, face_index: usize) -> Result<Vec<DVec3>> {
    let face = mesh
        .faces()
        .get(face_index)
        .ok_or_else(|| ConwayError::internal(format!("face index {face_index} out of range")))?;
    face.iter()
        .map(|&v| {
            mesh.vertices().get(v as usize).copied().ok_or_else(|| {
                ConwayError::internal(format!("vertex index {v} out of range in face {face_index}"))
            })
        })
        .collect()
}

// =============================================================================
// CALCULATORS
// =============================================================================

/// The deduplicated undirected edge list of a mesh.
///
/// Each face's edges are computed independently; the merge keeps the first
/// occurrence of every [`EdgeKey`] in face order, so the result is
/// deterministic and configuration-independent.
pub fn edges_of(mesh: &Mesh, cfg: &ExecConfig) -> Result<Vec<EdgeKey>> {
    let vertex_count = mesh.vertex_count() as u32;
    let per_face: Vec<Vec<EdgeKey>> = try_map_chunked(mesh.face_count(), cfg, |i| {
        let face = &mesh.faces()[i];
        let mut edges = Vec::with_capacity(face.len());
        for (j, &v) in face.iter().enumerate() {
            if v >= vertex_count {
                return Err(ConwayError::internal(format!(
                    "vertex index {v} out of range in face {i}"
                )));
            }
            let next = face[(j + 1) % face.len()];
            edges.push(EdgeKey::new(v, next));
        }
        Ok(edges)
    })?;

    let mut seen = HashSet::new();
    let mut edges = Vec::new();
    for face_edges in per_face {
        for edge in face_edges {
            if seen.insert(edge) {
                edges.push(edge);
            }
        }
    }
    Ok(edges)
}

/// Face centroids, one per face in face order.
pub fn centers_of(mesh: &Mesh, cfg: &ExecConfig) -> Result<Vec<DVec3>> {
    try_map_chunked(mesh.face_count(), cfg, |i| {
        Ok(face_center(&face_points(mesh, i)?))
    })
}

/// Unit face normals, one per face in face order.
pub fn normals_of(mesh: &Mesh, cfg: &ExecConfig) -> Result<Vec<DVec3>> {
    try_map_chunked(mesh.face_count(), cfg, |i| {
        Ok(face_normal(&face_points(mesh, i)?))
    })
}

// =============================================================================
// TESTS
// =============================================================================
