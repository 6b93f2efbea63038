//! # Base Solids
//!
//! Generators for the seed polyhedra a recipe starts from: the five Platonic
//! solids from fixed coordinate tables, plus parameterized prisms, antiprisms
//! and pyramids built from ring formulas.
//!
//! All faces wind counterclockwise seen from outside, and the directed-edge
//! structure is globally consistent, which the topology operators depend on.
//! The ruled solids come out of their formulas numerically rough, so prisms
//! and antiprisms get one dual-reciprocation [`adjust`] pass and pyramids a
//! short [`canonicalize`] run before they are returned.

use std::f64::consts::TAU;

use glam::DVec3;

use config::constants::{DEFAULT_ADJUST_ITERATIONS, DEFAULT_CANONICAL_ITERATIONS};
use conway_notation::BaseSpec;

use crate::canonical::{adjust, canonicalize};
use crate::error::{ConwayError, Result};
use crate::exec::ExecConfig;
use crate::mesh::Mesh;

// =============================================================================
// DISPATCH
// =============================================================================

/// Generates the mesh for a base-solid specification.
///
/// Failures are wrapped with the base identifier, e.g. `Base { base: "P2" }`.
pub fn generate(spec: &BaseSpec, cfg: &ExecConfig) -> Result<Mesh> {
    let result = match *spec {
        BaseSpec::Tetrahedron => Ok(tetrahedron()),
        BaseSpec::Cube => Ok(cube()),
        BaseSpec::Octahedron => Ok(octahedron()),
        BaseSpec::Dodecahedron => Ok(dodecahedron()),
        BaseSpec::Icosahedron => Ok(icosahedron()),
        BaseSpec::Prism(n) => prism(n, cfg),
        BaseSpec::Antiprism(n) => antiprism(n, cfg),
        BaseSpec::Pyramid(n) => pyramid(n, cfg),
    };
    result.map_err(|source| ConwayError::in_base(spec.name(), source))
}

fn check_side_count(base: &str, n: u32) -> Result<()> {
    if n < 3 {
        return Err(ConwayError::invalid_parameter(
            base,
            format!("side count must be >= 3, got {n}"),
        ));
    }
    Ok(())
}

// =============================================================================
// PLATONIC SOLIDS
// =============================================================================

/// The tetrahedron `T`.
pub fn tetrahedron() -> Mesh {
    Mesh::new(
        vec![
            DVec3::new(1.0, 1.0, 1.0),
            DVec3::new(1.0, -1.0, -1.0),
            DVec3::new(-1.0, 1.0, -1.0),
            DVec3::new(-1.0, -1.0, 1.0),
        ],
        vec![vec![0, 1, 2], vec![0, 2, 3], vec![0, 3, 1], vec![1, 3, 2]],
        "T",
    )
}

/// The cube `C`.
pub fn cube() -> Mesh {
    Mesh::new(
        vec![
            DVec3::new(0.707, 0.707, 0.707),
            DVec3::new(-0.707, 0.707, 0.707),
            DVec3::new(-0.707, -0.707, 0.707),
            DVec3::new(0.707, -0.707, 0.707),
            DVec3::new(0.707, -0.707, -0.707),
            DVec3::new(0.707, 0.707, -0.707),
            DVec3::new(-0.707, 0.707, -0.707),
            DVec3::new(-0.707, -0.707, -0.707),
        ],
        vec![
            vec![3, 0, 1, 2],
            vec![3, 4, 5, 0],
            vec![0, 5, 6, 1],
            vec![1, 6, 7, 2],
            vec![2, 7, 4, 3],
            vec![5, 4, 7, 6],
        ],
        "C",
    )
}

/// The octahedron `O`.
pub fn octahedron() -> Mesh {
    Mesh::new(
        vec![
            DVec3::new(0.0, 0.0, 1.414),
            DVec3::new(1.414, 0.0, 0.0),
            DVec3::new(0.0, 1.414, 0.0),
            DVec3::new(-1.414, 0.0, 0.0),
            DVec3::new(0.0, -1.414, 0.0),
            DVec3::new(0.0, 0.0, -1.414),
        ],
        vec![
            vec![0, 1, 2],
            vec![0, 2, 3],
            vec![0, 3, 4],
            vec![0, 4, 1],
            vec![1, 4, 5],
            vec![1, 5, 2],
            vec![2, 5, 3],
            vec![3, 5, 4],
        ],
        "O",
    )
}

/// The dodecahedron `D`.
pub fn dodecahedron() -> Mesh {
    Mesh::new(
        vec![
            DVec3::new(0.0, 0.0, 1.07047),
            DVec3::new(0.713644, 0.0, 0.797878),
            DVec3::new(-0.356822, 0.618, 0.797878),
            DVec3::new(-0.356822, -0.618, 0.797878),
            DVec3::new(0.797878, 0.618034, 0.356822),
            DVec3::new(0.797878, -0.618, 0.356822),
            DVec3::new(-0.934172, 0.381966, 0.356822),
            DVec3::new(0.136294, 1.0, 0.356822),
            DVec3::new(0.136294, -1.0, 0.356822),
            DVec3::new(-0.934172, -0.381966, 0.356822),
            DVec3::new(0.934172, 0.381966, -0.356822),
            DVec3::new(0.934172, -0.381966, -0.356822),
            DVec3::new(-0.797878, 0.618, -0.356822),
            DVec3::new(-0.136294, 1.0, -0.356822),
            DVec3::new(-0.136294, -1.0, -0.356822),
            DVec3::new(-0.797878, -0.618034, -0.356822),
            DVec3::new(0.356822, 0.618, -0.797878),
            DVec3::new(0.356822, -0.618, -0.797878),
            DVec3::new(-0.713644, 0.0, -0.797878),
            DVec3::new(0.0, 0.0, -1.07047),
        ],
        vec![
            vec![0, 1, 4, 7, 2],
            vec![0, 2, 6, 9, 3],
            vec![0, 3, 8, 5, 1],
            vec![1, 5, 11, 10, 4],
            vec![2, 7, 13, 12, 6],
            vec![3, 9, 15, 14, 8],
            vec![4, 10, 16, 13, 7],
            vec![5, 8, 14, 17, 11],
            vec![6, 12, 18, 15, 9],
            vec![10, 11, 17, 19, 16],
            vec![12, 13, 16, 19, 18],
            vec![14, 15, 18, 19, 17],
        ],
        "D",
    )
}

/// The icosahedron `I`.
pub fn icosahedron() -> Mesh {
    Mesh::new(
        vec![
            DVec3::new(0.0, 0.0, 1.176),
            DVec3::new(1.051, 0.0, 0.526),
            DVec3::new(0.324, 1.0, 0.525),
            DVec3::new(-0.851, 0.618, 0.526),
            DVec3::new(-0.851, -0.618, 0.526),
            DVec3::new(0.325, -1.0, 0.526),
            DVec3::new(0.851, 0.618, -0.526),
            DVec3::new(0.851, -0.618, -0.526),
            DVec3::new(-0.325, 1.0, -0.526),
            DVec3::new(-1.051, 0.0, -0.526),
            DVec3::new(-0.325, -1.0, -0.526),
            DVec3::new(0.0, 0.0, -1.176),
        ],
        vec![
            vec![0, 1, 2],
            vec![0, 2, 3],
            vec![0, 3, 4],
            vec![0, 4, 5],
            vec![0, 5, 1],
            vec![1, 5, 7],
            vec![1, 7, 6],
            vec![1, 6, 2],
            vec![2, 6, 8],
            vec![2, 8, 3],
            vec![3, 8, 9],
            vec![3, 9, 4],
            vec![4, 9, 10],
            vec![4, 10, 5],
            vec![5, 10, 7],
            vec![6, 7, 11],
            vec![6, 11, 8],
            vec![7, 10, 11],
            vec![8, 11, 9],
            vec![9, 11, 10],
        ],
        "I",
    )
}

// =============================================================================
// RULED SOLIDS
// =============================================================================

/// The n-gonal prism `Pn`: two parallel n-gon rings joined by quads.
pub fn prism(n: u32, cfg: &ExecConfig) -> Result<Mesh> {
    check_side_count("P", n)?;
    let theta = TAU / f64::from(n);
    // Half-height chosen so the side quads start out square.
    let h = (theta / 2.0).sin();

    let mut vertices = Vec::with_capacity(2 * n as usize);
    for ring_z in [-h, h] {
        for i in 0..n {
            let a = f64::from(i) * theta;
            vertices.push(DVec3::new(-a.cos(), -a.sin(), ring_z));
        }
    }

    let mut faces = Vec::with_capacity(n as usize + 2);
    faces.push((0..n).rev().collect());
    faces.push((n..2 * n).collect());
    for i in 0..n {
        let j = (i + 1) % n;
        faces.push(vec![i, j, j + n, i + n]);
    }

    let mesh = Mesh::new(vertices, faces, format!("P{n}"));
    adjust(&mesh, DEFAULT_ADJUST_ITERATIONS, cfg)
}

/// The n-gonal antiprism `An`: two offset n-gon rings joined by triangles.
pub fn antiprism(n: u32, cfg: &ExecConfig) -> Result<Mesh> {
    check_side_count("A", n)?;
    let theta = TAU / f64::from(n);
    // Ring radius and half-height that put both rings on the unit sphere
    // with near-equilateral side triangles.
    let mut h = (1.0 - 4.0 / (4.0 + 2.0 * (theta / 2.0).cos() - 2.0 * theta.cos())).sqrt();
    let mut r = (1.0 - h * h).sqrt();
    let f = (h * h + (r * (theta / 2.0).cos()).powi(2)).sqrt();
    r /= f;
    h /= f;

    let mut vertices = Vec::with_capacity(2 * n as usize);
    for i in 0..n {
        let a = f64::from(i) * theta;
        vertices.push(DVec3::new(r * a.cos(), r * a.sin(), h));
    }
    for i in 0..n {
        let a = (f64::from(i) + 0.5) * theta;
        vertices.push(DVec3::new(r * a.cos(), r * a.sin(), -h));
    }

    let mut faces = Vec::with_capacity(2 * n as usize + 2);
    faces.push((0..n).collect());
    faces.push((n..2 * n).rev().collect());
    for i in 0..n {
        let j = (i + 1) % n;
        // The lower ring is rotated half a step, so each lower vertex sits
        // between two upper ones and vice versa.
        faces.push(vec![i, i + n, j]);
        faces.push(vec![j + n, j, i + n]);
    }

    let mesh = Mesh::new(vertices, faces, format!("A{n}"));
    adjust(&mesh, DEFAULT_ADJUST_ITERATIONS, cfg)
}

/// The n-gonal pyramid `Yn`: one n-gon ring plus an apex.
pub fn pyramid(n: u32, cfg: &ExecConfig) -> Result<Mesh> {
    check_side_count("Y", n)?;
    let theta = TAU / f64::from(n);

    let mut vertices = Vec::with_capacity(n as usize + 1);
    for i in 0..n {
        let a = f64::from(i) * theta;
        vertices.push(DVec3::new(-a.cos(), -a.sin(), -0.2));
    }
    vertices.push(DVec3::new(0.0, 0.0, 1.0));

    let mut faces = Vec::with_capacity(n as usize + 1);
    faces.push((0..n).rev().collect());
    for i in 0..n {
        faces.push(vec![i, (i + 1) % n, n]);
    }

    let mesh = Mesh::new(vertices, faces, format!("Y{n}"));
    canonicalize(&mesh, DEFAULT_CANONICAL_ITERATIONS, cfg)
}

// =============================================================================
// TESTS
// =============================================================================
