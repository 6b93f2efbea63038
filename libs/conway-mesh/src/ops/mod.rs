//! # Operator Engine
//!
//! The seven topology-rewrite rules, each built on the [`crate::flag`]
//! construct. Every operator visits each face of the input mesh and, for
//! each directed edge of that face, emits symbolic vertices and arcs
//! according to its rewrite rule; materialization assigns final indices.
//!
//! Symbolic names are canonical functions of original vertex indices, face
//! indices, or edges, so two rules referring to the same geometric feature
//! (say, the midpoint of edge (3,7)) collapse to a single declared vertex.
//!
//! Operators never mutate their input; each returns a freshly built mesh.

pub mod ambo;
pub mod dual;
pub mod gyro;
pub mod kis;
pub mod propellor;
pub mod reflect;
pub mod trisub;

use glam::DVec3;

use conway_notation::OpSpec;

use crate::error::{ConwayError, Result};
use crate::exec::ExecConfig;
use crate::mesh::{EdgeKey, Mesh};

// =============================================================================
// DISPATCH
// =============================================================================

/// Applies one operator to a mesh.
///
/// Failures are wrapped with the operator identifier, preserving the cause.
///
/// # Example
///
/// ```rust
/// use conway_mesh::{bases, ops, ExecConfig};
/// use conway_notation::OpSpec;
///
/// let cube = bases::cube();
/// let dual = ops::apply(&OpSpec::Dual, &cube, &ExecConfig::default()).unwrap();
/// assert_eq!(dual.vertex_count(), 6);
/// assert_eq!(dual.face_count(), 8);
/// ```
pub fn apply(op: &OpSpec, mesh: &Mesh, cfg: &ExecConfig) -> Result<Mesh> {
    let id = op.identifier();
    if mesh.is_empty() {
        return Err(ConwayError::in_operator(
            id,
            ConwayError::internal("operator applied to an empty mesh"),
        ));
    }

    let result = match *op {
        OpSpec::Dual => dual::dual(mesh, cfg),
        OpSpec::Ambo => ambo::ambo(mesh),
        OpSpec::Kis { n, apex_dist } => kis::kis(mesh, n, apex_dist, cfg),
        OpSpec::Gyro => gyro::gyro(mesh, cfg),
        OpSpec::Propellor => propellor::propellor(mesh),
        OpSpec::Reflect => reflect::reflect(mesh),
        OpSpec::Trisub { n } => trisub::trisub(mesh, n),
    };
    result.map_err(|source| ConwayError::in_operator(id, source))
}

// =============================================================================
// SHARED NAMING & INTERPOLATION
// =============================================================================

/// Name of the vertex carried over from original vertex `v`.
pub(crate) fn vertex_name(v: u32) -> String {
    format!("v{v}")
}

/// Name of the vertex placed at the center of original face `f`.
pub(crate) fn center_name(f: usize) -> String {
    format!("f{f}")
}

/// Name of the vertex at the midpoint of undirected edge `(a, b)`.
///
/// Canonical in the edge's endpoint order, so both incident faces agree.
pub(crate) fn midpoint_name(a: u32, b: u32) -> String {
    let key = EdgeKey::new(a, b);
    format!("e{}_{}", key.0, key.1)
}

/// Name of the vertex one third of the way from `a` to `b`.
///
/// Directed: `(a, b)` and `(b, a)` are two distinct points.
pub(crate) fn third_name(a: u32, b: u32) -> String {
    format!("t{a}~{b}")
}

/// Point one third of the way from `a` to `b`.
pub(crate) fn one_third(a: DVec3, b: DVec3) -> DVec3 {
    a + (b - a) / 3.0
}

/// Midpoint of `a` and `b`.
pub(crate) fn midpoint(a: DVec3, b: DVec3) -> DVec3 {
    (a + b) * 0.5
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bases;

    #[test]
    fn test_midpoint_name_is_direction_independent() {
        assert_eq!(midpoint_name(3, 7), midpoint_name(7, 3));
        assert_eq!(midpoint_name(3, 7), "e3_7");
    }

    #[test]
    fn test_third_name_is_directed() {
        assert_ne!(third_name(3, 7), third_name(7, 3));
    }

    #[test]
    fn test_empty_mesh_is_rejected() {
        let empty = Mesh::new(Vec::new(), Vec::new(), "empty");
        let result = apply(&OpSpec::Dual, &empty, &ExecConfig::default());
        assert!(matches!(result, Err(ConwayError::Operator { .. })));
    }

    #[test]
    fn test_failure_carries_operator_identifier() {
        let empty = Mesh::new(Vec::new(), Vec::new(), "empty");
        let err = apply(&OpSpec::kis(4), &empty, &ExecConfig::default()).unwrap_err();
        assert!(err.to_string().contains("'k4'"));
    }

    #[test]
    fn test_every_operator_preserves_validity_on_cube() {
        let cube = bases::cube();
        let cfg = ExecConfig::default();
        for op in [
            OpSpec::Dual,
            OpSpec::Ambo,
            OpSpec::kis(0),
            OpSpec::Gyro,
            OpSpec::Propellor,
            OpSpec::Reflect,
            OpSpec::Trisub { n: 2 },
        ] {
            let out = apply(&op, &cube, &cfg).unwrap();
            assert!(out.validate(), "operator {} broke mesh invariants", op.identifier());
        }
    }
}
