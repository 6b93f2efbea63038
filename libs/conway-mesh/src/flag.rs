//! # Flag Construct
//!
//! A transient, name-addressed description of a mesh under construction.
//! Operators declare vertices and face-boundary arcs symbolically ("the
//! centroid of face 3", "the midpoint of edge (3,7)") before any numeric
//! index exists, then [`FlagSet::build`] materializes the final mesh.
//!
//! Determinism: both vertex names and face names keep their insertion order
//! (a hash map paired with an order list), which fixes the final numeric
//! indices independently of hash iteration order.
//!
//! Robustness policy: a face whose arc chain dangles, exceeds the hop bound,
//! or closes with fewer than three vertices is dropped rather than aborting
//! the whole mesh. Drops are counted in [`BuildStats`] and logged at `warn`.

use std::collections::HashMap;

use glam::DVec3;
use log::warn;

use config::constants::{MAX_FACE_ARITY, MIN_FACE_ARITY};

use crate::mesh::Mesh;

// =============================================================================
// FLAG SET
// =============================================================================

/// Deferred mesh description built from named vertices and directed arcs.
///
/// # Example
///
/// ```rust
/// use conway_mesh::FlagSet;
/// use glam::DVec3;
///
/// let mut flags = FlagSet::new();
/// flags.declare_vertex("a", DVec3::X);
/// flags.declare_vertex("b", DVec3::Y);
/// flags.declare_vertex("c", DVec3::Z);
/// flags.declare_arc("f", "a", "b");
/// flags.declare_arc("f", "b", "c");
/// flags.declare_arc("f", "c", "a");
/// let (mesh, stats) = flags.build("demo");
/// assert_eq!(mesh.face_count(), 1);
/// assert_eq!(stats.faces_dropped, 0);
/// ```
#[derive(Debug, Default)]
pub struct FlagSet {
    /// Vertex names in declaration order.
    vertex_order: Vec<String>,
    /// Vertex name → final index.
    vertex_index: HashMap<String, u32>,
    /// Coordinates, parallel to `vertex_order`.
    positions: Vec<DVec3>,
    /// Face names in declaration order.
    face_order: Vec<String>,
    /// Face name → boundary arcs.
    faces: HashMap<String, FaceArcs>,
    /// Face name → class tag; untagged faces default to class 0.
    classes: HashMap<String, u32>,
}

/// Directed boundary arcs of one face, insertion-ordered.
#[derive(Debug, Default)]
struct FaceArcs {
    /// From-vertex names in declaration order; the walk starts at the first.
    order: Vec<String>,
    /// From-vertex name → to-vertex name.
    next: HashMap<String, String>,
}

/// Diagnostic counters from one materialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Faces successfully reconstructed.
    pub faces_built: usize,
    /// Faces dropped as malformed.
    pub faces_dropped: usize,
}

impl FlagSet {
    /// Creates an empty flag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a named vertex at the given coordinates.
    ///
    /// First writer wins: redeclaring an existing name is a no-op, which is
    /// how independent rewrite paths idempotently share a vertex.
    pub fn declare_vertex(&mut self, name: impl Into<String>, position: DVec3) {
        let name = name.into();
        if self.vertex_index.contains_key(&name) {
            return;
        }
        let index = self.positions.len() as u32;
        self.vertex_index.insert(name.clone(), index);
        self.vertex_order.push(name);
        self.positions.push(position);
    }

    /// Declares that walking `face`'s boundary proceeds from `from` to `to`.
    ///
    /// First writer wins per `(face, from)` pair; a later conflicting arc is
    /// ignored.
    pub fn declare_arc(
        &mut self,
        face: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) {
        let face = face.into();
        let from = from.into();
        if !self.faces.contains_key(&face) {
            self.face_order.push(face.clone());
        }
        let arcs = self.faces.entry(face).or_default();
        if arcs.next.contains_key(&from) {
            return;
        }
        arcs.order.push(from.clone());
        arcs.next.insert(from, to.into());
    }

    /// Tags a face with a class label carried into the built mesh.
    ///
    /// Once any face is tagged, the built mesh gets per-face class tags;
    /// untagged faces come out as class 0. Operators use this to mark which
    /// rewrite rule emitted a face.
    pub fn tag_face(&mut self, face: impl Into<String>, class: u32) {
        self.classes.insert(face.into(), class);
    }

    /// Materializes the described mesh.
    ///
    /// Vertices are numbered in declaration order. Each face is walked from
    /// its first-declared arc until the walk returns to its start; faces
    /// whose chains dangle, exceed the hop bound, or close short are dropped
    /// and counted in the returned [`BuildStats`].
    pub fn build(self, name: impl Into<String>) -> (Mesh, BuildStats) {
        let mut faces = Vec::with_capacity(self.face_order.len());
        let mut classes = Vec::with_capacity(self.face_order.len());
        let mut stats = BuildStats::default();

        'faces: for face_name in &self.face_order {
            let arcs = &self.faces[face_name];
            let Some(start) = arcs.order.first() else {
                stats.faces_dropped += 1;
                warn!("dropping face '{face_name}': no arcs declared");
                continue;
            };

            let mut cycle = Vec::new();
            let mut current = start;
            for _ in 0..MAX_FACE_ARITY {
                let Some(&index) = self.vertex_index.get(current.as_str()) else {
                    stats.faces_dropped += 1;
                    warn!("dropping face '{face_name}': undeclared vertex '{current}'");
                    continue 'faces;
                };
                cycle.push(index);

                let Some(next) = arcs.next.get(current.as_str()) else {
                    stats.faces_dropped += 1;
                    warn!("dropping face '{face_name}': dangling arc at '{current}'");
                    continue 'faces;
                };
                if next == start {
                    if cycle.len() >= MIN_FACE_ARITY {
                        stats.faces_built += 1;
                        faces.push(cycle);
                        classes.push(self.classes.get(face_name.as_str()).copied().unwrap_or(0));
                    } else {
                        stats.faces_dropped += 1;
                        warn!(
                            "dropping face '{face_name}': closed after {} vertices",
                            cycle.len()
                        );
                    }
                    continue 'faces;
                }
                current = next;
            }

            stats.faces_dropped += 1;
            warn!("dropping face '{face_name}': exceeded {MAX_FACE_ARITY} arc hops");
        }

        let mut mesh = Mesh::new(self.positions, faces, name);
        if !self.classes.is_empty() {
            mesh.set_face_classes(classes);
        }
        (mesh, stats)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_single_face_materializes_in_declaration_order() {
        let mut flags = FlagSet::new();
        flags.declare_vertex("v0", DVec3::new(1.0, 0.0, 0.0));
        flags.declare_vertex("v1", DVec3::new(0.0, 1.0, 0.0));
        flags.declare_vertex("v2", DVec3::new(0.0, 0.0, 1.0));
        flags.declare_arc("f0", "v0", "v1");
        flags.declare_arc("f0", "v1", "v2");
        flags.declare_arc("f0", "v2", "v0");

        let (mesh, stats) = flags.build("tri");
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.vertex(0), DVec3::new(1.0, 0.0, 0.0));
        assert_eq!(mesh.vertex(1), DVec3::new(0.0, 1.0, 0.0));
        assert_eq!(mesh.vertex(2), DVec3::new(0.0, 0.0, 1.0));
        assert_eq!(mesh.faces(), &[vec![0, 1, 2]]);
        assert_eq!(stats.faces_built, 1);
        assert_eq!(stats.faces_dropped, 0);
    }

    #[test]
    fn test_vertex_declaration_is_first_writer_wins() {
        let mut flags = FlagSet::new();
        flags.declare_vertex("shared", DVec3::X);
        flags.declare_vertex("shared", DVec3::Y);
        let (mesh, _) = flags.build("t");
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.vertex(0), DVec3::X);
    }

    #[test]
    fn test_arc_declaration_is_first_writer_wins() {
        let mut flags = FlagSet::new();
        for (name, p) in [("a", DVec3::X), ("b", DVec3::Y), ("c", DVec3::Z)] {
            flags.declare_vertex(name, p);
        }
        flags.declare_arc("f", "a", "b");
        flags.declare_arc("f", "a", "c"); // ignored
        flags.declare_arc("f", "b", "c");
        flags.declare_arc("f", "c", "a");
        let (mesh, _) = flags.build("t");
        assert_eq!(mesh.faces(), &[vec![0, 1, 2]]);
    }

    #[test]
    fn test_dangling_arc_drops_face() {
        init_logs();
        let mut flags = FlagSet::new();
        flags.declare_vertex("v0", DVec3::X);
        flags.declare_vertex("v1", DVec3::Y);
        flags.declare_arc("f0", "v0", "v1"); // no arc from v1

        let (mesh, stats) = flags.build("t");
        assert_eq!(mesh.face_count(), 0);
        assert_eq!(stats.faces_dropped, 1);
        assert_eq!(stats.faces_built, 0);
        // The declared vertices survive.
        assert_eq!(mesh.vertex_count(), 2);
    }

    #[test]
    fn test_undeclared_vertex_drops_face() {
        let mut flags = FlagSet::new();
        flags.declare_vertex("a", DVec3::X);
        flags.declare_arc("f", "a", "ghost");
        flags.declare_arc("f", "ghost", "a");
        let (mesh, stats) = flags.build("t");
        assert_eq!(mesh.face_count(), 0);
        assert_eq!(stats.faces_dropped, 1);
    }

    #[test]
    fn test_short_cycle_drops_face() {
        let mut flags = FlagSet::new();
        flags.declare_vertex("a", DVec3::X);
        flags.declare_vertex("b", DVec3::Y);
        flags.declare_arc("f", "a", "b");
        flags.declare_arc("f", "b", "a");
        let (mesh, stats) = flags.build("t");
        assert_eq!(mesh.face_count(), 0);
        assert_eq!(stats.faces_dropped, 1);
    }

    #[test]
    fn test_runaway_chain_hits_hop_bound() {
        init_logs();
        // a → b → c → b → c → ... never returns to a.
        let mut flags = FlagSet::new();
        flags.declare_vertex("a", DVec3::X);
        flags.declare_vertex("b", DVec3::Y);
        flags.declare_vertex("c", DVec3::Z);
        flags.declare_arc("f", "a", "b");
        flags.declare_arc("f", "b", "c");
        flags.declare_arc("f", "c", "b");
        let (mesh, stats) = flags.build("t");
        assert_eq!(mesh.face_count(), 0);
        assert_eq!(stats.faces_dropped, 1);
    }

    #[test]
    fn test_good_face_survives_next_to_dropped_face() {
        let mut flags = FlagSet::new();
        for (name, p) in [("a", DVec3::X), ("b", DVec3::Y), ("c", DVec3::Z)] {
            flags.declare_vertex(name, p);
        }
        flags.declare_arc("bad", "a", "b"); // dangles
        flags.declare_arc("good", "a", "b");
        flags.declare_arc("good", "b", "c");
        flags.declare_arc("good", "c", "a");

        let (mesh, stats) = flags.build("t");
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(stats.faces_built, 1);
        assert_eq!(stats.faces_dropped, 1);
    }

    #[test]
    fn test_face_classes_stay_aligned_when_a_face_drops() {
        let mut flags = FlagSet::new();
        for (name, p) in [("a", DVec3::X), ("b", DVec3::Y), ("c", DVec3::Z)] {
            flags.declare_vertex(name, p);
        }
        flags.declare_arc("bad", "a", "b"); // dangles
        flags.tag_face("bad", 7);
        flags.declare_arc("good", "a", "b");
        flags.declare_arc("good", "b", "c");
        flags.declare_arc("good", "c", "a");
        flags.tag_face("good", 2);

        let (mesh, stats) = flags.build("t");
        assert_eq!(stats.faces_dropped, 1);
        // The dropped face's tag vanishes with it; classes track faces 1:1.
        assert_eq!(mesh.face_classes(), Some(&[2][..]));
    }

    #[test]
    fn test_untagged_build_has_no_face_classes() {
        let mut flags = FlagSet::new();
        for (name, p) in [("a", DVec3::X), ("b", DVec3::Y), ("c", DVec3::Z)] {
            flags.declare_vertex(name, p);
        }
        flags.declare_arc("f", "a", "b");
        flags.declare_arc("f", "b", "c");
        flags.declare_arc("f", "c", "a");
        let (mesh, _) = flags.build("t");
        assert!(mesh.face_classes().is_none());
    }

    #[test]
    fn test_face_order_follows_declaration_order() {
        let mut flags = FlagSet::new();
        for (name, p) in [
            ("a", DVec3::X),
            ("b", DVec3::Y),
            ("c", DVec3::Z),
            ("d", DVec3::ONE),
        ] {
            flags.declare_vertex(name, p);
        }
        for (face, from, to) in [
            ("second", "a", "c"),
            ("second", "c", "d"),
            ("second", "d", "a"),
        ] {
            flags.declare_arc(face, from, to);
        }
        // Declared later but alphabetically earlier; declaration order wins.
        for (face, from, to) in [
            ("first", "a", "b"),
            ("first", "b", "c"),
            ("first", "c", "a"),
        ] {
            flags.declare_arc(face, from, to);
        }
        let (mesh, _) = flags.build("t");
        assert_eq!(mesh.faces()[0], vec![0, 2, 3]);
        assert_eq!(mesh.faces()[1], vec![0, 1, 2]);
    }
}
