//! # Mesh Data Structure
//!
//! Polygonal mesh representation: an ordered list of 3-D vertices and an
//! ordered list of variable-length face cycles. Faces wind counterclockwise
//! as seen from outside, so the outward normal is defined by vertex order
//! alone.
//!
//! Derived geometry (edge list, face centers, face normals) is cached per
//! mesh instance. Meshes are immutable between pipeline stages, so the cache
//! never needs explicit invalidation; changing vertices or faces means
//! constructing a new mesh.

use std::sync::OnceLock;

use glam::DVec3;

use crate::error::Result;
use crate::exec::ExecConfig;
use crate::geometry;

// =============================================================================
// EDGE KEY
// =============================================================================

/// An undirected edge identified by its two endpoint indices.
///
/// The constructor orders the pair, so the key is independent of which face
/// or traversal direction discovered the edge.
///
/// # Example
///
/// ```rust
/// use conway_mesh::EdgeKey;
///
/// assert_eq!(EdgeKey::new(7, 3), EdgeKey::new(3, 7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(pub u32, pub u32);

impl EdgeKey {
    /// Creates a canonical key with endpoints ordered `(min, max)`.
    pub fn new(a: u32, b: u32) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }
}

// =============================================================================
// MESH
// =============================================================================

/// A polygonal mesh with named provenance.
///
/// # Example
///
/// ```rust
/// use conway_mesh::Mesh;
/// use glam::DVec3;
///
/// let mesh = Mesh::new(
///     vec![DVec3::X, DVec3::Y, DVec3::Z],
///     vec![vec![0, 1, 2]],
///     "demo",
/// );
/// assert_eq!(mesh.vertex_count(), 3);
/// assert!(mesh.validate());
/// ```
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Vertex positions, indexed 0..N-1.
    vertices: Vec<DVec3>,
    /// Face cycles of vertex indices, counterclockwise seen from outside.
    faces: Vec<Vec<u32>>,
    /// Recipe name, e.g. `"dC"` after taking the dual of a cube.
    name: String,
    /// Optional per-face class tags (e.g. which rewrite rule emitted a face).
    face_classes: Option<Vec<u32>>,
    /// Lazily computed derived geometry.
    cache: GeometryCache,
}

#[derive(Debug, Clone, Default)]
struct GeometryCache {
    edges: OnceLock<Vec<EdgeKey>>,
    centers: OnceLock<Vec<DVec3>>,
    normals: OnceLock<Vec<DVec3>>,
}

impl Mesh {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Creates a mesh from vertices and face cycles.
    pub fn new(vertices: Vec<DVec3>, faces: Vec<Vec<u32>>, name: impl Into<String>) -> Self {
        Self {
            vertices,
            faces,
            name: name.into(),
            face_classes: None,
            cache: GeometryCache::default(),
        }
    }

    /// Copies this mesh's topology and name with replacement coordinates.
    ///
    /// Used by the canonicalizer, which adjusts positions but never touches
    /// topology. The derived-geometry cache starts empty.
    pub fn with_vertices(&self, vertices: Vec<DVec3>) -> Self {
        debug_assert_eq!(vertices.len(), self.vertices.len());
        Self {
            vertices,
            faces: self.faces.clone(),
            name: self.name.clone(),
            face_classes: self.face_classes.clone(),
            cache: GeometryCache::default(),
        }
    }

    // =========================================================================
    // QUERY METHODS
    // =========================================================================

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the face cycles.
    #[inline]
    pub fn faces(&self) -> &[Vec<u32>] {
        &self.faces
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Returns the recipe name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the per-face class tags, if any.
    pub fn face_classes(&self) -> Option<&[u32]> {
        self.face_classes.as_deref()
    }

    /// Sets per-face class tags.
    pub fn set_face_classes(&mut self, classes: Vec<u32>) {
        self.face_classes = Some(classes);
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Validates the mesh invariants.
    ///
    /// Checks that every face has at least 3 indices and that all indices
    /// are in range. Returns true if valid.
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;
        for face in &self.faces {
            if face.len() < config::constants::MIN_FACE_ARITY {
                return false;
            }
            if face.iter().any(|&v| v >= vertex_count) {
                return false;
            }
        }
        true
    }

    // =========================================================================
    // DERIVED GEOMETRY
    // =========================================================================

    /// The deduplicated undirected edge list, computed on first use.
    pub fn edges(&self, cfg: &ExecConfig) -> Result<&[EdgeKey]> {
        if let Some(edges) = self.cache.edges.get() {
            return Ok(edges);
        }
        let computed = geometry::edges_of(self, cfg)?;
        Ok(self.cache.edges.get_or_init(|| computed))
    }

    /// Face centroids in face order, computed on first use.
    pub fn centers(&self, cfg: &ExecConfig) -> Result<&[DVec3]> {
        if let Some(centers) = self.cache.centers.get() {
            return Ok(centers);
        }
        let computed = geometry::centers_of(self, cfg)?;
        Ok(self.cache.centers.get_or_init(|| computed))
    }

    /// Unit face normals in face order, computed on first use.
    pub fn normals(&self, cfg: &ExecConfig) -> Result<&[DVec3]> {
        if let Some(normals) = self.cache.normals.get() {
            return Ok(normals);
        }
        let computed = geometry::normals_of(self, cfg)?;
        Ok(self.cache.normals.get_or_init(|| computed))
    }
}

// =============================================================================
// TESTS
// =============================================================================
