//! # Conway Mesh Generation
//!
//! Turns parsed Conway notation recipes into polygonal meshes.
//!
//! ## Architecture
//!
//! ```text
//! Recipe → bases (seed mesh) → ops (topology rewrites) → canonical → export
//! ```
//!
//! Every operator is expressed as a set of symbolic vertex and arc
//! declarations over a [`FlagSet`], materialized into an indexed [`Mesh`]
//! once all rewrite rules have run. Derived geometry (edges, centers,
//! normals) comes from per-face calculators fanned out through the chunked
//! executor, so results are identical across parallel configurations.
//!
//! ## Usage
//!
//! ```rust
//! use conway_mesh::compile_and_generate;
//!
//! // Dual of a cube: the octahedron.
//! let mesh = compile_and_generate("dC").unwrap();
//! assert_eq!(mesh.vertex_count(), 6);
//! assert_eq!(mesh.face_count(), 8);
//! ```

pub mod bases;
pub mod canonical;
pub mod error;
pub mod exec;
pub mod export;
pub mod flag;
pub mod geometry;
pub mod mesh;
pub mod ops;
pub mod pipeline;

pub use error::{ConwayError, Result};
pub use exec::ExecConfig;
pub use flag::{BuildStats, FlagSet};
pub use mesh::{EdgeKey, Mesh};
pub use pipeline::{
    ChannelObserver, MeshSnapshot, NullObserver, Pipeline, PipelineEvent, PipelineOptions,
    ProgressObserver,
};

/// Parses a notation string and generates its mesh with default options.
///
/// Convenience entry point for callers that need no progress reporting or
/// custom execution configuration.
pub fn compile_and_generate(notation: &str) -> Result<Mesh> {
    let recipe = conway_notation::parse(notation)?;
    Pipeline::new(PipelineOptions::default()).run(&recipe, &NullObserver)
}
