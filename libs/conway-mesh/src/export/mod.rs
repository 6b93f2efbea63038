//! # Mesh Export
//!
//! Serialization of finished meshes into interchange formats. Exporters are
//! plain writers over the public mesh and calculator surface; they never
//! reach into construction internals.

pub mod obj;
