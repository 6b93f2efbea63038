//! # Conway Notation
//!
//! Parser for Conway polyhedron notation. Converts compact recipe strings
//! into a typed AST consumed by the mesh generation pipeline.
//!
//! ## Architecture
//!
//! ```text
//! Notation string → conway-notation (Recipe AST) → conway-mesh (Mesh)
//! ```
//!
//! ## Notation
//!
//! A recipe reads left to right as a chain of operator letters followed by a
//! base solid letter, e.g. `dakC`: take a cube (`C`), ambo it (`a`), kis the
//! result (`k`), then take the dual (`d`). Operators therefore *apply*
//! right-to-left; [`Recipe::ops`] is stored in application order.
//!
//! ## Usage
//!
//! ```rust
//! use conway_notation::{parse, BaseSpec, OpSpec};
//!
//! let recipe = parse("aC").unwrap();
//! assert_eq!(recipe.base, BaseSpec::Cube);
//! assert_eq!(recipe.ops, vec![OpSpec::Ambo]);
//! ```

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::{BaseSpec, OpSpec, Recipe};
pub use error::NotationError;
pub use parser::parse;
