//! # Pipeline Configuration
//!
//! Centralized constants and validated configuration values shared by every
//! crate in the Conway polyhedron pipeline. Keeping them here means geometry
//! code never hard-codes a tolerance or an iteration count.

pub mod constants;

pub use constants::{ConfigError, GlobalConfig};
