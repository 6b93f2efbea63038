//! # Configuration Constants
//!
//! Centralized constants for the Conway polyhedron pipeline. All geometry
//! tolerances, iteration counts, and parallelism defaults are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Topology**: Safety bounds for mesh reconstruction
//! - **Relaxation**: Canonicalization iteration defaults and damping
//! - **Parallelism**: Chunked executor defaults

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used for determining if two floating-point values are "equal" within
/// numerical tolerance, and for guarding divisions by near-zero lengths.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

// =============================================================================
// TOPOLOGY CONSTANTS
// =============================================================================

/// Maximum number of arc hops followed when reconstructing a single face
/// from its boundary flags.
///
/// A well-formed face closes long before this bound; exceeding it means the
/// arc chain is cyclic or corrupt, and the face is dropped.
pub const MAX_FACE_ARITY: usize = 1000;

/// Minimum number of distinct vertices a reconstructed face must have.
pub const MIN_FACE_ARITY: usize = 3;

// =============================================================================
// RELAXATION CONSTANTS
// =============================================================================

/// Damping factor applied to the edge-tangency adjustment so successive
/// iterations stay numerically stable.
pub const TANGENT_STABILITY: f64 = 0.1;

/// Default iteration count for full canonicalization.
pub const DEFAULT_CANONICAL_ITERATIONS: usize = 3;

/// Default iteration count for the quick adjustment pass applied after
/// generating ruled solids (prisms, antiprisms).
pub const DEFAULT_ADJUST_ITERATIONS: usize = 1;

// =============================================================================
// PARALLELISM CONSTANTS
// =============================================================================

/// Default upper bound on the number of concurrently processed chunks.
pub const DEFAULT_MAX_CHUNKS: usize = 8;

/// Minimum number of work items before chunked execution is worth the
/// fan-out overhead; smaller workloads run as a single serial chunk.
pub const DEFAULT_MIN_PARALLEL_WORK: usize = 256;

// =============================================================================
// GLOBAL CONFIG
// =============================================================================

/// Validated global configuration for the geometry pipeline.
///
/// # Example
///
/// ```rust
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalConfig {
    /// Numeric tolerance propagated into geometry code.
    pub tolerance: f64,
    /// Bound on arc hops when walking one face's boundary flags.
    pub max_face_arity: usize,
}

impl GlobalConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// values.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(1.0e-8, 100).expect("valid config");
    /// assert_eq!(cfg.max_face_arity, 100);
    /// ```
    pub fn new(tolerance: f64, max_face_arity: usize) -> Result<Self, ConfigError> {
        if tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if max_face_arity < MIN_FACE_ARITY {
            return Err(ConfigError::InvalidFaceArity(max_face_arity));
        }
        Ok(Self {
            tolerance,
            max_face_arity,
        })
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            tolerance: EPSILON,
            max_face_arity: MAX_FACE_ARITY,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when tolerance is zero or negative.
    InvalidTolerance(f64),
    /// Raised when the face-walk bound is too small to describe a polygon.
    InvalidFaceArity(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive: {value}")
            }
            ConfigError::InvalidFaceArity(value) => {
                write!(f, "max_face_arity must be >= {MIN_FACE_ARITY}: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
