//! # Notation AST
//!
//! Typed representation of a parsed Conway recipe. The base-solid and
//! operator sets are closed, so both are plain sum types rather than
//! string-keyed registries; an unknown identifier cannot survive parsing.

use serde::{Deserialize, Serialize};

/// Default apex offset along the face normal for the kis operator.
pub const DEFAULT_KIS_APEX: f64 = 0.1;

/// Default subdivision level for the trisub operator.
pub const DEFAULT_TRISUB_LEVEL: u32 = 2;

// =============================================================================
// BASE SOLIDS
// =============================================================================

/// A base solid specification.
///
/// `Prism`, `Antiprism` and `Pyramid` carry the side count of their
/// generating polygon (always >= 3 after parsing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseSpec {
    Tetrahedron,
    Cube,
    Octahedron,
    Dodecahedron,
    Icosahedron,
    Prism(u32),
    Antiprism(u32),
    Pyramid(u32),
}

impl BaseSpec {
    /// The canonical name of the generated solid, e.g. `"C"` or `"P5"`.
    pub fn name(&self) -> String {
        match self {
            BaseSpec::Tetrahedron => "T".to_string(),
            BaseSpec::Cube => "C".to_string(),
            BaseSpec::Octahedron => "O".to_string(),
            BaseSpec::Dodecahedron => "D".to_string(),
            BaseSpec::Icosahedron => "I".to_string(),
            BaseSpec::Prism(n) => format!("P{n}"),
            BaseSpec::Antiprism(n) => format!("A{n}"),
            BaseSpec::Pyramid(n) => format!("Y{n}"),
        }
    }
}

// =============================================================================
// OPERATORS
// =============================================================================

/// An operator specification.
///
/// One variant per topology-rewrite rule; the set is closed by design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OpSpec {
    /// Dual (`d`): faces become vertices and vertices become faces.
    Dual,
    /// Ambo (`a`): one vertex per edge, faces from both originals.
    Ambo,
    /// Kis (`k`): raise a pyramid on every n-sided face (`n == 0`: all).
    Kis {
        /// Side count filter; zero matches every face.
        n: u32,
        /// Apex offset along the face normal.
        apex_dist: f64,
    },
    /// Gyro (`g`): chiral pentagonal subdivision of every corner.
    Gyro,
    /// Propellor (`p`): rotated inset face plus a pinwheel of quads.
    Propellor,
    /// Reflect (`r`): mirror through the origin.
    Reflect,
    /// Trisub (`u`): barycentric n² subdivision of triangular faces.
    Trisub {
        /// Subdivision level (>= 1).
        n: u32,
    },
}

impl OpSpec {
    /// Kis with the default apex offset.
    pub fn kis(n: u32) -> Self {
        OpSpec::Kis {
            n,
            apex_dist: DEFAULT_KIS_APEX,
        }
    }

    /// The notation letter identifying this operator.
    pub fn letter(&self) -> char {
        match self {
            OpSpec::Dual => 'd',
            OpSpec::Ambo => 'a',
            OpSpec::Kis { .. } => 'k',
            OpSpec::Gyro => 'g',
            OpSpec::Propellor => 'p',
            OpSpec::Reflect => 'r',
            OpSpec::Trisub { .. } => 'u',
        }
    }

    /// Identifier used when wrapping operator failures, e.g. `"k4"`.
    pub fn identifier(&self) -> String {
        match self {
            OpSpec::Kis { n, .. } if *n > 0 => format!("k{n}"),
            OpSpec::Trisub { n } => format!("u{n}"),
            other => other.letter().to_string(),
        }
    }
}

// =============================================================================
// RECIPE
// =============================================================================

/// A complete parsed recipe: base solid plus operator chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Operators in application order (rightmost notation letter first).
    pub ops: Vec<OpSpec>,
    /// The base solid the chain starts from.
    pub base: BaseSpec,
    /// The notation string this recipe was parsed from.
    pub source: String,
}
