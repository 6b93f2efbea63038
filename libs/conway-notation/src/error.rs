//! # Notation Errors
//!
//! Error types for Conway notation parsing. Every variant carries the byte
//! offset of the offending character so callers can point at the input.

use thiserror::Error;

/// Errors that can occur while parsing a notation string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    /// The input contained no characters.
    #[error("empty notation string")]
    Empty,

    /// A lowercase letter that is not a known operator.
    #[error("unknown operator '{letter}' at offset {offset}")]
    UnknownOperator { letter: char, offset: usize },

    /// An uppercase letter that is not a known base solid.
    #[error("unknown base solid '{letter}' at offset {offset}")]
    UnknownBase { letter: char, offset: usize },

    /// A character that is neither an operator, a base, nor a digit.
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    /// A base that requires a side count was given none.
    #[error("base '{base}' requires a side count at offset {offset}")]
    MissingArgument { base: char, offset: usize },

    /// An argument outside the declared range.
    #[error("invalid argument {value} for '{letter}' at offset {offset}: {reason}")]
    InvalidArgument {
        letter: char,
        value: u32,
        offset: usize,
        reason: String,
    },

    /// An operator that takes no argument was given one.
    #[error("operator '{letter}' takes no argument (offset {offset})")]
    UnexpectedArgument { letter: char, offset: usize },

    /// The chain never reached a base solid letter.
    #[error("notation must end with a base solid letter")]
    MissingBase,

    /// Characters remained after the base solid.
    #[error("trailing input after base solid at offset {offset}")]
    TrailingInput { offset: usize },
}
