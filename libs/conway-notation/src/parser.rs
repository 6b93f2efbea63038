//! # Notation Parser
//!
//! Hand-rolled character scanner for Conway notation. The grammar is small
//! enough that a single forward pass suffices:
//!
//! ```text
//! recipe   := operator* base
//! operator := 'd' | 'a' | 'g' | 'p' | 'r' | 'k' digits? | 'u' digits?
//! base     := 'T' | 'C' | 'O' | 'D' | 'I'
//!           | ('P' | 'A' | 'Y') digits
//! ```
//!
//! Operators are written left of the base but apply right-to-left, so the
//! scanned chain is reversed into application order before it is returned.

use crate::ast::{BaseSpec, OpSpec, Recipe, DEFAULT_TRISUB_LEVEL};
use crate::error::NotationError;

// =============================================================================
// SCANNER
// =============================================================================

/// Character scanner with byte-offset tracking.
struct Scanner<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    len: usize,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.char_indices().peekable(),
            len: source.len(),
        }
    }

    /// Next character without consuming it.
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Byte offset of the next character (input length at EOF).
    fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.len, |&(i, _)| i)
    }

    fn advance(&mut self) -> Option<char> {
        self.chars.next().map(|(_, c)| c)
    }

    /// Consumes a run of ASCII digits, if any.
    fn digits(&mut self) -> Option<u32> {
        let mut value: Option<u32> = None;
        while let Some(c) = self.peek() {
            let Some(d) = c.to_digit(10) else { break };
            self.advance();
            value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(d));
        }
        value
    }
}

// =============================================================================
// PARSER
// =============================================================================

/// Parses a Conway notation string into a [`Recipe`].
///
/// ## Example
///
/// ```rust
/// use conway_notation::{parse, BaseSpec, OpSpec};
///
/// let recipe = parse("k4aC").unwrap();
/// assert_eq!(recipe.base, BaseSpec::Cube);
/// // Application order: ambo first, then kis restricted to squares.
/// assert_eq!(recipe.ops, vec![OpSpec::Ambo, OpSpec::kis(4)]);
/// ```
pub fn parse(source: &str) -> Result<Recipe, NotationError> {
    let trimmed = source.trim();
    if trimmed.is_empty() {
        return Err(NotationError::Empty);
    }

    let mut scanner = Scanner::new(trimmed);
    let mut ops = Vec::new();

    loop {
        let offset = scanner.offset();
        let Some(c) = scanner.advance() else {
            return Err(NotationError::MissingBase);
        };

        if c.is_ascii_uppercase() {
            let base = parse_base(c, offset, &mut scanner)?;
            let trailing = scanner.offset();
            if scanner.peek().is_some() {
                return Err(NotationError::TrailingInput { offset: trailing });
            }
            // Notation order is outermost-first; application order is the
            // reverse.
            ops.reverse();
            return Ok(Recipe {
                ops,
                base,
                source: trimmed.to_string(),
            });
        }

        if c.is_ascii_lowercase() {
            ops.push(parse_operator(c, offset, &mut scanner)?);
            continue;
        }

        return Err(NotationError::UnexpectedChar { ch: c, offset });
    }
}

fn parse_operator(
    letter: char,
    offset: usize,
    scanner: &mut Scanner<'_>,
) -> Result<OpSpec, NotationError> {
    let arg_offset = scanner.offset();
    let arg = scanner.digits();

    let op = match letter {
        'd' => OpSpec::Dual,
        'a' => OpSpec::Ambo,
        'g' => OpSpec::Gyro,
        'p' => OpSpec::Propellor,
        'r' => OpSpec::Reflect,
        'k' => return Ok(OpSpec::kis(arg.unwrap_or(0))),
        'u' => {
            let n = arg.unwrap_or(DEFAULT_TRISUB_LEVEL);
            if n == 0 {
                return Err(NotationError::InvalidArgument {
                    letter,
                    value: n,
                    offset: arg_offset,
                    reason: "subdivision level must be >= 1".to_string(),
                });
            }
            return Ok(OpSpec::Trisub { n });
        }
        _ => return Err(NotationError::UnknownOperator { letter, offset }),
    };

    if arg.is_some() {
        return Err(NotationError::UnexpectedArgument {
            letter,
            offset: arg_offset,
        });
    }
    Ok(op)
}

fn parse_base(
    letter: char,
    offset: usize,
    scanner: &mut Scanner<'_>,
) -> Result<BaseSpec, NotationError> {
    let arg_offset = scanner.offset();
    let arg = scanner.digits();

    let fixed = match letter {
        'T' => Some(BaseSpec::Tetrahedron),
        'C' => Some(BaseSpec::Cube),
        'O' => Some(BaseSpec::Octahedron),
        'D' => Some(BaseSpec::Dodecahedron),
        'I' => Some(BaseSpec::Icosahedron),
        _ => None,
    };
    if let Some(base) = fixed {
        if arg.is_some() {
            return Err(NotationError::UnexpectedArgument {
                letter,
                offset: arg_offset,
            });
        }
        return Ok(base);
    }

    let sided = |n: u32| -> Result<u32, NotationError> {
        if n < 3 {
            return Err(NotationError::InvalidArgument {
                letter,
                value: n,
                offset: arg_offset,
                reason: "side count must be >= 3".to_string(),
            });
        }
        Ok(n)
    };

    match letter {
        'P' | 'A' | 'Y' => {
            let n = arg.ok_or(NotationError::MissingArgument {
                base: letter,
                offset: arg_offset,
            })?;
            let n = sided(n)?;
            Ok(match letter {
                'P' => BaseSpec::Prism(n),
                'A' => BaseSpec::Antiprism(n),
                _ => BaseSpec::Pyramid(n),
            })
        }
        _ => Err(NotationError::UnknownBase { letter, offset }),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_base() {
        let recipe = parse("C").unwrap();
        assert_eq!(recipe.base, BaseSpec::Cube);
        assert!(recipe.ops.is_empty());
    }

    #[test]
    fn test_parse_sided_bases() {
        assert_eq!(parse("P6").unwrap().base, BaseSpec::Prism(6));
        assert_eq!(parse("A3").unwrap().base, BaseSpec::Antiprism(3));
        assert_eq!(parse("Y12").unwrap().base, BaseSpec::Pyramid(12));
    }

    #[test]
    fn test_parse_operator_chain_is_application_order() {
        let recipe = parse("dakC").unwrap();
        assert_eq!(
            recipe.ops,
            vec![OpSpec::kis(0), OpSpec::Ambo, OpSpec::Dual]
        );
        assert_eq!(recipe.base, BaseSpec::Cube);
        assert_eq!(recipe.source, "dakC");
    }

    #[test]
    fn test_parse_kis_with_argument() {
        let recipe = parse("k4aC").unwrap();
        assert_eq!(recipe.ops, vec![OpSpec::Ambo, OpSpec::kis(4)]);
    }

    #[test]
    fn test_parse_trisub_argument_and_default() {
        assert_eq!(parse("u3T").unwrap().ops, vec![OpSpec::Trisub { n: 3 }]);
        assert_eq!(parse("uT").unwrap().ops, vec![OpSpec::Trisub { n: 2 }]);
        assert_eq!(
            parse("u0T"),
            Err(NotationError::InvalidArgument {
                letter: 'u',
                value: 0,
                offset: 1,
                reason: "subdivision level must be >= 1".to_string(),
            })
        );
    }

    #[test]
    fn test_rejects_empty_and_missing_base() {
        assert_eq!(parse(""), Err(NotationError::Empty));
        assert_eq!(parse("   "), Err(NotationError::Empty));
        assert_eq!(parse("da"), Err(NotationError::MissingBase));
    }

    #[test]
    fn test_rejects_unknown_letters() {
        assert_eq!(
            parse("xC"),
            Err(NotationError::UnknownOperator {
                letter: 'x',
                offset: 0
            })
        );
        assert_eq!(
            parse("dZ"),
            Err(NotationError::UnknownBase {
                letter: 'Z',
                offset: 1
            })
        );
    }

    #[test]
    fn test_rejects_bare_sided_base() {
        assert_eq!(
            parse("P"),
            Err(NotationError::MissingArgument { base: 'P', offset: 1 })
        );
        assert_eq!(
            parse("P2"),
            Err(NotationError::InvalidArgument {
                letter: 'P',
                value: 2,
                offset: 1,
                reason: "side count must be >= 3".to_string(),
            })
        );
    }

    #[test]
    fn test_rejects_trailing_input() {
        assert_eq!(parse("Cd"), Err(NotationError::TrailingInput { offset: 1 }));
        assert_eq!(
            parse("C4"),
            Err(NotationError::UnexpectedArgument {
                letter: 'C',
                offset: 1
            })
        );
    }

    #[test]
    fn test_rejects_argument_on_plain_operator() {
        assert_eq!(
            parse("d2C"),
            Err(NotationError::UnexpectedArgument {
                letter: 'd',
                offset: 1
            })
        );
    }
}
