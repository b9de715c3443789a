use crate::common::NonEmpty;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
#[error("unexpected character {ch:?} at position {position}")]
pub struct LexError {
    pub position: usize,
    pub ch: char,
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[error("error at position {position} ({found:?}): {kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: usize,
    /// The offending input; empty at the end of input.
    pub found: String,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, position: usize, found: impl Into<String>) -> Self {
        Self {
            kind,
            position,
            found: found.into(),
        }
    }

    /// What the parser would have accepted at [`ParseError::position`].
    pub fn expected(&self) -> &[String] {
        match &self.kind {
            ParseErrorKind::UnexpectedToken { expected }
            | ParseErrorKind::UnexpectedEnd { expected } => expected.as_slice(),
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ParseErrorKind {
    UnexpectedToken { expected: NonEmpty<String> },
    UnexpectedEnd { expected: NonEmpty<String> },
    TrailingInput,
    /// A dice modifier following something other than a dice term.
    InvalidModifierTarget,
    IntegerOutOfRange,
    EmptyInput,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { expected } => {
                write!(f, "unexpected token; expected {}", expected.fmt_expected())
            }
            Self::UnexpectedEnd { expected } => {
                write!(f, "unexpected end of input; expected {}", expected.fmt_expected())
            }
            Self::TrailingInput => f.write_str("unexpected input after the expression"),
            Self::InvalidModifierTarget => f.write_str("modifiers can only follow dice"),
            Self::IntegerOutOfRange => f.write_str("integer is too large"),
            Self::EmptyInput => f.write_str("nothing to roll"),
        }
    }
}

trait FormatExpected {
    fn fmt_expected(&self) -> String;
}

impl FormatExpected for [String] {
    fn fmt_expected(&self) -> String {
        match self {
            [] => String::new(),
            [a] => a.to_owned(),
            [a, b] => format!("{} or {}", a, b),
            s => format!("{}, or {}", s[..s.len() - 1].join(", "), &s[s.len() - 1]),
        }
    }
}
