use crate::config::ConfigError;
use crate::parse::{LexError, ParseError};
use crate::roll::EvalError;

/// Any failure between notation text and a finished roll.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
