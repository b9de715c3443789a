use super::num::Number;
use crate::common::{Comparison, Int};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("cannot divide by zero")]
    DivideByZero,
    #[error("invalid dice {count}d{sides}: the count must be a non-negative integer and the sides a positive integer")]
    InvalidDiceSpec { count: Number, sides: Number },
    #[error("safety ceiling exceeded: {0}")]
    SafetyCeilingExceeded(Ceiling),
    #[error("condition {condition} matches every face of a d{sides} and would never stop")]
    NonTerminatingCondition { condition: Comparison, sides: Int },
    #[error("random source returned {value}, outside {min}..={max}")]
    OutOfRange { value: Int, min: Int, max: Int },
    #[error("integer overflow")]
    Overflow,
    #[error("no value for {0}")]
    UnresolvedReference(String),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Ceiling {
    DiceCount { requested: Int, limit: usize },
    ChainLength { limit: usize },
}

impl fmt::Display for Ceiling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DiceCount { requested, limit } => {
                write!(f, "{} dice requested, at most {} allowed", requested, limit)
            }
            Self::ChainLength { limit } => {
                write!(f, "reroll or explosion chain longer than {}", limit)
            }
        }
    }
}
