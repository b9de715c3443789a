//! An interpreter for dice notation such as `4d6kh3`, `2d20ro<2 + 5` or
//! `(1d4)d6!`.
//!
//! Text is split into tokens by [`tokenize`], built into a [`Node`] tree by
//! [`parse`], and rolled by [`evaluate`] against any [`RandomSource`]. The
//! resulting [`RollResult`] carries the total and every die drawn, grouped by
//! the dice term that drew it.

pub mod common;
pub mod config;
pub mod error;
pub mod genesys;
pub mod ops;
pub mod parse;
pub mod resolve;
pub mod roll;

#[cfg(test)]
mod roll_test_strategies;

pub use config::{DivisionPolicy, RollConfig};
pub use error::Error;
pub use parse::ast::Node;
pub use parse::{parse_tokens, tokenize};
pub use resolve::Resolver;
pub use roll::{
    evaluate, evaluate_with, MarkdownStringifier, Number, RandomSource, RollContext, RollResult,
    SimpleStringifier,
};

/// Tokenizes and parses `text`.
///
/// # Errors
/// Returns [`Error::Lex`] or [`Error::Parse`].
pub fn parse(text: &str) -> Result<Node, Error> {
    let tokens = tokenize(text)?;
    Ok(parse_tokens(tokens)?)
}

/// Rolls `text` with the thread-local generator and the default
/// configuration.
pub fn roll(text: &str) -> Result<RollResult, Error> {
    roll_with(text, &mut rand::thread_rng(), &RollConfig::default())
}

pub fn roll_with<R: RandomSource + ?Sized>(
    text: &str,
    source: &mut R,
    config: &RollConfig,
) -> Result<RollResult, Error> {
    let ast = parse(text)?;
    Ok(evaluate_with(&ast, source, config)?)
}
