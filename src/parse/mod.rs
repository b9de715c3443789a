pub mod ast;
pub mod error;
pub mod lexer;
mod parser;
pub mod visit;

pub use error::{LexError, ParseError, ParseErrorKind};
pub use lexer::{tokenize, Token, TokenKind};

/// Builds the expression tree for an already tokenized roll.
///
/// # Errors
/// Returns a [`ParseError`] for empty input, input that does not form a single
/// expression, or modifiers attached to something other than dice.
pub fn parse_tokens(tokens: Vec<Token<'_>>) -> Result<ast::Node, ParseError> {
    let node = parser::Parser::new(tokens).parse()?;
    log::debug!("parsed {}", node);
    Ok(node)
}
