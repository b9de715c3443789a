use super::dice::{Face, GenesysDie};
use crate::parse::LexError;
use logos::Logos;
use logos_iter::LogosIter;
use std::fmt;

#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq)]
enum RawToken {
    #[regex(r"[0-9]+")]
    Int,
    #[regex(r"\$\{[^}]+\}")]
    Identifier,
    #[regex(r"[A-Za-z_]+")]
    Word,
    #[token(":")]
    Colon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    #[regex(r"[ \t\r\n,]+", logos::skip)]
    #[error]
    Error,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TokenKind {
    Int,
    Identifier,
    Die(GenesysDie),
    Symbol(Face),
    /// `name:` opening a named group.
    GroupName,
    LParen,
    RParen,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => f.write_str("<integer>"),
            Self::Identifier => f.write_str("<reference>"),
            Self::Die(_) => f.write_str("<die>"),
            Self::Symbol(_) => f.write_str("<symbol>"),
            Self::GroupName => f.write_str("<group name>"),
            Self::LParen => f.write_str("'('"),
            Self::RParen => f.write_str("')'"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// For a group name, the name without its colon.
    pub text: &'a str,
    pub position: usize,
}

/// Splits narrative dice notation into tokens. Runs of letters are read one
/// die or symbol per letter, so `2gp` is two ability dice and a difficulty
/// die; a run followed by `:` is a group name instead.
pub fn tokenize(s: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut lexer = RawToken::lexer(s).peekable_lexer();
    let mut tokens = Vec::new();

    while let Some(raw) = lexer.next() {
        let span = lexer.span();
        let text = &s[span.clone()];
        let position = span.start;
        let token = |kind| Token {
            kind,
            text,
            position,
        };

        match raw {
            RawToken::Int => tokens.push(token(TokenKind::Int)),
            RawToken::Identifier => tokens.push(token(TokenKind::Identifier)),
            RawToken::LParen => tokens.push(token(TokenKind::LParen)),
            RawToken::RParen => tokens.push(token(TokenKind::RParen)),
            RawToken::Word if lexer.peek() == Some(&RawToken::Colon) => {
                lexer.next();
                tokens.push(token(TokenKind::GroupName));
            }
            RawToken::Word => {
                for (offset, ch) in text.char_indices() {
                    let kind = match (GenesysDie::from_letter(ch), Face::from_symbol(ch)) {
                        (Some(die), _) => TokenKind::Die(die),
                        (None, Some(face)) => TokenKind::Symbol(face),
                        (None, None) => {
                            return Err(LexError {
                                position: position + offset,
                                ch,
                            })
                        }
                    };
                    let end = offset + ch.len_utf8();
                    tokens.push(Token {
                        kind,
                        text: &text[offset..end],
                        position: position + offset,
                    });
                }
            }
            RawToken::Colon | RawToken::Error => {
                return Err(LexError {
                    position,
                    ch: text.chars().next().unwrap_or_default(),
                })
            }
        }
    }

    log::trace!("narrative tokens {:?}", tokens);
    Ok(tokens)
}
