use super::dice::{Face, GenesysDie};
use super::lexer::{Token, TokenKind};
use crate::common::{vec1, Int};
use crate::parse::ast::Reference;
use crate::parse::{ParseError, ParseErrorKind};
use std::fmt;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Count {
    Literal(Int),
    Reference(Reference),
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(n) => write!(f, "{}", n),
            Self::Reference(r) => fmt::Display::fmt(r, f),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Term {
    Dice { count: Count, die: GenesysDie },
    Symbols { count: Count, face: Face },
    Group { name: String, terms: Vec<Term> },
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dice { count, die } => write!(f, "{}{}", count, die.letter()),
            Self::Symbols { count, face } => write!(f, "{}{}", count, face.as_str()),
            Self::Group { name, terms } => write!(f, "({}: {})", name, Notation(terms)),
        }
    }
}

/// Space-separated terms.
pub(crate) struct Notation<'a>(pub &'a [Term]);

impl fmt::Display for Notation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            fmt::Display::fmt(term, f)?;
        }
        Ok(())
    }
}

type PResult<T> = Result<T, ParseError>;

pub(crate) struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    cursor: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token<'a>>) -> Self {
        Self { tokens, cursor: 0 }
    }

    pub fn parse(mut self) -> PResult<Vec<Term>> {
        if self.tokens.is_empty() {
            return Err(ParseError::new(ParseErrorKind::EmptyInput, 0, ""));
        }
        let terms = self.parse_terms()?;
        match self.peek() {
            Some(token) => Err(ParseError::new(
                ParseErrorKind::TrailingInput,
                token.position,
                token.text,
            )),
            None => Ok(terms),
        }
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.cursor).copied()
    }

    fn advance(&mut self) -> Option<Token<'a>> {
        let token = self.peek()?;
        self.cursor += 1;
        Some(token)
    }

    fn unexpected(&self, expected: &[&str]) -> ParseError {
        let mut list = vec1![expected[0].to_owned()];
        list.extend(expected[1..].iter().map(|s| s.to_string()));
        match self.peek() {
            Some(token) => ParseError::new(
                ParseErrorKind::UnexpectedToken { expected: list },
                token.position,
                token.text,
            ),
            None => ParseError::new(
                ParseErrorKind::UnexpectedEnd { expected: list },
                self.tokens.last().map_or(0, |t| t.position + t.text.len()),
                "",
            ),
        }
    }

    fn parse_terms(&mut self) -> PResult<Vec<Term>> {
        let mut terms = Vec::new();
        while let Some(token) = self.peek() {
            if token.kind == TokenKind::RParen {
                break;
            }
            terms.push(self.parse_term()?);
        }
        Ok(terms)
    }

    fn parse_term(&mut self) -> PResult<Term> {
        if matches!(self.peek().map(|t| t.kind), Some(TokenKind::LParen)) {
            return self.parse_group();
        }

        let count = self.parse_count()?;
        match self.peek().map(|t| t.kind) {
            Some(TokenKind::Die(die)) => {
                self.advance();
                Ok(Term::Dice { count, die })
            }
            Some(TokenKind::Symbol(face)) => {
                self.advance();
                Ok(Term::Symbols { count, face })
            }
            _ => Err(self.unexpected(&["<die>", "<symbol>"])),
        }
    }

    fn parse_count(&mut self) -> PResult<Count> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::Int => {
                self.advance();
                token.text.parse().map(Count::Literal).map_err(|_| {
                    ParseError::new(
                        ParseErrorKind::IntegerOutOfRange,
                        token.position,
                        token.text,
                    )
                })
            }
            Some(token) if token.kind == TokenKind::Identifier => {
                self.advance();
                Ok(Count::Reference(Reference::from_token(token.text)))
            }
            _ => Ok(Count::Literal(1)),
        }
    }

    fn parse_group(&mut self) -> PResult<Term> {
        self.advance();
        let name = match self.peek() {
            Some(token) if token.kind == TokenKind::GroupName => {
                self.advance();
                token.text.to_owned()
            }
            _ => return Err(self.unexpected(&["<group name>"])),
        };

        let terms = self.parse_terms()?;
        match self.peek() {
            Some(token) if token.kind == TokenKind::RParen => {
                self.advance();
                Ok(Term::Group { name, terms })
            }
            _ => Err(self.unexpected(&["')'"])),
        }
    }
}
