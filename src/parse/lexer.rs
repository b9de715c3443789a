use super::error::LexError;
use logos::Logos;
use logos_iter::LogosIter;
use std::fmt;

#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TokenKind {
    #[regex(r"[0-9]+")]
    Int,
    #[token("d")]
    #[token("D")]
    Dice,
    #[token("%")]
    Percent,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    #[token("k")]
    #[token("kh")]
    KeepHigh,
    #[token("kl")]
    KeepLow,
    #[token("dh")]
    DropHigh,
    #[token("dl")]
    DropLow,
    #[token("r")]
    Reroll,
    #[token("ro")]
    RerollOnce,
    #[token("!")]
    Explode,
    #[token("!!")]
    Compound,

    #[token("<")]
    Less,
    #[token("<=")]
    LessEqual,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,
    #[token("=")]
    Equal,

    #[regex(r"\$\{[^}]+\}")]
    Identifier,

    #[regex(r"[ \t\r\n]+", logos::skip)]
    #[error]
    Error,
}

impl TokenKind {
    pub const COMPARISON_OPS: &'static [Self] = &[
        Self::Less,
        Self::LessEqual,
        Self::Greater,
        Self::GreaterEqual,
        Self::Equal,
    ];

    pub const ADDITION_OPS: &'static [Self] = &[Self::Plus, Self::Minus];

    pub const MULTIPLICATION_OPS: &'static [Self] = &[Self::Star, Self::Slash];

    pub const UNARY_OPS: &'static [Self] = &[Self::Plus, Self::Minus];

    pub const MODIFIERS: &'static [Self] = &[
        Self::KeepHigh,
        Self::KeepLow,
        Self::DropHigh,
        Self::DropLow,
        Self::Reroll,
        Self::RerollOnce,
        Self::Explode,
        Self::Compound,
    ];

    pub fn is_modifier(self) -> bool {
        Self::MODIFIERS.contains(&self) || Self::COMPARISON_OPS.contains(&self)
    }

    pub fn as_str(&self) -> &'static str {
        use TokenKind::*;

        match self {
            Int => "<integer>",
            Dice => "'d'",
            Percent => "'%'",
            Plus => "'+'",
            Minus => "'-'",
            Star => "'*'",
            Slash => "'/'",
            LParen => "'('",
            RParen => "')'",
            KeepHigh => "'kh'",
            KeepLow => "'kl'",
            DropHigh => "'dh'",
            DropLow => "'dl'",
            Reroll => "'r'",
            RerollOnce => "'ro'",
            Explode => "'!'",
            Compound => "'!!'",
            Less => "'<'",
            LessEqual => "'<='",
            Greater => "'>'",
            GreaterEqual => "'>='",
            Equal => "'='",
            Identifier => "<reference>",
            Error => "<error>",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub position: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, position: usize) -> Self {
        Self {
            kind,
            text,
            position,
        }
    }

    pub fn end(&self) -> usize {
        self.position + self.text.len()
    }
}

/// Decides what a `d` means from the tokens before it: right after a
/// complete dice term it drops the lowest die, anywhere else it starts a
/// dice term.
#[derive(Debug, Default)]
struct DiceTracker {
    complete: bool,
    awaiting_sides: bool,
    depth: usize,
    sides_groups: Vec<usize>,
}

impl DiceTracker {
    fn resolve(&mut self, raw: TokenKind) -> TokenKind {
        use TokenKind::*;

        let kind = match raw {
            Dice if self.complete => DropLow,
            other => other,
        };

        match kind {
            Dice => {
                self.complete = false;
                self.awaiting_sides = true;
            }
            Int | Percent | Identifier if self.awaiting_sides => {
                self.awaiting_sides = false;
                self.complete = true;
            }
            LParen => {
                self.depth += 1;
                if self.awaiting_sides {
                    self.sides_groups.push(self.depth);
                }
                self.awaiting_sides = false;
                self.complete = false;
            }
            RParen => {
                let closes_sides = self.sides_groups.last() == Some(&self.depth);
                if closes_sides {
                    self.sides_groups.pop();
                }
                self.depth = self.depth.saturating_sub(1);
                self.complete = closes_sides;
            }
            // modifiers and their arguments continue the current term
            k if k == Int || k.is_modifier() => {}
            _ => {
                self.complete = false;
                self.awaiting_sides = false;
            }
        }
        kind
    }
}

fn starts_sides(kind: Option<&TokenKind>) -> bool {
    matches!(
        kind,
        Some(TokenKind::Int | TokenKind::Percent | TokenKind::LParen | TokenKind::Identifier)
    )
}

/// Splits dice notation into tokens.
///
/// # Errors
/// Returns a [`LexError`] at the first character that starts no token, and
/// at a dice marker `d` that is not followed by its sides.
pub fn tokenize(s: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut lexer = TokenKind::lexer(s).peekable_lexer();
    let mut tracker = DiceTracker::default();
    let mut tokens = Vec::new();

    while let Some(raw) = lexer.next() {
        let span = lexer.span();
        let text = &s[span.clone()];
        let error = LexError {
            position: span.start,
            ch: text.chars().next().unwrap_or_default(),
        };

        if raw == TokenKind::Error {
            return Err(error);
        }

        let kind = tracker.resolve(raw);
        if kind == TokenKind::Dice && !starts_sides(lexer.peek()) {
            return Err(error);
        }

        log::trace!("token {:?} {:?} at {}", kind, text, span.start);
        tokens.push(Token::new(kind, text, span.start));
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::TokenKind::*;
    use super::*;

    fn kinds(s: &str) -> Vec<TokenKind> {
        tokenize(s).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_lex_dice() {
        assert_eq!(kinds("4d6"), [Int, Dice, Int]);
        assert_eq!(kinds("d20"), [Dice, Int]);
        assert_eq!(kinds("2D%"), [Int, Dice, Percent]);
        assert_eq!(kinds("(2+1)d6"), [LParen, Int, Plus, Int, RParen, Dice, Int]);
        assert_eq!(kinds("2d(1d4)"), [Int, Dice, LParen, Int, Dice, Int, RParen]);
    }

    #[test]
    fn test_lex_modifiers() {
        assert_eq!(kinds("4d6kh3"), [Int, Dice, Int, KeepHigh, Int]);
        assert_eq!(kinds("4d6k3"), [Int, Dice, Int, KeepHigh, Int]);
        assert_eq!(kinds("2d20ro<2"), [Int, Dice, Int, RerollOnce, Less, Int]);
        assert_eq!(kinds("2d6!!"), [Int, Dice, Int, Compound]);
        assert_eq!(kinds("2d6!>=5"), [Int, Dice, Int, Explode, GreaterEqual, Int]);
        assert_eq!(kinds("2d6 r<=2"), [Int, Dice, Int, Reroll, LessEqual, Int]);
    }

    #[test]
    fn test_lex_drop_after_dice() {
        assert_eq!(kinds("4d6d1"), [Int, Dice, Int, DropLow, Int]);
        assert_eq!(kinds("4d6kh3d1"), [Int, Dice, Int, KeepHigh, Int, DropLow, Int]);
        assert_eq!(kinds("4d6dh1"), [Int, Dice, Int, DropHigh, Int]);
        assert_eq!(kinds("2d(3+3)d1"), [
            Int, Dice, LParen, Int, Plus, Int, RParen, DropLow, Int
        ]);
        assert_eq!(kinds("2d6+d4"), [Int, Dice, Int, Plus, Dice, Int]);
        assert_eq!(kinds("(2d6)d4"), [LParen, Int, Dice, Int, RParen, Dice, Int]);
    }

    #[test]
    fn test_lex_positions() {
        let tokens = tokenize(" 12 + ${str}").unwrap();
        assert_eq!(tokens, [
            Token::new(Int, "12", 1),
            Token::new(Plus, "+", 4),
            Token::new(Identifier, "${str}", 6),
        ]);
    }

    #[test]
    fn test_lex_errors() {
        assert_eq!(tokenize("2d6 & 1"), Err(LexError { position: 4, ch: '&' }));
        assert_eq!(tokenize("2d+1"), Err(LexError { position: 1, ch: 'd' }));
        assert_eq!(tokenize("${"), Err(LexError { position: 0, ch: '$' }));
    }

    #[test]
    fn test_lex_empty() {
        assert_eq!(kinds(""), []);
        assert_eq!(kinds("   "), []);
    }
}
