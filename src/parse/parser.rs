use super::{ast::*, error::*, lexer::*};
use crate::common::*;
use crate::ops::*;

type PResult<T = Node> = Result<T, ParseError>;

/// Recursive-descent parser over a token sequence.
///
/// Precedence, lowest first: `+ -`, `* /`, unary sign, dice terms with
/// their modifiers, then literals, references and parentheses.
pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    cursor: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token<'a>>) -> Self {
        Self { tokens, cursor: 0 }
    }

    pub fn parse(mut self) -> PResult {
        if self.tokens.is_empty() {
            return Err(ParseError::new(ParseErrorKind::EmptyInput, 0, ""));
        }

        let node = self.parse_expression()?;
        if let Some(token) = self.peek() {
            return Err(ParseError::new(
                ParseErrorKind::TrailingInput,
                token.position,
                token.text,
            ));
        }
        Ok(node)
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.cursor).copied()
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn advance(&mut self) -> Option<Token<'a>> {
        let token = self.peek()?;
        self.cursor += 1;
        Some(token)
    }

    fn matches(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    fn matches_any(&self, options: &[TokenKind]) -> bool {
        self.peek_kind().map_or(false, |kind| options.contains(&kind))
    }

    fn end_position(&self) -> usize {
        self.tokens.last().map_or(0, Token::end)
    }

    fn consume(&mut self, expected: TokenKind) -> PResult<Token<'a>> {
        match self.peek() {
            Some(token) if token.kind == expected => {
                self.cursor += 1;
                Ok(token)
            }
            _ => self.unexpected_token(&[expected]),
        }
    }

    fn unexpected_token<T>(&mut self, expected: &[TokenKind]) -> PResult<T> {
        let expected: Vec<String> = expected.iter().map(ToString::to_string).collect();
        let expected = match NonEmpty::try_from_vec(expected) {
            Ok(expected) => expected,
            Err(_) => vec1!["<expression>".to_owned()],
        };
        Err(match self.peek() {
            Some(token) => ParseError::new(
                ParseErrorKind::UnexpectedToken { expected },
                token.position,
                token.text,
            ),
            None => ParseError::new(
                ParseErrorKind::UnexpectedEnd { expected },
                self.end_position(),
                "",
            ),
        })
    }

    fn parse_expression(&mut self) -> PResult {
        self.parse_addition()
    }

    fn parse_addition(&mut self) -> PResult {
        let mut lhs = self.parse_multiplication()?;

        while self.matches_any(TokenKind::ADDITION_OPS) {
            let op = match self.advance().map(|t| t.kind) {
                Some(TokenKind::Minus) => BinaryOperator::Sub,
                _ => BinaryOperator::Add,
            };
            let rhs = self.parse_multiplication()?;
            lhs = Node::new_binary(lhs, op, rhs);
        }

        Ok(lhs)
    }

    fn parse_multiplication(&mut self) -> PResult {
        let mut lhs = self.parse_unary_prefix()?;

        while self.matches_any(TokenKind::MULTIPLICATION_OPS) {
            let op = match self.advance().map(|t| t.kind) {
                Some(TokenKind::Slash) => BinaryOperator::Div,
                _ => BinaryOperator::Mul,
            };
            let rhs = self.parse_unary_prefix()?;
            lhs = Node::new_binary(lhs, op, rhs);
        }

        Ok(lhs)
    }

    fn parse_unary_prefix(&mut self) -> PResult {
        if self.matches_any(TokenKind::UNARY_OPS) {
            let op = match self.advance().map(|t| t.kind) {
                Some(TokenKind::Minus) => UnaryOperator::Neg,
                _ => UnaryOperator::Pos,
            };
            let rhs = self.parse_unary_prefix()?;
            Ok(Node::new_unary(op, rhs))
        } else {
            self.parse_dice_term()
        }
    }

    fn parse_dice_term(&mut self) -> PResult {
        let count = if self.matches(TokenKind::Dice) {
            Node::Literal(1)
        } else {
            let atom = self.parse_atom()?;
            if !self.matches(TokenKind::Dice) {
                if self.matches_any(TokenKind::MODIFIERS)
                    || self.matches_any(TokenKind::COMPARISON_OPS)
                {
                    return self.invalid_modifier_target();
                }
                return Ok(atom);
            }
            atom
        };

        self.consume(TokenKind::Dice)?;
        let sides = self.parse_sides()?;
        let dice = DiceRoll::new(count, sides);

        let mut modifiers = Vec::new();
        while self.peek_kind().map_or(false, TokenKind::is_modifier) {
            modifiers.push(self.parse_modifier()?);
        }

        Ok(match NonEmpty::try_from_vec(modifiers) {
            Ok(modifiers) => Node::Modified(dice.with_modifiers(modifiers)),
            Err(_) => Node::Dice(dice),
        })
    }

    fn invalid_modifier_target<T>(&mut self) -> PResult<T> {
        let (position, text) = self
            .peek()
            .map_or((self.end_position(), ""), |t| (t.position, t.text));
        Err(ParseError::new(
            ParseErrorKind::InvalidModifierTarget,
            position,
            text,
        ))
    }

    fn parse_sides(&mut self) -> PResult {
        if self.matches(TokenKind::Percent) {
            self.advance();
            Ok(Node::Literal(100))
        } else {
            self.parse_atom()
        }
    }

    fn parse_atom(&mut self) -> PResult {
        match self.peek_kind() {
            Some(TokenKind::Int) => self.parse_integer().map(Node::Literal),
            Some(TokenKind::Identifier) => {
                let token = self.consume(TokenKind::Identifier)?;
                Ok(Node::Reference(Reference::from_token(token.text)))
            }
            Some(TokenKind::LParen) => {
                self.consume(TokenKind::LParen)?;
                let inner = self.parse_expression()?;
                self.consume(TokenKind::RParen)?;
                Ok(Node::new_grouping(inner))
            }
            _ => self.unexpected_token(&[
                TokenKind::Int,
                TokenKind::Dice,
                TokenKind::LParen,
                TokenKind::Identifier,
            ]),
        }
    }

    fn parse_integer(&mut self) -> PResult<Int> {
        let token = self.consume(TokenKind::Int)?;
        token.text.parse().map_err(|_| {
            ParseError::new(
                ParseErrorKind::IntegerOutOfRange,
                token.position,
                token.text,
            )
        })
    }

    fn parse_count(&mut self) -> PResult<usize> {
        if !self.matches(TokenKind::Int) {
            return Ok(1);
        }
        let token = self.consume(TokenKind::Int)?;
        token.text.parse().map_err(|_| {
            ParseError::new(
                ParseErrorKind::IntegerOutOfRange,
                token.position,
                token.text,
            )
        })
    }

    /// A comparison such as `<2`, or a bare integer meaning `=`.
    fn parse_condition(&mut self) -> PResult<Option<Comparison>> {
        if self.matches_any(TokenKind::COMPARISON_OPS) {
            self.parse_comparison().map(Some)
        } else if self.matches(TokenKind::Int) {
            Ok(Some(Comparison::equal_to(self.parse_integer()?)))
        } else {
            Ok(None)
        }
    }

    fn parse_comparison(&mut self) -> PResult<Comparison> {
        let op = match self.advance().map(|t| t.kind) {
            Some(TokenKind::Less) => CompareOp::Lt,
            Some(TokenKind::LessEqual) => CompareOp::Le,
            Some(TokenKind::Greater) => CompareOp::Gt,
            Some(TokenKind::GreaterEqual) => CompareOp::Ge,
            _ => CompareOp::Eq,
        };
        let threshold = self.parse_integer()?;
        Ok(Comparison::new(op, threshold))
    }

    fn parse_modifier(&mut self) -> PResult<Modifier> {
        use TokenKind::*;

        if self.matches_any(TokenKind::COMPARISON_OPS) {
            return Ok(CountSuccess::new(self.parse_comparison()?).into());
        }

        Ok(match self.advance().map(|t| t.kind) {
            Some(KeepHigh) => KeepHighest(self.parse_count()?).into(),
            Some(KeepLow) => KeepLowest(self.parse_count()?).into(),
            Some(DropHigh) => DropHighest(self.parse_count()?).into(),
            Some(DropLow) => DropLowest(self.parse_count()?).into(),
            Some(kind @ (Reroll | RerollOnce)) => {
                crate::ops::Reroll::new(self.parse_condition()?, kind == RerollOnce).into()
            }
            Some(Explode) => crate::ops::Explode::new(self.parse_condition()?).into(),
            _ => crate::ops::Compound::new(self.parse_condition()?).into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::test_utils::{NodeExt, *};

    fn parse(s: &str) -> PResult {
        Parser::new(tokenize(s).unwrap()).parse()
    }

    fn check(s: &str, expected: Node) {
        let parsed = parse(s).unwrap();
        assert_eq!(parsed, expected);
    }

    fn check_err(s: &str, kind: ParseErrorKind, position: usize) {
        let err = parse(s).unwrap_err();
        assert_eq!(err.kind, kind);
        assert_eq!(err.position, position);
    }

    #[test]
    fn test_parse_nums() {
        check("32", Node::int(32));
        check("(7)", Node::parens(Node::int(7)));
    }

    #[test]
    fn test_parse_dice() {
        check("1d20", Node::dice(1, 20));
        check("d4", Node::dice(1, 4));
        check("2d%", Node::dice(2, 100));
        check(
            "(2+1)d6",
            Node::dyn_dice(
                Node::parens(Node::bin(Node::int(2), Add, Node::int(1))),
                Node::int(6),
            ),
        );
        check(
            "2d(1d4)",
            Node::dyn_dice(Node::int(2), Node::parens(Node::dice(1, 4))),
        );
        check(
            "${n}d6",
            Node::dyn_dice(
                Node::Reference(ast::Reference::new(ast::ReferenceKind::Variable, "n")),
                Node::int(6),
            ),
        );
    }

    #[test]
    fn test_parse_modifiers() {
        check("4d6kh3", Node::op_dice(4, 6, vec![KeepHighest(3).into()]));
        check("2d20k", Node::op_dice(2, 20, vec![KeepHighest(1).into()]));
        check("4d6d1", Node::op_dice(4, 6, vec![DropLowest(1).into()]));
        check(
            "2d20ro<2",
            Node::op_dice(
                2,
                20,
                vec![Reroll::new(Some(Comparison::new(CompareOp::Lt, 2)), true).into()],
            ),
        );
        check(
            "10d6r!>=5kl2",
            Node::op_dice(
                10,
                6,
                vec![
                    Reroll::new(None, false).into(),
                    Explode::new(Some(Comparison::new(CompareOp::Ge, 5))).into(),
                    KeepLowest(2).into(),
                ],
            ),
        );
        check(
            "5d10>=8",
            Node::op_dice(
                5,
                10,
                vec![CountSuccess::new(Comparison::new(CompareOp::Ge, 8)).into()],
            ),
        );
        check(
            "3d6!!r2",
            Node::op_dice(
                3,
                6,
                vec![
                    Compound::new(None).into(),
                    Reroll::new(Some(Comparison::equal_to(2)), false).into(),
                ],
            ),
        );
    }

    #[test]
    fn test_parse_unary() {
        check("-2", Node::un(Neg, Node::int(2)));
        check("-1d20", Node::un(Neg, Node::dice(1, 20)));
        check(
            "- -2d4",
            Node::un(Neg, Node::un(Neg, Node::dice(2, 4))),
        );
    }

    #[test]
    fn test_parse_binary() {
        check(
            "2d6+1d4",
            Node::bin(Node::dice(2, 6), Add, Node::dice(1, 4)),
        );
        check(
            "1 + 2 * 3",
            Node::bin(
                Node::int(1),
                Add,
                Node::bin(Node::int(2), Mul, Node::int(3)),
            ),
        );
        check(
            "8 - 2 - 1",
            Node::bin(
                Node::bin(Node::int(8), Sub, Node::int(2)),
                Sub,
                Node::int(1),
            ),
        );
        check(
            "12 / 2 * 3",
            Node::bin(
                Node::bin(Node::int(12), Div, Node::int(2)),
                Mul,
                Node::int(3),
            ),
        );
    }

    #[test]
    fn test_parse_errors() {
        check_err("(1+2)kh1", ParseErrorKind::InvalidModifierTarget, 5);
        check_err("3>2", ParseErrorKind::InvalidModifierTarget, 1);
        check_err("", ParseErrorKind::EmptyInput, 0);
        check_err("2d6 4", ParseErrorKind::TrailingInput, 4);
        check_err("(1+2", ParseErrorKind::UnexpectedEnd {
            expected: vec1!["')'".to_owned()],
        }, 4);
        check_err("1+2)", ParseErrorKind::TrailingInput, 3);
        check_err("99999999999999999999", ParseErrorKind::IntegerOutOfRange, 0);
    }

    #[test]
    fn test_unexpected_token() {
        let err = parse("2 * * 3").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::UnexpectedToken { .. }));
        assert_eq!(err.position, 4);
        assert_eq!(err.found, "*");
        assert_eq!(err.expected()[0], "<integer>");
    }

    #[test]
    fn test_display_round_trip() {
        for s in ["4d6kh3 + 2", "(2 + 1)d6ro<2", "-d%", "3d6!>5>=4 * (1d4 - ${@str})"] {
            let node = parse(s).unwrap();
            assert_eq!(parse(&node.to_string()).unwrap(), node);
        }
    }

    #[test]
    fn test_display_keeps_adjacent_explodes_apart() {
        for (s, printed) in [("2d6! !", "2d6! !"), ("2d6! !!", "2d6! !!"), ("2d6!! !>4", "2d6!! !>4")] {
            let node = parse(s).unwrap();
            assert_eq!(node.to_string(), printed);
            assert_eq!(parse(printed).unwrap(), node);
        }

        let node = parse("2d6! !").unwrap();
        match &node {
            Node::Modified(m) => assert_eq!(
                m.modifiers.to_vec(),
                vec![Modifier::from(Explode::new(None)); 2]
            ),
            _ => panic!("expected modified dice, got {:?}", node),
        }
    }
}
