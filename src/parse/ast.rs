use crate::common::*;
use crate::ops::Modifier;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Literal(Int),
    Reference(Reference),
    Dice(DiceRoll),
    Modified(Modified),
    Grouping(Box<Node>),
    Unary(UnaryOperator, Box<Node>),
    Binary(Box<Node>, BinaryOperator, Box<Node>),
}

impl Node {
    pub(crate) fn new_unary(op: UnaryOperator, value: Node) -> Self {
        Self::Unary(op, Box::new(value))
    }

    pub(crate) fn new_binary(lhs: Node, op: BinaryOperator, rhs: Node) -> Self {
        Self::Binary(Box::new(lhs), op, Box::new(rhs))
    }

    pub(crate) fn new_grouping(value: Node) -> Self {
        Self::Grouping(Box::new(value))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiceRoll {
    pub count: Box<Node>,
    pub sides: Box<Node>,
}

impl DiceRoll {
    pub fn new(count: Node, sides: Node) -> Self {
        Self {
            count: Box::new(count),
            sides: Box::new(sides),
        }
    }

    pub fn with_modifiers(self, modifiers: NonEmpty<Modifier>) -> Modified {
        Modified::new(self, modifiers)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Modified {
    pub base: DiceRoll,
    pub modifiers: NonEmpty<Modifier>,
}

impl Modified {
    pub fn new(base: DiceRoll, modifiers: NonEmpty<Modifier>) -> Self {
        Self { base, modifiers }
    }

    /// The modifier chain as it is written after the dice.
    pub fn modifier_notation(&self) -> String {
        let mut ret = String::new();
        let mut open_bang = false;
        for op in &self.modifiers {
            let text = op.to_string();
            // `!` then `!` would read back as `!!`
            if open_bang && text.starts_with('!') {
                ret.push(' ');
            }
            open_bang = text.ends_with('!');
            ret.push_str(&text);
        }
        ret
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ReferenceKind {
    /// `${name}`
    Variable,
    /// `${@name}`
    Property,
    /// `${?question}`
    Prompt,
}

/// A value supplied by the caller at evaluation time.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Reference {
    pub kind: ReferenceKind,
    pub name: String,
}

impl Reference {
    pub fn new(kind: ReferenceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Parses the text of an identifier token, `${...}` included.
    pub(crate) fn from_token(text: &str) -> Self {
        let inner = text
            .strip_prefix("${")
            .and_then(|s| s.strip_suffix('}'))
            .unwrap_or(text);
        if let Some(name) = inner.strip_prefix('@') {
            Self::new(ReferenceKind::Property, name.trim())
        } else if let Some(question) = inner.strip_prefix('?') {
            Self::new(ReferenceKind::Prompt, question.trim())
        } else {
            Self::new(ReferenceKind::Variable, inner.trim())
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sigil = match self.kind {
            ReferenceKind::Variable => "",
            ReferenceKind::Property => "@",
            ReferenceKind::Prompt => "?",
        };
        write!(f, "${{{}{}}}", sigil, self.name)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(x) => write!(f, "{}", x),
            Self::Reference(r) => fmt::Display::fmt(r, f),
            Self::Dice(d) => fmt::Display::fmt(d, f),
            Self::Modified(m) => fmt::Display::fmt(m, f),
            Self::Grouping(x) => write!(f, "({})", x),
            Self::Unary(op, x) => write!(f, "{}{}", op, x),
            Self::Binary(l, op, r) => write!(f, "{} {} {}", l, op, r),
        }
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

impl fmt::Display for Modified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base, self.modifier_notation())
    }
}
