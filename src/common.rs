use std::fmt::{self, Write};
pub use vec1::vec1;

pub type Int = i64;

pub type NonEmpty<T> = vec1::Vec1<T>;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum UnaryOperator {
    Pos,
    Neg,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::Pos => '+',
            Self::Neg => '-',
        };
        f.write_char(c)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        };
        f.write_char(c)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompareOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

impl CompareOp {
    pub const fn test(self, lhs: Int, rhs: Int) -> bool {
        match self {
            Self::Lt => lhs < rhs,
            Self::Le => lhs <= rhs,
            Self::Gt => lhs > rhs,
            Self::Ge => lhs >= rhs,
            Self::Eq => lhs == rhs,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Eq => "=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A face condition such as `<2` or `>=5`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comparison {
    pub op: CompareOp,
    pub threshold: Int,
}

impl Comparison {
    pub const fn new(op: CompareOp, threshold: Int) -> Self {
        Self { op, threshold }
    }

    pub const fn equal_to(threshold: Int) -> Self {
        Self::new(CompareOp::Eq, threshold)
    }

    pub const fn matches(&self, face: Int) -> bool {
        self.op.test(face, self.threshold)
    }

    /// Returns `true` if every face of a die with `sides` faces satisfies the
    /// condition. Checked without enumerating the faces.
    pub const fn matches_every_face(&self, sides: Int) -> bool {
        if sides < 1 {
            return false;
        }
        let t = self.threshold;
        match self.op {
            CompareOp::Lt => sides < t,
            CompareOp::Le => sides <= t,
            CompareOp::Gt => 1 > t,
            CompareOp::Ge => 1 >= t,
            CompareOp::Eq => sides == 1 && t == 1,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.threshold)
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    pub use super::*;
    pub(crate) use crate::ops::*;
    pub(crate) use crate::parse::ast::{self, DiceRoll, Modified, Node};
    pub use BinaryOperator::*;
    pub use UnaryOperator::*;

    pub trait NodeExt: Sized {
        fn int(x: Int) -> Self;

        fn dice(num: Int, sides: Int) -> Self;

        fn dyn_dice(num: Self, sides: Self) -> Self;

        fn op_dice(num: Int, sides: Int, ops: Vec<Modifier>) -> Self;

        fn parens(x: Self) -> Self;

        fn un(op: UnaryOperator, x: Self) -> Self;

        fn bin(l: Self, op: BinaryOperator, r: Self) -> Self;
    }

    impl NodeExt for Node {
        fn int(x: Int) -> Self {
            Self::Literal(x)
        }

        fn dice(num: Int, sides: Int) -> Self {
            Self::Dice(DiceRoll::new(Self::int(num), Self::int(sides)))
        }

        fn dyn_dice(num: Self, sides: Self) -> Self {
            Self::Dice(DiceRoll::new(num, sides))
        }

        fn op_dice(num: Int, sides: Int, ops: Vec<Modifier>) -> Self {
            let base = DiceRoll::new(Self::int(num), Self::int(sides));
            let ops = NonEmpty::try_from_vec(ops).unwrap();
            Self::Modified(Modified::new(base, ops))
        }

        fn parens(x: Self) -> Self {
            Self::Grouping(Box::new(x))
        }

        fn un(op: UnaryOperator, x: Self) -> Self {
            Self::Unary(op, Box::new(x))
        }

        fn bin(l: Self, op: BinaryOperator, r: Self) -> Self {
            Self::Binary(Box::new(l), op, Box::new(r))
        }
    }

    #[test]
    fn test_every_face() {
        assert!(Comparison::new(CompareOp::Ge, 1).matches_every_face(6));
        assert!(Comparison::new(CompareOp::Lt, 7).matches_every_face(6));
        assert!(!Comparison::new(CompareOp::Lt, 6).matches_every_face(6));
        assert!(!Comparison::new(CompareOp::Gt, 1).matches_every_face(6));
        assert!(Comparison::new(CompareOp::Gt, 0).matches_every_face(6));
        assert!(Comparison::equal_to(1).matches_every_face(1));
        assert!(!Comparison::equal_to(6).matches_every_face(6));
    }
}
