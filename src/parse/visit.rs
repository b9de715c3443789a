use crate::common::*;
use crate::parse::ast;

pub trait AstVisitor {
    type Output;

    fn visit<T: ?Sized>(&mut self, node: &T) -> Self::Output
    where
        T: Accept<Self>,
    {
        node.accept(self)
    }

    fn visit_literal(&mut self, x: Int) -> Self::Output;

    fn visit_reference(&mut self, r: &ast::Reference) -> Self::Output;

    fn visit_dice(&mut self, dice: &ast::DiceRoll) -> Self::Output;

    fn visit_modified(&mut self, dice: &ast::Modified) -> Self::Output;

    fn visit_grouping(&mut self, inner: &ast::Node) -> Self::Output;

    fn visit_unary(&mut self, op: UnaryOperator, r: &ast::Node) -> Self::Output;

    fn visit_binary(&mut self, l: &ast::Node, op: BinaryOperator, r: &ast::Node)
        -> Self::Output;
}

pub trait Accept<V: AstVisitor + ?Sized> {
    fn accept(&self, v: &mut V) -> V::Output;
}

impl<V: AstVisitor + ?Sized> Accept<V> for ast::Node {
    fn accept(&self, v: &mut V) -> V::Output {
        match self {
            Self::Literal(x) => v.visit_literal(*x),
            Self::Reference(r) => v.visit_reference(r),
            Self::Dice(d) => v.visit_dice(d),
            Self::Modified(m) => v.visit_modified(m),
            Self::Grouping(x) => v.visit_grouping(x),
            Self::Unary(op, x) => v.visit_unary(*op, x),
            Self::Binary(l, op, r) => v.visit_binary(l, *op, r),
        }
    }
}
