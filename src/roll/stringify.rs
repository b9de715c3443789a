use super::{num::Number, result::*};
use crate::common::*;
use crate::parse::ast;
use crate::parse::visit::AstVisitor;
use std::slice;

/// Renders an evaluated expression next to the dice it rolled.
///
/// The expression tree is walked in evaluation order, so each dice term
/// picks up its own group from the result.
pub trait Stringify {
    fn str_result(&mut self, ast: &ast::Node, result: &RollResult) -> String {
        let expr = {
            let mut walker = Walker {
                style: &mut *self,
                groups: result.groups().iter(),
            };
            walker.visit(ast)
        };
        let total = self.str_total(result.total());
        format!("{} = {}", expr, total)
    }

    fn str_total(&mut self, total: Number) -> String {
        total.to_string()
    }

    /// `notation` is the dice term with any dice in its count or sides
    /// already rendered.
    fn str_group(&mut self, notation: &str, group: &DiceGroup) -> String {
        let faces = group
            .draws
            .iter()
            .map(|die| self.str_die(die))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} ({})", notation, faces)
    }

    fn str_die(&mut self, die: &DieDraw) -> String {
        let mut ret = die.face.to_string();
        if die.exploded {
            ret.push('!');
        }
        ret
    }
}

struct Walker<'s, 'r, S: ?Sized> {
    style: &'s mut S,
    groups: slice::Iter<'r, DiceGroup>,
}

impl<S: Stringify + ?Sized> Walker<'_, '_, S> {
    fn dice_term(&mut self, dice: &ast::DiceRoll, modifiers: String) -> String {
        // count and sides may hold dice of their own, rolled first
        let count = self.visit(&*dice.count);
        let sides = self.visit(&*dice.sides);
        let notation = format!("{}d{}{}", count, sides, modifiers);
        match self.groups.next() {
            Some(group) => self.style.str_group(&notation, group),
            None => notation,
        }
    }
}

impl<S: Stringify + ?Sized> AstVisitor for Walker<'_, '_, S> {
    type Output = String;

    fn visit_literal(&mut self, x: Int) -> Self::Output {
        x.to_string()
    }

    fn visit_reference(&mut self, r: &ast::Reference) -> Self::Output {
        r.to_string()
    }

    fn visit_dice(&mut self, dice: &ast::DiceRoll) -> Self::Output {
        self.dice_term(dice, String::new())
    }

    fn visit_modified(&mut self, dice: &ast::Modified) -> Self::Output {
        self.dice_term(&dice.base, dice.modifier_notation())
    }

    fn visit_grouping(&mut self, inner: &ast::Node) -> Self::Output {
        format!("({})", self.visit(inner))
    }

    fn visit_unary(&mut self, op: UnaryOperator, r: &ast::Node) -> Self::Output {
        format!("{}{}", op, self.visit(r))
    }

    fn visit_binary(
        &mut self,
        l: &ast::Node,
        op: BinaryOperator,
        r: &ast::Node,
    ) -> Self::Output {
        let l = self.visit(l);
        let r = self.visit(r);
        format!("{} {} {}", l, op, r)
    }
}

#[derive(Default)]
pub struct SimpleStringifier;

impl SimpleStringifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stringify(&mut self, ast: &ast::Node, result: &RollResult) -> String {
        self.str_result(ast, result)
    }
}

impl Stringify for SimpleStringifier {}

/// Strikes through dice that no longer count and bolds minimum and maximum
/// faces.
#[derive(Default)]
pub struct MarkdownStringifier;

impl MarkdownStringifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stringify(&mut self, ast: &ast::Node, result: &RollResult) -> String {
        self.str_result(ast, result)
    }
}

impl Stringify for MarkdownStringifier {
    fn str_total(&mut self, total: Number) -> String {
        format!("`{}`", total)
    }

    fn str_die(&mut self, die: &DieDraw) -> String {
        let mut ret = die.face.to_string();
        if die.exploded {
            ret.push('!');
        }
        if die.face == 1 || die.face == die.sides {
            ret = format!("**{}**", ret);
        }
        match die.status {
            DieStatus::Dropped | DieStatus::Rerolled => format!("~~{}~~", ret),
            DieStatus::Kept | DieStatus::Exploded => ret,
        }
    }
}
