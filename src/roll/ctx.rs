use super::{error::*, num::Number, pool::Pool, random::RandomSource, result::*, RResult};
use crate::common::*;
use crate::config::RollConfig;
use crate::ops::{Modifier, Operate};
use crate::parse::{
    ast,
    visit::{self, Accept},
};
use crate::resolve::Resolver;

/// Evaluates expression trees, drawing every die from one random source.
///
/// A context can evaluate any number of trees; each evaluation produces its
/// own [`RollResult`] and leaves the tree untouched.
pub struct RollContext<'a, R: RandomSource + ?Sized> {
    source: &'a mut R,
    config: RollConfig,
    resolver: &'a dyn Resolver,
    groups: Vec<DiceGroup>,
}

impl<'a, R: RandomSource + ?Sized> RollContext<'a, R> {
    pub fn new(source: &'a mut R, config: RollConfig) -> Self {
        Self {
            source,
            config,
            resolver: &(),
            groups: Vec::new(),
        }
    }

    /// Resolves `${...}` references through `resolver`. Without one, any
    /// reference fails with [`EvalError::UnresolvedReference`].
    pub fn with_resolver(mut self, resolver: &'a dyn Resolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn config(&self) -> &RollConfig {
        &self.config
    }

    /// Draws one face of a die with `sides` faces.
    ///
    /// # Errors
    /// Returns [`EvalError::OutOfRange`] if the source hands back a value
    /// outside `1..=sides`.
    pub fn draw(&mut self, sides: Int) -> RResult<Int> {
        let value = self.source.next(1, sides);
        if !(1..=sides).contains(&value) {
            return Err(EvalError::OutOfRange {
                value,
                min: 1,
                max: sides,
            });
        }
        log::trace!("d{} -> {}", sides, value);
        Ok(value)
    }

    pub fn eval(&mut self, node: &ast::Node) -> RResult<RollResult> {
        self.groups.clear();
        let total = node.accept(self)?;
        let groups = std::mem::take(&mut self.groups);
        log::debug!("{} = {} ({} dice groups)", node, total, groups.len());
        Ok(RollResult::new(node.to_string(), total, groups))
    }

    fn dice_spec(&mut self, dice: &ast::DiceRoll) -> RResult<(Int, Int)> {
        let count = dice.count.accept(self)?;
        let sides = dice.sides.accept(self)?;
        match (count.as_int(), sides.as_int()) {
            (Some(n), Some(s)) if n >= 0 && s >= 1 => Ok((n, s)),
            _ => Err(EvalError::InvalidDiceSpec { count, sides }),
        }
    }

    fn roll_dice(
        &mut self,
        dice: &ast::DiceRoll,
        modifiers: &[Modifier],
        notation: String,
    ) -> RResult<Number> {
        let (count, sides) = self.dice_spec(dice)?;

        let limit = self.config.max_dice;
        if usize::try_from(count).map_or(true, |n| n > limit) {
            return Err(EvalError::SafetyCeilingExceeded(Ceiling::DiceCount {
                requested: count,
                limit,
            }));
        }
        for op in modifiers {
            op.check_terminates(sides)?;
        }

        let faces = (0..count)
            .map(|_| self.draw(sides))
            .collect::<RResult<Vec<_>>>()?;
        let mut pool = Pool::new(sides, faces);
        for op in modifiers {
            log::trace!("applying {} to {}", op, notation);
            op.operate(self, &mut pool)?;
        }

        let group = pool.into_group(notation)?;
        let value = group.value;
        self.groups.push(group);
        Ok(Number::Int(value))
    }
}

impl<'a, R: RandomSource + ?Sized> visit::AstVisitor for RollContext<'a, R> {
    type Output = RResult<Number>;

    fn visit_literal(&mut self, x: Int) -> Self::Output {
        Ok(Number::Int(x))
    }

    fn visit_reference(&mut self, r: &ast::Reference) -> Self::Output {
        let value = self
            .resolver
            .resolve(r)
            .ok_or_else(|| EvalError::UnresolvedReference(r.to_string()))?;
        log::debug!("resolved {} to {}", r, value);
        Ok(Number::Int(value))
    }

    fn visit_dice(&mut self, dice: &ast::DiceRoll) -> Self::Output {
        self.roll_dice(dice, &[], dice.to_string())
    }

    fn visit_modified(&mut self, dice: &ast::Modified) -> Self::Output {
        self.roll_dice(&dice.base, &dice.modifiers, dice.to_string())
    }

    fn visit_grouping(&mut self, inner: &ast::Node) -> Self::Output {
        inner.accept(self)
    }

    fn visit_unary(&mut self, op: UnaryOperator, r: &ast::Node) -> Self::Output {
        let value = r.accept(self)?;
        match op {
            UnaryOperator::Pos => Ok(value),
            UnaryOperator::Neg => value.checked_neg(),
        }
    }

    fn visit_binary(
        &mut self,
        l: &ast::Node,
        op: BinaryOperator,
        r: &ast::Node,
    ) -> Self::Output {
        let left = l.accept(self)?;
        let right = r.accept(self)?;
        match op {
            BinaryOperator::Add => left.checked_add(right),
            BinaryOperator::Sub => left.checked_sub(right),
            BinaryOperator::Mul => left.checked_mul(right),
            BinaryOperator::Div => left.checked_div(right, self.config.division),
        }
    }
}
