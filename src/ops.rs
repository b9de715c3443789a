use crate::common::{Comparison, Int};
use crate::roll::{Ceiling, DieStatus, EvalError, Pool, RResult, RandomSource, RollContext};
use std::fmt;

/// A dice modifier, applied to the pool of a dice term in the order written.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[enum_dispatch::enum_dispatch(Operate)]
pub enum Modifier {
    KeepHighest(KeepHighest),
    KeepLowest(KeepLowest),
    DropHighest(DropHighest),
    DropLowest(DropLowest),
    Reroll(Reroll),
    Explode(Explode),
    Compound(Compound),
    CountSuccess(CountSuccess),
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeepHighest(x) => fmt::Display::fmt(x, f),
            Self::KeepLowest(x) => fmt::Display::fmt(x, f),
            Self::DropHighest(x) => fmt::Display::fmt(x, f),
            Self::DropLowest(x) => fmt::Display::fmt(x, f),
            Self::Reroll(x) => fmt::Display::fmt(x, f),
            Self::Explode(x) => fmt::Display::fmt(x, f),
            Self::Compound(x) => fmt::Display::fmt(x, f),
            Self::CountSuccess(x) => fmt::Display::fmt(x, f),
        }
    }
}

#[enum_dispatch::enum_dispatch]
pub trait Operate {
    fn operate<'a, R: RandomSource + ?Sized>(
        &self,
        ctx: &mut RollContext<'a, R>,
        pool: &mut Pool,
    ) -> RResult<()>;

    /// Fails if this modifier could keep drawing forever on a die with
    /// `sides` faces. Runs before any die of the term is drawn.
    fn check_terminates(&self, _sides: Int) -> RResult<()> {
        Ok(())
    }
}

macro_rules! rank_op_impl {
    ($(($name:ident, $disp:literal)),+ $(,)?) => {
        $(
            #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
            pub struct $name(pub usize);

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}{}", $disp, self.0)
                }
            }
        )+
    };
}

rank_op_impl!(
    (KeepHighest, "kh"),
    (KeepLowest, "kl"),
    (DropHighest, "dh"),
    (DropLowest, "dl"),
);

impl Operate for KeepHighest {
    fn operate<'a, R: RandomSource + ?Sized>(
        &self,
        _: &mut RollContext<'a, R>,
        pool: &mut Pool,
    ) -> RResult<()> {
        keep(pool, self.0, true);
        Ok(())
    }
}

impl Operate for KeepLowest {
    fn operate<'a, R: RandomSource + ?Sized>(
        &self,
        _: &mut RollContext<'a, R>,
        pool: &mut Pool,
    ) -> RResult<()> {
        keep(pool, self.0, false);
        Ok(())
    }
}

impl Operate for DropHighest {
    fn operate<'a, R: RandomSource + ?Sized>(
        &self,
        _: &mut RollContext<'a, R>,
        pool: &mut Pool,
    ) -> RResult<()> {
        drop(pool, self.0, true);
        Ok(())
    }
}

impl Operate for DropLowest {
    fn operate<'a, R: RandomSource + ?Sized>(
        &self,
        _: &mut RollContext<'a, R>,
        pool: &mut Pool,
    ) -> RResult<()> {
        drop(pool, self.0, false);
        Ok(())
    }
}

fn keep(pool: &mut Pool, n: usize, highest: bool) {
    for i in pool.ranked(highest).into_iter().skip(n) {
        pool.set_status(i, DieStatus::Dropped);
    }
}

fn drop(pool: &mut Pool, n: usize, highest: bool) {
    for i in pool.ranked(highest).into_iter().take(n) {
        pool.set_status(i, DieStatus::Dropped);
    }
}

fn fmt_cond(cond: &Option<Comparison>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match cond {
        Some(cond) => fmt::Display::fmt(cond, f),
        None => Ok(()),
    }
}

fn terminates(cond: Comparison, sides: Int) -> RResult<()> {
    if cond.matches_every_face(sides) {
        Err(EvalError::NonTerminatingCondition {
            condition: cond,
            sides,
        })
    } else {
        Ok(())
    }
}

fn chain_exceeded(limit: usize) -> EvalError {
    EvalError::SafetyCeilingExceeded(Ceiling::ChainLength { limit })
}

/// `r` and `ro`. Without a condition, ones are rerolled.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Reroll {
    pub cond: Option<Comparison>,
    pub once: bool,
}

impl Reroll {
    pub const fn new(cond: Option<Comparison>, once: bool) -> Self {
        Self { cond, once }
    }

    pub fn condition(&self) -> Comparison {
        self.cond.unwrap_or(Comparison::equal_to(1))
    }
}

impl fmt::Display for Reroll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.once { "ro" } else { "r" })?;
        fmt_cond(&self.cond, f)
    }
}

impl Operate for Reroll {
    fn check_terminates(&self, sides: Int) -> RResult<()> {
        if self.once {
            Ok(())
        } else {
            terminates(self.condition(), sides)
        }
    }

    fn operate<'a, R: RandomSource + ?Sized>(
        &self,
        ctx: &mut RollContext<'a, R>,
        pool: &mut Pool,
    ) -> RResult<()> {
        let cond = self.condition();
        let sides = pool.sides();
        let limit = ctx.config().max_chain_length;

        let targets: Vec<_> = pool
            .kept()
            .filter(|&i| cond.matches(pool.face(i)))
            .collect();
        for mut current in targets {
            let mut chain = 0;
            loop {
                if chain == limit {
                    return Err(chain_exceeded(limit));
                }
                pool.set_status(current, DieStatus::Rerolled);
                let face = ctx.draw(sides)?;
                current = pool.push(face, DieStatus::Kept);
                chain += 1;
                log::trace!("rerolled into {}", face);

                if self.once || !cond.matches(face) {
                    break;
                }
            }
        }
        Ok(())
    }
}

/// `!`. Without a condition, a die explodes on its maximum face.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Explode {
    pub cond: Option<Comparison>,
}

impl Explode {
    pub const fn new(cond: Option<Comparison>) -> Self {
        Self { cond }
    }

    pub fn condition(&self, sides: Int) -> Comparison {
        self.cond.unwrap_or(Comparison::equal_to(sides))
    }
}

impl fmt::Display for Explode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("!")?;
        fmt_cond(&self.cond, f)
    }
}

impl Operate for Explode {
    fn check_terminates(&self, sides: Int) -> RResult<()> {
        terminates(self.condition(sides), sides)
    }

    fn operate<'a, R: RandomSource + ?Sized>(
        &self,
        ctx: &mut RollContext<'a, R>,
        pool: &mut Pool,
    ) -> RResult<()> {
        let sides = pool.sides();
        let cond = self.condition(sides);
        let limit = ctx.config().max_chain_length;

        // chain depth of every draw; dice present before this modifier are roots
        let mut depth = vec![0; pool.len()];
        let mut i = 0;
        while i < pool.len() {
            if pool.status(i) == DieStatus::Kept && cond.matches(pool.face(i)) {
                let next = depth[i] + 1;
                if next > limit {
                    return Err(chain_exceeded(limit));
                }
                let face = ctx.draw(sides)?;
                pool.mark_exploded(i);
                pool.push(face, DieStatus::Kept);
                depth.push(next);
                log::trace!("exploded into {}", face);
            }
            i += 1;
        }
        Ok(())
    }
}

/// `!!`. Extra draws are added onto the die that triggered them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Compound {
    pub cond: Option<Comparison>,
}

impl Compound {
    pub const fn new(cond: Option<Comparison>) -> Self {
        Self { cond }
    }

    pub fn condition(&self, sides: Int) -> Comparison {
        self.cond.unwrap_or(Comparison::equal_to(sides))
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("!!")?;
        fmt_cond(&self.cond, f)
    }
}

impl Operate for Compound {
    fn check_terminates(&self, sides: Int) -> RResult<()> {
        terminates(self.condition(sides), sides)
    }

    fn operate<'a, R: RandomSource + ?Sized>(
        &self,
        ctx: &mut RollContext<'a, R>,
        pool: &mut Pool,
    ) -> RResult<()> {
        let sides = pool.sides();
        let cond = self.condition(sides);
        let limit = ctx.config().max_chain_length;

        let targets: Vec<_> = pool
            .kept()
            .filter(|&i| cond.matches(pool.face(i)))
            .collect();
        for i in targets {
            let mut last = pool.face(i);
            let mut total = last;
            let mut chain = 0;
            while cond.matches(last) {
                if chain == limit {
                    return Err(chain_exceeded(limit));
                }
                last = ctx.draw(sides)?;
                pool.push(last, DieStatus::Exploded);
                total = total.checked_add(last).ok_or(EvalError::Overflow)?;
                chain += 1;
            }
            log::trace!("compounded {} into {}", pool.face(i), total);
            pool.set_face(i, total);
            pool.mark_exploded(i);
        }
        Ok(())
    }
}

/// A bare comparison after a dice term. The term then counts matching dice
/// instead of summing them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct CountSuccess {
    pub cond: Comparison,
}

impl CountSuccess {
    pub const fn new(cond: Comparison) -> Self {
        Self { cond }
    }
}

impl fmt::Display for CountSuccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.cond, f)
    }
}

impl Operate for CountSuccess {
    fn operate<'a, R: RandomSource + ?Sized>(
        &self,
        _: &mut RollContext<'a, R>,
        pool: &mut Pool,
    ) -> RResult<()> {
        pool.count_successes(self.cond);
        Ok(())
    }
}
