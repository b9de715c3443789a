use super::num::Number;
use crate::common::Int;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DieStatus {
    /// Counts toward the term's value.
    Kept,
    /// Removed by a keep or drop modifier.
    Dropped,
    /// Replaced by a later draw.
    Rerolled,
    /// Added onto an earlier die by a compounding explosion.
    Exploded,
}

/// One physical die.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DieDraw {
    pub face: Int,
    pub sides: Int,
    pub status: DieStatus,
    /// Whether this die triggered an explosion.
    pub exploded: bool,
}

impl DieDraw {
    pub const fn new(face: Int, sides: Int, status: DieStatus) -> Self {
        Self {
            face,
            sides,
            status,
            exploded: false,
        }
    }

    pub fn is_kept(&self) -> bool {
        self.status == DieStatus::Kept
    }
}

/// Every die drawn by one dice term, in draw order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiceGroup {
    /// The term as written, normalized (e.g. `4d6kh3`).
    pub notation: String,
    pub sides: Int,
    pub draws: Vec<DieDraw>,
    /// The term's contribution to the total.
    pub value: Int,
    /// Whether `value` is a success count rather than a sum of faces.
    pub successes: bool,
}

/// The outcome of evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollResult {
    pub(crate) notation: String,
    pub(crate) total: Number,
    pub(crate) groups: Vec<DiceGroup>,
}

impl RollResult {
    pub(crate) fn new(notation: String, total: Number, groups: Vec<DiceGroup>) -> Self {
        Self {
            notation,
            total,
            groups,
        }
    }

    pub fn notation(&self) -> &str {
        &self.notation
    }

    pub fn total(&self) -> Number {
        self.total
    }

    /// Dice groups in evaluation order, one per evaluated dice term.
    pub fn groups(&self) -> &[DiceGroup] {
        &self.groups
    }

    /// Every die drawn, in evaluation order.
    pub fn trace(&self) -> impl Iterator<Item = &DieDraw> + '_ {
        self.groups.iter().flat_map(|g| g.draws.iter())
    }

    pub fn dice_rolled(&self) -> usize {
        self.groups.iter().map(|g| g.draws.len()).sum()
    }
}
