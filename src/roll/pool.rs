use super::{error::EvalError, result::*, RResult};
use crate::common::{Comparison, Int};

/// The dice of one term while its modifiers are being applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Pool {
    sides: Int,
    draws: Vec<DieDraw>,
    successes: Option<Comparison>,
}

impl Pool {
    pub(crate) fn new(sides: Int, faces: impl IntoIterator<Item = Int>) -> Self {
        let draws = faces
            .into_iter()
            .map(|face| DieDraw::new(face, sides, DieStatus::Kept))
            .collect();
        Self {
            sides,
            draws,
            successes: None,
        }
    }

    pub fn sides(&self) -> Int {
        self.sides
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn face(&self, i: usize) -> Int {
        self.draws[i].face
    }

    pub fn status(&self, i: usize) -> DieStatus {
        self.draws[i].status
    }

    pub fn draws(&self) -> &[DieDraw] {
        &self.draws
    }

    pub(crate) fn set_face(&mut self, i: usize, face: Int) {
        self.draws[i].face = face;
    }

    pub(crate) fn set_status(&mut self, i: usize, status: DieStatus) {
        self.draws[i].status = status;
    }

    pub(crate) fn mark_exploded(&mut self, i: usize) {
        self.draws[i].exploded = true;
    }

    /// Appends a draw and returns its index.
    pub(crate) fn push(&mut self, face: Int, status: DieStatus) -> usize {
        self.draws.push(DieDraw::new(face, self.sides, status));
        self.draws.len() - 1
    }

    pub(crate) fn count_successes(&mut self, cond: Comparison) {
        self.successes = Some(cond);
    }

    /// Indices of the kept dice.
    pub fn kept(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.draws.len()).filter(move |&i| self.draws[i].is_kept())
    }

    /// Indices of the kept dice ordered by face, highest or lowest first.
    /// Equal faces stay in draw order.
    pub fn ranked(&self, highest: bool) -> Vec<usize> {
        let mut ranked: Vec<_> = self.kept().collect();
        if highest {
            ranked.sort_by(|&a, &b| self.face(b).cmp(&self.face(a)));
        } else {
            ranked.sort_by_key(|&i| self.face(i));
        }
        ranked
    }

    /// The kept faces summed, or the number of kept faces meeting the
    /// success condition.
    pub fn value(&self) -> RResult<Int> {
        match self.successes {
            Some(cond) => Ok(self
                .draws
                .iter()
                .filter(|d| d.is_kept() && cond.matches(d.face))
                .count() as Int),
            None => self
                .draws
                .iter()
                .filter(|d| d.is_kept())
                .try_fold(0 as Int, |a, d| a.checked_add(d.face))
                .ok_or(EvalError::Overflow),
        }
    }

    pub(crate) fn into_group(self, notation: String) -> RResult<DiceGroup> {
        let value = self.value()?;
        Ok(DiceGroup {
            notation,
            sides: self.sides,
            draws: self.draws,
            value,
            successes: self.successes.is_some(),
        })
    }
}
