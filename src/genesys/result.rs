use super::dice::{Face, GenesysDie};
use crate::common::Int;
use std::collections::BTreeMap;

/// Symbol counts across any number of faces.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tally {
    /// Includes triumphs.
    pub success: Int,
    /// Includes despairs.
    pub failure: Int,
    pub advantage: Int,
    pub threat: Int,
    pub triumph: Int,
    pub despair: Int,
    pub light: Int,
    pub dark: Int,
}

impl Tally {
    pub(crate) fn checked_mul(self, n: Int) -> Option<Self> {
        Some(Self {
            success: self.success.checked_mul(n)?,
            failure: self.failure.checked_mul(n)?,
            advantage: self.advantage.checked_mul(n)?,
            threat: self.threat.checked_mul(n)?,
            triumph: self.triumph.checked_mul(n)?,
            despair: self.despair.checked_mul(n)?,
            light: self.light.checked_mul(n)?,
            dark: self.dark.checked_mul(n)?,
        })
    }

    pub(crate) fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(Self {
            success: self.success.checked_add(rhs.success)?,
            failure: self.failure.checked_add(rhs.failure)?,
            advantage: self.advantage.checked_add(rhs.advantage)?,
            threat: self.threat.checked_add(rhs.threat)?,
            triumph: self.triumph.checked_add(rhs.triumph)?,
            despair: self.despair.checked_add(rhs.despair)?,
            light: self.light.checked_add(rhs.light)?,
            dark: self.dark.checked_add(rhs.dark)?,
        })
    }
}

/// One die and the face it landed on.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenesysRoll {
    pub die: GenesysDie,
    pub face: Face,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenesysResult {
    pub(crate) notation: String,
    pub(crate) rolls: Vec<GenesysRoll>,
    pub(crate) tally: Tally,
    pub(crate) groups: BTreeMap<String, GenesysResult>,
}

impl GenesysResult {
    pub fn notation(&self) -> &str {
        &self.notation
    }

    /// Every die rolled, named groups included, in the order rolled.
    pub fn rolls(&self) -> &[GenesysRoll] {
        &self.rolls
    }

    /// Symbols from the dice and from explicitly added results.
    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn groups(&self) -> &BTreeMap<String, GenesysResult> {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&GenesysResult> {
        self.groups.get(name)
    }

    /// The faces rolled on dice of one kind, in the order rolled.
    pub fn dice_results(&self, die: GenesysDie) -> Vec<Face> {
        self.rolls
            .iter()
            .filter(|r| r.die == die)
            .map(|r| r.face)
            .collect()
    }

    /// How often each face came up.
    pub fn face_counts(&self) -> BTreeMap<Face, usize> {
        let mut counts = BTreeMap::new();
        for roll in &self.rolls {
            *counts.entry(roll.face).or_insert(0) += 1;
        }
        counts
    }

    /// Successes minus failures. Positive means the check passed.
    pub fn net_success(&self) -> Int {
        self.tally.success.saturating_sub(self.tally.failure)
    }

    /// Advantages minus threats.
    pub fn net_advantage(&self) -> Int {
        self.tally.advantage.saturating_sub(self.tally.threat)
    }

    /// Folds `other` into this result as well as keeping it under `name`.
    /// A repeated name keeps the later group.
    pub(crate) fn add_group(&mut self, name: String, other: GenesysResult) -> Option<()> {
        self.absorb(&other)?;
        self.groups.insert(name, other);
        Some(())
    }

    pub(crate) fn absorb(&mut self, other: &GenesysResult) -> Option<()> {
        self.tally = self.tally.checked_add(other.tally)?;
        self.rolls.extend_from_slice(&other.rolls);
        for (name, group) in &other.groups {
            self.groups.insert(name.clone(), group.clone());
        }
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(rolls: &[(GenesysDie, Face)]) -> GenesysResult {
        let mut ret = GenesysResult::default();
        for &(die, face) in rolls {
            ret.rolls.push(GenesysRoll { die, face });
            ret.tally = ret.tally.checked_add(face.tally()).unwrap();
        }
        ret
    }

    #[test]
    fn test_net_outcome() {
        let res = result(&[
            (GenesysDie::Ability, Face::SuccessAdvantage),
            (GenesysDie::Difficulty, Face::ThreatThreat),
            (GenesysDie::Proficiency, Face::Triumph),
        ]);
        assert_eq!(res.net_success(), 2);
        assert_eq!(res.net_advantage(), -1);
        assert_eq!(res.tally().triumph, 1);
    }

    #[test]
    fn test_dice_results_and_counts() {
        let res = result(&[
            (GenesysDie::Boost, Face::Blank),
            (GenesysDie::Ability, Face::Success),
            (GenesysDie::Boost, Face::Advantage),
            (GenesysDie::Ability, Face::Success),
        ]);
        assert_eq!(
            res.dice_results(GenesysDie::Boost),
            [Face::Blank, Face::Advantage]
        );
        assert!(res.dice_results(GenesysDie::Force).is_empty());
        assert_eq!(res.face_counts()[&Face::Success], 2);
    }

    #[test]
    fn test_groups_fold_into_parent() {
        let mut parent = result(&[(GenesysDie::Setback, Face::Failure)]);
        let attack = result(&[(GenesysDie::Ability, Face::SuccessSuccess)]);
        parent.add_group("attack".to_owned(), attack.clone()).unwrap();

        assert_eq!(parent.rolls().len(), 2);
        assert_eq!(parent.net_success(), 1);
        assert_eq!(parent.group("attack"), Some(&attack));
    }

    #[test]
    fn test_tally_overflow() {
        let tally = Face::Success.tally();
        assert_eq!(tally.checked_mul(3).map(|t| t.success), Some(3));
        assert_eq!(tally.checked_mul(Int::MAX).and_then(|t| t.checked_add(tally)), None);
    }
}
