//! Narrative dice: pools of symbol dice such as `2g 1y 2p`, read by netting
//! successes against failures and advantages against threats.

mod dice;
mod lexer;
mod parser;
mod result;

pub use dice::{Face, GenesysDie};
pub use lexer::{tokenize, Token, TokenKind};
pub use parser::{Count, Term};
pub use result::{GenesysResult, GenesysRoll, Tally};

use crate::common::Int;
use crate::config::RollConfig;
use crate::resolve::Resolver;
use crate::roll::{Ceiling, EvalError, Number, RandomSource};
use crate::Error;
use parser::{Notation, Parser};

type RResult<T> = Result<T, EvalError>;

/// Parses narrative dice notation.
pub fn parse(text: &str) -> Result<Vec<Term>, Error> {
    let tokens = tokenize(text)?;
    Ok(Parser::new(tokens).parse()?)
}

/// Parses and rolls narrative dice notation.
///
/// # Errors
/// Fails on malformed notation, on unresolved or negative counts, when the
/// whole roll asks for more than [`RollConfig::max_dice`] dice, and when the
/// source returns a value that selects no face.
pub fn roll<R: RandomSource + ?Sized>(
    text: &str,
    source: &mut R,
    config: &RollConfig,
    resolver: &dyn Resolver,
) -> Result<GenesysResult, Error> {
    let terms = parse(text)?;
    Ok(roll_terms(&terms, source, config, resolver)?)
}

pub fn roll_terms<R: RandomSource + ?Sized>(
    terms: &[Term],
    source: &mut R,
    config: &RollConfig,
    resolver: &dyn Resolver,
) -> RResult<GenesysResult> {
    let mut roller = Roller {
        source,
        config,
        resolver,
        rolled: 0,
    };
    roller.roll(terms)
}

struct Roller<'a, R: ?Sized> {
    source: &'a mut R,
    config: &'a RollConfig,
    resolver: &'a dyn Resolver,
    rolled: usize,
}

impl<R: RandomSource + ?Sized> Roller<'_, R> {
    fn roll(&mut self, terms: &[Term]) -> RResult<GenesysResult> {
        let mut ret = GenesysResult {
            notation: Notation(terms).to_string(),
            ..Default::default()
        };

        for term in terms {
            match term {
                Term::Dice { count, die } => {
                    let n = self.count(count, die.faces().len())?;
                    for _ in 0..n {
                        let face = self.draw(*die)?;
                        ret.rolls.push(GenesysRoll { die: *die, face });
                        ret.tally = ret
                            .tally
                            .checked_add(face.tally())
                            .ok_or(EvalError::Overflow)?;
                    }
                }
                Term::Symbols { count, face } => {
                    let n = self.resolve(count)?;
                    let added = face
                        .tally()
                        .checked_mul(n)
                        .and_then(|t| ret.tally.checked_add(t))
                        .ok_or(EvalError::Overflow)?;
                    ret.tally = added;
                }
                Term::Group { name, terms } => {
                    let group = self.roll(terms)?;
                    log::debug!("group {}: {:?}", name, group.tally);
                    ret.add_group(name.clone(), group)
                        .ok_or(EvalError::Overflow)?;
                }
            }
        }
        Ok(ret)
    }

    fn resolve(&self, count: &Count) -> RResult<Int> {
        let n = match count {
            Count::Literal(n) => *n,
            Count::Reference(r) => self
                .resolver
                .resolve(r)
                .ok_or_else(|| EvalError::UnresolvedReference(r.to_string()))?,
        };
        if n < 0 {
            return Err(EvalError::InvalidDiceSpec {
                count: Number::Int(n),
                sides: Number::Int(1),
            });
        }
        Ok(n)
    }

    /// Resolves a dice count and charges it against the dice ceiling.
    fn count(&mut self, count: &Count, faces: usize) -> RResult<usize> {
        let n = self.resolve(count).map_err(|e| match e {
            EvalError::InvalidDiceSpec { count, .. } => EvalError::InvalidDiceSpec {
                count,
                sides: Number::Int(faces as Int),
            },
            e => e,
        })?;

        let n = usize::try_from(n).unwrap_or(usize::MAX);
        let total = self.rolled.saturating_add(n);
        let limit = self.config.max_dice;
        if total > limit {
            return Err(EvalError::SafetyCeilingExceeded(Ceiling::DiceCount {
                requested: Int::try_from(total).unwrap_or(Int::MAX),
                limit,
            }));
        }
        self.rolled = total;
        Ok(n)
    }

    fn draw(&mut self, die: GenesysDie) -> RResult<Face> {
        let faces = die.faces().len() as Int;
        let value = self.source.next(1, faces);
        let face = usize::try_from(value)
            .ok()
            .and_then(|n| die.face(n))
            .ok_or(EvalError::OutOfRange {
                value,
                min: 1,
                max: faces,
            })?;
        log::trace!("{} die: {} -> {:?}", die, value, face);
        Ok(face)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::{MaxSource, ScriptedSource};
    use std::collections::HashMap;

    fn roll_scripted(text: &str, draws: &[Int]) -> Result<GenesysResult, Error> {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut source = ScriptedSource::new(draws);
        roll(text, &mut source, &RollConfig::default(), &())
    }

    #[test]
    fn test_roll_pool() {
        // ability: success-success, difficulty: threat, proficiency: triumph
        let res = roll_scripted("1g 1p 1y", &[4, 4, 12]).unwrap();
        assert_eq!(
            res.rolls(),
            [
                GenesysRoll {
                    die: GenesysDie::Ability,
                    face: Face::SuccessSuccess,
                },
                GenesysRoll {
                    die: GenesysDie::Difficulty,
                    face: Face::Threat,
                },
                GenesysRoll {
                    die: GenesysDie::Proficiency,
                    face: Face::Triumph,
                },
            ]
        );
        assert_eq!(res.net_success(), 3);
        assert_eq!(res.net_advantage(), -1);
        assert_eq!(res.tally().triumph, 1);
        assert_eq!(res.notation(), "1g 1p 1y");
    }

    #[test]
    fn test_explicit_symbols() {
        let res = roll_scripted("2s 1h d", &[]).unwrap();
        assert!(res.rolls().is_empty());
        let tally = res.tally();
        assert_eq!((tally.success, tally.threat, tally.despair, tally.failure), (2, 1, 1, 1));
        assert_eq!(res.net_success(), 1);
    }

    #[test]
    fn test_named_groups() {
        let res = roll_scripted("(attack: 2g) (damage: k)", &[2, 8, 3]).unwrap();
        assert_eq!(res.rolls().len(), 3);

        let attack = res.group("attack").unwrap();
        assert_eq!(attack.dice_results(GenesysDie::Ability), [Face::Success, Face::AdvantageAdvantage]);
        assert_eq!(attack.net_success(), 1);
        assert_eq!(res.group("damage").unwrap().tally().failure, 1);
        assert_eq!(res.net_success(), 0);
    }

    #[test]
    fn test_force_dice_with_max_source() {
        let res = roll("3w", &mut MaxSource, &RollConfig::default(), &()).unwrap();
        assert_eq!(res.tally().light, 6);
        assert_eq!(res.face_counts()[&Face::LightLight], 3);
    }

    #[test]
    fn test_reference_counts() {
        let vars = HashMap::from([("skill".to_owned(), 2)]);
        let mut source = ScriptedSource::constant(1);
        let res = roll("${skill}g", &mut source, &RollConfig::default(), &vars).unwrap();
        assert_eq!(res.dice_results(GenesysDie::Ability).len(), 2);

        let err = roll_scripted("${skill}g", &[1]).unwrap_err();
        assert_eq!(
            err,
            Error::Eval(EvalError::UnresolvedReference("${skill}".to_owned()))
        );
    }

    #[test]
    fn test_dice_ceiling_spans_whole_roll() {
        let config = RollConfig::default().with_max_dice(4);
        let mut source = ScriptedSource::constant(1);
        let err = roll("2g (more: 3p)", &mut source, &config, &()).unwrap_err();
        assert_eq!(
            err,
            Error::Eval(EvalError::SafetyCeilingExceeded(Ceiling::DiceCount {
                requested: 5,
                limit: 4,
            }))
        );
        assert!(roll("2g (more: 2p)", &mut source, &config, &()).is_ok());
    }

    #[test]
    fn test_out_of_range_face() {
        let err = roll_scripted("b", &[7]).unwrap_err();
        assert_eq!(
            err,
            Error::Eval(EvalError::OutOfRange {
                value: 7,
                min: 1,
                max: 6,
            })
        );
    }

    #[test]
    fn test_negative_count() {
        let vars = HashMap::from([("n".to_owned(), -1)]);
        let mut source = ScriptedSource::constant(1);
        let err = roll("${n}b", &mut source, &RollConfig::default(), &vars).unwrap_err();
        assert_eq!(
            err,
            Error::Eval(EvalError::InvalidDiceSpec {
                count: Number::Int(-1),
                sides: Number::Int(6),
            })
        );
    }
}
