use crate::common::Int;
use rand::Rng;

/// A source of die faces.
///
/// Implementations must return a value in `min..=max`. The evaluator checks
/// every returned value and rejects anything outside the range.
pub trait RandomSource {
    fn next(&mut self, min: Int, max: Int) -> Int;
}

impl<R: Rng> RandomSource for R {
    fn next(&mut self, min: Int, max: Int) -> Int {
        self.gen_range(min..=max)
    }
}

/// Replays a fixed sequence of values, starting over once it runs out.
///
/// Values are returned as-is, without regard to the requested range.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ScriptedSource {
    values: Vec<Int>,
    next: usize,
}

impl ScriptedSource {
    pub fn new(values: impl Into<Vec<Int>>) -> Self {
        Self {
            values: values.into(),
            next: 0,
        }
    }

    /// Always returns `value`.
    pub fn constant(value: Int) -> Self {
        Self::new(vec![value])
    }

    /// The number of values handed out so far.
    pub fn consumed(&self) -> usize {
        self.next
    }
}

impl RandomSource for ScriptedSource {
    fn next(&mut self, min: Int, _: Int) -> Int {
        if self.values.is_empty() {
            return min;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}

/// Always returns the largest face it is asked for.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct MaxSource;

impl RandomSource for MaxSource {
    fn next(&mut self, _: Int, max: Int) -> Int {
        max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_scripted_cycles() {
        let mut source = ScriptedSource::new(vec![2, 5]);
        let drawn: Vec<_> = (0..5).map(|_| source.next(1, 6)).collect();
        assert_eq!(drawn, [2, 5, 2, 5, 2]);
        assert_eq!(source.consumed(), 5);
    }

    #[test]
    fn test_rng_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let x = RandomSource::next(&mut rng, 1, 6);
            assert!((1..=6).contains(&x));
        }
    }
}
