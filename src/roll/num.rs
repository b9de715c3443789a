use super::{error::EvalError, RResult};
use crate::common::Int;
use crate::config::DivisionPolicy;
use std::fmt;

/// The value of an evaluated expression. Decimals only appear under
/// [`DivisionPolicy::Decimal`].
#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Number {
    Int(Int),
    Decimal(f64),
}

impl Number {
    pub fn as_float(self) -> f64 {
        match self {
            Self::Int(x) => x as f64,
            Self::Decimal(x) => x,
        }
    }

    /// Returns the integer value, if this number has no fractional part.
    pub fn as_int(self) -> Option<Int> {
        match self {
            Self::Int(x) => Some(x),
            Self::Decimal(x) if x.fract() == 0.0 && x.abs() < Int::MAX as f64 => Some(x as Int),
            Self::Decimal(_) => None,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Self::Int(x) => x == 0,
            Self::Decimal(x) => x == 0.0,
        }
    }

    pub(crate) fn checked_neg(self) -> RResult<Self> {
        match self {
            Self::Int(x) => x.checked_neg().map(Self::Int).ok_or(EvalError::Overflow),
            Self::Decimal(x) => Ok(Self::Decimal(-x)),
        }
    }

    pub(crate) fn checked_div(self, rhs: Self, policy: DivisionPolicy) -> RResult<Self> {
        if rhs.is_zero() {
            return Err(EvalError::DivideByZero);
        }
        match (self, rhs, policy) {
            (Self::Int(x), Self::Int(y), DivisionPolicy::Truncate) => {
                x.checked_div(y).map(Self::Int).ok_or(EvalError::Overflow)
            }
            (Self::Int(x), Self::Int(y), DivisionPolicy::Decimal) if x.checked_rem(y) == Some(0) => {
                x.checked_div(y).map(Self::Int).ok_or(EvalError::Overflow)
            }
            (x, y, DivisionPolicy::Truncate) => {
                Ok(Self::Int((x.as_float() / y.as_float()).trunc() as Int))
            }
            (x, y, DivisionPolicy::Decimal) => Ok(Self::Decimal(x.as_float() / y.as_float())),
        }
    }
}

macro_rules! num_impl_checked_op {
    ($fn_name:ident, $op:tt) => {
        impl Number {
            pub(crate) fn $fn_name(self, rhs: Self) -> RResult<Self> {
                match (self, rhs) {
                    (Self::Int(x), Self::Int(y)) => {
                        x.$fn_name(y).map(Self::Int).ok_or(EvalError::Overflow)
                    }
                    (x, y) => Ok(Self::Decimal(x.as_float() $op y.as_float())),
                }
            }
        }
    };
}

num_impl_checked_op!(checked_add, +);
num_impl_checked_op!(checked_sub, -);
num_impl_checked_op!(checked_mul, *);

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(x), Self::Int(y)) => x == y,
            (x, y) => x.as_float() == y.as_float(),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (Self::Int(x), Self::Int(y)) => x.partial_cmp(y),
            (x, y) => x.as_float().partial_cmp(&y.as_float()),
        }
    }
}

impl From<Int> for Number {
    fn from(x: Int) -> Self {
        Self::Int(x)
    }
}

impl From<f64> for Number {
    fn from(x: f64) -> Self {
        Self::Decimal(x)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(x) => fmt::Display::fmt(x, f),
            Self::Decimal(x) => fmt::Debug::fmt(x, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncating_division() {
        let div = |x: Int, y: Int| Number::from(x).checked_div(y.into(), DivisionPolicy::Truncate);
        assert_eq!(div(6, 4), Ok(Number::Int(1)));
        assert_eq!(div(-7, 2), Ok(Number::Int(-3)));
        assert_eq!(div(1, 0), Err(EvalError::DivideByZero));
        assert_eq!(div(Int::MIN, -1), Err(EvalError::Overflow));
    }

    #[test]
    fn test_decimal_division() {
        let div = |x: Int, y: Int| Number::from(x).checked_div(y.into(), DivisionPolicy::Decimal);
        assert_eq!(div(6, 3), Ok(Number::Int(2)));
        assert_eq!(div(6, 4), Ok(Number::Decimal(1.5)));
    }

    #[test]
    fn test_overflow() {
        assert_eq!(
            Number::Int(Int::MAX).checked_add(Number::Int(1)),
            Err(EvalError::Overflow)
        );
        assert_eq!(Number::Int(Int::MIN).checked_neg(), Err(EvalError::Overflow));
    }

    #[test]
    fn test_as_int() {
        assert_eq!(Number::Decimal(3.0).as_int(), Some(3));
        assert_eq!(Number::Decimal(3.5).as_int(), None);
        assert_eq!(Number::Int(-2).as_int(), Some(-2));
    }

    #[test]
    fn test_display() {
        assert_eq!(Number::Int(4).to_string(), "4");
        assert_eq!(Number::Decimal(1.5).to_string(), "1.5");
    }
}
