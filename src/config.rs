use std::str::FromStr;
use thiserror::Error;

/// How `/` treats a quotient with a fractional part.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DivisionPolicy {
    /// Integer division, rounding toward zero.
    #[default]
    Truncate,
    /// Exact quotients stay integers, inexact ones become decimals.
    Decimal,
}

impl FromStr for DivisionPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "truncate" => Ok(Self::Truncate),
            "decimal" => Ok(Self::Decimal),
            _ => Err(ConfigError::InvalidValue {
                key: "division",
                value: s.to_owned(),
            }),
        }
    }
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Limits and policies consulted while evaluating a roll.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RollConfig {
    /// The most dice a single dice term may roll.
    pub max_dice: usize,
    /// The most extra draws a single reroll or explosion chain may make.
    pub max_chain_length: usize,
    pub division: DivisionPolicy,
}

impl RollConfig {
    pub const DEFAULT_MAX_DICE: usize = 1000;
    pub const DEFAULT_MAX_CHAIN_LENGTH: usize = 100;

    pub const ENV_MAX_DICE: &'static str = "DICE_MAX_DICE";
    pub const ENV_MAX_CHAIN: &'static str = "DICE_MAX_CHAIN";
    pub const ENV_DIVISION: &'static str = "DICE_DIVISION";

    pub const fn new() -> Self {
        Self {
            max_dice: Self::DEFAULT_MAX_DICE,
            max_chain_length: Self::DEFAULT_MAX_CHAIN_LENGTH,
            division: DivisionPolicy::Truncate,
        }
    }

    pub const fn with_max_dice(mut self, max_dice: usize) -> Self {
        self.max_dice = max_dice;
        self
    }

    pub const fn with_max_chain_length(mut self, max_chain_length: usize) -> Self {
        self.max_chain_length = max_chain_length;
        self
    }

    pub const fn with_division(mut self, division: DivisionPolicy) -> Self {
        self.division = division;
        self
    }

    /// Reads overrides from `DICE_MAX_DICE`, `DICE_MAX_CHAIN` and
    /// `DICE_DIVISION`. Unset variables keep their defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::new();
        if let Some(value) = lookup(Self::ENV_MAX_DICE) {
            config.max_dice = parse_limit(Self::ENV_MAX_DICE, &value)?;
        }
        if let Some(value) = lookup(Self::ENV_MAX_CHAIN) {
            config.max_chain_length = parse_limit(Self::ENV_MAX_CHAIN, &value)?;
        }
        if let Some(value) = lookup(Self::ENV_DIVISION) {
            config.division = value.parse()?;
        }
        log::debug!("loaded {:?}", config);
        Ok(config)
    }
}

impl Default for RollConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_limit(key: &'static str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&'static str, &str)]) -> Result<RollConfig, ConfigError> {
        let vars: HashMap<_, _> = vars.iter().map(|&(k, v)| (k, v.to_owned())).collect();
        RollConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, RollConfig::default());
        assert_eq!(config.max_dice, 1000);
        assert_eq!(config.max_chain_length, 100);
        assert_eq!(config.division, DivisionPolicy::Truncate);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DICE_MAX_DICE", "50"),
            ("DICE_MAX_CHAIN", " 7 "),
            ("DICE_DIVISION", "Decimal"),
        ])
        .unwrap();
        assert_eq!(
            config,
            RollConfig::new()
                .with_max_dice(50)
                .with_max_chain_length(7)
                .with_division(DivisionPolicy::Decimal)
        );
    }

    #[test]
    fn test_invalid() {
        assert_eq!(
            load(&[("DICE_MAX_DICE", "lots")]),
            Err(ConfigError::InvalidValue {
                key: "DICE_MAX_DICE",
                value: "lots".into()
            })
        );
        assert!(load(&[("DICE_DIVISION", "round")]).is_err());
    }
}
