//! Engine error kinds
//!
//! Every variant is a local validation failure: the inputs that produced it
//! are left untouched.

use thiserror::Error;

/// Which published option set a value was checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulesetOption {
    PowerRating,
    CritThreshold,
}

impl std::fmt::Display for RulesetOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RulesetOption::PowerRating => write!(f, "power rating"),
            RulesetOption::CritThreshold => write!(f, "crit threshold"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CombatError {
    #[error("a non-stacking buff tagged '{source_tag}' is already active")]
    DuplicateBuff { source_tag: String },
    #[error("die value {0} is outside 1..=6")]
    InvalidDieValue(u8),
    #[error("{option} {value} is not a published option")]
    InvalidPowerOrCritValue { option: RulesetOption, value: u32 },
    #[error("{0} only applies to magic attacks")]
    MagicOnlyOption(RulesetOption),
}

impl CombatError {
    pub fn invalid_power(value: u32) -> Self {
        CombatError::InvalidPowerOrCritValue {
            option: RulesetOption::PowerRating,
            value,
        }
    }

    pub fn invalid_crit(value: u8) -> Self {
        CombatError::InvalidPowerOrCritValue {
            option: RulesetOption::CritThreshold,
            value: value as u32,
        }
    }
}
