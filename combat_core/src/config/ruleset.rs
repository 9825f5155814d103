//! Ruleset configuration - Power table, published crit thresholds, stacking policy

use super::ConfigError;
use crate::damage::{PowerLookup, PowerTable, PowerTableRow, MIN_DICE_TOTAL, NO_CRITICAL};
use crate::error::CombatError;
use crate::ledger::StackingPolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Ruleset file as written on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesetConfig {
    #[serde(default = "default_crit_thresholds")]
    pub crit_thresholds: Vec<u8>,
    #[serde(default)]
    pub stackable_tags: Vec<String>,
    pub power_table: Vec<PowerTableRow>,
}

fn default_crit_thresholds() -> Vec<u8> {
    (8..=NO_CRITICAL).collect()
}

/// Validated, read-only ruleset data consumed by the engine
#[derive(Debug, Clone)]
pub struct Ruleset {
    pub power_table: PowerTable,
    pub crit_thresholds: BTreeSet<u8>,
    pub stacking: StackingPolicy,
}

impl Ruleset {
    pub fn from_config(config: RulesetConfig) -> Result<Ruleset, ConfigError> {
        if let Some(bad) = config
            .crit_thresholds
            .iter()
            .find(|c| !(MIN_DICE_TOTAL..=NO_CRITICAL).contains(*c))
        {
            return Err(ConfigError::ValidationError(format!(
                "crit threshold {} is outside {}..={}",
                bad, MIN_DICE_TOTAL, NO_CRITICAL
            )));
        }

        let power_table = PowerTable::from_rows(config.power_table)?;
        if power_table.is_empty() {
            return Err(ConfigError::ValidationError(
                "power table has no rows".to_string(),
            ));
        }

        Ok(Ruleset {
            power_table,
            crit_thresholds: config.crit_thresholds.into_iter().collect(),
            stacking: StackingPolicy::from_tags(config.stackable_tags),
        })
    }

    pub fn validate_power(&self, power: u32) -> Result<(), CombatError> {
        if self.power_table.has_power(power) {
            Ok(())
        } else {
            Err(CombatError::invalid_power(power))
        }
    }

    pub fn validate_crit(&self, crit_threshold: u8) -> Result<(), CombatError> {
        if self.crit_thresholds.contains(&crit_threshold) {
            Ok(())
        } else {
            Err(CombatError::invalid_crit(crit_threshold))
        }
    }
}

/// Load a ruleset from a TOML file
pub fn load_ruleset(path: &Path) -> Result<Ruleset, ConfigError> {
    let config: RulesetConfig = super::load_toml(path)?;
    Ruleset::from_config(config)
}

/// Load a ruleset from a TOML string
pub fn parse_ruleset(content: &str) -> Result<Ruleset, ConfigError> {
    let config: RulesetConfig = super::parse_toml(content)?;
    Ruleset::from_config(config)
}

/// The ruleset shipped with the library
pub fn default_ruleset() -> Result<Ruleset, ConfigError> {
    parse_ruleset(include_str!("../../config/ruleset.toml"))
}
