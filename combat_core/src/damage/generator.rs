//! Attack description - What the attacker brings to one attack

use crate::config::Ruleset;
use crate::error::CombatError;
use serde::{Deserialize, Serialize};

/// Crit threshold meaning "no critical possible"
pub const NO_CRITICAL: u8 = 13;

/// Crit threshold used by magic skills that do not specify one
pub const DEFAULT_MAGIC_CRIT: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackMode {
    Physical,
    Magic,
}

/// A magic skill on a character or an enemy part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagicSkill {
    pub name: String,
    /// Row of the power table this skill reads
    pub power: u32,
    #[serde(default = "default_magic_crit")]
    pub crit_threshold: u8,
    /// Inherent magic power added on top of the table damage
    #[serde(default)]
    pub magic_power: i32,
}

fn default_magic_crit() -> u8 {
    DEFAULT_MAGIC_CRIT
}

impl MagicSkill {
    pub fn new(name: impl Into<String>, power: u32, crit_threshold: u8, magic_power: i32) -> Self {
        MagicSkill {
            name: name.into(),
            power,
            crit_threshold,
            magic_power,
        }
    }
}

/// One attackable part of a (possibly multi-part) combatant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyPart {
    pub name: String,
    /// Strike value for physical attacks made with this part
    #[serde(default)]
    pub fixed_damage: i32,
    #[serde(default)]
    pub magic_skills: Vec<MagicSkill>,
}

impl EnemyPart {
    pub fn new(name: impl Into<String>, fixed_damage: i32) -> Self {
        EnemyPart {
            name: name.into(),
            fixed_damage,
            magic_skills: Vec::new(),
        }
    }

    pub fn with_skill(mut self, skill: MagicSkill) -> Self {
        self.magic_skills.push(skill);
        self
    }

    pub fn skill(&self, name: &str) -> Option<&MagicSkill> {
        self.magic_skills.iter().find(|s| s.name == name)
    }

    /// Physical attack with this part's strike value
    pub fn physical_attack(&self) -> AttackSpec {
        AttackSpec::physical(self.fixed_damage)
    }

    /// Magic attack with one of this part's skills
    pub fn magic_attack(&self, skill_name: &str) -> Option<AttackSpec> {
        self.skill(skill_name).map(AttackSpec::magic)
    }
}

/// Attacker-side description of one attack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackSpec {
    pub mode: AttackMode,
    /// Strike value (physical) or the skill's inherent magic power (magic)
    pub fixed_base: i32,
    /// Power table row, magic only
    #[serde(default)]
    pub power: Option<u32>,
    /// Magic only; `None` behaves like [`NO_CRITICAL`]
    #[serde(default)]
    pub crit_threshold: Option<u8>,
    /// Manual adjustment entered at the table
    #[serde(default)]
    pub manual_bonus: i32,
}

impl AttackSpec {
    pub fn physical(strike_value: i32) -> Self {
        AttackSpec {
            mode: AttackMode::Physical,
            fixed_base: strike_value,
            power: None,
            crit_threshold: None,
            manual_bonus: 0,
        }
    }

    pub fn magic(skill: &MagicSkill) -> Self {
        AttackSpec {
            mode: AttackMode::Magic,
            fixed_base: skill.magic_power,
            power: Some(skill.power),
            crit_threshold: Some(skill.crit_threshold),
            manual_bonus: 0,
        }
    }

    pub fn with_bonus(mut self, manual_bonus: i32) -> Self {
        self.manual_bonus = manual_bonus;
        self
    }

    /// Crit threshold the chain walk should use
    pub fn effective_crit_threshold(&self) -> u8 {
        self.crit_threshold.unwrap_or(NO_CRITICAL)
    }

    /// Check power rating and crit threshold against the published options
    pub fn validate(&self, ruleset: &Ruleset) -> Result<(), CombatError> {
        if self.mode != AttackMode::Magic {
            return Ok(());
        }
        if let Some(power) = self.power {
            ruleset.validate_power(power)?;
        }
        if let Some(crit) = self.crit_threshold {
            ruleset.validate_crit(crit)?;
        }
        Ok(())
    }
}
