//! Encounter files - Combatants and the scripted rounds to run

use anyhow::{bail, Context, Result};
use combat_core::{BaseStats, Buff, EnemyPart};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A scripted encounter loaded from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Encounter {
    #[serde(default)]
    pub name: String,
    pub combatants: Vec<Combatant>,
    #[serde(default)]
    pub rounds: Vec<RoundPlan>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub hp: i32,
    #[serde(default)]
    pub base: BaseStats,
    /// Buffs active before the first round
    #[serde(default)]
    pub buffs: Vec<Buff>,
    #[serde(default)]
    pub parts: Vec<EnemyPart>,
}

impl Combatant {
    pub fn part(&self, name: &str) -> Option<&EnemyPart> {
        self.parts.iter().find(|p| p.name == name)
    }
}

/// Everything that happens in one round, in order: buffs, then attacks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundPlan {
    #[serde(default)]
    pub buffs: Vec<BuffAction>,
    #[serde(default)]
    pub attacks: Vec<AttackAction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuffAction {
    pub target: String,
    pub buff: Buff,
    /// Replace a non-stacking duplicate instead of rejecting the buff
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackAction {
    pub attacker: String,
    pub part: String,
    pub target: String,
    /// Magic skill of the part; physical attack when absent
    #[serde(default)]
    pub skill: Option<String>,
    /// Fixed dice, chain rolls included; missing entries are rolled
    #[serde(default)]
    pub rolls: Vec<(u8, u8)>,
    #[serde(default)]
    pub bonus: i32,
    #[serde(default)]
    pub resisted: bool,
    /// Roll a resistance check against this value instead of using `resisted`
    #[serde(default)]
    pub achievement: Option<i32>,
}

impl Encounter {
    /// Check that every name an action refers to exists
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for combatant in &self.combatants {
            if !names.insert(combatant.name.as_str()) {
                bail!("combatant '{}' is listed twice", combatant.name);
            }
        }

        for (index, round) in self.rounds.iter().enumerate() {
            let round_no = index + 1;
            for action in &round.buffs {
                if !names.contains(action.target.as_str()) {
                    bail!("round {}: unknown buff target '{}'", round_no, action.target);
                }
            }
            for attack in &round.attacks {
                let attacker = self
                    .combatant(&attack.attacker)
                    .with_context(|| format!("round {}: unknown attacker '{}'", round_no, attack.attacker))?;
                if !names.contains(attack.target.as_str()) {
                    bail!("round {}: unknown target '{}'", round_no, attack.target);
                }
                let part = attacker.part(&attack.part).with_context(|| {
                    format!("round {}: '{}' has no part '{}'", round_no, attacker.name, attack.part)
                })?;
                if let Some(skill) = &attack.skill {
                    if part.skill(skill).is_none() {
                        bail!("round {}: part '{}' has no skill '{}'", round_no, part.name, skill);
                    }
                }
            }
        }
        Ok(())
    }

    pub fn combatant(&self, name: &str) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.name == name)
    }
}

/// Load and validate an encounter file
pub fn load_encounter(path: &Path) -> Result<Encounter> {
    let encounter: Encounter = combat_core::config::load_toml(path)
        .with_context(|| format!("loading encounter {}", path.display()))?;
    encounter.validate()?;
    Ok(encounter)
}

/// Parse and validate an encounter from a TOML string
pub fn parse_encounter(content: &str) -> Result<Encounter> {
    let encounter: Encounter = combat_core::config::parse_toml(content)?;
    encounter.validate()?;
    Ok(encounter)
}
