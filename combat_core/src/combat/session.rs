//! Attack session - One attack being set up and rolled at the table

use super::resolution::{resolve_attack, ResolveOptions};
use super::result::DamageResult;
use crate::config::Ruleset;
use crate::damage::{
    chain_extent, AttackMode, AttackSpec, DicePair, MagicSkill, PowerLookup, RollSequence,
    MAX_CHAIN_ROLLS,
};
use crate::error::{CombatError, RulesetOption};
use crate::stat_block::AggregatedStats;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Attack spec plus the dice entered so far
///
/// A value object: every operation returns a new session. Changing the
/// skill, power rating or crit threshold resets the rolls to a single empty
/// entry, since earlier dice were entered against different rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackSession {
    spec: AttackSpec,
    #[serde(default)]
    skill: Option<String>,
    #[serde(default)]
    rolls: RollSequence,
}

impl AttackSession {
    pub fn new(spec: AttackSpec) -> Self {
        AttackSession {
            spec,
            skill: None,
            rolls: RollSequence::new(),
        }
    }

    /// Magic attack with a skill, validated against the ruleset
    pub fn magic(skill: &MagicSkill, ruleset: &Ruleset) -> Result<Self, CombatError> {
        Self::new(AttackSpec::physical(0)).with_skill(skill, ruleset)
    }

    pub fn spec(&self) -> &AttackSpec {
        &self.spec
    }

    pub fn skill(&self) -> Option<&str> {
        self.skill.as_deref()
    }

    pub fn rolls(&self) -> &RollSequence {
        &self.rolls
    }

    /// Switch to a magic skill; keeps the manual bonus
    ///
    /// On error the receiver, rolls included, is left as it was.
    pub fn with_skill(&self, skill: &MagicSkill, ruleset: &Ruleset) -> Result<Self, CombatError> {
        let spec = AttackSpec::magic(skill).with_bonus(self.spec.manual_bonus);
        spec.validate(ruleset)?;
        Ok(AttackSession {
            spec,
            skill: Some(skill.name.clone()),
            rolls: RollSequence::new(),
        })
    }

    /// Override the power rating of a magic attack
    ///
    /// The skill name is cleared since its parameters no longer apply.
    pub fn with_power(&self, power: u32, ruleset: &Ruleset) -> Result<Self, CombatError> {
        self.require_magic(RulesetOption::PowerRating)?;
        ruleset.validate_power(power)?;
        Ok(AttackSession {
            spec: AttackSpec {
                power: Some(power),
                ..self.spec.clone()
            },
            skill: None,
            rolls: RollSequence::new(),
        })
    }

    /// Override the crit threshold of a magic attack; clears the skill name
    pub fn with_crit_threshold(&self, crit_threshold: u8, ruleset: &Ruleset) -> Result<Self, CombatError> {
        self.require_magic(RulesetOption::CritThreshold)?;
        ruleset.validate_crit(crit_threshold)?;
        Ok(AttackSession {
            spec: AttackSpec {
                crit_threshold: Some(crit_threshold),
                ..self.spec.clone()
            },
            skill: None,
            rolls: RollSequence::new(),
        })
    }

    fn require_magic(&self, option: RulesetOption) -> Result<(), CombatError> {
        match self.spec.mode {
            AttackMode::Magic => Ok(()),
            AttackMode::Physical => Err(CombatError::MagicOnlyOption(option)),
        }
    }

    /// Change the manual adjustment; rolls are kept
    pub fn with_manual_bonus(mut self, manual_bonus: i32) -> Self {
        self.spec.manual_bonus = manual_bonus;
        self
    }

    /// Discard all entered dice
    pub fn reset(self) -> Self {
        AttackSession {
            rolls: RollSequence::new(),
            ..self
        }
    }

    /// Record dice for one entry
    ///
    /// Entries that no longer belong to the chain are discarded. When every
    /// kept entry is critical and the cap is not reached, a new empty chain
    /// entry is offered. Indices past the current entries are ignored.
    pub fn with_roll(self, index: usize, pair: DicePair) -> Self {
        let mut entries = self.rolls.clone().into_entries();
        if index >= entries.len() {
            tracing::debug!(index, len = entries.len(), "roll index out of range, ignored");
            return self;
        }
        entries[index] = pair;

        let rolls = match self.spec.mode {
            AttackMode::Physical => {
                entries.truncate(1);
                RollSequence::from_pairs(entries)
            }
            AttackMode::Magic => {
                let rolls = RollSequence::from_pairs(entries);
                let (kept, open) = chain_extent(&rolls, self.spec.effective_crit_threshold());
                let mut entries = rolls.into_entries();
                entries.truncate(kept);
                if open && entries.len() < MAX_CHAIN_ROLLS {
                    entries.push(DicePair::empty());
                }
                RollSequence::from_pairs(entries)
            }
        };

        AttackSession { rolls, ..self }
    }

    /// Index of the first entry still waiting for dice
    pub fn pending_index(&self) -> Option<usize> {
        self.rolls.entries().iter().position(|pair| !pair.is_complete())
    }

    /// Whether a chain roll beyond the initiating roll is being offered
    pub fn offers_next_roll(&self) -> bool {
        self.pending_index().map_or(false, |index| index > 0)
    }

    /// Fill every pending entry with random dice
    pub fn auto_roll(self) -> Self {
        let mut rng = rand::thread_rng();
        self.auto_roll_with_rng(&mut rng)
    }

    /// Fill every pending entry with dice from a provided RNG (for deterministic testing)
    pub fn auto_roll_with_rng(self, rng: &mut impl Rng) -> Self {
        let mut session = self;
        for _ in 0..MAX_CHAIN_ROLLS {
            let Some(index) = session.pending_index() else {
                break;
            };
            session = session.with_roll(index, DicePair::roll_with_rng(rng));
        }
        session
    }

    pub fn resolve(
        &self,
        target: &AggregatedStats,
        options: ResolveOptions,
        table: &impl PowerLookup,
    ) -> DamageResult {
        resolve_attack(&self.spec, target, &self.rolls, options, table)
    }
}
