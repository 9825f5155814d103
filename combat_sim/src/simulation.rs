//! Encounter simulation - Run scripted rounds through combat_core

use crate::encounter::{AttackAction, BuffAction, Combatant, Encounter};
use anyhow::{Context, Result};
use combat_core::combat::roll_resistance_with_rng;
use combat_core::prelude::*;
use combat_core::{force_add_buff, process_round_end};
use rand::Rng;
use serde::Serialize;

/// Live state of one combatant during a run
#[derive(Debug, Clone)]
pub struct CombatantState {
    pub name: String,
    pub hp: i32,
    pub base: BaseStats,
    pub ledger: BuffLedger,
    pub parts: Vec<EnemyPart>,
}

impl CombatantState {
    fn from_combatant(combatant: &Combatant, ruleset: &Ruleset) -> Result<Self> {
        let mut ledger = BuffLedger::new();
        for buff in &combatant.buffs {
            ledger = ledger
                .add(buff.clone(), &ruleset.stacking)
                .with_context(|| format!("initial buffs of '{}'", combatant.name))?;
        }
        Ok(CombatantState {
            name: combatant.name.clone(),
            hp: combatant.hp,
            base: combatant.base.clone(),
            ledger,
            parts: combatant.parts.clone(),
        })
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn stats(&self) -> AggregatedStats {
        aggregate_stats(&self.base, &self.ledger)
    }
}

/// One resolved attack
#[derive(Debug, Clone, Serialize)]
pub struct AttackLog {
    pub attacker: String,
    pub part: String,
    pub skill: Option<String>,
    pub target: String,
    pub result: DamageResult,
    pub target_hp: i32,
}

/// Everything that happened in one round
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoundLog {
    pub round: usize,
    pub attacks: Vec<AttackLog>,
    /// Buffs refused as non-stacking duplicates
    pub rejected_buffs: Vec<String>,
    /// Buffs removed by round-end processing
    pub expired_buffs: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinalState {
    pub name: String,
    pub hp: i32,
    pub stats: AggregatedStats,
    pub active_buffs: Vec<String>,
}

/// Outcome of a full encounter run
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub encounter: String,
    pub rounds: Vec<RoundLog>,
    pub combatants: Vec<FinalState>,
}

impl SimulationReport {
    pub fn total_damage(&self) -> u32 {
        self.rounds
            .iter()
            .flat_map(|r| &r.attacks)
            .map(|a| a.result.total)
            .sum()
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut lines = vec![format!("== {} ==", self.encounter)];
        for round in &self.rounds {
            lines.push(format!("-- round {} --", round.round));
            for tag in &round.rejected_buffs {
                lines.push(format!("  buff '{}' rejected as duplicate", tag));
            }
            for attack in &round.attacks {
                let with = match &attack.skill {
                    Some(skill) => format!("{} ({})", attack.part, skill),
                    None => attack.part.clone(),
                };
                lines.push(format!(
                    "  {} -> {} with {}: {} [hp {}]",
                    attack.attacker,
                    attack.target,
                    with,
                    attack.result.summary(),
                    attack.target_hp
                ));
            }
            if round.expired_buffs > 0 {
                lines.push(format!("  {} buff(s) expired", round.expired_buffs));
            }
        }
        lines.push("-- final --".to_string());
        for state in &self.combatants {
            let status = if state.hp > 0 { "" } else { " DOWN" };
            lines.push(format!(
                "  {}: hp {}{}, defense {}, mnd_resist {}, buffs [{}]",
                state.name,
                state.hp,
                status,
                state.stats.defense,
                state.stats.mnd_resist,
                state.active_buffs.join(", ")
            ));
        }
        lines.join("\n")
    }
}

/// Runs an encounter round by round
pub struct Simulation<'r> {
    ruleset: &'r Ruleset,
    combatants: Vec<CombatantState>,
}

impl<'r> Simulation<'r> {
    pub fn new(encounter: &Encounter, ruleset: &'r Ruleset) -> Result<Self> {
        let combatants = encounter
            .combatants
            .iter()
            .map(|c| CombatantState::from_combatant(c, ruleset))
            .collect::<Result<Vec<_>>>()?;
        Ok(Simulation { ruleset, combatants })
    }

    pub fn combatant(&self, name: &str) -> Option<&CombatantState> {
        self.combatants.iter().find(|c| c.name == name)
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        self.combatants
            .iter()
            .position(|c| c.name == name)
            .with_context(|| format!("unknown combatant '{}'", name))
    }

    /// Run every scripted round
    pub fn run(mut self, encounter: &Encounter, rng: &mut impl Rng) -> Result<SimulationReport> {
        let mut rounds = Vec::with_capacity(encounter.rounds.len());
        for (index, plan) in encounter.rounds.iter().enumerate() {
            let round = index + 1;
            tracing::info!(round, "round start");
            let mut log = RoundLog {
                round,
                ..RoundLog::default()
            };

            for action in &plan.buffs {
                if let Some(rejected) = self.apply_buff(action)? {
                    log.rejected_buffs.push(rejected);
                }
            }

            for action in &plan.attacks {
                if let Some(attack) = self.attack(action, rng)? {
                    log.attacks.push(attack);
                }
            }

            log.expired_buffs = self.end_round();
            rounds.push(log);
        }

        let combatants = self
            .combatants
            .iter()
            .map(|c| FinalState {
                name: c.name.clone(),
                hp: c.hp,
                stats: c.stats(),
                active_buffs: c.ledger.iter().map(|b| b.name.clone()).collect(),
            })
            .collect();

        Ok(SimulationReport {
            encounter: encounter.name.clone(),
            rounds,
            combatants,
        })
    }

    /// Returns the tag of a rejected duplicate
    fn apply_buff(&mut self, action: &BuffAction) -> Result<Option<String>> {
        let index = self.index_of(&action.target)?;
        let state = &mut self.combatants[index];

        match state.ledger.add(action.buff.clone(), &self.ruleset.stacking) {
            Ok(ledger) => {
                state.ledger = ledger;
                Ok(None)
            }
            Err(CombatError::DuplicateBuff { source_tag }) if action.force => {
                tracing::info!(combatant = %state.name, %source_tag, "force-replacing duplicate buff");
                state.ledger = force_add_buff(&state.ledger, action.buff.clone());
                Ok(None)
            }
            Err(CombatError::DuplicateBuff { source_tag }) => {
                tracing::warn!(combatant = %state.name, %source_tag, "duplicate buff rejected");
                Ok(Some(source_tag))
            }
            Err(err) => Err(err).with_context(|| format!("adding buff to '{}'", state.name)),
        }
    }

    fn attack(&mut self, action: &AttackAction, rng: &mut impl Rng) -> Result<Option<AttackLog>> {
        let attacker = &self.combatants[self.index_of(&action.attacker)?];
        if !attacker.is_alive() {
            tracing::info!(attacker = %attacker.name, "attacker is down, skipping");
            return Ok(None);
        }

        let part = attacker
            .parts
            .iter()
            .find(|p| p.name == action.part)
            .with_context(|| format!("'{}' has no part '{}'", attacker.name, action.part))?;

        let session = match &action.skill {
            Some(name) => {
                let skill = part
                    .skill(name)
                    .with_context(|| format!("part '{}' has no skill '{}'", part.name, name))?;
                AttackSession::magic(skill, self.ruleset)
                    .with_context(|| format!("skill '{}' of '{}'", name, part.name))?
            }
            None => AttackSession::new(part.physical_attack()),
        };

        let mut session = session.with_manual_bonus(action.bonus);
        for (index, &(first, second)) in action.rolls.iter().enumerate() {
            let pair = DicePair::new(first, second)
                .with_context(|| format!("roll {} of {} -> {}", index, action.attacker, action.target))?;
            session = session.with_roll(index, pair);
        }
        let session = session.auto_roll_with_rng(rng);

        let target_index = self.index_of(&action.target)?;
        let target_stats = self.combatants[target_index].stats();
        let options = match action.achievement {
            Some(achievement) => roll_resistance_with_rng(&target_stats, achievement, rng),
            None => ResolveOptions {
                resisted: action.resisted,
            },
        };

        let result = session.resolve(&target_stats, options, &self.ruleset.power_table);
        let target = &mut self.combatants[target_index];
        target.hp -= i32::try_from(result.total).unwrap_or(i32::MAX);
        tracing::info!(
            attacker = %action.attacker,
            defender = %target.name,
            damage = result.total,
            hp = target.hp,
            "attack resolved"
        );

        Ok(Some(AttackLog {
            attacker: action.attacker.clone(),
            part: action.part.clone(),
            skill: action.skill.clone(),
            target: target.name.clone(),
            result,
            target_hp: target.hp,
        }))
    }

    /// Advance every ledger one round; returns how many buffs expired
    fn end_round(&mut self) -> usize {
        let mut expired = 0;
        for state in &mut self.combatants {
            let next = process_round_end(&state.ledger);
            expired += state.ledger.len() - next.len();
            state.ledger = next;
        }
        expired
    }
}

/// Run an encounter against a ruleset
pub fn run_encounter_with_rng(
    encounter: &Encounter,
    ruleset: &Ruleset,
    rng: &mut impl Rng,
) -> Result<SimulationReport> {
    Simulation::new(encounter, ruleset)?.run(encounter, rng)
}
