//! Attack resolution - Turn an attack, target stats and dice into damage

use super::result::DamageResult;
use crate::damage::{
    dice_total, walk_power_chain, AttackMode, AttackSpec, DicePair, PowerLookup, RollSequence,
};
use crate::stat_block::AggregatedStats;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Per-attack switches supplied by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Target succeeded on its resistance check; halves magic damage
    #[serde(default)]
    pub resisted: bool,
}

impl ResolveOptions {
    pub fn resisted() -> Self {
        ResolveOptions { resisted: true }
    }
}

/// Resolve one attack against a target's aggregated stats
///
/// Physical attacks read only the initiating roll and subtract the target's
/// defense. Magic attacks walk the roll sequence through the power table;
/// when no valid roll is consumed the result is zero and the skill power
/// and manual bonus are not added. Resistance halving applies to magic only
/// and rounds up.
pub fn resolve_attack(
    spec: &AttackSpec,
    target: &AggregatedStats,
    rolls: &RollSequence,
    options: ResolveOptions,
    table: &impl PowerLookup,
) -> DamageResult {
    let result = match spec.mode {
        AttackMode::Physical => resolve_physical(spec, target, rolls),
        AttackMode::Magic => resolve_magic(spec, rolls, options, table),
    };
    tracing::debug!(total = result.total, mode = ?result.mode, "attack resolved");
    result
}

fn resolve_physical(spec: &AttackSpec, target: &AggregatedStats, rolls: &RollSequence) -> DamageResult {
    let dice = dice_total(&rolls.first());
    let raw = spec
        .fixed_base
        .saturating_add(dice)
        .saturating_add(spec.manual_bonus)
        .saturating_sub(target.defense);

    DamageResult {
        total: clamp_damage(raw),
        mode: AttackMode::Physical,
        base: spec.fixed_base,
        dice,
        bonus: spec.manual_bonus,
        mitigation: target.defense,
        halved: false,
        chain: Vec::new(),
    }
}

fn resolve_magic(
    spec: &AttackSpec,
    rolls: &RollSequence,
    options: ResolveOptions,
    table: &impl PowerLookup,
) -> DamageResult {
    let Some(power) = spec.power else {
        tracing::warn!("magic attack without a power rating, no damage");
        return DamageResult::zero(AttackMode::Magic);
    };

    let chain = walk_power_chain(table, power, spec.effective_crit_threshold(), rolls);
    if chain.is_empty() {
        return DamageResult::zero(AttackMode::Magic);
    }

    let power_total = chain.iter().fold(0i32, |acc, s| acc.saturating_add(s.power_damage));
    let mut magic = power_total
        .saturating_add(spec.fixed_base)
        .saturating_add(spec.manual_bonus);
    if options.resisted {
        magic = halve_rounding_up(magic);
    }

    DamageResult {
        total: clamp_damage(magic),
        mode: AttackMode::Magic,
        base: spec.fixed_base,
        dice: power_total,
        bonus: spec.manual_bonus,
        mitigation: 0,
        halved: options.resisted,
        chain,
    }
}

/// Integer halving toward the larger integer
pub fn halve_rounding_up(value: i32) -> i32 {
    if value >= 0 {
        value / 2 + value % 2
    } else {
        value / 2
    }
}

fn clamp_damage(value: i32) -> u32 {
    value.max(0).unsigned_abs()
}

/// Whether a target's resistance check beats the attacker's achievement value
///
/// The check is `2d6 + mnd_resist >= achievement`; an incomplete roll fails.
pub fn resistance_succeeds(target: &AggregatedStats, roll: &DicePair, achievement: i32) -> bool {
    roll.total()
        .map(|total| i32::from(total) + target.mnd_resist >= achievement)
        .unwrap_or(false)
}

/// Roll a resistance check and return the options to resolve with
pub fn roll_resistance(target: &AggregatedStats, achievement: i32) -> ResolveOptions {
    let mut rng = rand::thread_rng();
    roll_resistance_with_rng(target, achievement, &mut rng)
}

/// Roll a resistance check with a provided RNG (for deterministic testing)
pub fn roll_resistance_with_rng(
    target: &AggregatedStats,
    achievement: i32,
    rng: &mut impl Rng,
) -> ResolveOptions {
    let roll = DicePair::roll_with_rng(rng);
    let resisted = resistance_succeeds(target, &roll, achievement);
    tracing::debug!(total = ?roll.total(), achievement, resisted, "resistance check");
    ResolveOptions { resisted }
}
