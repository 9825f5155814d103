//! Damage calculation - Dice totals and the power-table critical chain

use super::dice::{DicePair, RollSequence, MAX_CHAIN_ROLLS};
use super::generator::NO_CRITICAL;
use super::power_table::{PowerLookup, MIN_DICE_TOTAL};
use serde::{Deserialize, Serialize};

/// One consumed roll of a magic chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainStep {
    /// Position in the roll sequence
    pub index: usize,
    pub dice_total: u8,
    /// Power table damage for this roll
    pub power_damage: i32,
    /// Whether this roll granted another roll
    pub critical: bool,
}

/// Whether a roll total keeps the chain going
pub fn is_critical(dice_total: u8, crit_threshold: u8) -> bool {
    crit_threshold < NO_CRITICAL && dice_total >= crit_threshold
}

/// Physical dice contribution: zero unless both dice are entered
pub fn dice_total(pair: &DicePair) -> i32 {
    pair.total().map(i32::from).unwrap_or(0)
}

/// Walk a roll sequence through the power table
///
/// Stops at the first roll with an unset die (the chain never started or
/// was broken) and after the first roll that is not critical. Never reads
/// more than [`MAX_CHAIN_ROLLS`] entries.
pub fn walk_power_chain(
    table: &impl PowerLookup,
    power: u32,
    crit_threshold: u8,
    rolls: &RollSequence,
) -> Vec<ChainStep> {
    let mut steps = Vec::new();

    for (index, pair) in rolls.entries().iter().enumerate().take(MAX_CHAIN_ROLLS) {
        let Some(total) = pair.total().filter(|t| *t >= MIN_DICE_TOTAL) else {
            break;
        };

        let power_damage = table.damage(power, total).unwrap_or_else(|| {
            tracing::warn!(power, total, "power table has no entry, counting as 0");
            0
        });
        let critical = is_critical(total, crit_threshold);
        tracing::debug!(index, total, power_damage, critical, "chain step");

        steps.push(ChainStep {
            index,
            dice_total: total,
            power_damage,
            critical,
        });

        if !critical {
            break;
        }
    }

    steps
}

/// Number of leading entries that belong to the chain, including the entry
/// currently awaiting dice
///
/// Used to decide which entries survive an edit and whether another chain
/// entry should be offered.
pub fn chain_extent(rolls: &RollSequence, crit_threshold: u8) -> (usize, bool) {
    for (index, pair) in rolls.entries().iter().enumerate() {
        match pair.total() {
            Some(total) if is_critical(total, crit_threshold) => continue,
            _ => return (index + 1, false),
        }
    }
    (rolls.len(), true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::dice::Die;

    /// Every cell is `power + total`, easy to reason about
    struct LinearTable;

    impl PowerLookup for LinearTable {
        fn damage(&self, power: u32, dice_total: u8) -> Option<i32> {
            Some(power as i32 + dice_total as i32)
        }

        fn has_power(&self, _power: u32) -> bool {
            true
        }
    }

    #[test]
    fn test_crit_continues_then_stops() {
        let rolls = RollSequence::from_values(&[(5, 5), (3, 4), (6, 6)]).unwrap();
        let steps = walk_power_chain(&LinearTable, 20, 10, &rolls);

        assert_eq!(steps.len(), 2);
        assert!(steps[0].critical);
        assert!(!steps[1].critical);
        assert_eq!(steps[0].power_damage + steps[1].power_damage, 30 + 27);
    }

    #[test]
    fn test_threshold_13_never_chains() {
        let rolls = RollSequence::from_values(&[(6, 6), (6, 6)]).unwrap();
        let steps = walk_power_chain(&LinearTable, 0, NO_CRITICAL, &rolls);
        assert_eq!(steps.len(), 1);
        assert!(!steps[0].critical);
    }

    #[test]
    fn test_unset_die_breaks_chain() {
        let partial = DicePair {
            first: Die::new(6).ok(),
            second: None,
        };
        let rolls = RollSequence::from_pairs(vec![DicePair::new(6, 6).unwrap(), partial]);
        let steps = walk_power_chain(&LinearTable, 0, 10, &rolls);
        assert_eq!(steps.len(), 1);

        let rolls = RollSequence::from_pairs(vec![partial]);
        assert!(walk_power_chain(&LinearTable, 0, 10, &rolls).is_empty());
    }

    #[test]
    fn test_chain_capped_at_max() {
        let rolls = RollSequence::from_values(&[(6, 6); 10]).unwrap();
        let steps = walk_power_chain(&LinearTable, 0, 8, &rolls);
        assert_eq!(steps.len(), MAX_CHAIN_ROLLS);
        assert!(steps.iter().all(|s| s.critical));
    }

    #[test]
    fn test_dice_total_requires_both() {
        assert_eq!(dice_total(&DicePair::empty()), 0);
        assert_eq!(dice_total(&DicePair::new(3, 4).unwrap()), 7);
    }

    #[test]
    fn test_chain_extent() {
        let rolls = RollSequence::from_values(&[(5, 5), (6, 5), (1, 2), (6, 6)]).unwrap();
        assert_eq!(chain_extent(&rolls, 10), (3, false));

        let rolls = RollSequence::from_values(&[(5, 5)]).unwrap();
        assert_eq!(chain_extent(&rolls, 10), (1, true));
        assert_eq!(chain_extent(&RollSequence::new(), 10), (1, false));
    }
}
