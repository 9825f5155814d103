//! Effect aggregation - Derived combat stats from base stats plus active buffs

mod aggregator;
mod stat_value;

pub use aggregator::StatAccumulator;
pub use stat_value::StatValue;

use crate::source::{BaseStats, Buff, StatSource};
use crate::types::DerivedStat;
use serde::{Deserialize, Serialize};

/// Derived stats for one character at one instant
///
/// Never stored: recompute with [`aggregate`] whenever the buff set or
/// base stats change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedStats {
    pub defense: i32,
    pub mnd_resist: i32,
}

impl AggregatedStats {
    pub fn get(&self, stat: DerivedStat) -> i32 {
        match stat {
            DerivedStat::Defense => self.defense,
            DerivedStat::MndResist => self.mnd_resist,
        }
    }
}

/// Fold an active buff set into derived stats
///
/// Reservation buffs, expired buffs and buffs the character is immune to
/// contribute nothing. Within each group an override wins outright;
/// otherwise additive contributions are summed onto the base before
/// multiplicative factors are applied. The result is independent of the
/// order of `buffs` and clamped to zero.
pub fn aggregate<'a, I>(base: &BaseStats, buffs: I) -> AggregatedStats
where
    I: IntoIterator<Item = &'a Buff>,
{
    let mut accumulator = StatAccumulator::new();
    base.apply(&mut accumulator);

    for buff in buffs {
        if base.is_immune_to(&buff.source_tag) {
            tracing::trace!(buff = %buff.label(), "skipped by immunity");
            continue;
        }
        buff.apply(&mut accumulator);
    }

    accumulator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BuffKind, StatTarget};
    use proptest::prelude::*;

    fn additive(tag: &str, stat: StatTarget, value: f64) -> Buff {
        Buff::new(tag, tag, BuffKind::additive(stat), value)
    }

    #[test]
    fn test_no_buffs_returns_base() {
        let buffs: Vec<Buff> = Vec::new();
        let stats = aggregate(&BaseStats::new(5, 7), &buffs);
        assert_eq!(stats, AggregatedStats { defense: 5, mnd_resist: 7 });
    }

    #[test]
    fn test_additive_then_multiplicative() {
        let buffs = vec![
            Buff::new("Halve", "halve", BuffKind::multiplicative(StatTarget::Defense), 0.5),
            additive("guard", StatTarget::Defense, 4.0),
        ];
        // (6 + 4) * 0.5
        let stats = aggregate(&BaseStats::new(6, 0), &buffs);
        assert_eq!(stats.defense, 5);
    }

    #[test]
    fn test_override_supersedes_group() {
        let buffs = vec![
            additive("guard", StatTarget::Defense, 4.0),
            Buff::new("Petrify", "petrify", BuffKind::override_with(StatTarget::Defense), 20.0),
            additive("focus", StatTarget::MndResist, 2.0),
        ];
        let stats = aggregate(&BaseStats::new(6, 3), &buffs);
        assert_eq!(stats.defense, 20);
        assert_eq!(stats.mnd_resist, 5);
    }

    #[test]
    fn test_reservations_and_immunities_ignored() {
        let buffs = vec![
            additive("guard", StatTarget::Defense, 4.0).as_reservation(),
            additive("curse", StatTarget::All, -3.0),
        ];
        let base = BaseStats::new(6, 3).with_immunity("curse");
        let stats = aggregate(&base, &buffs);
        assert_eq!(stats, AggregatedStats { defense: 6, mnd_resist: 3 });
    }

    #[test]
    fn test_clamped_to_zero() {
        let buffs = vec![additive("curse", StatTarget::All, -30.0)];
        let stats = aggregate(&BaseStats::new(6, 3), &buffs);
        assert_eq!(stats, AggregatedStats { defense: 0, mnd_resist: 0 });
    }

    fn arb_buff() -> impl Strategy<Value = Buff> {
        let stat = prop_oneof![
            Just(StatTarget::Defense),
            Just(StatTarget::MndResist),
            Just(StatTarget::All),
        ];
        let kind = prop_oneof![
            stat.clone().prop_map(BuffKind::additive),
            stat.clone().prop_map(BuffKind::multiplicative),
            stat.prop_map(BuffKind::override_with),
        ];
        (kind, -20i32..20, any::<bool>()).prop_map(|(kind, value, reservation)| {
            let value = match kind.op {
                crate::types::ModifierOp::Multiplicative => (value.abs() % 4) as f64 * 0.5,
                _ => value as f64,
            };
            let buff = Buff::new("b", "b", kind, value);
            if reservation {
                buff.as_reservation()
            } else {
                buff
            }
        })
    }

    proptest! {
        #[test]
        fn prop_aggregation_is_order_independent(
            buffs in proptest::collection::vec(arb_buff(), 0..8),
            defense in 0i32..30,
            mnd in 0i32..30,
        ) {
            let base = BaseStats::new(defense, mnd);
            let forward = aggregate(&base, &buffs);
            let reversed = aggregate(&base, buffs.iter().rev());
            prop_assert_eq!(forward, reversed);
            prop_assert!(forward.defense >= 0);
            prop_assert!(forward.mnd_resist >= 0);
        }
    }
}
