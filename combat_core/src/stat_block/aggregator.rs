//! StatAccumulator - Collects stat contributions before they are folded

use crate::stat_block::{AggregatedStats, StatValue};
use crate::types::{BuffKind, DerivedStat, ModifierOp};

/// Accumulates contributions from every source, one group per derived stat
///
/// Groups are independent: a defense override never touches mental
/// resistance and vice versa.
#[derive(Debug, Clone, Default)]
pub struct StatAccumulator {
    pub defense: StatValue,
    pub mnd_resist: StatValue,
}

impl StatAccumulator {
    /// Create a new empty accumulator
    pub fn new() -> Self {
        StatAccumulator::default()
    }

    pub fn group(&self, stat: DerivedStat) -> &StatValue {
        match stat {
            DerivedStat::Defense => &self.defense,
            DerivedStat::MndResist => &self.mnd_resist,
        }
    }

    pub fn group_mut(&mut self, stat: DerivedStat) -> &mut StatValue {
        match stat {
            DerivedStat::Defense => &mut self.defense,
            DerivedStat::MndResist => &mut self.mnd_resist,
        }
    }

    /// Route one buff contribution into every group its kind targets
    pub fn apply_modifier(&mut self, kind: BuffKind, value: f64) {
        for stat in DerivedStat::all() {
            if !kind.stat.affects(*stat) {
                continue;
            }
            let group = self.group_mut(*stat);
            match kind.op {
                ModifierOp::Additive => group.add_flat(value),
                ModifierOp::Multiplicative => group.add_multiplier(value),
                ModifierOp::Override => group.add_override(value),
            }
        }
    }

    /// Fold every group into final, clamped stats
    pub fn finish(&self) -> AggregatedStats {
        AggregatedStats {
            defense: self.defense.compute_clamped(),
            mnd_resist: self.mnd_resist.compute_clamped(),
        }
    }
}
