//! BaseStats - Stable character attributes owned by the character sheet

use crate::source::StatSource;
use crate::stat_block::StatAccumulator;
use crate::types::DerivedStat;
use serde::{Deserialize, Serialize};

/// Read-only base attributes consumed by the aggregator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    /// Base defense (subtracted from physical damage)
    #[serde(default)]
    pub defense: i32,
    /// Base mental resistance
    #[serde(default)]
    pub mnd_resist: i32,
    /// Buffs carrying one of these source tags do not apply
    #[serde(default)]
    pub immunities: Vec<String>,
}

impl BaseStats {
    pub fn new(defense: i32, mnd_resist: i32) -> Self {
        BaseStats {
            defense,
            mnd_resist,
            immunities: Vec::new(),
        }
    }

    /// Add an immunity tag
    pub fn with_immunity(mut self, source_tag: impl Into<String>) -> Self {
        self.immunities.push(source_tag.into());
        self
    }

    pub fn is_immune_to(&self, source_tag: &str) -> bool {
        self.immunities.iter().any(|tag| tag == source_tag)
    }

    pub fn base_value(&self, stat: DerivedStat) -> i32 {
        match stat {
            DerivedStat::Defense => self.defense,
            DerivedStat::MndResist => self.mnd_resist,
        }
    }
}

impl StatSource for BaseStats {
    fn label(&self) -> &str {
        "base_stats"
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        for stat in DerivedStat::all() {
            stats.group_mut(*stat).base += self.base_value(*stat) as f64;
        }
    }
}
