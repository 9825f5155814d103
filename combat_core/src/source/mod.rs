//! StatSource - Trait and implementations for stat providers

mod base_stats;
mod buff;

pub use base_stats::BaseStats;
pub use buff::Buff;

use crate::stat_block::StatAccumulator;

/// Trait for anything that contributes to a character's derived stats
///
/// Sources must be commutative: applying the same set of sources in any
/// order yields the same accumulator.
pub trait StatSource {
    /// Display label used in logs
    fn label(&self) -> &str;

    /// Apply this source's contribution to the accumulator
    fn apply(&self, stats: &mut StatAccumulator);
}
