//! combat_core - Combat resolution and buff stacking for tabletop encounters
//!
//! This library provides:
//! - BuffLedger: The active buff set of a character, with reservation and stacking rules
//! - Effect aggregation: Derived defense and mental resistance from base stats plus buffs
//! - AttackSession: Physical and magic attacks with the power-table critical chain
//! - Ruleset: Power table and published options loaded from TOML

pub mod combat;
pub mod config;
pub mod damage;
pub mod error;
pub mod ledger;
pub mod prelude;
pub mod source;
pub mod stat_block;
pub mod types;

// Re-export core types for convenience
pub use combat::{resolve_attack, AttackSession, DamageResult, ResolveOptions};
pub use config::{default_ruleset, ConfigError, Ruleset};
pub use damage::{AttackMode, AttackSpec, DicePair, Die, EnemyPart, MagicSkill, PowerTable, RollSequence};
pub use error::CombatError;
pub use ledger::{add_buff, force_add_buff, process_round_end, remove_buff, BuffLedger, StackingPolicy};
pub use source::{BaseStats, Buff, StatSource};
pub use stat_block::AggregatedStats;
pub use types::{BuffDuration, BuffId, BuffKind, DerivedStat, ModifierOp, StatTarget};

/// Derived stats of a character under its current ledger
pub fn aggregate_stats(character: &BaseStats, active_buffs: &BuffLedger) -> AggregatedStats {
    stat_block::aggregate(character, active_buffs)
}
