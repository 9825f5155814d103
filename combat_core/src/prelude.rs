//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Buffs and stats
pub use crate::ledger::{BuffLedger, StackingPolicy};
pub use crate::source::{BaseStats, Buff, StatSource};
pub use crate::stat_block::AggregatedStats;
pub use crate::types::{BuffDuration, BuffKind, DerivedStat, ModifierOp, StatTarget};

// Attacks
pub use crate::damage::{AttackMode, AttackSpec, DicePair, EnemyPart, MagicSkill, RollSequence};
pub use crate::combat::{AttackSession, DamageResult, ResolveOptions};

// Errors and config
pub use crate::config::{default_ruleset, Ruleset};
pub use crate::error::CombatError;
pub use crate::aggregate_stats;
