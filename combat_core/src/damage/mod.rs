//! Damage system - Attack descriptions, dice input and the power table

mod calculation;
mod dice;
mod generator;
mod power_table;

pub use calculation::{chain_extent, dice_total, is_critical, walk_power_chain, ChainStep};
pub use dice::{DicePair, Die, RollSequence, MAX_CHAIN_ROLLS};
pub use generator::{AttackMode, AttackSpec, EnemyPart, MagicSkill, DEFAULT_MAGIC_CRIT, NO_CRITICAL};
pub use power_table::{PowerLookup, PowerTable, PowerTableRow, MAX_DICE_TOTAL, MIN_DICE_TOTAL, TABLE_COLUMNS};
