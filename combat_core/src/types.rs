//! Core types shared by the ledger, aggregator and resolver

use serde::{Deserialize, Serialize};

/// Identifier of a buff, unique within one character's ledger
pub type BuffId = u32;

/// A derived combat stat computed by the aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivedStat {
    Defense,
    MndResist,
}

impl DerivedStat {
    /// Get all derived stats
    pub fn all() -> &'static [DerivedStat] {
        &[DerivedStat::Defense, DerivedStat::MndResist]
    }
}

/// Which derived stat(s) a buff contributes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatTarget {
    Defense,
    MndResist,
    /// Contributes to every derived stat
    All,
}

impl StatTarget {
    /// Whether this target feeds the given derived stat
    pub fn affects(self, stat: DerivedStat) -> bool {
        match self {
            StatTarget::All => true,
            StatTarget::Defense => stat == DerivedStat::Defense,
            StatTarget::MndResist => stat == DerivedStat::MndResist,
        }
    }
}

/// How a buff's value combines with the rest of its group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierOp {
    /// Summed onto the base value
    Additive,
    /// Factor applied after all additive contributions (0.5 halves)
    Multiplicative,
    /// Replaces the whole group's value
    Override,
}

/// Categorizes what a buff modifies and how
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuffKind {
    pub stat: StatTarget,
    pub op: ModifierOp,
}

impl BuffKind {
    pub fn new(stat: StatTarget, op: ModifierOp) -> Self {
        BuffKind { stat, op }
    }

    pub fn additive(stat: StatTarget) -> Self {
        BuffKind::new(stat, ModifierOp::Additive)
    }

    pub fn multiplicative(stat: StatTarget) -> Self {
        BuffKind::new(stat, ModifierOp::Multiplicative)
    }

    pub fn override_with(stat: StatTarget) -> Self {
        BuffKind::new(stat, ModifierOp::Override)
    }
}

/// Rounds a buff has left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuffDuration {
    /// Finite number of rounds; zero or negative means expired
    Rounds(i32),
    /// Never decremented by round-end processing
    Indefinite,
}

impl BuffDuration {
    pub fn is_indefinite(&self) -> bool {
        matches!(self, BuffDuration::Indefinite)
    }

    /// Finite durations at or below zero are expired
    pub fn is_expired(&self) -> bool {
        match self {
            BuffDuration::Rounds(rounds) => *rounds <= 0,
            BuffDuration::Indefinite => false,
        }
    }

    /// Advance one round. Returns `None` when the buff should be dropped.
    pub fn tick(self) -> Option<BuffDuration> {
        match self {
            BuffDuration::Indefinite => Some(BuffDuration::Indefinite),
            BuffDuration::Rounds(rounds) if rounds <= 1 => None,
            BuffDuration::Rounds(rounds) => Some(BuffDuration::Rounds(rounds - 1)),
        }
    }

    /// Remaining rounds, `None` for indefinite
    pub fn rounds(&self) -> Option<i32> {
        match self {
            BuffDuration::Rounds(rounds) => Some(*rounds),
            BuffDuration::Indefinite => None,
        }
    }
}
