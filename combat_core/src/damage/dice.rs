//! Dice input - validated dice, 2d6 pairs and the bounded roll sequence

use crate::error::CombatError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Hard cap on entries in a roll sequence (initiating roll plus chain rolls)
pub const MAX_CHAIN_ROLLS: usize = 10;

/// A single six-sided die showing 1..=6
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Die(u8);

impl Die {
    pub fn new(value: u8) -> Result<Die, CombatError> {
        if (1..=6).contains(&value) {
            Ok(Die(value))
        } else {
            Err(CombatError::InvalidDieValue(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn roll_with_rng(rng: &mut impl Rng) -> Die {
        Die(rng.gen_range(1..=6))
    }
}

impl TryFrom<u8> for Die {
    type Error = CombatError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Die::new(value)
    }
}

impl From<Die> for u8 {
    fn from(die: Die) -> u8 {
        die.0
    }
}

/// One 2d6 entry; either die may still be unset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DicePair {
    pub first: Option<Die>,
    pub second: Option<Die>,
}

impl DicePair {
    /// An entry with no dice entered yet
    pub fn empty() -> Self {
        DicePair::default()
    }

    /// Both dice entered, each validated to 1..=6
    pub fn new(first: u8, second: u8) -> Result<Self, CombatError> {
        Ok(DicePair {
            first: Some(Die::new(first)?),
            second: Some(Die::new(second)?),
        })
    }

    pub fn roll_with_rng(rng: &mut impl Rng) -> Self {
        DicePair {
            first: Some(Die::roll_with_rng(rng)),
            second: Some(Die::roll_with_rng(rng)),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.first.is_some() && self.second.is_some()
    }

    /// Sum of both dice, `None` while either die is unset
    pub fn total(&self) -> Option<u8> {
        match (self.first, self.second) {
            (Some(a), Some(b)) => Some(a.value() + b.value()),
            _ => None,
        }
    }
}

/// Ordered dice entries: index 0 initiates, later indices are chain rolls
///
/// Always holds between 1 and [`MAX_CHAIN_ROLLS`] entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<DicePair>", into = "Vec<DicePair>")]
pub struct RollSequence {
    entries: Vec<DicePair>,
}

impl Default for RollSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl RollSequence {
    /// A fresh sequence with a single empty entry
    pub fn new() -> Self {
        RollSequence {
            entries: vec![DicePair::empty()],
        }
    }

    /// Build from existing entries, truncating at the cap
    pub fn from_pairs(mut pairs: Vec<DicePair>) -> Self {
        if pairs.is_empty() {
            return Self::new();
        }
        pairs.truncate(MAX_CHAIN_ROLLS);
        RollSequence { entries: pairs }
    }

    /// Convenience for fully entered rolls
    pub fn from_values(values: &[(u8, u8)]) -> Result<Self, CombatError> {
        let pairs = values
            .iter()
            .map(|&(a, b)| DicePair::new(a, b))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_pairs(pairs))
    }

    pub fn entries(&self) -> &[DicePair] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&DicePair> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|pair| *pair == DicePair::empty())
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_CHAIN_ROLLS
    }

    /// The initiating roll
    pub fn first(&self) -> DicePair {
        self.entries.first().copied().unwrap_or_default()
    }

    pub(crate) fn into_entries(self) -> Vec<DicePair> {
        self.entries
    }
}

impl From<Vec<DicePair>> for RollSequence {
    fn from(pairs: Vec<DicePair>) -> Self {
        RollSequence::from_pairs(pairs)
    }
}

impl From<RollSequence> for Vec<DicePair> {
    fn from(rolls: RollSequence) -> Self {
        rolls.entries
    }
}
