//! Power table - Published mapping from (power rating, 2d6 total) to damage

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lowest 2d6 total covered by a table row
pub const MIN_DICE_TOTAL: u8 = 2;
/// Highest 2d6 total covered by a table row
pub const MAX_DICE_TOTAL: u8 = 12;
/// Number of columns in every row (totals 2..=12)
pub const TABLE_COLUMNS: usize = (MAX_DICE_TOTAL - MIN_DICE_TOTAL + 1) as usize;

/// Read-only damage lookup injected into the resolver
///
/// Implemented by [`PowerTable`]; tests and alternate ruleset editions can
/// provide their own.
pub trait PowerLookup {
    /// Damage for a power rating and dice total, `None` when not published
    fn damage(&self, power: u32, dice_total: u8) -> Option<i32>;

    /// Whether the power rating has a row
    fn has_power(&self, power: u32) -> bool;
}

/// One row as written in the ruleset file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerTableRow {
    pub power: u32,
    /// Damage for totals 2..=12, in order
    pub damage: Vec<i32>,
}

/// The validated power table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PowerTable {
    rows: BTreeMap<u32, [i32; TABLE_COLUMNS]>,
}

impl PowerTable {
    /// Build a table, rejecting short rows and repeated power ratings
    pub fn from_rows(rows: Vec<PowerTableRow>) -> Result<PowerTable, ConfigError> {
        let mut table = BTreeMap::new();
        for row in rows {
            let damage: [i32; TABLE_COLUMNS] = row.damage.as_slice().try_into().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "power {} has {} entries, expected {}",
                    row.power,
                    row.damage.len(),
                    TABLE_COLUMNS
                ))
            })?;
            if table.insert(row.power, damage).is_some() {
                return Err(ConfigError::ValidationError(format!(
                    "power {} is listed twice",
                    row.power
                )));
            }
        }
        Ok(PowerTable { rows: table })
    }

    /// Published power ratings, ascending
    pub fn powers(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows.keys().copied()
    }

    pub fn row(&self, power: u32) -> Option<&[i32; TABLE_COLUMNS]> {
        self.rows.get(&power)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl PowerLookup for PowerTable {
    fn damage(&self, power: u32, dice_total: u8) -> Option<i32> {
        if !(MIN_DICE_TOTAL..=MAX_DICE_TOTAL).contains(&dice_total) {
            return None;
        }
        let row = self.rows.get(&power)?;
        Some(row[(dice_total - MIN_DICE_TOTAL) as usize])
    }

    fn has_power(&self, power: u32) -> bool {
        self.rows.contains_key(&power)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(power: u32) -> PowerTableRow {
        PowerTableRow {
            power,
            damage: (0..TABLE_COLUMNS as i32).collect(),
        }
    }

    #[test]
    fn test_lookup_by_total() {
        let table = PowerTable::from_rows(vec![row(10)]).unwrap();
        assert_eq!(table.damage(10, 2), Some(0));
        assert_eq!(table.damage(10, 7), Some(5));
        assert_eq!(table.damage(10, 12), Some(10));
    }

    #[test]
    fn test_lookup_outside_table() {
        let table = PowerTable::from_rows(vec![row(10)]).unwrap();
        assert_eq!(table.damage(15, 7), None);
        assert_eq!(table.damage(10, 1), None);
        assert_eq!(table.damage(10, 13), None);
        assert!(table.has_power(10));
        assert!(!table.has_power(15));
    }

    #[test]
    fn test_short_row_rejected() {
        let bad = PowerTableRow {
            power: 10,
            damage: vec![0, 1, 2],
        };
        let err = PowerTable::from_rows(vec![bad]).unwrap_err();
        assert!(err.to_string().contains("power 10 has 3 entries"));
    }

    #[test]
    fn test_duplicate_power_rejected() {
        assert!(PowerTable::from_rows(vec![row(10), row(10)]).is_err());
    }

    #[test]
    fn test_powers_sorted() {
        let table = PowerTable::from_rows(vec![row(20), row(0), row(10)]).unwrap();
        assert_eq!(table.powers().collect::<Vec<_>>(), vec![0, 10, 20]);
    }
}
