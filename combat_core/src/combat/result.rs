//! DamageResult - Outcome of attack resolution

use crate::damage::{AttackMode, ChainStep};
use serde::{Deserialize, Serialize};

/// Final damage of one attack with the breakdown needed for an audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageResult {
    /// Damage to subtract from the target, never negative
    pub total: u32,
    pub mode: AttackMode,

    // === Breakdown ===
    /// Strike value (physical) or skill magic power (magic)
    pub base: i32,
    /// Physical dice total, or summed power table damage for magic
    pub dice: i32,
    /// Manual adjustment
    pub bonus: i32,
    /// Subtracted from the raw sum (target defense for physical)
    pub mitigation: i32,
    /// Whether the magic damage was halved by a successful resistance
    pub halved: bool,
    /// Consumed rolls of a magic chain, in order
    #[serde(default)]
    pub chain: Vec<ChainStep>,
}

impl DamageResult {
    /// Zero-damage result for the given mode
    pub fn zero(mode: AttackMode) -> Self {
        DamageResult {
            total: 0,
            mode,
            base: 0,
            dice: 0,
            bonus: 0,
            mitigation: 0,
            halved: false,
            chain: Vec::new(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.total == 0
    }

    /// Sum before mitigation and halving
    pub fn raw_total(&self) -> i32 {
        self.base.saturating_add(self.dice).saturating_add(self.bonus)
    }

    /// Number of critical rolls in the chain
    pub fn critical_count(&self) -> usize {
        self.chain.iter().filter(|s| s.critical).count()
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("{} damage", self.total)];

        match self.mode {
            AttackMode::Physical => {
                parts.push(format!(
                    "{} base + {} dice + {} bonus",
                    self.base, self.dice, self.bonus
                ));
                if self.mitigation != 0 {
                    parts.push(format!("{} defense", self.mitigation));
                }
            }
            AttackMode::Magic => {
                if self.chain.is_empty() {
                    parts.push("no valid roll".to_string());
                } else {
                    let steps: Vec<String> = self
                        .chain
                        .iter()
                        .map(|s| {
                            let marker = if s.critical { "!" } else { "" };
                            format!("{}{}={}", s.dice_total, marker, s.power_damage)
                        })
                        .collect();
                    parts.push(format!("power [{}]", steps.join(" ")));
                    parts.push(format!("{} magic power + {} bonus", self.base, self.bonus));
                }
            }
        }

        if self.halved {
            parts.push("halved".to_string());
        }

        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_result() {
        let result = DamageResult::zero(AttackMode::Magic);
        assert!(result.is_zero());
        assert_eq!(result.raw_total(), 0);
        assert_eq!(result.summary(), "0 damage, no valid roll");
    }

    #[test]
    fn test_physical_summary() {
        let result = DamageResult {
            total: 24,
            mode: AttackMode::Physical,
            base: 20,
            dice: 7,
            bonus: 2,
            mitigation: 5,
            halved: false,
            chain: Vec::new(),
        };
        assert_eq!(
            result.summary(),
            "24 damage, 20 base + 7 dice + 2 bonus, 5 defense"
        );
    }

    #[test]
    fn test_magic_summary_marks_criticals() {
        let result = DamageResult {
            total: 8,
            mode: AttackMode::Magic,
            base: 0,
            dice: 15,
            bonus: 0,
            mitigation: 0,
            halved: true,
            chain: vec![
                ChainStep { index: 0, dice_total: 10, power_damage: 9, critical: true },
                ChainStep { index: 1, dice_total: 7, power_damage: 6, critical: false },
            ],
        };
        assert_eq!(result.critical_count(), 1);
        assert!(result.summary().contains("power [10!=9 7=6]"));
        assert!(result.summary().ends_with("halved"));
    }
}
