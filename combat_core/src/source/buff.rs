//! Buff - A timed or persistent modifier to derived combat stats

use crate::source::StatSource;
use crate::stat_block::StatAccumulator;
use crate::types::{BuffDuration, BuffId, BuffKind};
use serde::{Deserialize, Serialize};

/// A status effect instance on one character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buff {
    /// Unique within the owning ledger
    #[serde(default)]
    pub id: BuffId,
    /// Display name
    pub name: String,
    /// Which stat(s) it modifies and how
    pub kind: BuffKind,
    /// Additive amount, multiplicative factor or override value
    pub value: f64,
    /// Rounds left
    pub remaining_duration: BuffDuration,
    /// Pending ("koho") buff that has not taken effect yet
    #[serde(default)]
    pub is_reservation: bool,
    /// Rule or skill that produced the buff
    pub source_tag: String,
}

impl Buff {
    /// Create an indefinite, active buff
    pub fn new(name: impl Into<String>, source_tag: impl Into<String>, kind: BuffKind, value: f64) -> Self {
        Buff {
            id: 0,
            name: name.into(),
            kind,
            value,
            remaining_duration: BuffDuration::Indefinite,
            is_reservation: false,
            source_tag: source_tag.into(),
        }
    }

    pub fn with_id(mut self, id: BuffId) -> Self {
        self.id = id;
        self
    }

    /// Limit the buff to a number of rounds
    pub fn with_rounds(mut self, rounds: i32) -> Self {
        self.remaining_duration = BuffDuration::Rounds(rounds);
        self
    }

    /// Mark as a pending reservation
    pub fn as_reservation(mut self) -> Self {
        self.is_reservation = true;
        self
    }

    /// Whether the buff currently contributes to derived stats
    pub fn is_active(&self) -> bool {
        !self.is_reservation && !self.remaining_duration.is_expired()
    }
}

impl StatSource for Buff {
    fn label(&self) -> &str {
        &self.name
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        if !self.is_active() {
            return;
        }
        stats.apply_modifier(self.kind, self.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StatTarget;

    #[test]
    fn test_active_buff_applies() {
        let buff = Buff::new("Guard", "guard", BuffKind::additive(StatTarget::Defense), 2.0).with_rounds(3);
        let mut acc = StatAccumulator::new();
        buff.apply(&mut acc);

        assert!((acc.defense.total_flat() - 2.0).abs() < f64::EPSILON);
        assert!((acc.mnd_resist.total_flat() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reservation_does_not_apply() {
        let buff = Buff::new("Guard", "guard", BuffKind::additive(StatTarget::Defense), 2.0).as_reservation();
        let mut acc = StatAccumulator::new();
        buff.apply(&mut acc);

        assert!(!buff.is_active());
        assert!((acc.defense.total_flat() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_expired_does_not_apply() {
        let buff = Buff::new("Guard", "guard", BuffKind::additive(StatTarget::All), 2.0).with_rounds(-1);
        assert!(!buff.is_active());
    }

    #[test]
    fn test_buff_from_toml() {
        let toml = r#"
name = "Stone Skin"
kind = { stat = "defense", op = "additive" }
value = 3
remaining_duration = { rounds = 3 }
source_tag = "stone_skin"
"#;
        let buff: Buff = toml::from_str(toml).unwrap();
        assert_eq!(buff.remaining_duration, BuffDuration::Rounds(3));
        assert!(!buff.is_reservation);
        assert_eq!(buff.id, 0);
    }
}
