//! StatValue - The per-stat modifier container (Override → Flat → Multiplier)

use serde::{Deserialize, Serialize};

/// Collects every contribution to one derived stat
///
/// Final value is calculated as:
/// `max(overrides)` when any override is present, otherwise
/// `(base + Σ flat) × Π multipliers`
///
/// Contributions are sorted before folding so the result never depends on
/// the order they were pushed in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatValue {
    /// Base value (from the character sheet)
    pub base: f64,
    /// Additive contributions
    pub flat: Vec<f64>,
    /// Multiplicative factors (1.0 = unchanged)
    pub multipliers: Vec<f64>,
    /// Override values; the largest one wins
    pub overrides: Vec<f64>,
}

impl StatValue {
    /// Create a new StatValue with the given base
    pub fn with_base(base: f64) -> Self {
        StatValue {
            base,
            ..Default::default()
        }
    }

    /// Calculate the unclamped final value
    pub fn compute(&self) -> f64 {
        if let Some(value) = self.winning_override() {
            return value;
        }
        (self.base + self.total_flat()) * self.total_multiplier()
    }

    /// Final value clamped to zero and truncated to a whole number
    pub fn compute_clamped(&self) -> i32 {
        let value = self.compute();
        if value.is_nan() || value <= 0.0 {
            return 0;
        }
        value.floor().min(i32::MAX as f64) as i32
    }

    pub fn add_flat(&mut self, value: f64) {
        self.flat.push(value);
    }

    pub fn add_multiplier(&mut self, factor: f64) {
        self.multipliers.push(factor);
    }

    pub fn add_override(&mut self, value: f64) {
        self.overrides.push(value);
    }

    /// The override that supersedes everything else, if any
    pub fn winning_override(&self) -> Option<f64> {
        self.overrides.iter().copied().max_by(|a, b| a.total_cmp(b))
    }

    /// Product of all multipliers, folded in sorted order
    pub fn total_multiplier(&self) -> f64 {
        let mut factors = self.multipliers.clone();
        factors.sort_by(|a, b| a.total_cmp(b));
        factors.iter().product()
    }

    pub fn is_overridden(&self) -> bool {
        !self.overrides.is_empty()
    }

    /// Sum of all additive contributions, folded in sorted order
    pub fn total_flat(&self) -> f64 {
        let mut parts = self.flat.clone();
        parts.sort_by(|a, b| a.total_cmp(b));
        parts.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_basic() {
        let stat = StatValue::with_base(5.0);
        assert!((stat.compute() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_additive_before_multiplicative() {
        let mut stat = StatValue::with_base(4.0);
        stat.add_multiplier(2.0);
        stat.add_flat(2.0);
        // (4 + 2) * 2, regardless of push order
        assert!((stat.compute() - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_multipliers_stack_multiplicatively() {
        let mut stat = StatValue::with_base(10.0);
        stat.add_multiplier(0.5);
        stat.add_multiplier(1.5);
        assert!((stat.compute() - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_override_supersedes_everything() {
        let mut stat = StatValue::with_base(10.0);
        stat.add_flat(5.0);
        stat.add_multiplier(2.0);
        stat.add_override(3.0);
        stat.add_override(1.0);
        assert!((stat.compute() - 3.0).abs() < f64::EPSILON);
        assert!(stat.is_overridden());
    }

    #[test]
    fn test_clamped_never_negative() {
        let mut stat = StatValue::with_base(2.0);
        stat.add_flat(-5.0);
        assert_eq!(stat.compute_clamped(), 0);

        let mut stat = StatValue::with_base(7.0);
        stat.add_multiplier(0.5);
        assert_eq!(stat.compute_clamped(), 3);
    }
}
