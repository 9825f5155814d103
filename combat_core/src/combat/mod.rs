//! Combat resolution - Attack sessions, damage resolution and results

mod resolution;
mod result;
mod session;

pub use resolution::{
    halve_rounding_up, resistance_succeeds, resolve_attack, roll_resistance,
    roll_resistance_with_rng, ResolveOptions,
};
pub use result::DamageResult;
pub use session::AttackSession;
