//! combat_sim - Scripted encounter runner on top of combat_core

pub mod encounter;
pub mod simulation;

pub use encounter::{load_encounter, parse_encounter, Encounter};
pub use simulation::{run_encounter_with_rng, Simulation, SimulationReport};
