//! Generalized Game of Life engine
//!
//! This library simulates two-state cellular automata on a toroidal grid.
//! The pure core (grids, birth/survival rule sets, named templates) lives
//! in [`game_of_life`]; [`clock`] adds the stateful pipeline that turns
//! timer ticks and commands — pause, resume, single steps, speed and rule
//! changes, interactive edits, restarts — into an ordered stream of grid
//! snapshots.

pub mod clock;
pub mod config;
pub mod error;
pub mod game_of_life;
pub mod utils;

pub use clock::{SimulationClock, SnapshotReceiver};
pub use config::Settings;
pub use error::EngineError;
pub use game_of_life::{Cell, Grid, RuleSet, RuleTemplate};

/// Spawn a simulation clock from the given settings.
pub fn start_simulation(settings: &Settings) -> Result<SimulationClock, EngineError> {
    SimulationClock::spawn(settings)
}
