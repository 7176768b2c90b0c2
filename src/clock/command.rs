//! Commands accepted by the clock worker

use crate::game_of_life::{Grid, RuleSet};
use std::time::Duration;

/// Inbound commands for the worker loop.
///
/// Validation happens in the [`SimulationClock`](super::SimulationClock)
/// handle before a command is enqueued, so the worker only ever sees
/// well-formed values (`Restart` already carries the freshly built grid).
#[derive(Debug)]
pub(crate) enum Command {
    Pause,
    Resume,
    /// Request a single generation advance; bursts coalesce into one.
    Step,
    SetSpeed(Duration),
    SetRules(RuleSet),
    /// Interactive edit of the live grid.
    SetCell { row: i64, col: i64, alive: bool },
    /// Replace the grid, keeping rules, speed, and pause state.
    Restart(Grid),
    Shutdown,
}
