//! Simulation clock: turns timer ticks and commands into generations
//!
//! The clock owns a worker thread that folds the active rule set over a
//! grid, one generation per accepted tick. Commands go through a single
//! inbound queue; snapshots come back in generation order over
//! subscription channels. The worker is the grid's only writer, so every
//! snapshot handed out is an independent deep copy.
//!
//! Behavior notes:
//! - The clock starts **running** unless `clock.start_paused` is set.
//! - `step_once` requests are coalesced through a single pending flag: a
//!   burst arriving between two ticks advances the grid once. A request
//!   is never dropped — the flag is honored before the next timer tick.
//! - `set_speed` and `resume` restart the tick deadline from the moment
//!   the worker applies them.

mod command;
mod worker;

use command::Command;
use worker::{Shared, Worker};

use crate::config::Settings;
use crate::error::EngineError;
use crate::game_of_life::{Grid, RuleSet};
use log::info;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Handle to a running simulation worker.
///
/// All methods are safe to call from any thread. Commands are validated
/// here, synchronously, before being enqueued — a rejected command never
/// reaches the worker and leaves its state untouched. Dropping the handle
/// shuts the worker down.
pub struct SimulationClock {
    commands: mpsc::Sender<Command>,
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

impl SimulationClock {
    /// Spawn a clock with a randomly filled grid taken from `settings`.
    pub fn spawn(settings: &Settings) -> Result<Self, EngineError> {
        let grid = Grid::random(settings.grid.width, settings.grid.height)?;
        Self::with_initial_grid(settings, grid)
    }

    /// Spawn a clock over an explicit initial grid (useful for tests and
    /// for editors that prepare a pattern up front).
    pub fn with_initial_grid(settings: &Settings, grid: Grid) -> Result<Self, EngineError> {
        if settings.clock.tick_interval_ms == 0 {
            return Err(EngineError::InvalidSpeed(0));
        }
        let rules: RuleSet = settings.rules.rule.parse()?;
        let interval = Duration::from_millis(settings.clock.tick_interval_ms);
        let running = !settings.clock.start_paused;

        let shared = Arc::new(Shared::new(grid.clone(), running));
        let (commands, inbox) = mpsc::channel();
        let worker = Worker::new(grid, rules.clone(), interval, inbox, Arc::clone(&shared));
        let handle = thread::spawn(move || worker.run());

        info!(
            "simulation clock spawned ({} every {:?}, {})",
            rules,
            interval,
            if running { "running" } else { "paused" }
        );

        Ok(Self {
            commands,
            shared,
            worker: Some(handle),
        })
    }

    /// Stop advancing on timer ticks. No-op if already paused.
    pub fn pause(&self) -> Result<(), EngineError> {
        self.send(Command::Pause)
    }

    /// Resume advancing on timer ticks; the next tick fires one full
    /// interval from now. No-op if already running.
    pub fn resume(&self) -> Result<(), EngineError> {
        self.send(Command::Resume)
    }

    /// Advance exactly one generation, running or paused. Does not resume
    /// continuous running.
    pub fn step_once(&self) -> Result<(), EngineError> {
        self.send(Command::Step)
    }

    /// Change the tick interval. Takes effect on the next scheduled tick;
    /// the current grid and any pending step request are preserved.
    pub fn set_speed(&self, interval_ms: u64) -> Result<(), EngineError> {
        if interval_ms == 0 {
            return Err(EngineError::InvalidSpeed(interval_ms));
        }
        self.send(Command::SetSpeed(Duration::from_millis(interval_ms)))
    }

    /// Replace the active rule set, starting with the next computed
    /// generation. Already-emitted snapshots are never recomputed.
    pub fn set_rules(&self, rules: RuleSet) -> Result<(), EngineError> {
        self.send(Command::SetRules(rules))
    }

    /// Edit one cell of the live grid (toroidal coordinates). Works while
    /// paused or running; the edited grid is re-published to subscribers.
    pub fn set_cell(&self, row: i64, col: i64, alive: bool) -> Result<(), EngineError> {
        self.send(Command::SetCell { row, col, alive })
    }

    /// Replace the grid with a fresh random fill of the given size,
    /// keeping rules, speed, and the running/paused state.
    pub fn restart(&self, width: usize, height: usize) -> Result<(), EngineError> {
        let grid = Grid::random(width, height)?;
        self.send(Command::Restart(grid))
    }

    /// The latest computed (or initial) grid, without advancing.
    pub fn current_snapshot(&self) -> Grid {
        self.shared.latest.lock().unwrap().clone()
    }

    /// Whether the worker is advancing on timer ticks. Reflects
    /// worker-acknowledged state; a just-sent pause may not show yet.
    pub fn is_running(&self) -> bool {
        self.shared
            .running
            .load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Open a snapshot stream. The receiver is seeded with the current
    /// snapshot and then gets every published generation in order.
    pub fn subscribe(&self) -> SnapshotReceiver {
        let mut subscribers = self.shared.subscribers.lock().unwrap();
        let (sender, receiver) = mpsc::channel();
        let _ = sender.send(self.shared.latest.lock().unwrap().clone());
        subscribers.push(sender);
        SnapshotReceiver { inner: receiver }
    }

    /// Stop the worker and wait for it to exit. After this returns, no
    /// further snapshot is delivered on any subscription.
    pub fn shutdown(mut self) -> Result<(), EngineError> {
        self.stop_worker()
    }

    fn stop_worker(&mut self) -> Result<(), EngineError> {
        let Some(handle) = self.worker.take() else {
            return Ok(());
        };
        let _ = self.commands.send(Command::Shutdown);
        handle.join().map_err(|_| EngineError::ClockStopped)
    }

    fn send(&self, command: Command) -> Result<(), EngineError> {
        self.commands
            .send(command)
            .map_err(|_| EngineError::ClockStopped)
    }
}

impl Drop for SimulationClock {
    fn drop(&mut self) {
        let _ = self.stop_worker();
    }
}

/// Pollable stream of grid snapshots, one per published generation.
pub struct SnapshotReceiver {
    inner: Receiver<Grid>,
}

impl SnapshotReceiver {
    /// Block until the next snapshot; `None` once the clock is gone.
    pub fn recv(&self) -> Option<Grid> {
        self.inner.recv().ok()
    }

    /// Block up to `timeout` for the next snapshot.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Grid> {
        self.inner.recv_timeout(timeout).ok()
    }

    /// The next snapshot if one is already queued.
    pub fn try_recv(&self) -> Option<Grid> {
        self.inner.try_recv().ok()
    }

    /// Blocking iterator over snapshots until the clock is gone.
    pub fn iter(&self) -> impl Iterator<Item = Grid> + '_ {
        self.inner.iter()
    }
}
