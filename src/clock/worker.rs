//! Worker loop that folds the rule set over timer ticks and commands

use super::command::Command;
use crate::game_of_life::{Grid, RuleSet};
use log::{debug, trace};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// State shared between the clock handle and its worker thread.
pub(crate) struct Shared {
    /// Latest published snapshot, for synchronous reads.
    pub latest: Mutex<Grid>,
    /// Snapshot subscribers; disconnected ones are pruned on publish.
    pub subscribers: Mutex<Vec<Sender<Grid>>>,
    /// Worker-acknowledged running flag.
    pub running: AtomicBool,
}

impl Shared {
    pub fn new(initial: Grid, running: bool) -> Self {
        Self {
            latest: Mutex::new(initial),
            subscribers: Mutex::new(Vec::new()),
            running: AtomicBool::new(running),
        }
    }
}

/// Owns all mutable simulation state. The grid has exactly one writer:
/// this loop. Everything leaving the thread is a deep copy.
pub(crate) struct Worker {
    grid: Grid,
    rules: RuleSet,
    interval: Duration,
    next_tick: Instant,
    step_pending: bool,
    generation: u64,
    commands: Receiver<Command>,
    shared: Arc<Shared>,
}

impl Worker {
    pub fn new(
        grid: Grid,
        rules: RuleSet,
        interval: Duration,
        commands: Receiver<Command>,
        shared: Arc<Shared>,
    ) -> Self {
        Self {
            grid,
            rules,
            interval,
            next_tick: Instant::now() + interval,
            step_pending: false,
            generation: 0,
            commands,
            shared,
        }
    }

    /// Single consuming loop: waits for the next command, or for the tick
    /// deadline while running. Commands queued before a due tick are
    /// applied first, so a step request always produces its generation
    /// before the next timer-driven one.
    pub fn run(mut self) {
        debug!(
            "clock worker started: {}x{} grid, {} rules, {:?} interval",
            self.grid.width(),
            self.grid.height(),
            self.rules,
            self.interval
        );

        loop {
            let received = if self.is_running() {
                let timeout = self.next_tick.saturating_duration_since(Instant::now());
                match self.commands.recv_timeout(timeout) {
                    Ok(command) => Some(command),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            } else {
                // Paused with no pending work: sleep until a command
                // arrives or every handle is gone.
                match self.commands.recv() {
                    Ok(command) => Some(command),
                    Err(_) => break,
                }
            };

            match received {
                Some(command) => {
                    if !self.apply_burst(command) {
                        break;
                    }
                }
                None => self.tick(),
            }
        }

        debug!("clock worker stopped after {} generations", self.generation);
    }

    /// Apply a command plus everything else already queued, then honor a
    /// pending step request. Draining first is what coalesces a burst of
    /// step requests into a single advance. Returns false on shutdown.
    fn apply_burst(&mut self, first: Command) -> bool {
        if !self.apply(first) {
            return false;
        }
        loop {
            match self.commands.try_recv() {
                Ok(command) => {
                    if !self.apply(command) {
                        return false;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return false,
            }
        }
        if self.step_pending {
            self.step_pending = false;
            self.advance();
        }
        true
    }

    fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Pause => {
                if self.is_running() {
                    debug!("paused at generation {}", self.generation);
                    self.shared.running.store(false, Ordering::SeqCst);
                }
            }
            Command::Resume => {
                if !self.is_running() {
                    debug!("resumed at generation {}", self.generation);
                    self.shared.running.store(true, Ordering::SeqCst);
                    self.next_tick = Instant::now() + self.interval;
                }
            }
            Command::Step => {
                self.step_pending = true;
            }
            Command::SetSpeed(interval) => {
                debug!("tick interval set to {:?}", interval);
                self.interval = interval;
                if self.is_running() {
                    self.next_tick = Instant::now() + interval;
                }
            }
            Command::SetRules(rules) => {
                debug!("rules set to {}", rules);
                self.rules = rules;
            }
            Command::SetCell { row, col, alive } => {
                self.grid.set(row, col, alive);
                self.publish();
            }
            Command::Restart(grid) => {
                debug!("restarted with a {}x{} grid", grid.width(), grid.height());
                self.grid = grid;
                self.generation = 0;
                self.publish();
            }
            Command::Shutdown => return false,
        }
        true
    }

    /// Timer deadline fired. The next deadline is measured from now, not
    /// from the previous deadline, so a slow generation never causes a
    /// catch-up burst.
    fn tick(&mut self) {
        if !self.is_running() {
            return;
        }
        self.advance();
        self.next_tick = Instant::now() + self.interval;
    }

    fn advance(&mut self) {
        self.grid = self.rules.next_state(&self.grid);
        self.generation += 1;
        trace!(
            "generation {}: {} living cells",
            self.generation,
            self.grid.living_count()
        );
        self.publish();
    }

    /// Publish the current grid: update the shared snapshot and fan out a
    /// copy to every live subscriber. Holding the subscriber lock across
    /// both keeps new subscribers from seeing a gap or a duplicate.
    fn publish(&self) {
        let mut subscribers = self.shared.subscribers.lock().unwrap();
        *self.shared.latest.lock().unwrap() = self.grid.clone();
        subscribers.retain(|subscriber| subscriber.send(self.grid.clone()).is_ok());
    }

    fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }
}
