//! Cell state with age tracking and optional immortality

use serde::{Deserialize, Serialize};

/// A single grid cell: alive flag plus decoration.
///
/// The age counter is only meaningful while the cell is alive; any flip
/// of the alive flag resets it to zero. Immortal cells are exempt from
/// the death rule during a transition but otherwise behave normally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    alive: bool,
    age: u32,
    #[serde(default)]
    immortal: bool,
}

impl Cell {
    /// Create a cell with the given alive flag and age zero.
    pub fn new(alive: bool) -> Self {
        Self {
            alive,
            age: 0,
            immortal: false,
        }
    }

    /// Create a cell with an explicit age.
    pub fn with_age(alive: bool, age: u32) -> Self {
        Self {
            alive,
            age,
            immortal: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn is_immortal(&self) -> bool {
        self.immortal
    }

    /// Set the alive flag, resetting age to zero if the flag flips.
    pub fn set_alive(&mut self, alive: bool) {
        if self.alive != alive {
            self.age = 0;
        }
        self.alive = alive;
    }

    /// Increment the age by one tick.
    pub fn add_year(&mut self) {
        self.age += 1;
    }

    pub fn set_immortal(&mut self, immortal: bool) {
        self.immortal = immortal;
    }
}
