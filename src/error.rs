//! Error taxonomy for the simulation engine

use thiserror::Error;

/// Errors reported by grid, rule, and clock commands.
///
/// All variants are recoverable: a rejected command leaves the prior
/// state unchanged, and the running clock is never torn down by one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Grid width or height was zero, or an explicit cell matrix was ragged.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimension { width: usize, height: usize },

    /// Tick interval of zero milliseconds.
    #[error("tick interval must be positive, got {0}ms")]
    InvalidSpeed(u64),

    /// Rule toggle for a neighbor count outside the Moore neighborhood.
    #[error("neighbor count {0} is outside the valid range 0..=8")]
    InvalidNeighborCount(u8),

    /// Rule string that does not match the `B<digits>/S<digits>` form.
    #[error("malformed rule string {0:?}, expected B<digits>/S<digits>")]
    InvalidRuleString(String),

    /// Command issued after the clock worker terminated.
    #[error("simulation clock is no longer running")]
    ClockStopped,
}
