//! Crate error type.
//!
//! Entity construction rejects bad configuration up front, so dispatch-time
//! code never has to re-validate. Arrival methods report precondition
//! violations as values instead of panicking.

use thiserror::Error;

/// Errors surfaced by entity construction, arrival preconditions, scenario
/// configuration, and timetable input.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Driver speed must be at least one distance unit per tick.
    #[error("invalid speed {0}: must be at least 1")]
    InvalidSpeed(u32),

    /// An arrival was requested for a driver that is not driving anywhere.
    #[error("driver {0} has no active drive to end")]
    NoActiveDrive(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for this crate.
pub type DispatchResult<T> = Result<T, DispatchError>;
