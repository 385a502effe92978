//! Error types for weft-automata.

use thiserror::Error;

/// Errors raised by ring and automaton operations.
///
/// All of these are precondition violations detected at the call that caused
/// them; nothing is corrected silently.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AutomataError {
    /// A ring was requested with zero cells.
    #[error("invalid length: a ring needs at least one cell")]
    InvalidLength,

    /// A replacement generation had the wrong number of cells.
    #[error("length mismatch: expected {expected} cells, got {got}")]
    LengthMismatch {
        /// Length of the ring.
        expected: usize,
        /// Length of the rejected sequence.
        got: usize,
    },

    /// A cell value other than 0 or 1 was supplied.
    #[error("invalid cell value {0}: cells hold 0 or 1")]
    InvalidValue(u8),

    /// A probability was outside `[0, 1]` (or NaN).
    #[error("invalid probability: {name} = {value} is outside [0, 1]")]
    InvalidProbability {
        /// Which parameter was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Errors that can occur when loading an automaton configuration.
#[cfg(feature = "serde")]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document could not be parsed.
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration parsed but describes an invalid automaton.
    #[error(transparent)]
    Automata(#[from] AutomataError),
}

/// Result alias for automaton operations.
pub type Result<T> = std::result::Result<T, AutomataError>;
