//! Error types for the Tether Chess rule engine.
//!
//! All errors are values returned through [`MoveResult`](crate::engine::MoveResult)
//! or `Result`; nothing panics across the crate boundary. Internal
//! invariants (a generator or apply bug) are `debug_assert!`s and never
//! reach the caller as an error value.

use crate::types::{Color, Square};
use thiserror::Error;

/// Coarse classification of an [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed input: bad square text, out-of-range file or rank.
    Input,
    /// The request is well-formed but the game state refuses it.
    State,
    /// No legal move matches the requested `(from, to, promotion)` triple.
    Rule,
}

/// Everything the engine can refuse a request with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A move was requested after the game reached a terminal state.
    #[error("game is already over")]
    GameOver,

    /// The source square holds no piece.
    #[error("no piece on square {0}")]
    EmptySource(Square),

    /// The source square holds a piece of the side not to move.
    #[error("piece on {square} belongs to {owner}, but it is {turn}'s turn")]
    WrongColorToMove {
        square: Square,
        owner: Color,
        turn: Color,
    },

    /// No legal move matches the request. The message lists the legal
    /// destinations from the source square, when there are any.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// Square text that does not name a board square.
    #[error("invalid square: \"{0}\"")]
    InvalidSquare(String),

    /// A promotion choice is required and was not supplied. The engine
    /// defaults to the queen instead of returning this; the variant is
    /// kept for hosts that pre-validate requests.
    #[error("promotion piece required for this move")]
    AmbiguousPromotion,
}

impl EngineError {
    /// The error's place in the taxonomy.
    pub fn category(&self) -> ErrorCategory {
        match self {
            EngineError::InvalidSquare(_) => ErrorCategory::Input,
            EngineError::GameOver
            | EngineError::EmptySource(_)
            | EngineError::WrongColorToMove { .. } => ErrorCategory::State,
            EngineError::IllegalMove(_) | EngineError::AmbiguousPromotion => ErrorCategory::Rule,
        }
    }
}
