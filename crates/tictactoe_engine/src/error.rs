//! Move errors.

use derive_more::{Display, Error};

/// Why a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IllegalReason {
    /// The target square already holds a mark.
    #[display("square is already occupied")]
    Occupied,
    /// The game has already reached a terminal result.
    #[display("game is already over")]
    GameConcluded,
    /// The index is not in 0-8.
    #[display("position out of bounds (must be 0-8)")]
    OutOfRange,
    /// The mover is not the player whose turn it is.
    #[display("not your turn")]
    NotYourTurn,
}

/// Error returned when a move is rejected.
///
/// A rejected move never changes game state, so the caller can retry
/// with a different index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The move is not legal in the current state.
    #[display("Illegal move at {index}: {reason}")]
    IllegalMove {
        /// Requested board index.
        index: usize,
        /// Why it was refused.
        reason: IllegalReason,
    },
}

impl MoveError {
    /// Creates an illegal-move error.
    pub fn illegal(index: usize, reason: IllegalReason) -> Self {
        MoveError::IllegalMove { index, reason }
    }

    /// Requested board index.
    pub fn index(&self) -> usize {
        match self {
            MoveError::IllegalMove { index, .. } => *index,
        }
    }

    /// Why the move was refused.
    pub fn reason(&self) -> IllegalReason {
        match self {
            MoveError::IllegalMove { reason, .. } => *reason,
        }
    }
}

/// Why a serialized game could not be restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum RestoreError {
    /// A recorded move is illegal when replayed from an empty board.
    #[display("history replay failed: {_0}")]
    History(MoveError),
    /// A stored field disagrees with the replayed history.
    #[display("stored {field} does not match the move history")]
    Mismatch {
        /// Name of the offending field.
        field: &'static str,
    },
}
