//! Game logic and rules for tic-tac-toe.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{Board, GameResult, IllegalReason, Mark, MoveError, Position, RestoreError, Square};

/// Tic-tac-toe game engine.
///
/// Holds the board, the mark to move next and the cached result. The
/// result only changes inside [`GameEngine::apply_move`] and
/// [`GameEngine::reset`]; once terminal, the board is frozen until reset.
///
/// Deserializing replays the stored history from an empty board, so a
/// restored engine upholds the same invariants as one built by moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredEngine")]
pub struct GameEngine {
    board: Board,
    current_player: Mark,
    result: GameResult,
    history: Vec<Position>,
}

impl GameEngine {
    /// Creates a new game with X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Mark::X,
            result: GameResult::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark to move next.
    pub fn current_player(&self) -> Mark {
        self.current_player
    }

    /// Returns the cached game result.
    pub fn result(&self) -> GameResult {
        self.result
    }

    /// Returns the positions played so far, oldest first.
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// Places the current player's mark at `index` (0-8).
    ///
    /// On success the turn passes to the opponent and the result is
    /// re-evaluated.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::IllegalMove`] if the game is over, the index is
    /// out of range or the square is occupied. State is untouched on error.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn apply_move(&mut self, index: usize) -> Result<(), MoveError> {
        if self.result.is_terminal() {
            return Err(MoveError::illegal(index, IllegalReason::GameConcluded));
        }

        let pos = Position::from_index(index)
            .ok_or_else(|| MoveError::illegal(index, IllegalReason::OutOfRange))?;

        if !self.board.is_empty(pos) {
            return Err(MoveError::illegal(index, IllegalReason::Occupied));
        }

        self.board.set(pos, Square::Occupied(self.current_player));
        self.history.push(pos);
        self.current_player = self.current_player.opponent();
        self.result = self.evaluate();

        debug!(position = %pos, result = ?self.result, "Move applied");
        Ok(())
    }

    /// Evaluates the board from scratch.
    ///
    /// The first uniform line in [`crate::LINES`] order decides the winner.
    /// A full board with no such line is a draw.
    pub fn evaluate(&self) -> GameResult {
        if let Some(mark) = self.board.winner() {
            GameResult::won_by(mark)
        } else if self.board.is_full() {
            GameResult::Draw
        } else {
            GameResult::InProgress
        }
    }

    /// Picks an empty square uniformly at random, `None` on a full board.
    ///
    /// This is the whole opponent policy: it does not look ahead, block,
    /// or take a winning square on purpose.
    #[instrument(skip(self, rng))]
    pub fn select_automated_move<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Position> {
        let choice = Position::valid_moves(&self.board).choose(rng).copied();
        debug!(choice = ?choice, "Automated move selected");
        choice
    }

    /// Clears the board and hands the first move back to X.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        debug!(moves = self.history.len(), "Resetting game");
        *self = Self::new();
    }
}

/// Serialized shape of a [`GameEngine`], trusted only after replay.
#[derive(Deserialize)]
struct StoredEngine {
    board: StoredBoard,
    current_player: Mark,
    result: GameResult,
    history: Vec<Position>,
}

#[derive(Deserialize)]
struct StoredBoard {
    squares: [Square; 9],
}

impl TryFrom<StoredEngine> for GameEngine {
    type Error = RestoreError;

    fn try_from(stored: StoredEngine) -> Result<Self, Self::Error> {
        let mut engine = Self::new();
        for pos in &stored.history {
            engine
                .apply_move(pos.to_index())
                .map_err(RestoreError::History)?;
        }

        if engine.board.squares() != &stored.board.squares {
            return Err(RestoreError::Mismatch { field: "board" });
        }
        if engine.current_player != stored.current_player {
            return Err(RestoreError::Mismatch {
                field: "current_player",
            });
        }
        if engine.result != stored.result {
            return Err(RestoreError::Mismatch { field: "result" });
        }
        Ok(engine)
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}
