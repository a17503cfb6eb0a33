//! Single-player game session: turn sequencing, score and result recording.

use derive_getters::Getters;
use derive_more::{Display, Error, From};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tictactoe_engine::{Board, GameEngine, GameResult, IllegalReason, Mark, MoveError, Position};
use tracing::{debug, info, instrument, warn};

use crate::store::{PlayerStore, StoreError};

/// Mark played by the human. The automated opponent plays its opponent.
pub const HUMAN_MARK: Mark = Mark::X;

/// Wins per mark within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Score {
    x: u32,
    o: u32,
}

impl Score {
    /// Wins recorded for `mark`.
    pub fn get(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }

    fn increment(&mut self, mark: Mark) {
        match mark {
            Mark::X => self.x += 1,
            Mark::O => self.o += 1,
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "X: {} - O: {}", self.x, self.o)
    }
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct GameSnapshot {
    board: Board,
    current_player: Mark,
    result: GameResult,
    score: Score,
    username: Option<String>,
    moves: usize,
}

/// Failure from [`SessionController::play_turn`].
#[derive(Debug, Clone, Display, Error, From)]
pub enum SessionError {
    /// The human's move was refused; nothing changed.
    #[display("{_0}")]
    Move(MoveError),
    /// The finished game could not be persisted.
    #[display("{_0}")]
    Store(StoreError),
}

/// What happened during one [`SessionController::play_turn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct TurnOutcome {
    human_move: Position,
    automated_move: Option<Position>,
    result: GameResult,
}

/// Owns the engine for one logged-in player and sequences their games.
///
/// The human always plays X. After each accepted human move the caller
/// runs [`SessionController::maybe_run_automated_turn`], and after any move
/// that ends the game, [`SessionController::on_game_concluded`].
#[derive(Debug)]
pub struct SessionController<S> {
    engine: GameEngine,
    score: Score,
    active_username: Option<String>,
    store: S,
    rng: StdRng,
    concluded: bool,
}

impl<S: PlayerStore> SessionController<S> {
    /// Creates a controller with an OS-seeded random opponent.
    #[instrument(skip(store))]
    pub fn new(store: S) -> Self {
        Self::with_rng(store, StdRng::from_os_rng())
    }

    /// Creates a controller whose opponent draws from `rng`.
    #[instrument(skip(store, rng))]
    pub fn with_rng(store: S, rng: StdRng) -> Self {
        info!("Creating session controller");
        Self {
            engine: GameEngine::new(),
            score: Score::default(),
            active_username: None,
            store,
            rng,
            concluded: false,
        }
    }

    /// Returns the engine.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Returns the session score.
    pub fn score(&self) -> Score {
        self.score
    }

    /// Returns the logged-in username, if any.
    pub fn active_username(&self) -> Option<&str> {
        self.active_username.as_deref()
    }

    /// Binds the session to `username` and starts a fresh game.
    ///
    /// The score carries over only when the same player starts again.
    #[instrument(skip(self))]
    pub fn start_session(&mut self, username: String) {
        if self.active_username.as_deref() != Some(username.as_str()) {
            self.score = Score::default();
        }
        info!(username = %username, "Session started");
        self.active_username = Some(username);
        self.reset_game();
    }

    /// Logs out: forgets the player, clears the board and the score.
    #[instrument(skip(self))]
    pub fn end_session(&mut self) {
        info!(username = ?self.active_username, "Session ended");
        self.active_username = None;
        self.score = Score::default();
        self.reset_game();
    }

    /// Abandons or clears the current game. The score is kept.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        info!(score = %self.score, "New game");
        self.reset_game();
    }

    fn reset_game(&mut self) {
        self.engine.reset();
        self.concluded = false;
    }

    /// Places the human's mark at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::IllegalMove`] for an occupied square, an index
    /// past 8, a finished game, or while the automated turn is pending.
    /// Nothing changes on error.
    #[instrument(skip(self))]
    pub fn player_move(&mut self, index: usize) -> Result<(), MoveError> {
        if !self.engine.result().is_terminal() && self.engine.current_player() != HUMAN_MARK {
            warn!(index, "Human tried to move during the automated turn");
            return Err(MoveError::illegal(index, IllegalReason::NotYourTurn));
        }

        self.engine.apply_move(index).inspect_err(|e| {
            debug!(error = %e, "Human move rejected");
        })
    }

    /// Plays the automated opponent's move if it is due.
    ///
    /// Returns the square taken, or `None` when the game is over or it is
    /// the human's turn.
    #[instrument(skip(self))]
    pub fn maybe_run_automated_turn(&mut self) -> Option<Position> {
        if self.engine.result().is_terminal() || self.engine.current_player() == HUMAN_MARK {
            return None;
        }

        let pos = self.engine.select_automated_move(&mut self.rng)?;
        match self.engine.apply_move(pos.to_index()) {
            Ok(()) => {
                debug!(position = %pos, result = ?self.engine.result(), "Automated move played");
                Some(pos)
            }
            Err(e) => {
                warn!(error = %e, "Automated move rejected");
                None
            }
        }
    }

    /// Records a finished game once.
    ///
    /// A win adds to the session score and the active player's record
    /// gains a game (and a win if X won). Returns the recorded result, or
    /// `None` if the game is still running or was already recorded.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the player's record cannot be saved. The
    /// session score is updated regardless.
    #[instrument(skip(self))]
    pub fn on_game_concluded(&mut self) -> Result<Option<GameResult>, StoreError> {
        let result = self.engine.result();
        if !result.is_terminal() || self.concluded {
            return Ok(None);
        }
        self.concluded = true;

        if let Some(winner) = result.winner() {
            self.score.increment(winner);
        }
        info!(result = ?result, score = %self.score, "Game concluded");

        self.record_result(result)?;
        Ok(Some(result))
    }

    fn record_result(&self, result: GameResult) -> Result<(), StoreError> {
        let Some(username) = self.active_username.as_deref() else {
            debug!("No active player, result not persisted");
            return Ok(());
        };

        let mut records = self.store.load()?;
        let Some(record) = records.iter_mut().find(|r| r.username() == username) else {
            warn!(username = %username, "No record for active player, result not persisted");
            return Ok(());
        };

        record.record_game(result.winner() == Some(HUMAN_MARK));
        debug!(
            username = %username,
            wins = record.wins(),
            total_games = record.total_games(),
            "Player record updated"
        );
        self.store.save(&records)
    }

    /// Human move, automated reply and result recording in one call.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Move`] if the human's move is refused, or
    /// [`SessionError::Store`] if the finished game cannot be saved.
    #[instrument(skip(self))]
    pub fn play_turn(&mut self, index: usize) -> Result<TurnOutcome, SessionError> {
        self.player_move(index)?;
        let human_move = Position::from_index(index)
            .ok_or(MoveError::illegal(index, IllegalReason::OutOfRange))?;

        let automated_move = self.maybe_run_automated_turn();
        self.on_game_concluded()?;

        Ok(TurnOutcome {
            human_move,
            automated_move,
            result: self.engine.result(),
        })
    }

    /// Captures the state the presentation layer renders.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.engine.board().clone(),
            current_player: self.engine.current_player(),
            result: self.engine.result(),
            score: self.score,
            username: self.active_username.clone(),
            moves: self.engine.history().len(),
        }
    }
}
