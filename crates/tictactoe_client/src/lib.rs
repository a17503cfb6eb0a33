//! Single-player tic-tac-toe client.
//!
//! The human plays X against an opponent that picks a random empty square.
//!
//! # Architecture
//!
//! - **Session**: [`SessionController`] sequences turns, keeps the session
//!   score and records finished games
//! - **Accounts**: [`AccountService`] handles registration, login and the
//!   leaderboard
//! - **Store**: [`PlayerStore`] backends holding player records (JSON file,
//!   SQLite, memory)
//! - **Lobby**: terminal screens for login, game, leaderboard and profile
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use tictactoe_client::{AccountService, MemoryStore, SessionController};
//!
//! # fn example() -> anyhow::Result<()> {
//! let store = MemoryStore::new();
//! let accounts = AccountService::new(store.clone());
//! let player = accounts.register("alice", "secret")?;
//!
//! let mut session = SessionController::with_rng(store, StdRng::seed_from_u64(1));
//! session.start_session(player.username().clone());
//! let turn = session.play_turn(4)?;
//! assert!(turn.automated_move().is_some());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod accounts;
mod config;
mod credentials;
mod lobby;
mod session;
mod store;

pub use accounts::{AccountError, AccountService, LeaderboardEntry};
pub use config::{AppConfig, ConfigError, StoreBackend};
pub use lobby::{
    ActiveScreen, GameScreen, LeaderboardScreen, LobbyContext, LobbyController, LoginField,
    LoginScreen, ProfileScreen, Screen, ScreenTransition,
};
pub use session::{GameSnapshot, HUMAN_MARK, Score, SessionController, SessionError, TurnOutcome};
pub use store::{
    AnyStore, JsonFileStore, MemoryStore, PlayerRecord, PlayerStore, SqliteStore, StoreError,
};

pub use tictactoe_engine::{
    Board, GameEngine, GameResult, IllegalReason, Mark, MoveError, Position, Square,
};
