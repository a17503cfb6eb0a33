//! Pure tic-tac-toe game logic.
//!
//! [`GameEngine`] owns a [`Board`], the [`Mark`] to move and the current
//! [`GameResult`]. Moves are validated and applied one square at a time;
//! the only opponent policy is a uniform random pick among empty squares.
//!
//! ```
//! use tictactoe_engine::{GameEngine, GameResult};
//!
//! let mut engine = GameEngine::new();
//! for index in [0, 3, 1, 4, 2] {
//!     engine.apply_move(index)?;
//! }
//! assert_eq!(engine.result(), GameResult::XWins);
//! # Ok::<(), tictactoe_engine::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod position;
mod rules;
mod types;

pub use error::{IllegalReason, MoveError, RestoreError};
pub use position::Position;
pub use rules::GameEngine;
pub use types::{Board, GameResult, LINES, Mark, Square};
