//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};

use crate::Position;

/// Mark placed by a player.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum Mark {
    /// Mark X (always moves first).
    X,
    /// Mark O.
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square holding a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark in this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

/// The eight winning lines, scanned in this order: rows top to bottom,
/// columns left to right, main diagonal, anti-diagonal.
pub const LINES: [[Position; 3]; 8] = [
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// 3x3 tic-tac-toe board.
///
/// Only serializable; a board is restored through [`crate::GameEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Places a square at the given position. Legality is the engine's job.
    pub(crate) fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Checks if every square holds a mark.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Counts the squares holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(mark))
            .count()
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Returns the mark owning the first uniform line, if any.
    pub fn winner(&self) -> Option<Mark> {
        LINES.iter().find_map(|[a, b, c]| {
            let mark = self.get(*a).mark()?;
            (self.get(*b) == Square::Occupied(mark) && self.get(*c) == Square::Occupied(mark))
                .then_some(mark)
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of the current game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameResult {
    /// Game is ongoing.
    #[default]
    InProgress,
    /// X completed a line.
    XWins,
    /// O completed a line.
    OWins,
    /// Board is full and no line is complete.
    Draw,
}

impl GameResult {
    /// Result for a game won by `mark`.
    pub fn won_by(mark: Mark) -> Self {
        match mark {
            Mark::X => GameResult::XWins,
            Mark::O => GameResult::OWins,
        }
    }

    /// True for every state except [`GameResult::InProgress`].
    pub fn is_terminal(self) -> bool {
        self != GameResult::InProgress
    }

    /// Returns the winning mark of a decided game.
    pub fn winner(self) -> Option<Mark> {
        match self {
            GameResult::XWins => Some(Mark::X),
            GameResult::OWins => Some(Mark::O),
            GameResult::InProgress | GameResult::Draw => None,
        }
    }

    /// Banner text shown when the game ends.
    pub fn label(self) -> &'static str {
        match self {
            GameResult::InProgress => "In progress",
            GameResult::XWins => "X wins!",
            GameResult::OWins => "O wins!",
            GameResult::Draw => "It's a draw!",
        }
    }
}
