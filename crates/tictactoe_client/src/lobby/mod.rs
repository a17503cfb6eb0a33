//! Lobby system: multi-screen TUI with login, game, leaderboard and profile.

mod board;
mod controller;
mod input;
mod screen;
mod screens;

pub use controller::{ActiveScreen, LobbyController};
pub use screen::{LobbyContext, Screen, ScreenTransition};
pub use screens::{GameScreen, LeaderboardScreen, LoginField, LoginScreen, ProfileScreen};
