//! Screen trait, transition type and shared context for the lobby state machine.

use std::time::Duration;

use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::{AccountService, AnyStore, SessionController};

/// The result of handling an input event on a screen.
///
/// Screens return this from [`Screen::handle_key`] to drive the
/// [`LobbyController`](crate::LobbyController) state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Navigate to the login/register screen.
    GoToLogin,
    /// Navigate to the game board.
    GoToGame,
    /// Navigate to the leaderboard.
    GoToLeaderboard,
    /// Navigate to the profile of the logged-in player.
    GoToProfile,
    /// Exit the application cleanly.
    Quit,
}

/// Services shared by every screen.
#[derive(Debug)]
pub struct LobbyContext {
    /// Registration, login and leaderboard.
    pub accounts: AccountService<AnyStore>,
    /// The single-player session.
    pub session: SessionController<AnyStore>,
    /// Delay before the automated opponent moves.
    pub ai_delay: Duration,
}

impl LobbyContext {
    /// Bundles the services for the lobby.
    pub fn new(
        accounts: AccountService<AnyStore>,
        session: SessionController<AnyStore>,
        ai_delay: Duration,
    ) -> Self {
        Self {
            accounts,
            session,
            ai_delay,
        }
    }
}

/// Trait implemented by each screen in the lobby state machine.
///
/// Each screen owns its own state, renders its UI, and handles key events.
/// The controller calls these methods in the event loop.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, ctx: &LobbyContext);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut LobbyContext) -> ScreenTransition;

    /// Called on every loop iteration, input or not.
    fn tick(&mut self, _ctx: &mut LobbyContext) {}
}
