//! Lobby controller: the state machine driving the multi-screen TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use tracing::{debug, info, instrument, warn};

use crate::lobby::screen::{LobbyContext, Screen, ScreenTransition};
use crate::lobby::screens::{GameScreen, LeaderboardScreen, LoginScreen, ProfileScreen};

/// Active screen in the lobby state machine.
#[derive(Debug)]
pub enum ActiveScreen {
    /// Login/register form.
    Login(LoginScreen),
    /// Game board.
    Game(GameScreen),
    /// Leaderboard table.
    Leaderboard(LeaderboardScreen),
    /// Player profile.
    Profile(ProfileScreen),
}

impl ActiveScreen {
    fn as_screen(&self) -> &dyn Screen {
        match self {
            Self::Login(s) => s,
            Self::Game(s) => s,
            Self::Leaderboard(s) => s,
            Self::Profile(s) => s,
        }
    }

    fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::Login(s) => s,
            Self::Game(s) => s,
            Self::Leaderboard(s) => s,
            Self::Profile(s) => s,
        }
    }
}

/// Controller that drives the lobby state machine.
///
/// Call [`LobbyController::run`] to start the event loop.
#[derive(Debug)]
pub struct LobbyController {
    ctx: LobbyContext,
    screen: ActiveScreen,
}

impl LobbyController {
    /// Creates a controller showing the login screen.
    #[instrument(skip(ctx))]
    pub fn new(ctx: LobbyContext) -> Self {
        info!("Creating LobbyController");
        Self {
            ctx,
            screen: ActiveScreen::Login(LoginScreen::new()),
        }
    }

    /// Returns the shared services.
    pub fn context(&self) -> &LobbyContext {
        &self.ctx
    }

    /// Returns the screen currently shown.
    pub fn screen(&self) -> &ActiveScreen {
        &self.screen
    }

    /// Runs the lobby event loop until the user quits.
    #[instrument(skip(self, terminal))]
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting lobby event loop");

        loop {
            self.screen.as_screen_mut().tick(&mut self.ctx);

            terminal.draw(|f| self.screen.as_screen().render(f, &self.ctx))?;

            // Short poll timeout keeps delayed automated moves on time.
            if event::poll(Duration::from_millis(50))?
                && let Event::Key(key) = event::read()?
            {
                // Skip key release events (crossterm fires both press and release).
                if key.kind == KeyEventKind::Release {
                    continue;
                }

                if !self.handle_key(key) {
                    info!("Lobby quitting");
                    return Ok(());
                }
            }
        }
    }

    /// Routes a key to the navigation bar or the active screen.
    ///
    /// Returns `false` once the user has asked to quit.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let transition = match key.code {
            KeyCode::F(1) => ScreenTransition::GoToLogin,
            KeyCode::F(2) => ScreenTransition::GoToGame,
            KeyCode::F(3) => ScreenTransition::GoToLeaderboard,
            KeyCode::F(4) => ScreenTransition::GoToProfile,
            _ => self.screen.as_screen_mut().handle_key(key, &mut self.ctx),
        };
        self.apply_transition(transition)
    }

    /// Applies a screen transition. Returns `false` on quit.
    #[instrument(skip(self))]
    fn apply_transition(&mut self, transition: ScreenTransition) -> bool {
        debug!(transition = ?transition, "Applying screen transition");
        let logged_in = self.ctx.session.active_username().map(str::to_string);

        self.screen = match (transition, logged_in) {
            (ScreenTransition::Stay, _) => return true,
            (ScreenTransition::Quit, _) => return false,
            (ScreenTransition::GoToLogin, _) => ActiveScreen::Login(LoginScreen::new()),
            (ScreenTransition::GoToLeaderboard, _) => {
                ActiveScreen::Leaderboard(LeaderboardScreen::new(&self.ctx))
            }
            (ScreenTransition::GoToGame, Some(_)) => {
                if matches!(self.screen, ActiveScreen::Game(_)) {
                    return true;
                }
                ActiveScreen::Game(GameScreen::new())
            }
            (ScreenTransition::GoToProfile, Some(username)) => {
                ActiveScreen::Profile(ProfileScreen::new(username, &self.ctx))
            }
            (ScreenTransition::GoToGame | ScreenTransition::GoToProfile, None) => {
                warn!("No player logged in, redirecting to login");
                ActiveScreen::Login(LoginScreen::new())
            }
        };
        true
    }
}
