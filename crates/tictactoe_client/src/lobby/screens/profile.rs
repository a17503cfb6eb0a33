//! Profile screen: the logged-in player and logout.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{info, instrument, warn};

use crate::PlayerRecord;
use crate::lobby::screen::{LobbyContext, Screen, ScreenTransition};
use crate::lobby::screens::{draw_nav, draw_title};

/// State for the profile screen.
#[derive(Debug, Getters)]
pub struct ProfileScreen {
    username: String,
    record: Option<PlayerRecord>,
}

impl ProfileScreen {
    /// Creates the screen for `username`, loading their record.
    #[instrument(skip(ctx))]
    pub fn new(username: String, ctx: &LobbyContext) -> Self {
        let record = ctx.accounts.profile(&username).unwrap_or_else(|e| {
            warn!(error = %e, "Profile unavailable");
            None
        });
        Self { username, record }
    }
}

impl Screen for ProfileScreen {
    #[instrument(skip(self, frame, _ctx))]
    fn render(&self, frame: &mut Frame, _ctx: &LobbyContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(6),
                Constraint::Min(1),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(frame.area());

        draw_title(frame, chunks[0], "Profile");

        let stats = match &self.record {
            Some(record) => format!(
                "Wins: {}   Total Games: {}   Defeats: {}",
                record.wins(),
                record.total_games(),
                record.defeats()
            ),
            None => "No statistics available".to_string(),
        };
        let body = Paragraph::new(format!("Username: {}\n\n{}", self.username, stats))
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(body, chunks[1]);

        let help = Paragraph::new("l: Logout | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);

        draw_nav(frame, chunks[4], 3);
    }

    #[instrument(skip(self, key, ctx))]
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut LobbyContext) -> ScreenTransition {
        match key.code {
            KeyCode::Char('l') | KeyCode::Char('L') => {
                info!(username = %self.username, "Logging out");
                ctx.session.end_session();
                ScreenTransition::GoToLogin
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
