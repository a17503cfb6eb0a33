//! Leaderboard screen: every registered player's record.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use tracing::{debug, info, instrument};

use crate::LeaderboardEntry;
use crate::lobby::screen::{LobbyContext, Screen, ScreenTransition};
use crate::lobby::screens::{draw_nav, draw_title};

/// State for the leaderboard screen.
#[derive(Debug, Getters)]
pub struct LeaderboardScreen {
    entries: Vec<LeaderboardEntry>,
}

impl LeaderboardScreen {
    /// Creates the screen, loading the leaderboard immediately.
    #[instrument(skip(ctx))]
    pub fn new(ctx: &LobbyContext) -> Self {
        let entries = ctx.accounts.leaderboard();
        info!(players = entries.len(), "LeaderboardScreen initialized");
        Self { entries }
    }
}

impl Screen for LeaderboardScreen {
    #[instrument(skip(self, frame, ctx))]
    fn render(&self, frame: &mut Frame, ctx: &LobbyContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(frame.area());

        draw_title(frame, chunks[0], "Leaderboard");

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let header = Row::new(vec![
            Cell::from("Username").style(bold),
            Cell::from("Wins").style(bold),
            Cell::from("Total Games").style(bold),
            Cell::from("Defeats").style(bold),
        ])
        .style(Style::default().fg(Color::Yellow));

        let active = ctx.session.active_username();
        let rows: Vec<Row> = self
            .entries
            .iter()
            .map(|entry| {
                let style = if active == Some(entry.username().as_str()) {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(entry.username().as_str()),
                    Cell::from(entry.wins().to_string()),
                    Cell::from(entry.total_games().to_string()),
                    Cell::from(entry.defeats().to_string()),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ];

        let title = if self.entries.is_empty() {
            "No players yet"
        } else {
            "Players"
        };
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(table, chunks[1]);

        let help = Paragraph::new("r: Refresh | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);

        draw_nav(frame, chunks[3], 2);
    }

    #[instrument(skip(self, key, ctx))]
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut LobbyContext) -> ScreenTransition {
        match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.entries = ctx.accounts.leaderboard();
                debug!(players = self.entries.len(), "Leaderboard refreshed");
                ScreenTransition::Stay
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
