//! Game screen: the board, the session score and the result banner.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tictactoe_engine::{GameResult, Position};
use tracing::{debug, info, instrument, warn};

use crate::HUMAN_MARK;
use crate::lobby::board::draw_board;
use crate::lobby::input::{digit_position, move_cursor};
use crate::lobby::screen::{LobbyContext, Screen, ScreenTransition};
use crate::lobby::screens::{draw_nav, draw_title};

/// State for the game screen.
///
/// The automated reply is delayed by scheduling it for a later
/// [`Screen::tick`]; the engine is untouched until then.
#[derive(Debug, Getters)]
pub struct GameScreen {
    cursor: Position,
    message: Option<String>,
    automated_turn_due: Option<Instant>,
}

impl GameScreen {
    /// Creates a game screen with the cursor in the center.
    #[instrument]
    pub fn new() -> Self {
        debug!("Initializing GameScreen");
        Self {
            cursor: Position::Center,
            message: None,
            automated_turn_due: None,
        }
    }

    /// Tries the human move at `pos`.
    #[instrument(skip(self, ctx))]
    fn place(&mut self, pos: Position, ctx: &mut LobbyContext) {
        self.cursor = pos;
        match ctx.session.player_move(pos.to_index()) {
            Ok(()) => {
                self.message = None;
                if ctx.session.engine().result().is_terminal() {
                    self.conclude(ctx);
                } else {
                    self.automated_turn_due = Some(Instant::now() + ctx.ai_delay);
                }
            }
            Err(e) => {
                debug!(error = %e, "Move rejected");
                self.message = Some(e.reason().to_string());
            }
        }
    }

    fn conclude(&mut self, ctx: &mut LobbyContext) {
        match ctx.session.on_game_concluded() {
            Ok(Some(result)) => info!(result = ?result, "Game recorded"),
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "Failed to record game");
                self.message = Some("Result could not be saved".to_string());
            }
        }
    }

    fn banner(result: GameResult) -> (String, Color) {
        match result {
            GameResult::InProgress => (String::new(), Color::White),
            GameResult::Draw => (result.label().to_string(), Color::Yellow),
            GameResult::XWins | GameResult::OWins => (result.label().to_string(), Color::Green),
        }
    }
}

impl Default for GameScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for GameScreen {
    #[instrument(skip(self, frame, ctx))]
    fn render(&self, frame: &mut Frame, ctx: &LobbyContext) {
        let snapshot = ctx.session.snapshot();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Min(11),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(frame.area());

        draw_title(frame, chunks[0], "Game Scene");

        let info_text = format!(
            "Current Win/Loss Balance: {}\nCurrent Username: {}",
            snapshot.score(),
            snapshot.username().as_deref().unwrap_or("")
        );
        let info = Paragraph::new(info_text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(info, chunks[1]);

        let cursor = (!snapshot.result().is_terminal()).then_some(self.cursor);
        draw_board(frame, chunks[2], snapshot.board(), cursor);

        let (status, color) = match (&self.message, *snapshot.result()) {
            (Some(msg), _) => (msg.clone(), Color::Red),
            (None, GameResult::InProgress) if self.automated_turn_due.is_some() => {
                ("O is thinking...".to_string(), Color::Yellow)
            }
            (None, GameResult::InProgress) => {
                (format!("{} to move", snapshot.current_player()), Color::White)
            }
            (None, result) => Self::banner(result),
        };
        let status = Paragraph::new(status)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, chunks[3]);

        let help_text = if snapshot.result().is_terminal() {
            "n: New Game | q: Quit"
        } else {
            "Arrows: Move | Enter/Space: Place | 1-9: Place | n: New Game | q: Quit"
        };
        let help = Paragraph::new(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[4]);

        draw_nav(frame, chunks[5], 1);
    }

    #[instrument(skip(self, key, ctx))]
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut LobbyContext) -> ScreenTransition {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            KeyCode::Char('n') | KeyCode::Char('N') => {
                ctx.session.new_game();
                self.automated_turn_due = None;
                self.message = None;
                ScreenTransition::Stay
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.place(self.cursor, ctx);
                ScreenTransition::Stay
            }
            code @ (KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down) => {
                self.cursor = move_cursor(self.cursor, code);
                ScreenTransition::Stay
            }
            code => {
                if let Some(pos) = digit_position(code) {
                    self.place(pos, ctx);
                }
                ScreenTransition::Stay
            }
        }
    }

    fn tick(&mut self, ctx: &mut LobbyContext) {
        let engine = ctx.session.engine();
        if engine.result().is_terminal() || engine.current_player() == HUMAN_MARK {
            self.automated_turn_due = None;
            return;
        }

        let due = *self
            .automated_turn_due
            .get_or_insert_with(|| Instant::now() + ctx.ai_delay);
        if Instant::now() < due {
            return;
        }

        self.automated_turn_due = None;
        if let Some(pos) = ctx.session.maybe_run_automated_turn() {
            debug!(position = %pos, "Automated turn played");
        }
        self.conclude(ctx);
    }
}
