//! Login/register screen.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, info, instrument};

use crate::lobby::screen::{LobbyContext, Screen, ScreenTransition};
use crate::lobby::screens::{draw_nav, draw_title};
use crate::{AccountError, PlayerRecord};

/// Focusable controls, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    /// Username text input.
    Username,
    /// Password text input.
    Password,
    /// Login button.
    Login,
    /// Register button.
    Register,
}

impl LoginField {
    fn next(self) -> Self {
        match self {
            Self::Username => Self::Password,
            Self::Password => Self::Login,
            Self::Login => Self::Register,
            Self::Register => Self::Username,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::Username => Self::Register,
            Self::Password => Self::Username,
            Self::Login => Self::Password,
            Self::Register => Self::Login,
        }
    }
}

/// State for the login/register screen.
#[derive(Debug, Getters)]
pub struct LoginScreen {
    username: String,
    password: String,
    focus: LoginField,
    error_message: Option<String>,
}

impl LoginScreen {
    /// Creates an empty login form.
    #[instrument]
    pub fn new() -> Self {
        debug!("Initializing LoginScreen");
        Self {
            username: String::new(),
            password: String::new(),
            focus: LoginField::Username,
            error_message: None,
        }
    }

    /// Logs in or registers from the current form, starting a session on success.
    #[instrument(skip(self, ctx), fields(username = %self.username))]
    fn submit(&mut self, register: bool, ctx: &mut LobbyContext) -> ScreenTransition {
        let outcome: Result<PlayerRecord, AccountError> = if register {
            ctx.accounts.register(&self.username, &self.password)
        } else {
            ctx.accounts.login(&self.username, &self.password)
        };

        match outcome {
            Ok(record) => {
                info!(username = %record.username(), register, "Authenticated");
                ctx.session.start_session(record.username().clone());
                self.password.clear();
                self.error_message = None;
                ScreenTransition::GoToGame
            }
            Err(e) => {
                debug!(error = %e, "Authentication failed");
                self.error_message = Some(e.to_string());
                ScreenTransition::Stay
            }
        }
    }

    fn active_input(&mut self) -> Option<&mut String> {
        match self.focus {
            LoginField::Username => Some(&mut self.username),
            LoginField::Password => Some(&mut self.password),
            LoginField::Login | LoginField::Register => None,
        }
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for LoginScreen {
    #[instrument(skip(self, frame, _ctx))]
    fn render(&self, frame: &mut Frame, _ctx: &LobbyContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(frame.area());

        draw_title(frame, chunks[0], "Register or Login");

        let field_style = |field: LoginField| {
            if self.focus == field {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            }
        };

        let username = Paragraph::new(self.username.as_str())
            .style(field_style(LoginField::Username))
            .block(Block::default().borders(Borders::ALL).title("Username"));
        frame.render_widget(username, chunks[1]);

        let masked = "*".repeat(self.password.chars().count());
        let password = Paragraph::new(masked)
            .style(field_style(LoginField::Password))
            .block(Block::default().borders(Borders::ALL).title("Password"));
        frame.render_widget(password, chunks[2]);

        let buttons = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[3]);
        for (field, label, area) in [
            (LoginField::Login, "Login", buttons[0]),
            (LoginField::Register, "Register", buttons[1]),
        ] {
            let style = if self.focus == field {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let button = Paragraph::new(label)
                .style(style)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(button, area);
        }

        let error = Paragraph::new(self.error_message.as_deref().unwrap_or(""))
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(error, chunks[4]);

        let help = Paragraph::new("Tab: Next field | Enter: Submit | Esc: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[6]);

        draw_nav(frame, chunks[7], 0);
    }

    #[instrument(skip(self, key, ctx))]
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut LobbyContext) -> ScreenTransition {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                ScreenTransition::Stay
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.previous();
                ScreenTransition::Stay
            }
            KeyCode::Enter => self.submit(self.focus == LoginField::Register, ctx),
            KeyCode::Esc => ScreenTransition::Quit,
            KeyCode::Backspace => {
                if let Some(input) = self.active_input() {
                    input.pop();
                }
                ScreenTransition::Stay
            }
            KeyCode::Char(c) => {
                if let Some(input) = self.active_input() {
                    input.push(c);
                }
                ScreenTransition::Stay
            }
            _ => ScreenTransition::Stay,
        }
    }
}
