//! Individual screens of the lobby state machine.

mod game;
mod leaderboard;
mod login;
mod profile;

pub use game::GameScreen;
pub use leaderboard::LeaderboardScreen;
pub use login::{LoginField, LoginScreen};
pub use profile::ProfileScreen;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Tabs of the navigation bar, in F-key order.
const NAV_TABS: [&str; 4] = ["F1 Authorization", "F2 Game", "F3 Leaderboard", "F4 Profile"];

/// Draws the navigation bar with tab `active` (0-3) highlighted.
pub(crate) fn draw_nav(frame: &mut Frame, area: Rect, active: usize) {
    let mut spans = Vec::with_capacity(NAV_TABS.len() * 2);
    for (i, tab) in NAV_TABS.iter().enumerate() {
        let style = if i == active {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", tab), style));
        spans.push(Span::raw(" "));
    }

    let nav = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(nav, area);
}

/// Draws a bold centered title.
pub(crate) fn draw_title(frame: &mut Frame, area: Rect, title: &str) {
    let title = Paragraph::new(title.to_string())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}
