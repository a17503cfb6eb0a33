//! Tests for the lobby screens and navigation.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::TestBackend};
use tictactoe_client::{
    AccountService, ActiveScreen, AnyStore, GameResult, GameScreen, LobbyContext, LobbyController,
    LoginField, Mark, MemoryStore, Position, Screen, ScreenTransition, SessionController, Square,
};

fn context(seed: u64) -> LobbyContext {
    let store = AnyStore::Memory(MemoryStore::new());
    LobbyContext::new(
        AccountService::new(store.clone()),
        SessionController::with_rng(store, StdRng::seed_from_u64(seed)),
        Duration::ZERO,
    )
}

fn press(controller: &mut LobbyController, code: KeyCode) -> bool {
    controller.handle_key(KeyEvent::from(code))
}

fn type_text(controller: &mut LobbyController, text: &str) {
    for c in text.chars() {
        assert!(press(controller, KeyCode::Char(c)));
    }
}

/// Fills the login form and submits it with the Register button.
fn register_through_form(controller: &mut LobbyController, username: &str) {
    type_text(controller, username);
    press(controller, KeyCode::Tab);
    type_text(controller, "secret");
    press(controller, KeyCode::Tab);
    press(controller, KeyCode::Tab);
    press(controller, KeyCode::Enter);
}

fn rendered(screen: &dyn Screen, ctx: &LobbyContext) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
    terminal.draw(|f| screen.render(f, ctx)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn test_starts_on_login() {
    let controller = LobbyController::new(context(1));
    assert!(matches!(controller.screen(), ActiveScreen::Login(_)));
}

#[test]
fn test_game_and_profile_require_login() {
    let mut controller = LobbyController::new(context(1));

    assert!(press(&mut controller, KeyCode::F(2)));
    assert!(matches!(controller.screen(), ActiveScreen::Login(_)));
    assert!(press(&mut controller, KeyCode::F(4)));
    assert!(matches!(controller.screen(), ActiveScreen::Login(_)));

    assert!(press(&mut controller, KeyCode::F(3)));
    assert!(matches!(controller.screen(), ActiveScreen::Leaderboard(_)));
}

#[test]
fn test_blank_login_shows_message() {
    let mut controller = LobbyController::new(context(1));
    press(&mut controller, KeyCode::Enter);

    let ActiveScreen::Login(login) = controller.screen() else {
        panic!("expected login screen");
    };
    assert_eq!(
        login.error_message().as_deref(),
        Some("Please enter a username and password")
    );
}

#[test]
fn test_focus_cycles_through_form() {
    let mut controller = LobbyController::new(context(1));
    for expected in [
        LoginField::Password,
        LoginField::Login,
        LoginField::Register,
        LoginField::Username,
    ] {
        press(&mut controller, KeyCode::Tab);
        let ActiveScreen::Login(login) = controller.screen() else {
            panic!("expected login screen");
        };
        assert_eq!(*login.focus(), expected);
    }
}

#[test]
fn test_register_starts_session_and_opens_game() {
    let mut controller = LobbyController::new(context(1));
    register_through_form(&mut controller, "alice");

    assert!(matches!(controller.screen(), ActiveScreen::Game(_)));
    assert_eq!(controller.context().session.active_username(), Some("alice"));

    assert!(press(&mut controller, KeyCode::F(4)));
    let ActiveScreen::Profile(profile) = controller.screen() else {
        panic!("expected profile screen");
    };
    assert_eq!(profile.username(), "alice");
    assert_eq!(profile.record().as_ref().map(|r| *r.total_games()), Some(0));
}

#[test]
fn test_logout_from_profile() {
    let mut controller = LobbyController::new(context(1));
    register_through_form(&mut controller, "alice");
    press(&mut controller, KeyCode::F(4));
    press(&mut controller, KeyCode::Char('l'));

    assert!(matches!(controller.screen(), ActiveScreen::Login(_)));
    assert_eq!(controller.context().session.active_username(), None);
}

#[test]
fn test_quit_keys() {
    let mut controller = LobbyController::new(context(1));
    assert!(!press(&mut controller, KeyCode::Esc));

    let mut controller = LobbyController::new(context(1));
    register_through_form(&mut controller, "alice");
    assert!(!press(&mut controller, KeyCode::Char('q')));
}

#[test]
fn test_game_screen_digit_then_automated_reply() {
    let mut ctx = context(9);
    ctx.session.start_session("alice".to_string());
    let mut screen = GameScreen::new();

    let transition = screen.handle_key(KeyEvent::from(KeyCode::Char('5')), &mut ctx);
    assert_eq!(transition, ScreenTransition::Stay);
    assert_eq!(
        ctx.session.engine().board().get(Position::Center),
        Square::Occupied(Mark::X)
    );
    assert!(screen.automated_turn_due().is_some());

    screen.tick(&mut ctx);
    assert_eq!(ctx.session.engine().history().len(), 2);
    assert_eq!(ctx.session.engine().current_player(), Mark::X);
    assert!(screen.automated_turn_due().is_none());
}

#[test]
fn test_game_screen_reports_occupied_square() {
    let mut ctx = context(9);
    ctx.session.start_session("alice".to_string());
    let mut screen = GameScreen::new();

    screen.handle_key(KeyEvent::from(KeyCode::Enter), &mut ctx);
    screen.tick(&mut ctx);
    screen.handle_key(KeyEvent::from(KeyCode::Char(' ')), &mut ctx);

    assert_eq!(screen.message().as_deref(), Some("square is already occupied"));
    assert_eq!(ctx.session.engine().history().len(), 2);
}

#[test]
fn test_game_screen_plays_to_completion() {
    let mut ctx = context(4);
    ctx.session.start_session("alice".to_string());
    let mut screen = GameScreen::new();

    while !ctx.session.engine().result().is_terminal() {
        let next = Position::valid_moves(ctx.session.engine().board())[0];
        let key = char::from_digit(next.to_index() as u32 + 1, 10).unwrap();
        screen.handle_key(KeyEvent::from(KeyCode::Char(key)), &mut ctx);
        screen.tick(&mut ctx);
    }

    let result = ctx.session.engine().result();
    let score = ctx.session.score();
    assert_eq!(score.get(Mark::X) + score.get(Mark::O), u32::from(result != GameResult::Draw));

    let text = rendered(&screen, &ctx);
    assert!(text.contains(result.label()));

    screen.handle_key(KeyEvent::from(KeyCode::Char('n')), &mut ctx);
    assert_eq!(ctx.session.engine().result(), GameResult::InProgress);
    assert_eq!(ctx.session.score(), score);
}

#[test]
fn test_game_screen_shows_username_and_score() {
    let mut ctx = context(2);
    ctx.session.start_session("alice".to_string());
    let text = rendered(&GameScreen::new(), &ctx);

    assert!(text.contains("Current Username: alice"));
    assert!(text.contains("Current Win/Loss Balance: X: 0 - O: 0"));
}
