//! Tic-tac-toe client - unified CLI.

#![warn(missing_docs)]

mod cli;

use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tictactoe_client::{
    AccountService, AnyStore, AppConfig, LobbyContext, LobbyController, SessionController,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;
    if let Some(backend) = cli.store_backend {
        config.set_store_backend(backend);
    }
    if let Some(path) = cli.store_path.clone() {
        config.set_store_path(path);
    }

    match cli.command.unwrap_or(Command::Play { ai_delay_ms: None }) {
        Command::Play { ai_delay_ms } => {
            if let Some(delay) = ai_delay_ms {
                config.set_ai_delay_ms(delay);
            }
            init_file_tracing(&config)?;
            run_lobby(&config)
        }
        Command::Leaderboard => {
            init_stderr_tracing(&config);
            print_leaderboard(&config)
        }
        Command::Register { username, password } => {
            init_stderr_tracing(&config);
            register(&config, &username, &password)
        }
    }
}

fn env_filter(config: &AppConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()))
}

/// Sends logs to the configured file; the TUI owns the terminal.
fn init_file_tracing(config: &AppConfig) -> Result<()> {
    let file = File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file().display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn init_stderr_tracing(config: &AppConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(io::stderr)
        .init();
}

/// Runs the multi-screen terminal UI.
#[instrument(skip(config))]
fn run_lobby(config: &AppConfig) -> Result<()> {
    info!(backend = %config.store_backend(), "Starting tic-tac-toe lobby");

    let store = AnyStore::from_config(config).context("Failed to open player store")?;
    let ctx = LobbyContext::new(
        AccountService::new(store.clone()),
        SessionController::new(store),
        Duration::from_millis(*config.ai_delay_ms()),
    );
    let mut controller = LobbyController::new(ctx);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = controller.run(&mut terminal);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("Lobby closed");
    result
}

/// Prints the leaderboard as a plain table.
#[instrument(skip(config))]
fn print_leaderboard(config: &AppConfig) -> Result<()> {
    let store = AnyStore::from_config(config).context("Failed to open player store")?;
    let entries = AccountService::new(store).leaderboard();

    println!("{:<20} {:>6} {:>12} {:>8}", "Username", "Wins", "Total Games", "Defeats");
    for entry in &entries {
        println!(
            "{:<20} {:>6} {:>12} {:>8}",
            entry.username(),
            entry.wins(),
            entry.total_games(),
            entry.defeats()
        );
    }
    Ok(())
}

/// Registers a player from the command line.
#[instrument(skip(config, password))]
fn register(config: &AppConfig, username: &str, password: &str) -> Result<()> {
    let store = AnyStore::from_config(config).context("Failed to open player store")?;
    let record = AccountService::new(store).register(username, password)?;
    println!("Registered {}", record.username());
    Ok(())
}
