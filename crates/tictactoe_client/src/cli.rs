//! Command-line interface for the tic-tac-toe client.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use tictactoe_client::StoreBackend;

/// Tic-tac-toe against a random opponent, with accounts and a leaderboard
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Single-player tic-tac-toe with a leaderboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file (defaults are used if missing)
    #[arg(short, long, default_value = "tictactoe.toml", global = true)]
    pub config: PathBuf,

    /// Override the persistence backend (json, sqlite, memory)
    #[arg(long, global = true)]
    pub store_backend: Option<StoreBackend>,

    /// Override the file backing the store
    #[arg(long, global = true)]
    pub store_path: Option<PathBuf>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the terminal UI
    Play {
        /// Delay before the automated opponent moves, in milliseconds
        #[arg(long)]
        ai_delay_ms: Option<u64>,
    },

    /// Print the leaderboard
    Leaderboard,

    /// Register a player without opening the terminal UI
    Register {
        /// Username to register
        username: String,

        /// Password for the new account
        #[arg(long)]
        password: String,
    },
}
