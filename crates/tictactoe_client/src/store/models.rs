//! Player record model.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Persisted account and lifetime statistics for one player.
///
/// `password_hash` is an Argon2 PHC string, never the plaintext password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    username: String,
    password_hash: String,
    wins: u32,
    total_games: u32,
}

impl PlayerRecord {
    /// Creates a record for a newly registered player with no games played.
    #[instrument(skip(password_hash))]
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
            wins: 0,
            total_games: 0,
        }
    }

    /// Restores a record with existing statistics.
    pub fn with_stats(username: String, password_hash: String, wins: u32, total_games: u32) -> Self {
        Self {
            username,
            password_hash,
            wins,
            total_games,
        }
    }

    /// Games played that were not won (losses and draws).
    pub fn defeats(&self) -> u32 {
        self.total_games.saturating_sub(self.wins)
    }

    /// Counts one finished game, and a win if `won`.
    #[instrument(skip(self), fields(username = %self.username))]
    pub fn record_game(&mut self, won: bool) {
        self.total_games += 1;
        if won {
            self.wins += 1;
        }
    }
}
