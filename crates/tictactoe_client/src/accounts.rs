//! Registration, login and leaderboard.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::credentials;
use crate::store::{PlayerRecord, PlayerStore, StoreError};

/// Failure at registration or login.
#[derive(Debug, Clone, Display, Error)]
pub enum AccountError {
    /// Username or password is blank.
    #[display("Please enter a username and password")]
    Validation,
    /// A record with this username already exists.
    #[display("Username '{username}' is already taken")]
    UsernameTaken {
        /// The rejected username.
        username: String,
    },
    /// Unknown username or wrong password.
    #[display("Invalid username or password")]
    InvalidCredentials,
    /// The password could not be hashed.
    #[display("Failed to hash password: {message}")]
    Hashing {
        /// Hasher error text.
        message: String,
    },
    /// The store failed to load or save.
    #[display("{_0}")]
    Store(StoreError),
}

impl From<StoreError> for AccountError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters, new)]
pub struct LeaderboardEntry {
    username: String,
    wins: u32,
    total_games: u32,
    defeats: u32,
}

impl From<&PlayerRecord> for LeaderboardEntry {
    fn from(record: &PlayerRecord) -> Self {
        Self::new(
            record.username().clone(),
            *record.wins(),
            *record.total_games(),
            record.defeats(),
        )
    }
}

/// Trims both fields and rejects blanks.
#[instrument(skip(password))]
fn validate<'a>(username: &'a str, password: &str) -> Result<&'a str, AccountError> {
    let username = username.trim();
    if username.is_empty() || password.trim().is_empty() {
        debug!("Rejected blank credentials");
        return Err(AccountError::Validation);
    }
    Ok(username)
}

/// Service layer for player accounts.
///
/// Reads the full record collection from the store and writes it back
/// whole on registration.
#[derive(Debug, Clone)]
pub struct AccountService<S> {
    store: S,
}

impl<S: PlayerStore> AccountService<S> {
    /// Creates a new account service backed by the given store.
    #[instrument(skip(store))]
    pub fn new(store: S) -> Self {
        info!("Creating AccountService");
        Self { store }
    }

    /// Registers a new player with no games played.
    ///
    /// # Errors
    ///
    /// [`AccountError::Validation`] for blank input (nothing is read or
    /// written), [`AccountError::UsernameTaken`] for a duplicate name, or a
    /// store error.
    #[instrument(skip(self, password))]
    pub fn register(&self, username: &str, password: &str) -> Result<PlayerRecord, AccountError> {
        let username = validate(username, password)?;

        let mut records = self.store.load()?;
        if records.iter().any(|r| r.username() == username) {
            warn!(username = %username, "Username already registered");
            return Err(AccountError::UsernameTaken {
                username: username.to_string(),
            });
        }

        let hashword = credentials::hash(password).map_err(|e| AccountError::Hashing {
            message: e.to_string(),
        })?;
        let record = PlayerRecord::new(username.to_string(), hashword);
        records.push(record.clone());
        self.store.save(&records)?;

        info!(username = %username, players = records.len(), "Player registered");
        Ok(record)
    }

    /// Checks credentials and returns the player's record.
    ///
    /// # Errors
    ///
    /// [`AccountError::Validation`] for blank input,
    /// [`AccountError::InvalidCredentials`] for an unknown user or wrong
    /// password, or a store error.
    #[instrument(skip(self, password))]
    pub fn login(&self, username: &str, password: &str) -> Result<PlayerRecord, AccountError> {
        let username = validate(username, password)?;

        let record = self
            .store
            .load()?
            .into_iter()
            .find(|r| r.username() == username)
            .filter(|r| credentials::verify(password, r.password_hash()))
            .ok_or_else(|| {
                warn!(username = %username, "Login rejected");
                AccountError::InvalidCredentials
            })?;

        info!(username = %username, "Player logged in");
        Ok(record)
    }

    /// Returns a player's record, `None` if unknown.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Store`] if the store cannot be read.
    #[instrument(skip(self))]
    pub fn profile(&self, username: &str) -> Result<Option<PlayerRecord>, AccountError> {
        Ok(self
            .store
            .load()?
            .into_iter()
            .find(|r| r.username() == username))
    }

    /// Returns every player ranked by wins, then fewest defeats, then name.
    ///
    /// A store that cannot be read yields an empty leaderboard.
    #[instrument(skip(self))]
    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        let records = match self.store.load() {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Leaderboard unavailable");
                return Vec::new();
            }
        };

        let mut entries: Vec<LeaderboardEntry> = records.iter().map(LeaderboardEntry::from).collect();
        entries.sort_by(|a, b| {
            b.wins
                .cmp(&a.wins)
                .then(a.defeats.cmp(&b.defeats))
                .then_with(|| a.username.cmp(&b.username))
        });

        debug!(count = entries.len(), "Leaderboard built");
        entries
    }
}
