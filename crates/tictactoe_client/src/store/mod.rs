//! Persistence collaborators for player records.
//!
//! Every backend has the same full-overwrite contract: [`PlayerStore::load`]
//! returns the whole collection and [`PlayerStore::save`] replaces it. There
//! is no per-record update and no versioning, so the last writer wins.

mod error;
mod json_file;
mod memory;
mod models;
mod schema;
mod sqlite;

pub use error::StoreError;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use models::PlayerRecord;
pub use sqlite::SqliteStore;

use tracing::instrument;

use crate::{AppConfig, StoreBackend};

/// Key-value store of player records, keyed by username.
pub trait PlayerStore {
    /// Reads the full collection, in stored order.
    fn load(&self) -> Result<Vec<PlayerRecord>, StoreError>;

    /// Replaces the full collection with `records`.
    fn save(&self, records: &[PlayerRecord]) -> Result<(), StoreError>;
}

/// Store selected at runtime from configuration.
#[derive(Debug, Clone)]
pub enum AnyStore {
    /// JSON file backend.
    Json(JsonFileStore),
    /// SQLite backend.
    Sqlite(SqliteStore),
    /// Volatile backend, nothing survives the process.
    Memory(MemoryStore),
}

impl AnyStore {
    /// Opens the backend named by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a SQLite database cannot be opened.
    #[instrument(skip(config), fields(backend = %config.store_backend()))]
    pub fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        Ok(match config.store_backend() {
            StoreBackend::Json => Self::Json(JsonFileStore::new(config.store_path())),
            StoreBackend::Sqlite => Self::Sqlite(SqliteStore::open(
                config.store_path().to_string_lossy().into_owned(),
            )?),
            StoreBackend::Memory => Self::Memory(MemoryStore::new()),
        })
    }
}

impl PlayerStore for AnyStore {
    fn load(&self) -> Result<Vec<PlayerRecord>, StoreError> {
        match self {
            Self::Json(store) => store.load(),
            Self::Sqlite(store) => store.load(),
            Self::Memory(store) => store.load(),
        }
    }

    fn save(&self, records: &[PlayerRecord]) -> Result<(), StoreError> {
        match self {
            Self::Json(store) => store.save(records),
            Self::Sqlite(store) => store.save(records),
            Self::Memory(store) => store.save(records),
        }
    }
}
