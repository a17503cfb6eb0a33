//! In-memory player store.

use std::sync::{Arc, Mutex};

use tracing::{debug, instrument};

use crate::store::{PlayerRecord, PlayerStore, StoreError};

/// Player store kept in memory.
///
/// Clones share the same collection, so an account service and a session
/// controller built from clones of one store see each other's writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<Vec<PlayerRecord>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `records`.
    #[instrument(skip(records), fields(count = records.len()))]
    pub fn with_records(records: Vec<PlayerRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }
}

impl PlayerStore for MemoryStore {
    #[instrument(skip(self))]
    fn load(&self) -> Result<Vec<PlayerRecord>, StoreError> {
        let records = self
            .records
            .lock()
            .map_err(|_| StoreError::new("Memory store lock poisoned"))?;
        debug!(count = records.len(), "Loaded records from memory");
        Ok(records.clone())
    }

    #[instrument(skip(self, records), fields(count = records.len()))]
    fn save(&self, records: &[PlayerRecord]) -> Result<(), StoreError> {
        let mut stored = self
            .records
            .lock()
            .map_err(|_| StoreError::new("Memory store lock poisoned"))?;
        *stored = records.to_vec();
        debug!("Replaced records in memory");
        Ok(())
    }
}
