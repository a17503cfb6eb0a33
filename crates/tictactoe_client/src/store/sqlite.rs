//! Player store backed by a SQLite database.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::store::{PlayerRecord, PlayerStore, StoreError, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Row shape of the `players` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = schema::players)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct PlayerRow {
    username: String,
    password_hash: String,
    wins: i32,
    total_games: i32,
    position: i32,
}

impl PlayerRow {
    #[track_caller]
    fn from_record(record: &PlayerRecord, position: usize) -> Result<Self, StoreError> {
        let to_i32 = |value: u32, column: &str| {
            i32::try_from(value)
                .map_err(|_| StoreError::new(format!("{} out of range: {}", column, value)))
        };
        Ok(Self {
            username: record.username().clone(),
            password_hash: record.password_hash().clone(),
            wins: to_i32(*record.wins(), "wins")?,
            total_games: to_i32(*record.total_games(), "total_games")?,
            position: i32::try_from(position)
                .map_err(|_| StoreError::new(format!("position out of range: {}", position)))?,
        })
    }

    #[track_caller]
    fn into_record(self) -> Result<PlayerRecord, StoreError> {
        let to_u32 = |value: i32, column: &str| {
            u32::try_from(value)
                .map_err(|_| StoreError::new(format!("negative {} for '{}'", column, self.username)))
        };
        let wins = to_u32(self.wins, "wins")?;
        let total_games = to_u32(self.total_games, "total_games")?;
        Ok(PlayerRecord::with_stats(
            self.username,
            self.password_hash,
            wins,
            total_games,
        ))
    }
}

/// Player store kept in a SQLite `players` table.
///
/// Pending migrations are applied by [`SqliteStore::open`]. Each call opens
/// its own connection, so use a file path rather than `":memory:"`.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `db_path` and migrates it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, StoreError> {
        info!(path = %db_path, "Opening SqliteStore");
        let store = Self { db_path };
        let mut conn = store.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::new(format!("Migrations failed: {}", e)))?;
        debug!(applied = applied.len(), "Migrations applied");
        Ok(store)
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path).map_err(|e| {
            StoreError::new(format!("Failed to connect to '{}': {}", self.db_path, e))
        })
    }
}

impl PlayerStore for SqliteStore {
    #[instrument(skip(self))]
    fn load(&self) -> Result<Vec<PlayerRecord>, StoreError> {
        let mut conn = self.connection()?;

        let rows = schema::players::table
            .order(schema::players::position.asc())
            .select(PlayerRow::as_select())
            .load::<PlayerRow>(&mut conn)?;

        debug!(count = rows.len(), "Loaded player rows");
        rows.into_iter().map(PlayerRow::into_record).collect()
    }

    #[instrument(skip(self, records), fields(count = records.len()))]
    fn save(&self, records: &[PlayerRecord]) -> Result<(), StoreError> {
        let rows = records
            .iter()
            .enumerate()
            .map(|(position, record)| PlayerRow::from_record(record, position))
            .collect::<Result<Vec<_>, _>>()?;

        let mut conn = self.connection()?;
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::delete(schema::players::table).execute(conn)?;
            for row in &rows {
                diesel::insert_into(schema::players::table)
                    .values(row)
                    .execute(conn)?;
            }
            Ok(())
        })?;

        info!(count = rows.len(), "Player table replaced");
        Ok(())
    }
}
