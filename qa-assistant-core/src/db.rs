//! SQLite-backed [`KeyValueStore`].
//!
//! The connection is opened once at startup, before the first frame is drawn,
//! and held for the life of the process. All statements are short single-row
//! upserts and deletes, so they run synchronously on the UI thread.

use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rusqlite::{Connection, OptionalExtension};

use crate::store::{KeyValueStore, StoreError};

/// Opens (or creates) the SQLite database at `path`, configures WAL mode,
/// and applies schema migrations via the `schema_version` table.
///
/// Sets `busy_timeout` via the `Connection` method (not a PRAGMA string) so the
/// setting takes effect regardless of pragma caching.
///
/// # Errors
///
/// Returns `rusqlite::Error` if the file cannot be opened, WAL configuration
/// fails, or schema DDL fails.
pub fn open_db(path: impl AsRef<Path>) -> rusqlite::Result<Connection> {
    let mut conn = Connection::open(path.as_ref())?;

    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA synchronous=NORMAL;",
    )?;
    conn.busy_timeout(Duration::from_secs(5))?;

    // Fold any WAL left over from a previous run back into the main file.
    conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;

    crate::schema::migrate(&mut conn)?;

    Ok(conn)
}

/// Returns the current Unix timestamp in seconds.
pub(crate) fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Key-value store over the `kv` table.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens the database at `path` and wraps it as a store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if [`open_db`] fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = open_db(path)?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                rusqlite::params![key],
                |r| r.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let tx = self
            .conn
            .transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                            updated_at = excluded.updated_at",
            rusqlite::params![key, value, now_secs()],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", rusqlite::params![key])?;
        Ok(())
    }
}
