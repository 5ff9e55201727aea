//! SQLite-backed snapshot slot.
//!
//! # Responsibility
//! - Map the single snapshot slot onto one `kv_slots` row.
//! - Keep SQL details inside the storage boundary.
//!
//! # Invariants
//! - Only connections with the latest schema version are accepted.
//! - `save` upserts the whole snapshot in one statement.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::raw_thought::RawThought;
use crate::model::thought::Thought;
use crate::storage::snapshot::{decode_snapshot, encode_snapshot};
use crate::storage::{StorageResult, ThoughtStorage};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

/// Snapshot slot stored in the `kv_slots` table.
pub struct SqliteThoughtStorage<'conn> {
    conn: &'conn Connection,
    key: String,
}

impl<'conn> SqliteThoughtStorage<'conn> {
    /// Binds a storage slot to a migrated connection.
    ///
    /// # Errors
    /// - `DbError::SchemaNotMigrated` when the connection did not come from
    ///   `open_db`/`open_db_in_memory`.
    pub fn try_new(conn: &'conn Connection, key: impl Into<String>) -> StorageResult<Self> {
        let db_version = current_user_version(conn)?;
        let expected = latest_version();
        if db_version != expected {
            return Err(DbError::SchemaNotMigrated {
                db_version,
                expected,
            }
            .into());
        }

        Ok(Self {
            conn,
            key: key.into(),
        })
    }

    /// Slot key this storage reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw snapshot text currently stored, if any.
    pub fn read_raw(&self) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [self.key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Overwrites the slot with raw text, bypassing the codec.
    pub fn write_raw(&self, text: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.key.as_str(), text],
        )?;
        Ok(())
    }
}

impl ThoughtStorage for SqliteThoughtStorage<'_> {
    fn load(&self) -> StorageResult<Vec<RawThought>> {
        match self.read_raw()? {
            Some(text) => decode_snapshot(&text),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, thoughts: &[Thought]) -> StorageResult<()> {
        let text = encode_snapshot(thoughts)?;
        self.write_raw(&text)?;
        debug!(
            "event=snapshot_save module=storage status=ok backend=sqlite key={} count={} bytes={}",
            self.key(),
            thoughts.len(),
            text.len()
        );
        Ok(())
    }
}
