//! Snapshot storage capability and backends.
//!
//! # Responsibility
//! - Define the injected storage contract used by the thought store.
//! - Share one JSON snapshot codec across every backend.
//!
//! # Invariants
//! - `save` replaces the stored snapshot wholesale; there are no partial
//!   writes or incremental diffs.
//! - An absent slot loads as an empty snapshot.
//! - Malformed snapshot text surfaces as `StorageError::Parse`; callers pick
//!   the fallback policy.

use crate::db::DbError;
use crate::model::raw_thought::RawThought;
use crate::model::thought::Thought;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory_storage;
pub mod snapshot;
pub mod sqlite_storage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by snapshot storage backends.
#[derive(Debug)]
pub enum StorageError {
    /// Stored snapshot is not valid snapshot JSON.
    Parse(serde_json::Error),
    /// Persistence transport failure.
    Db(DbError),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "malformed thought snapshot: {err}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Db(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for the persisted thought snapshot.
pub trait ThoughtStorage {
    /// Reads the raw snapshot; an absent slot yields an empty list.
    fn load(&self) -> StorageResult<Vec<RawThought>>;
    /// Replaces the stored snapshot with `thoughts`.
    fn save(&mut self, thoughts: &[Thought]) -> StorageResult<()>;
}

impl<S: ThoughtStorage + ?Sized> ThoughtStorage for &mut S {
    fn load(&self) -> StorageResult<Vec<RawThought>> {
        (**self).load()
    }

    fn save(&mut self, thoughts: &[Thought]) -> StorageResult<()> {
        (**self).save(thoughts)
    }
}
