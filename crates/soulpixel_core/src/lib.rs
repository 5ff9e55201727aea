//! Core domain logic for the Soul Pixel thought board.
//! This crate is the single source of truth for thought invariants.

pub mod config;
pub mod db;
pub mod layout;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;

pub use config::{PlacementConfig, StoreConfig, APP_TAGLINE, APP_TITLE, DEFAULT_STORAGE_KEY};
pub use layout::placement::{generate_non_overlapping_position, place, Placement};
pub use layout::sky::{generate_star_field, Star, STAR_FIELD_SIZE};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::raw_thought::{NormalizeReport, RawThought, StoredThought};
pub use model::thought::{format_percent, mood_tint, Mood, Position, Thought};
pub use service::thought_store::{StoreError, StoreResult, ThoughtStore};
pub use storage::memory_storage::MemoryThoughtStorage;
pub use storage::sqlite_storage::SqliteThoughtStorage;
pub use storage::{StorageError, StorageResult, ThoughtStorage};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
