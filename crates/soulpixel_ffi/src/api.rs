//! FFI use-case API for the board UI shell.
//!
//! # Responsibility
//! - Expose stable board operations (list, submit, delete, comment) to Dart
//!   via FRB.
//! - Expose render-only data (mood catalogue, star field, branding).
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call opens the snapshot slot, applies one operation, and returns;
//!   expanded-card focus is owned by the UI.
//! - A corrupt snapshot degrades to an empty board instead of an error.

use log::warn;
use soulpixel_core::db::open_db;
use soulpixel_core::{
    core_version as core_version_inner, format_percent, generate_star_field,
    init_logging as init_logging_inner, mood_tint, ping as ping_inner, Mood, SqliteThoughtStorage, StoreConfig, StoreResult, Thought,
    ThoughtStore, APP_TAGLINE, APP_TITLE, STAR_FIELD_SIZE,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const STORE_DB_FILE_NAME: &str = "soulpixel_board.sqlite3";
const STAR_FIELD_MAX: u32 = 500;
static STORE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Header branding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardBranding {
    pub title: String,
    pub tagline: String,
}

/// Selector entry for the submission form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodOption {
    /// Emoji sent back to `thought_submit`.
    pub emoji: String,
    pub label: String,
}

/// One thought as rendered by a cloud/card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThoughtItem {
    /// Board index used by delete/comment calls.
    pub index: u32,
    pub text: String,
    /// Mood emoji, when tagged.
    pub mood: Option<String>,
    pub comments: Vec<String>,
    /// CSS-ready vertical offset (`NN.NN%`).
    pub top: String,
    /// CSS-ready horizontal offset (`NN.NN%`).
    pub left: String,
    /// Card background tint.
    pub tint: String,
}

/// Board listing envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThoughtListResponse {
    pub items: Vec<ThoughtItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope for board mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThoughtActionResponse {
    /// Whether the operation succeeded. Silent no-ops count as success.
    pub ok: bool,
    /// Whether the board changed.
    pub changed: bool,
    /// Affected board index, when any.
    pub index: Option<u32>,
    pub message: String,
}

impl ThoughtActionResponse {
    fn applied(message: impl Into<String>, index: usize) -> Self {
        Self {
            ok: true,
            changed: true,
            index: Some(index_to_u32(index)),
            message: message.into(),
        }
    }

    fn ignored(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            changed: false,
            index: None,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            changed: false,
            index: None,
            message: message.into(),
        }
    }
}

/// Background star.
#[derive(Debug, Clone, PartialEq)]
pub struct StarItem {
    pub top: String,
    pub left: String,
    pub size_px: f64,
}

/// Returns header branding strings.
#[flutter_rust_bridge::frb(sync)]
pub fn board_branding() -> BoardBranding {
    BoardBranding {
        title: APP_TITLE.to_string(),
        tagline: APP_TAGLINE.to_string(),
    }
}

/// Returns the mood selector entries in display order.
#[flutter_rust_bridge::frb(sync)]
pub fn mood_options() -> Vec<MoodOption> {
    Mood::ALL
        .into_iter()
        .map(|mood| MoodOption {
            emoji: mood.emoji().to_string(),
            label: mood.label().to_string(),
        })
        .collect()
}

/// Generates background stars; `None` or `0` uses the default field size.
#[flutter_rust_bridge::frb(sync)]
pub fn star_field(count: Option<u32>) -> Vec<StarItem> {
    let count = match count {
        Some(0) | None => STAR_FIELD_SIZE,
        Some(value) => value.min(STAR_FIELD_MAX) as usize,
    };
    generate_star_field(count, &mut rand::thread_rng())
        .into_iter()
        .map(|star| StarItem {
            top: format_percent(star.top),
            left: format_percent(star.left),
            size_px: star.size_px,
        })
        .collect()
}

/// Lists every thought on the board.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Writes the snapshot back once when it still uses a legacy shape, so
///   backfilled placements stay stable across calls.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn thoughts_list() -> ThoughtListResponse {
    let result = with_thought_store(|store| {
        if store.migration_pending() {
            store.persist()?;
        }
        Ok(store
            .thoughts()
            .iter()
            .enumerate()
            .map(|(index, thought)| to_thought_item(index, thought))
            .collect::<Vec<_>>())
    });

    match result {
        Ok(items) => {
            let message = if items.is_empty() {
                "No thoughts yet.".to_string()
            } else {
                format!("Found {} thought(s).", items.len())
            };
            ThoughtListResponse { items, message }
        }
        Err(err) => ThoughtListResponse {
            items: Vec::new(),
            message: format!("thoughts_list failed: {err}"),
        },
    }
}

/// Posts a new thought.
///
/// Input semantics:
/// - `text`: trimmed; blank text is ignored.
/// - `mood`: emoji or label from `mood_options`; `None`/blank means no mood.
///
/// # FFI contract
/// - Unknown moods fail without touching the board.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn thought_submit(text: String, mood: Option<String>) -> ThoughtActionResponse {
    let mood = match mood.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => match Mood::parse(value) {
            Some(parsed) => Some(parsed),
            None => {
                return ThoughtActionResponse::failure(format!(
                    "thought_submit failed: unknown mood `{value}`"
                ))
            }
        },
    };

    match with_thought_store(|store| store.submit(&text, mood)) {
        Ok(Some(index)) => ThoughtActionResponse::applied("Thought added.", index),
        Ok(None) => ThoughtActionResponse::ignored("Empty thought ignored."),
        Err(err) => ThoughtActionResponse::failure(format!("thought_submit failed: {err}")),
    }
}

/// Deletes the thought at `index`.
#[flutter_rust_bridge::frb(sync)]
pub fn thought_delete(index: u32) -> ThoughtActionResponse {
    let index = index as usize;
    match with_thought_store(|store| store.delete(index)) {
        Ok(_) => ThoughtActionResponse::applied("Thought deleted.", index),
        Err(err) => ThoughtActionResponse::failure(format!("thought_delete failed: {err}")),
    }
}

/// Appends a comment to the thought at `index`; blank comments are ignored.
#[flutter_rust_bridge::frb(sync)]
pub fn thought_add_comment(index: u32, comment: String) -> ThoughtActionResponse {
    let index = index as usize;
    match with_thought_store(|store| store.add_comment(index, &comment)) {
        Ok(true) => ThoughtActionResponse::applied("Comment added.", index),
        Ok(false) => ThoughtActionResponse::ignored("Empty comment ignored."),
        Err(err) => ThoughtActionResponse::failure(format!("thought_add_comment failed: {err}")),
    }
}

fn resolve_store_db_path() -> PathBuf {
    STORE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("SOULPIXEL_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STORE_DB_FILE_NAME)
        })
        .clone()
}

fn with_thought_store<T>(
    f: impl FnOnce(&mut ThoughtStore<SqliteThoughtStorage<'_>>) -> StoreResult<T>,
) -> Result<T, String> {
    let db_path = resolve_store_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("board DB open failed: {err}"))?;
    let config = StoreConfig::default();
    let storage = SqliteThoughtStorage::try_new(&conn, config.storage_key.as_str())
        .map_err(|err| format!("board storage init failed: {err}"))?;
    let mut store = ThoughtStore::load_or_default(storage, config);
    f(&mut store).map_err(|err| {
        warn!("event=ffi_call module=ffi status=error error={}", err);
        err.to_string()
    })
}

fn to_thought_item(index: usize, thought: &Thought) -> ThoughtItem {
    ThoughtItem {
        index: index_to_u32(index),
        text: thought.text.clone(),
        mood: thought.mood.map(|mood| mood.emoji().to_string()),
        comments: thought.comments.clone(),
        top: thought.position.top_css(),
        left: thought.position.left_css(),
        tint: mood_tint(thought.mood).to_string(),
    }
}

fn index_to_u32(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}
