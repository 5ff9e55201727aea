//! Thought store use-case service.
//!
//! # Responsibility
//! - Own the in-memory thought collection and the expanded-card focus.
//! - Normalize the persisted snapshot once at load.
//! - Apply submit/delete/comment mutations and persist a full snapshot after
//!   each one.
//!
//! # Invariants
//! - Blank submissions and comments are silent no-ops and never persist.
//! - A mutation whose save fails is rolled back in memory.
//! - Load normalization is never persisted implicitly; callers use
//!   `migration_pending` + `persist` to write it back.
//! - `expanded`, when set, always indexes an existing thought.

use crate::config::StoreConfig;
use crate::layout::placement::place;
use crate::model::raw_thought::{normalize_snapshot, NormalizeReport, RawThought};
use crate::model::thought::{Mood, Position, Thought};
use crate::storage::{StorageError, ThoughtStorage};
use log::{debug, info, warn};
use rand::rngs::ThreadRng;
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error raised by thought store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Snapshot read/write failure.
    Storage(StorageError),
    /// Target index does not address a thought.
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "thought index {index} out of range (len {len})")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::IndexOutOfRange { .. } => None,
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Thought collection bound to a storage slot.
pub struct ThoughtStore<S: ThoughtStorage, R: Rng = ThreadRng> {
    storage: S,
    config: StoreConfig,
    rng: R,
    thoughts: Vec<Thought>,
    expanded: Option<usize>,
    load_report: NormalizeReport,
}

impl<S: ThoughtStorage> ThoughtStore<S> {
    /// Loads the snapshot using the thread-local RNG for backfill placement.
    ///
    /// # Errors
    /// - `StoreError::Storage` when the slot cannot be read or parsed.
    pub fn load(storage: S, config: StoreConfig) -> StoreResult<Self> {
        Self::load_with_rng(storage, config, rand::thread_rng())
    }

    /// Loads the snapshot, falling back to an empty board on failure.
    pub fn load_or_default(storage: S, config: StoreConfig) -> Self {
        Self::load_or_default_with_rng(storage, config, rand::thread_rng())
    }
}

impl<S: ThoughtStorage, R: Rng> ThoughtStore<S, R> {
    /// Loads the snapshot with an explicit RNG.
    pub fn load_with_rng(storage: S, config: StoreConfig, rng: R) -> StoreResult<Self> {
        let raw = storage.load().map_err(|err| {
            warn!(
                "event=thoughts_load module=store status=error error={}",
                err
            );
            err
        })?;
        Ok(Self::from_raw(storage, config, rng, raw))
    }

    /// Loads the snapshot with an explicit RNG; read or parse failures yield
    /// an empty board.
    pub fn load_or_default_with_rng(storage: S, config: StoreConfig, rng: R) -> Self {
        let raw = match storage.load() {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    "event=thoughts_load module=store status=fallback fallback=empty error={}",
                    err
                );
                Vec::new()
            }
        };
        Self::from_raw(storage, config, rng, raw)
    }

    fn from_raw(storage: S, config: StoreConfig, mut rng: R, raw: Vec<RawThought>) -> Self {
        let raw_count = raw.len();
        let (thoughts, load_report) = normalize_snapshot(raw, &config.placement, &mut rng);
        info!(
            "event=thoughts_load module=store status=ok raw_count={} count={} legacy_strings={} backfilled={}",
            raw_count,
            thoughts.len(),
            load_report.legacy_strings,
            load_report.backfilled_positions
        );

        Self {
            storage,
            config,
            rng,
            thoughts,
            expanded: None,
            load_report,
        }
    }

    /// Current thoughts in board order.
    pub fn thoughts(&self) -> &[Thought] {
        &self.thoughts
    }

    pub fn len(&self) -> usize {
        self.thoughts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thoughts.is_empty()
    }

    /// Placements of every thought on the board.
    pub fn positions(&self) -> Vec<Position> {
        self.thoughts.iter().map(|thought| thought.position).collect()
    }

    /// Index of the card whose comment panel is open.
    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    /// What the initial load had to normalize.
    pub fn load_report(&self) -> NormalizeReport {
        self.load_report
    }

    /// Whether the stored snapshot still uses an outdated shape.
    pub fn migration_pending(&self) -> bool {
        self.load_report.migrated()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Appends a new thought placed against every thought on the board.
    ///
    /// Returns the new index, or `None` when `text` is blank.
    pub fn submit(&mut self, text: &str, mood: Option<Mood>) -> StoreResult<Option<usize>> {
        let text = text.trim();
        if text.is_empty() {
            debug!("event=thought_submit module=store status=skipped reason=blank_text");
            return Ok(None);
        }

        let placement = place(&self.positions(), &self.config.placement, &mut self.rng);
        self.thoughts
            .push(Thought::new(text, mood, placement.position));
        let index = self.thoughts.len() - 1;

        if let Err(err) = self.persist() {
            self.thoughts.pop();
            return Err(err);
        }

        info!(
            "event=thought_submit module=store status=ok index={} mood={} attempts={} overlapping={}",
            index,
            mood.map_or("none", Mood::label),
            placement.attempts,
            placement.overlapping
        );
        Ok(Some(index))
    }

    /// Removes the thought at `index` and returns it.
    ///
    /// Clears focus when the removed card was expanded; focus on a later card
    /// follows that card to its new index.
    pub fn delete(&mut self, index: usize) -> StoreResult<Thought> {
        self.check_index(index)?;

        let removed = self.thoughts.remove(index);
        if let Err(err) = self.persist() {
            self.thoughts.insert(index, removed);
            return Err(err);
        }

        self.expanded = match self.expanded {
            Some(focused) if focused == index => None,
            Some(focused) if focused > index => Some(focused - 1),
            other => other,
        };

        info!(
            "event=thought_delete module=store status=ok index={} remaining={}",
            index,
            self.thoughts.len()
        );
        Ok(removed)
    }

    /// Appends a trimmed comment to the thought at `index`.
    ///
    /// Returns `false` when `comment` is blank.
    pub fn add_comment(&mut self, index: usize, comment: &str) -> StoreResult<bool> {
        self.check_index(index)?;

        let comment = comment.trim();
        if comment.is_empty() {
            debug!(
                "event=comment_add module=store status=skipped reason=blank_comment index={}",
                index
            );
            return Ok(false);
        }

        self.thoughts[index].comments.push(comment.to_string());
        if let Err(err) = self.persist() {
            self.thoughts[index].comments.pop();
            return Err(err);
        }

        info!(
            "event=comment_add module=store status=ok index={} comment_count={}",
            index,
            self.thoughts[index].comments.len()
        );
        Ok(true)
    }

    /// Opens the comment panel of `index`, or closes it when already open.
    ///
    /// Returns the resulting focus. Focus is session state and never
    /// persisted.
    pub fn toggle_expanded(&mut self, index: usize) -> StoreResult<Option<usize>> {
        self.check_index(index)?;
        self.expanded = if self.expanded == Some(index) {
            None
        } else {
            Some(index)
        };
        Ok(self.expanded)
    }

    /// Closes any open comment panel.
    pub fn collapse(&mut self) {
        self.expanded = None;
    }

    /// Writes the full collection to storage, replacing the previous value.
    pub fn persist(&mut self) -> StoreResult<()> {
        self.storage.save(&self.thoughts).map_err(|err| {
            warn!(
                "event=snapshot_save module=store status=error count={} error={}",
                self.thoughts.len(),
                err
            );
            StoreError::from(err)
        })?;
        self.load_report = NormalizeReport::default();
        Ok(())
    }

    fn check_index(&self, index: usize) -> StoreResult<()> {
        if index >= self.thoughts.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.thoughts.len(),
            });
        }
        Ok(())
    }
}
