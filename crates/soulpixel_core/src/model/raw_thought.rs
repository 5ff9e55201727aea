//! Persisted thought shapes and load-time normalization.
//!
//! # Responsibility
//! - Accept every historical snapshot shape (bare string, object without
//!   placement, current object).
//! - Normalize raw entries into canonical `Thought` values in one pass.
//! - Produce the current wire shape for writes.
//!
//! # Invariants
//! - Every field except `text` is read loosely: an unusable `mood`,
//!   `comments` entry or placement degrades to its default instead of
//!   failing the snapshot. An object without string `text` is a parse error.
//! - Loaded placements lie inside the placement domain; stored values
//!   outside it are backfilled like missing ones.
//! - Backfilled placements are seeded by positions assigned earlier in the
//!   same pass, so entries loaded together avoid each other.
//! - Writes always emit the current shape with `comments`, `top`, `left`.

use crate::config::PlacementConfig;
use crate::layout::placement::{in_domain, place};
use crate::model::thought::{format_percent, parse_percent, Mood, Position, Thought};
use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One persisted snapshot entry, in any supported historical shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawThought {
    /// Earliest shape: the thought text only.
    Legacy(String),
    /// Object shape; placement and comments may be missing.
    Record(StoredThought),
}

/// Object shape of a persisted thought.
///
/// Everything except `text` is kept as loose JSON so numeric or malformed
/// values degrade during normalization instead of rejecting the whole
/// snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredThought {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Value>,
}

impl From<&Thought> for StoredThought {
    fn from(thought: &Thought) -> Self {
        Self {
            text: thought.text.clone(),
            mood: thought
                .mood
                .map(|mood| Value::String(mood.emoji().to_string())),
            comments: Some(Value::Array(
                thought.comments.iter().cloned().map(Value::String).collect(),
            )),
            top: Some(Value::String(format_percent(thought.position.top()))),
            left: Some(Value::String(format_percent(thought.position.left()))),
        }
    }
}

/// Counters collected while normalizing one snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Bare-string entries wrapped into records.
    pub legacy_strings: usize,
    /// Records whose placement was computed during load.
    pub backfilled_positions: usize,
    /// Stored moods outside the catalogue, dropped to `None`.
    pub unknown_moods: usize,
    /// Entries skipped because their text was blank.
    pub skipped_blank: usize,
    /// Non-string comment entries, or a non-list `comments` field, dropped.
    pub dropped_comments: usize,
}

impl NormalizeReport {
    /// Returns whether normalization changed anything a re-save would fix.
    pub fn migrated(&self) -> bool {
        self.legacy_strings > 0
            || self.backfilled_positions > 0
            || self.unknown_moods > 0
            || self.skipped_blank > 0
            || self.dropped_comments > 0
    }
}

/// Normalizes a raw snapshot into canonical thoughts.
///
/// Entries keep their stored order. Placement for entries lacking one is
/// computed against every position already assigned in this pass.
pub fn normalize_snapshot<R: Rng + ?Sized>(
    raw: Vec<RawThought>,
    placement: &PlacementConfig,
    rng: &mut R,
) -> (Vec<Thought>, NormalizeReport) {
    let mut report = NormalizeReport::default();
    let mut thoughts: Vec<Thought> = Vec::with_capacity(raw.len());
    let mut placed: Vec<Position> = Vec::with_capacity(raw.len());

    for entry in raw {
        let stored = match entry {
            RawThought::Legacy(text) => {
                report.legacy_strings += 1;
                StoredThought {
                    text,
                    ..StoredThought::default()
                }
            }
            RawThought::Record(stored) => stored,
        };

        if stored.text.trim().is_empty() {
            report.skipped_blank += 1;
            continue;
        }

        let mood = match stored.mood {
            None | Some(Value::Null) => None,
            Some(Value::String(value)) if value.trim().is_empty() => None,
            Some(value) => {
                let parsed = value.as_str().and_then(Mood::parse);
                if parsed.is_none() {
                    report.unknown_moods += 1;
                }
                parsed
            }
        };
        let comments = stored_comments(stored.comments, &mut report.dropped_comments);

        let position = match stored_position(stored.top.as_ref(), stored.left.as_ref()) {
            Some(position) => position,
            None => {
                report.backfilled_positions += 1;
                place(&placed, placement, rng).position
            }
        };
        placed.push(position);

        thoughts.push(Thought {
            text: stored.text,
            mood,
            comments,
            position,
        });
    }

    if report.unknown_moods > 0 || report.skipped_blank > 0 || report.dropped_comments > 0 {
        warn!(
            "event=snapshot_normalize module=model status=degraded unknown_moods={} skipped_blank={} dropped_comments={}",
            report.unknown_moods, report.skipped_blank, report.dropped_comments
        );
    }

    (thoughts, report)
}

/// Converts canonical thoughts into the current wire shape.
pub fn to_stored(thoughts: &[Thought]) -> Vec<StoredThought> {
    thoughts.iter().map(StoredThought::from).collect()
}

fn stored_position(top: Option<&Value>, left: Option<&Value>) -> Option<Position> {
    let top = percent_value(top?)?;
    let left = percent_value(left?)?;
    Some(Position::new(top, left)).filter(in_domain)
}

fn stored_comments(value: Option<Value>, dropped: &mut usize) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::String(comment) => Some(comment),
                _ => {
                    *dropped += 1;
                    None
                }
            })
            .collect(),
        Some(_) => {
            *dropped += 1;
            Vec::new()
        }
    }
}

fn percent_value(value: &Value) -> Option<f64> {
    match value {
        Value::String(text) => parse_percent(text),
        Value::Number(number) => number.as_f64().filter(|value| value.is_finite()),
        _ => None,
    }
}
