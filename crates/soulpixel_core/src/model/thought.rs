//! Thought record model.
//!
//! # Responsibility
//! - Define the canonical record rendered as one floating cloud/card.
//! - Own the fixed mood catalogue (emoji, label, card tint).
//! - Own percentage-coordinate formatting for on-screen placement.
//!
//! # Invariants
//! - `text` is non-empty and never edited after creation.
//! - `comments` is append-only and keeps insertion order.
//! - `Position` components are rounded to two decimals at construction, so
//!   formatting and re-parsing yields the same value.

use serde::{Deserialize, Serialize};

/// Card tint used when a thought carries no mood.
pub const DEFAULT_TINT: &str = "yellow-50";

/// Fixed mood catalogue offered by the submission form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    #[serde(rename = "😊")]
    Happy,
    #[serde(rename = "😔")]
    Sad,
    #[serde(rename = "😡")]
    Angry,
    #[serde(rename = "🧘")]
    Calm,
    #[serde(rename = "🤯")]
    Overwhelmed,
}

impl Mood {
    /// All moods in selector order.
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Angry,
        Mood::Calm,
        Mood::Overwhelmed,
    ];

    /// Emoji used both on screen and in the persisted snapshot.
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Happy => "😊",
            Self::Sad => "😔",
            Self::Angry => "😡",
            Self::Calm => "🧘",
            Self::Overwhelmed => "🤯",
        }
    }

    /// Human-readable selector label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Happy => "Happy",
            Self::Sad => "Sad",
            Self::Angry => "Angry",
            Self::Calm => "Calm",
            Self::Overwhelmed => "Overwhelmed",
        }
    }

    /// Background tint of a card carrying this mood.
    pub fn tint(self) -> &'static str {
        match self {
            Self::Happy => "pink-100",
            Self::Sad => "blue-50",
            Self::Angry => "red-100",
            Self::Calm => "green-50",
            Self::Overwhelmed => "purple-50",
        }
    }

    /// Parses a mood from its emoji or its case-insensitive label.
    ///
    /// Returns `None` for blank or unknown input.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        Self::ALL.into_iter().find(|mood| {
            mood.emoji() == trimmed || mood.label().eq_ignore_ascii_case(trimmed)
        })
    }
}

/// Returns the card tint for an optional mood.
pub fn mood_tint(mood: Option<Mood>) -> &'static str {
    mood.map_or(DEFAULT_TINT, Mood::tint)
}

/// On-screen placement as (top, left) percentages of the board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    top: f64,
    left: f64,
}

impl Position {
    /// Creates a position, rounding both components to two decimals.
    pub fn new(top: f64, left: f64) -> Self {
        Self {
            top: round_percent(top),
            left: round_percent(left),
        }
    }

    /// Vertical offset in percent.
    pub fn top(&self) -> f64 {
        self.top
    }

    /// Horizontal offset in percent.
    pub fn left(&self) -> f64 {
        self.left
    }

    /// Vertical offset formatted as `NN.NN%`.
    pub fn top_css(&self) -> String {
        format_percent(self.top)
    }

    /// Horizontal offset formatted as `NN.NN%`.
    pub fn left_css(&self) -> String {
        format_percent(self.left)
    }

    /// Euclidean distance in percentage units.
    pub fn distance_to(&self, top: f64, left: f64) -> f64 {
        let dy = self.top - top;
        let dx = self.left - left;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Formats a percentage with two decimals and a trailing `%`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Parses `"12.34%"`, `"12.34"` or surrounding-whitespace variants.
///
/// Returns `None` for empty, non-numeric or non-finite input.
pub fn parse_percent(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    if number.is_empty() {
        return None;
    }
    number.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn round_percent(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Canonical thought record.
#[derive(Debug, Clone, PartialEq)]
pub struct Thought {
    /// User-entered text, trimmed and non-empty.
    pub text: String,
    /// Optional mood tag.
    pub mood: Option<Mood>,
    /// Comment thread in insertion order.
    pub comments: Vec<String>,
    /// Placement assigned once at creation or legacy backfill.
    pub position: Position,
}

impl Thought {
    /// Creates a fresh thought with an empty comment thread.
    pub fn new(text: impl Into<String>, mood: Option<Mood>, position: Position) -> Self {
        Self {
            text: text.into(),
            mood,
            comments: Vec::new(),
            position,
        }
    }

    /// Card tint derived from the mood.
    pub fn tint(&self) -> &'static str {
        mood_tint(self.mood)
    }
}
