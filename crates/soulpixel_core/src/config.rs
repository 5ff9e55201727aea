//! Store configuration.
//!
//! # Responsibility
//! - Hold the tunables of the thought store in one place.
//!
//! # Invariants
//! - `Default` reproduces the board's shipped behavior, including the
//!   oversized minimum separation of 100 percentage units.

use crate::layout::placement::{DEFAULT_MIN_DISTANCE, MAX_PLACEMENT_ATTEMPTS};

/// Storage slot key used by the board.
pub const DEFAULT_STORAGE_KEY: &str = "soul-pixel-thoughts";

/// Board title shown in the header.
pub const APP_TITLE: &str = "Soul Pixel";

/// Tagline shown under the title.
pub const APP_TAGLINE: &str = "Every pixel holds a thought";

/// Placement search parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementConfig {
    /// Minimum Euclidean distance to every placed thought.
    pub min_distance: f64,
    /// Upper bound of sampling attempts per placement.
    pub max_attempts: u32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_MIN_DISTANCE,
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }
}

/// Thought store configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Key of the persisted snapshot slot.
    pub storage_key: String,
    pub placement: PlacementConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            placement: PlacementConfig::default(),
        }
    }
}
