//! Non-overlapping random placement.
//!
//! # Responsibility
//! - Sample board positions inside the fixed percentage domain.
//! - Reject candidates closer than the minimum separation to placed thoughts.
//!
//! # Invariants
//! - The search is bounded by `max_attempts`; it never loops indefinitely.
//! - Exhaustion returns the last sampled candidate instead of failing.
//! - Returned positions lie within `TOP_RANGE` x `LEFT_RANGE`.

use crate::config::PlacementConfig;
use crate::model::thought::Position;
use rand::Rng;
use std::ops::RangeInclusive;

/// Vertical domain in percent.
pub const TOP_RANGE: RangeInclusive<f64> = 10.0..=80.0;
/// Horizontal domain in percent.
pub const LEFT_RANGE: RangeInclusive<f64> = 5.0..=85.0;
/// Default minimum separation in percentage units.
///
/// Larger than most distances the domain allows, so all but the first
/// placement usually exhaust the search and overlap.
pub const DEFAULT_MIN_DISTANCE: f64 = 100.0;
/// Default attempt cap per placement.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;

/// Placement result with search diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Position,
    /// Number of candidates sampled, in `1..=max_attempts`.
    pub attempts: u32,
    /// `true` when the search was exhausted and the candidate overlaps.
    pub overlapping: bool,
}

/// Places one thought against `existing` using default parameters.
pub fn generate_non_overlapping_position<R: Rng + ?Sized>(
    existing: &[Position],
    rng: &mut R,
) -> Position {
    place(existing, &PlacementConfig::default(), rng).position
}

/// Places one thought against `existing` and reports how the search went.
///
/// A zero `max_attempts` is treated as one attempt so a candidate always
/// exists.
pub fn place<R: Rng + ?Sized>(
    existing: &[Position],
    config: &PlacementConfig,
    rng: &mut R,
) -> Placement {
    let max_attempts = config.max_attempts.max(1);
    let mut attempts = 0;

    loop {
        let candidate = Position::new(rng.gen_range(TOP_RANGE), rng.gen_range(LEFT_RANGE));
        attempts += 1;

        // Measured on the rounded candidate, which is what gets stored.
        let clear = existing.iter().all(|placed| {
            placed.distance_to(candidate.top(), candidate.left()) >= config.min_distance
        });
        if clear || attempts >= max_attempts {
            return Placement {
                position: candidate,
                attempts,
                overlapping: !clear,
            };
        }
    }
}

/// Returns whether a position lies inside the placement domain.
pub fn in_domain(position: &Position) -> bool {
    TOP_RANGE.contains(&position.top()) && LEFT_RANGE.contains(&position.left())
}
