//! Domain model for the thought board.
//!
//! # Responsibility
//! - Define the canonical in-memory thought record and its mood catalogue.
//! - Define the raw persisted shapes accepted at the load boundary.
//!
//! # Invariants
//! - Every in-memory `Thought` carries a fully populated `Position`.
//! - Legacy/raw shapes never leak past `raw_thought::normalize_snapshot`.

pub mod raw_thought;
pub mod thought;
