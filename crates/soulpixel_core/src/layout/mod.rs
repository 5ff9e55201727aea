//! Randomized board layout.
//!
//! # Responsibility
//! - Place thoughts on the board without (or with bounded) overlap.
//! - Generate decorative star-field parameters for the background.
//!
//! # Invariants
//! - Every randomized function is generic over `rand::Rng`, never global.

pub mod placement;
pub mod sky;
