//! Decorative star-field parameters.
//!
//! Stars have no data dependency on the thought store; the renderer may
//! regenerate them freely.

use rand::Rng;
use std::ops::Range;

/// Default number of stars behind the board.
pub const STAR_FIELD_SIZE: usize = 100;
/// Star edge length in pixels.
pub const STAR_SIZE_PX: Range<f64> = 4.0..10.0;

/// One background star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    /// Vertical offset in percent, `[0, 100)`.
    pub top: f64,
    /// Horizontal offset in percent, `[0, 100)`.
    pub left: f64,
    /// Square edge length in pixels.
    pub size_px: f64,
}

/// Generates `count` stars spread uniformly over the whole viewport.
pub fn generate_star_field<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Star> {
    (0..count)
        .map(|_| Star {
            top: rng.gen_range(0.0..100.0),
            left: rng.gen_range(0.0..100.0),
            size_px: rng.gen_range(STAR_SIZE_PX),
        })
        .collect()
}
