//! Petri Dish - a tick-based microbial arena game
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (actors, spatial queries, AI, scheduler)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::DVec2;

/// Game configuration constants
pub mod consts {
    use glam::DVec2;

    /// Dish geometry (origin at the dish center)
    pub const DISH_CENTER: DVec2 = DVec2::ZERO;
    pub const DISH_RADIUS: f64 = 128.0;

    /// Sprite footprint shared by every actor
    pub const SPRITE_WIDTH: f64 = 16.0;
    pub const SPRITE_RADIUS: f64 = SPRITE_WIDTH / 2.0;

    /// Two actors overlap when their centers are at most this far apart
    pub const OVERLAP_DISTANCE: f64 = 2.0 * SPRITE_RADIUS;
    /// A step is blocked when it lands this close to a blocking actor
    pub const BLOCK_DISTANCE: f64 = SPRITE_RADIUS;

    /// Level layout scatters actors no further than this from the center
    pub const LAYOUT_RADIUS: f64 = 120.0;

    /// The player is never stored in the actor list and owns this id
    pub const PLAYER_ID: u32 = 0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit vector for a heading in degrees
#[inline]
pub fn heading(degrees: f64) -> DVec2 {
    let rad = degrees.to_radians();
    DVec2::new(rad.cos(), rad.sin())
}

/// Convert polar (r, degrees) around the dish center to cartesian
#[inline]
pub fn polar_to_cartesian(r: f64, degrees: f64) -> DVec2 {
    consts::DISH_CENTER + heading(degrees) * r
}

/// Convert cartesian to polar (r, degrees) around the dish center
#[inline]
pub fn cartesian_to_polar(pos: DVec2) -> (f64, f64) {
    let rel = pos - consts::DISH_CENTER;
    (rel.length(), rel.y.atan2(rel.x).to_degrees())
}
