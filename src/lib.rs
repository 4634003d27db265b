//! Prize Wheel - a spinning name picker for the browser
//!
//! Core modules:
//! - `wheel`: Deterministic wheel engine (entries, angle math, spin state machine)
//! - `renderer`: Segment layout and Canvas 2D drawing
//! - `effects`: Confetti and sparkle particle generation
//! - `audio`: Spin tick cadence and Web Audio sound effects
//! - `settings`: Page-supplied wheel configuration

pub mod audio;
pub mod effects;
pub mod renderer;
pub mod settings;
pub mod wheel;

pub use settings::{Theme, WheelSettings};
pub use wheel::{FrameStatus, SpinRejected, WheelEngine, WheelHooks};

use glam::DVec2;
use std::f64::consts::TAU;

/// Wheel configuration constants
pub mod consts {
    use std::f64::consts::PI;

    /// Pointer position in label space (top center, clockwise from +x on a y-down canvas)
    pub const POINTER_ANGLE: f64 = 3.0 * PI / 2.0;

    /// Extra full turns added to every spin
    pub const DEFAULT_MIN_EXTRA_ROTATIONS: u32 = 8;
    pub const DEFAULT_MAX_EXTRA_ROTATIONS: u32 = 11;

    /// Spin duration range (milliseconds)
    pub const DEFAULT_MIN_DURATION_MS: f64 = 7000.0;
    pub const DEFAULT_MAX_DURATION_MS: f64 = 8000.0;

    /// Gap between the wheel rim and the canvas edge (pixels)
    pub const WHEEL_MARGIN: f64 = 10.0;

    /// Pause between the wheel stopping and the winner modal (ms)
    pub const REVEAL_DELAY_MS: i32 = 300;
    /// How long the winner banner stays up (ms)
    pub const WINNER_BANNER_MS: i32 = 7000;
    /// Wheel shake after the reveal (ms)
    pub const SHAKE_MS: i32 = 500;

    /// Confetti pieces per reveal
    pub const CONFETTI_COUNT: usize = 100;
    /// Sparkles spawned per burst while spinning
    pub const SPARKLES_PER_BURST: usize = 3;
    /// Interval between sparkle bursts (ms)
    pub const SPARKLE_INTERVAL_MS: f64 = 100.0;
}

/// Normalize an angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Smallest absolute difference between two angles (radians, in [0, π])
#[inline]
pub fn angle_between(a: f64, b: f64) -> f64 {
    let diff = normalize_angle(a - b);
    diff.min(TAU - diff)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: DVec2) -> (f64, f64) {
    (pos.length(), pos.y.atan2(pos.x))
}
