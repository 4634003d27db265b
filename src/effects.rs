//! Particle effects for the spin and the reveal
//!
//! Pure generators: they only decide where particles go. The browser host turns
//! each particle into a short-lived DOM element animated by CSS.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::consts::{CONFETTI_COUNT, SPARKLE_INTERVAL_MS, SPARKLES_PER_BURST};
use crate::polar_to_cartesian;

/// Confetti pieces are removed after this long (ms)
pub const CONFETTI_LIFETIME_MS: i32 = 3500;
/// Sparkles are removed after this long (ms)
pub const SPARKLE_LIFETIME_MS: i32 = 1500;

/// One falling confetti piece
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfettiPiece {
    /// Horizontal start position (percent of viewport width)
    pub left_percent: f64,
    pub color: &'static str,
    /// Animation delay (seconds)
    pub delay_s: f64,
    /// Fall duration (seconds)
    pub duration_s: f64,
}

/// One sparkle near the wheel rim
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sparkle {
    /// Spawn position relative to the wheel center (pixels)
    pub pos: DVec2,
    /// Drift applied by the CSS animation (pixels)
    pub drift: DVec2,
}

/// Confetti shower for a winner reveal
pub fn confetti_burst<R: Rng>(rng: &mut R, colors: &[&'static str]) -> Vec<ConfettiPiece> {
    if colors.is_empty() {
        return Vec::new();
    }
    (0..CONFETTI_COUNT)
        .map(|_| ConfettiPiece {
            left_percent: rng.random_range(0.0..100.0),
            color: colors[rng.random_range(0..colors.len())],
            delay_s: rng.random_range(0.0..0.5),
            duration_s: rng.random_range(2.0..3.0),
        })
        .collect()
}

/// A handful of sparkles just inside the rim of a wheel of `radius`
pub fn sparkle_ring<R: Rng>(rng: &mut R, radius: f64) -> Vec<Sparkle> {
    (0..SPARKLES_PER_BURST)
        .map(|_| {
            let theta = rng.random_range(0.0..TAU);
            let r = radius * rng.random_range(0.8..=1.0);
            Sparkle {
                pos: polar_to_cartesian(r, theta),
                drift: DVec2::new(rng.random_range(-50.0..50.0), rng.random_range(-50.0..50.0)),
            }
        })
        .collect()
}

/// Rate limiter for sparkle bursts while the wheel spins
#[derive(Debug, Clone, Default)]
pub struct SparkleTimer {
    last_burst: Option<f64>,
}

impl SparkleTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a burst is due at `now_ms`; the first call always fires
    pub fn due(&mut self, now_ms: f64) -> bool {
        match self.last_burst {
            Some(last) if now_ms - last < SPARKLE_INTERVAL_MS => false,
            _ => {
                self.last_burst = Some(now_ms);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.last_burst = None;
    }
}
