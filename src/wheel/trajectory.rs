//! Spin planning and easing
//!
//! A spin is planned once, up front, then sampled per frame as a pure function
//! of elapsed time. The wheel only ever turns forward.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use super::geometry::landing_rotation;
use crate::consts::*;
use crate::normalize_angle;

/// Easing curve applied to spin progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    /// 1 - (1 - t)^3: fast start, smooth deceleration
    #[default]
    CubicOut,
    /// Linear to 0.9 over the first 70%, then a slow quartic crawl to the finish
    DramaticFinale,
}

impl Easing {
    /// Map progress in [0, 1] to eased progress in [0, 1]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::CubicOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Easing::DramaticFinale => {
                if t < 0.7 {
                    t / 0.7 * 0.9
                } else {
                    let inv = 1.0 - (t - 0.7) / 0.3;
                    0.9 + 0.1 * (1.0 - inv * inv * inv * inv)
                }
            }
        }
    }
}

/// Random ranges a spin is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinRanges {
    pub min_extra_rotations: u32,
    pub max_extra_rotations: u32,
    pub min_duration_ms: f64,
    pub max_duration_ms: f64,
}

impl Default for SpinRanges {
    fn default() -> Self {
        Self {
            min_extra_rotations: DEFAULT_MIN_EXTRA_ROTATIONS,
            max_extra_rotations: DEFAULT_MAX_EXTRA_ROTATIONS,
            min_duration_ms: DEFAULT_MIN_DURATION_MS,
            max_duration_ms: DEFAULT_MAX_DURATION_MS,
        }
    }
}

impl SpinRanges {
    /// Fixed turns and duration (tests, scripted demos)
    pub fn fixed(extra_rotations: u32, duration_ms: f64) -> Self {
        Self {
            min_extra_rotations: extra_rotations,
            max_extra_rotations: extra_rotations,
            min_duration_ms: duration_ms,
            max_duration_ms: duration_ms,
        }
    }

    /// Ordered bounds, non-negative finite durations
    pub fn sanitized(self) -> Self {
        let clean = |ms: f64| if ms.is_finite() { ms.max(0.0) } else { 0.0 };
        let (lo_turns, hi_turns) = if self.min_extra_rotations <= self.max_extra_rotations {
            (self.min_extra_rotations, self.max_extra_rotations)
        } else {
            (self.max_extra_rotations, self.min_extra_rotations)
        };
        let (a, b) = (clean(self.min_duration_ms), clean(self.max_duration_ms));
        Self {
            min_extra_rotations: lo_turns,
            max_extra_rotations: hi_turns,
            min_duration_ms: a.min(b),
            max_duration_ms: a.max(b),
        }
    }
}

/// One planned spin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinTrajectory {
    /// Rotation at spin start, normalized to [0, 2π)
    pub start_rotation: f64,
    /// Total forward travel in radians, extra turns included
    pub total_distance: f64,
    pub duration_ms: f64,
    pub extra_rotations: u32,
    pub easing: Easing,
}

impl SpinTrajectory {
    /// Linear progress in [0, 1]
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Wheel rotation after `elapsed_ms`
    pub fn rotation_at(&self, elapsed_ms: f64) -> f64 {
        let eased = self.easing.apply(self.progress(elapsed_ms));
        self.start_rotation + eased * self.total_distance
    }

    /// Rotation once the spin has finished
    pub fn end_rotation(&self) -> f64 {
        self.start_rotation + self.total_distance
    }
}

/// Plan a spin that lands `target_index` under the pointer
///
/// `count` must be non-zero and `target_index < count`.
pub fn plan_spin<R: Rng>(
    target_index: usize,
    current_rotation: f64,
    count: usize,
    ranges: &SpinRanges,
    easing: Easing,
    rng: &mut R,
) -> SpinTrajectory {
    debug_assert!(count > 0 && target_index < count);
    let ranges = ranges.sanitized();

    let current = normalize_angle(current_rotation);
    let mut target = normalize_angle(landing_rotation(target_index, count));
    while target < current {
        target += TAU;
    }

    let extra_rotations =
        rng.random_range(ranges.min_extra_rotations..=ranges.max_extra_rotations);
    let duration_ms = rng.random_range(ranges.min_duration_ms..=ranges.max_duration_ms);

    SpinTrajectory {
        start_rotation: current,
        total_distance: extra_rotations as f64 * TAU + (target - current),
        duration_ms,
        extra_rotations,
        easing,
    }
}
