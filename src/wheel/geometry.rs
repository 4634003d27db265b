//! Wheel angle conventions and segment lookup
//!
//! Two frames are in play:
//! - Drawing frame: segment `i` spans `[i * span, (i + 1) * span)` clockwise
//!   from +x on a y-down canvas, shifted by the wheel rotation. The pointer
//!   sits at `POINTER_ANGLE` (top center).
//! - Click frame: clockwise-from-top angle of a pointer offset, with the
//!   rotation removed. The resolver centers segment `i` at `i * span`.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};

use crate::consts::{POINTER_ANGLE, WHEEL_MARGIN};
use crate::{cartesian_to_polar, normalize_angle, polar_to_cartesian};

/// Where the wheel sits on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelGeometry {
    /// Wheel center in canvas pixels
    pub center: DVec2,
    /// Rim radius in pixels
    pub radius: f64,
}

impl WheelGeometry {
    pub fn new(center: DVec2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Wheel centered in a canvas, inset from the edge by `WHEEL_MARGIN`
    pub fn for_canvas(width: f64, height: f64) -> Self {
        Self {
            center: DVec2::new(width / 2.0, height / 2.0),
            radius: (width / 2.0 - WHEEL_MARGIN).max(0.0),
        }
    }

    /// Offset of a canvas point from the wheel center
    #[inline]
    pub fn offset_of(&self, point: DVec2) -> DVec2 {
        point - self.center
    }

    /// Whether an offset lies on the wheel face
    #[inline]
    pub fn contains(&self, offset: DVec2) -> bool {
        offset.length() <= self.radius
    }
}

/// Angular width of one segment
#[inline]
pub fn segment_span(count: usize) -> f64 {
    TAU / count as f64
}

/// Click-frame angle of a pointer offset under the given rotation
pub fn click_angle(offset: DVec2, rotation: f64) -> f64 {
    let (_, math_angle) = cartesian_to_polar(offset);
    let from_top = normalize_angle(-math_angle + FRAC_PI_2);
    normalize_angle(from_top - rotation)
}

/// Resolve a pointer offset (screen pixels from the wheel center) to a segment
///
/// Returns `None` when the wheel is empty or the offset lies outside `radius`.
pub fn resolve_segment(offset: DVec2, radius: f64, rotation: f64, count: usize) -> Option<usize> {
    if count == 0 || offset.length() > radius {
        return None;
    }
    let span = segment_span(count);
    // Half-span shift: the resolver treats i * span as the segment's middle
    let adjusted = normalize_angle(click_angle(offset, rotation) + span / 2.0);
    Some((adjusted / span).floor() as usize % count)
}

/// Screen offset at `distance` from center that the resolver maps to the middle of `index`
pub fn segment_click_point(index: usize, count: usize, rotation: f64, distance: f64) -> DVec2 {
    let label_angle = index as f64 * segment_span(count);
    let from_top = label_angle + rotation;
    polar_to_cartesian(distance, FRAC_PI_2 - from_top)
}

/// Rotation at which the middle of `index` sits exactly under the pointer
#[inline]
pub fn landing_rotation(index: usize, count: usize) -> f64 {
    let span = segment_span(count);
    POINTER_ANGLE - index as f64 * span - span / 2.0
}

/// Segment whose drawn span currently contains the pointer
pub fn segment_under_pointer(rotation: f64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let span = segment_span(count);
    let local = normalize_angle(POINTER_ANGLE - rotation);
    (local / span).floor() as usize % count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle_between;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    #[test]
    fn test_outside_radius_is_no_match() {
        assert_eq!(resolve_segment(DVec2::new(101.0, 0.0), 100.0, 0.0, 4), None);
        assert_eq!(resolve_segment(DVec2::new(70.0, 72.0), 100.0, 0.0, 4), None);
        // The rim itself still counts
        assert!(resolve_segment(DVec2::new(100.0, 0.0), 100.0, 0.0, 4).is_some());
    }

    #[test]
    fn test_empty_wheel_is_no_match() {
        assert_eq!(resolve_segment(DVec2::ZERO, 100.0, 0.0, 0), None);
    }

    #[test]
    fn test_center_click_always_resolves() {
        for n in 1..=50 {
            for rotation in [0.0, 1.3, -4.0, 100.0] {
                let index = resolve_segment(DVec2::ZERO, 100.0, rotation, n);
                assert!(matches!(index, Some(i) if i < n), "n={n} rotation={rotation}");
            }
        }
    }

    #[test]
    fn test_click_point_resolves_back_for_all_counts() {
        for n in 1..=50 {
            for i in 0..n {
                for rotation in [0.0, 0.4, PI, -2.5, 37.0] {
                    let offset = segment_click_point(i, n, rotation, 80.0);
                    assert_eq!(
                        resolve_segment(offset, 100.0, rotation, n),
                        Some(i),
                        "n={n} i={i} rotation={rotation}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_known_click_positions() {
        // Unrotated, four segments: the resolver's clockwise-from-top angle
        // puts a click straight right at a quarter turn.
        assert_eq!(resolve_segment(DVec2::new(50.0, 0.0), 100.0, 0.0, 4), Some(1));
        assert_eq!(resolve_segment(DVec2::new(0.0, -50.0), 100.0, 0.0, 4), Some(2));
    }

    #[test]
    fn test_landing_rotation_centers_segment_under_pointer() {
        let n = 6;
        for i in 0..n {
            let rotation = landing_rotation(i, n);
            let center = i as f64 * segment_span(n) + segment_span(n) / 2.0 + rotation;
            assert!(angle_between(center, POINTER_ANGLE) < 1e-12);
            assert_eq!(segment_under_pointer(rotation, n), i);
        }
    }

    #[test]
    fn test_segment_under_pointer_unrotated() {
        // Just past the boundary between the third and last quarter
        assert_eq!(segment_under_pointer(0.1, 4), 2);
        assert_eq!(segment_under_pointer(-0.1, 4), 3);
        assert_eq!(segment_under_pointer(0.0, 1), 0);
    }

    #[test]
    fn test_geometry_for_canvas() {
        let geometry = WheelGeometry::for_canvas(500.0, 500.0);
        assert_eq!(geometry.center, DVec2::new(250.0, 250.0));
        assert!((geometry.radius - 240.0).abs() < 1e-12);
        let offset = geometry.offset_of(DVec2::new(250.0, 20.0));
        assert!(geometry.contains(offset));
        assert!(!geometry.contains(geometry.offset_of(DVec2::new(0.0, 0.0))));
    }

    proptest! {
        #[test]
        fn prop_click_point_resolves_back(
            n in 1usize..=50,
            pick in 0.0f64..1.0,
            rotation in -50.0f64..50.0,
            distance in 0.5f64..99.0,
        ) {
            let i = ((pick * n as f64) as usize).min(n - 1);
            let offset = segment_click_point(i, n, rotation, distance);
            prop_assert_eq!(resolve_segment(offset, 100.0, rotation, n), Some(i));
        }
    }
}
