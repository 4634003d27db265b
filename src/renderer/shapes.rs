//! Wheel layout for 2D drawing
//!
//! Angles here are in the drawing frame (clockwise from +x on a y-down canvas)
//! before the wheel rotation is applied.

use glam::DVec2;

use crate::settings::Theme;
use crate::wheel::geometry::{WheelGeometry, segment_span};

/// Fill for the winning segment and the pointer
pub const HIGHLIGHT_COLOR: &str = "#FFD700";
/// Separator lines between segments
pub const SEPARATOR_COLOR: &str = "#fff";
pub const SEPARATOR_WIDTH: f64 = 3.0;
/// Label text
pub const LABEL_FONT: &str = "bold 16px Arial";
pub const LABEL_FILL: &str = "#fff";
pub const LABEL_OUTLINE: &str = "#000";
/// Label inset from the rim, and baseline drop (pixels)
pub const LABEL_INSET: f64 = 10.0;
pub const LABEL_BASELINE: f64 = 8.0;

/// Pointer triangle size (pixels)
pub const POINTER_INSET: f64 = 10.0;
pub const POINTER_HALF_WIDTH: f64 = 10.0;
pub const POINTER_LENGTH: f64 = 20.0;

/// One drawable wheel segment
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentShape<'a> {
    pub start_angle: f64,
    pub end_angle: f64,
    pub fill: &'static str,
    pub label: &'a str,
    /// Direction the label runs along, from the center outward
    pub label_angle: f64,
}

/// Lay out all segments, highlighting one if requested
pub fn wheel_segments<'a>(
    entries: &'a [String],
    highlight: Option<usize>,
    theme: Theme,
) -> Vec<SegmentShape<'a>> {
    if entries.is_empty() {
        return Vec::new();
    }
    let span = segment_span(entries.len());
    let palette = theme.segment_colors();

    entries
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let start_angle = i as f64 * span;
            SegmentShape {
                start_angle,
                end_angle: start_angle + span,
                fill: if highlight == Some(i) {
                    HIGHLIGHT_COLOR
                } else {
                    palette[i % palette.len()]
                },
                label,
                label_angle: start_angle + span / 2.0,
            }
        })
        .collect()
}

/// Pointer triangle (tip, base left, base right) in canvas pixels
///
/// Fixed at the top center, pointing down into the wheel.
pub fn pointer_triangle(geometry: &WheelGeometry) -> [DVec2; 3] {
    let tip = DVec2::new(geometry.center.x, geometry.center.y - geometry.radius + POINTER_INSET);
    [
        tip,
        tip + DVec2::new(POINTER_HALF_WIDTH, -POINTER_LENGTH),
        tip + DVec2::new(-POINTER_HALF_WIDTH, -POINTER_LENGTH),
    ]
}
