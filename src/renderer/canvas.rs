//! Canvas 2D wheel drawing

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::*;
use crate::settings::Theme;
use crate::wheel::geometry::WheelGeometry;

/// Draws the wheel onto a canvas element
pub struct CanvasWheel {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    theme: Theme,
}

impl CanvasWheel {
    /// Wrap a canvas; `None` if it has no 2D context
    pub fn new(canvas: HtmlCanvasElement, theme: Theme) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx, theme })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Wheel placement for the canvas' current size
    pub fn geometry(&self) -> WheelGeometry {
        WheelGeometry::for_canvas(self.canvas.width() as f64, self.canvas.height() as f64)
    }

    /// Draw the wheel at `rotation`, then the fixed pointer on top
    pub fn draw(&self, rotation: f64, entries: &[String], highlight: Option<usize>) {
        let ctx = &self.ctx;
        let geometry = self.geometry();
        let (cx, cy) = (geometry.center.x, geometry.center.y);

        ctx.clear_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);
        if entries.is_empty() {
            return;
        }

        ctx.save();
        ctx.translate(cx, cy).ok();
        ctx.rotate(rotation).ok();
        for segment in wheel_segments(entries, highlight, self.theme) {
            self.draw_segment(&segment, geometry.radius);
        }
        ctx.restore();

        self.draw_pointer(&geometry);
    }

    /// One wedge plus its label (context already centered and rotated)
    fn draw_segment(&self, segment: &SegmentShape<'_>, radius: f64) {
        let ctx = &self.ctx;

        ctx.begin_path();
        ctx.move_to(0.0, 0.0);
        ctx.arc(0.0, 0.0, radius, segment.start_angle, segment.end_angle)
            .ok();
        ctx.close_path();
        ctx.set_fill_style_str(segment.fill);
        ctx.fill();
        ctx.set_stroke_style_str(SEPARATOR_COLOR);
        ctx.set_line_width(SEPARATOR_WIDTH);
        ctx.stroke();

        ctx.save();
        ctx.rotate(segment.label_angle).ok();
        ctx.set_text_align("right");
        ctx.set_font(LABEL_FONT);
        ctx.set_fill_style_str(LABEL_FILL);
        ctx.set_stroke_style_str(LABEL_OUTLINE);
        ctx.set_line_width(SEPARATOR_WIDTH);
        let x = radius - LABEL_INSET;
        ctx.stroke_text(segment.label, x, LABEL_BASELINE).ok();
        ctx.fill_text(segment.label, x, LABEL_BASELINE).ok();
        ctx.restore();
    }

    fn draw_pointer(&self, geometry: &WheelGeometry) {
        let ctx = &self.ctx;
        let [tip, left, right] = pointer_triangle(geometry);

        ctx.begin_path();
        ctx.move_to(tip.x, tip.y);
        ctx.line_to(left.x, left.y);
        ctx.line_to(right.x, right.y);
        ctx.close_path();
        ctx.set_fill_style_str(HIGHLIGHT_COLOR);
        ctx.fill();
    }
}
