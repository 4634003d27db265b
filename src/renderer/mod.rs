//! Wheel rendering
//!
//! Layout is pure and shared; drawing goes through the Canvas 2D API in the browser.

pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use shapes::{SegmentShape, pointer_triangle, wheel_segments};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasWheel;
