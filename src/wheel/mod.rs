//! Deterministic wheel engine
//!
//! Everything that decides where the wheel points lives here. This module must
//! stay pure:
//! - Time only arrives as timestamps passed in by the host
//! - Seeded RNG only
//! - Rendering and presentation happen behind `WheelHooks`

pub mod entries;
pub mod geometry;
pub mod pin_input;
pub mod state;
pub mod trajectory;

pub use entries::{find_pin_match, parse_entries};
pub use geometry::{
    landing_rotation, resolve_segment, segment_click_point, segment_span, segment_under_pointer,
};
pub use pin_input::{KeyAction, PinCapture};
pub use state::{ActiveSpin, FrameStatus, SpinRejected, WheelEngine, WheelHooks, WheelPhase};
pub use trajectory::{Easing, SpinRanges, SpinTrajectory, plan_spin};
