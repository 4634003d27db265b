//! Wheel engine state and spin lifecycle
//!
//! All mutable wheel state lives in `WheelEngine`; the host only hands it
//! text, pointer offsets and frame timestamps.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::fmt;

use super::entries::{find_pin_match, parse_entries};
use super::geometry::resolve_segment;
use super::trajectory::{SpinTrajectory, plan_spin};
use crate::normalize_angle;
use crate::settings::WheelSettings;

/// Presentation callbacks invoked by the engine
pub trait WheelHooks {
    /// Draw the wheel at `rotation`, optionally highlighting one segment
    fn render(&mut self, rotation: f64, entries: &[String], highlight: Option<usize>);
    /// The wheel has stopped on `winner`
    fn spin_complete(&mut self, winner: &str, index: usize);
}

/// A spin in flight
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSpin {
    pub trajectory: SpinTrajectory,
    /// Winner chosen when the spin was requested
    pub winner: String,
    pub winner_index: usize,
    /// Timestamp of the first animation frame (ms)
    pub started_at: Option<f64>,
}

/// Engine phase
#[derive(Debug, Clone, PartialEq)]
pub enum WheelPhase {
    /// At rest, ready to spin
    Idle,
    /// Animating toward a chosen winner
    Spinning(ActiveSpin),
}

/// Result of advancing one frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameStatus {
    /// Nothing to animate
    Idle,
    /// Mid-spin; schedule another frame
    Spinning { rotation: f64, progress: f64 },
    /// The spin ended this frame
    Finished { winner: String, index: usize },
}

/// Why a spin request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinRejected {
    /// A spin is already running
    AlreadySpinning,
    /// Too few entries on the wheel
    NotEnoughEntries { have: usize, required: usize },
}

impl fmt::Display for SpinRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpinRejected::AlreadySpinning => write!(f, "a spin is already in progress"),
            SpinRejected::NotEnoughEntries { have, required } => {
                write!(f, "need at least {required} entries to spin, have {have}")
            }
        }
    }
}

impl std::error::Error for SpinRejected {}

/// The wheel: entries, rotation, pinned winner and spin state machine
#[derive(Debug, Clone)]
pub struct WheelEngine {
    entries: Vec<String>,
    /// Current rotation (radians); kept across spins
    rotation: f64,
    pinned: Option<String>,
    phase: WheelPhase,
    highlight: Option<usize>,
    settings: WheelSettings,
    rng: Pcg32,
}

impl WheelEngine {
    /// Create an empty, unrotated wheel
    pub fn new(settings: WheelSettings, seed: u64) -> Self {
        Self {
            entries: Vec::new(),
            rotation: 0.0,
            pinned: None,
            phase: WheelPhase::Idle,
            highlight: None,
            settings,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn phase(&self) -> &WheelPhase {
        &self.phase
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.phase, WheelPhase::Spinning(_))
    }

    /// Segment highlighted after the last spin (cleared on entry changes)
    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    pub fn pinned_winner(&self) -> Option<&str> {
        self.pinned.as_deref()
    }

    pub fn settings(&self) -> &WheelSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: WheelSettings) {
        self.settings = settings;
    }

    /// Smallest entry count a spin accepts (never below one)
    pub fn min_entries_to_spin(&self) -> usize {
        self.settings.min_entries_to_spin.max(1)
    }

    /// Whether a spin request would be accepted right now
    pub fn can_spin(&self) -> bool {
        !self.is_spinning() && self.entries.len() >= self.min_entries_to_spin()
    }

    /// Replace the entries from raw text (newline- or comma-separated)
    pub fn set_entries_from_text(&mut self, text: &str) -> &[String] {
        self.set_entries(parse_entries(text));
        &self.entries
    }

    /// Replace the entries; drops a pin that is no longer on the wheel
    pub fn set_entries(&mut self, entries: Vec<String>) {
        self.entries = entries;
        self.highlight = None;
        self.revalidate_pin();
    }

    fn revalidate_pin(&mut self) {
        if let Some(pinned) = &self.pinned {
            if !self.entries.contains(pinned) {
                self.pinned = None;
            }
        }
    }

    /// Segment under a pointer offset (pixels from the wheel center)
    pub fn resolve_click(&self, offset: DVec2, radius: f64) -> Option<usize> {
        resolve_segment(offset, radius, self.rotation, self.entries.len())
    }

    /// Pin whichever entry sits under the pointer offset
    pub fn pin_at(&mut self, offset: DVec2, radius: f64) -> Option<&str> {
        let index = self.resolve_click(offset, radius)?;
        self.pinned = Some(self.entries[index].clone());
        self.pinned.as_deref()
    }

    /// Pin the first entry containing `query` (case-insensitive)
    ///
    /// No match leaves any existing pin untouched.
    pub fn force_next_winner(&mut self, query: &str) -> Option<&str> {
        let found = find_pin_match(&self.entries, query)?.to_string();
        self.pinned = Some(found);
        self.pinned.as_deref()
    }

    pub fn clear_pinned_winner(&mut self) {
        self.pinned = None;
    }

    /// Start a spin; the winner is the pinned entry if present, else random
    pub fn request_spin(&mut self) -> Result<SpinTrajectory, SpinRejected> {
        if self.is_spinning() {
            return Err(SpinRejected::AlreadySpinning);
        }
        let required = self.min_entries_to_spin();
        if self.entries.len() < required {
            return Err(SpinRejected::NotEnoughEntries {
                have: self.entries.len(),
                required,
            });
        }

        let count = self.entries.len();
        let pinned_index = self
            .pinned
            .as_ref()
            .and_then(|name| self.entries.iter().position(|e| e == name));
        let winner_index = match pinned_index {
            Some(index) => index,
            None => self.rng.random_range(0..count),
        };

        let trajectory = plan_spin(
            winner_index,
            self.rotation,
            count,
            &self.settings.spin,
            self.settings.easing,
            &mut self.rng,
        );
        log::debug!(
            "Spin planned: {} entries, {} extra turns, {:.0} ms",
            count,
            trajectory.extra_rotations,
            trajectory.duration_ms
        );

        self.highlight = None;
        self.phase = WheelPhase::Spinning(ActiveSpin {
            trajectory,
            winner: self.entries[winner_index].clone(),
            winner_index,
            started_at: None,
        });
        Ok(trajectory)
    }

    /// Advance the active spin to `now_ms` (a monotonic frame timestamp)
    pub fn advance<H: WheelHooks + ?Sized>(&mut self, now_ms: f64, hooks: &mut H) -> FrameStatus {
        let WheelPhase::Spinning(spin) = &mut self.phase else {
            return FrameStatus::Idle;
        };
        let started_at = *spin.started_at.get_or_insert(now_ms);
        let trajectory = spin.trajectory;

        let elapsed = (now_ms - started_at).max(0.0);
        let progress = trajectory.progress(elapsed);
        self.rotation = trajectory.rotation_at(elapsed);

        if progress < 1.0 {
            hooks.render(self.rotation, &self.entries, None);
            return FrameStatus::Spinning {
                rotation: self.rotation,
                progress,
            };
        }

        self.finish_spin(hooks)
    }

    fn finish_spin<H: WheelHooks + ?Sized>(&mut self, hooks: &mut H) -> FrameStatus {
        let WheelPhase::Spinning(spin) = std::mem::replace(&mut self.phase, WheelPhase::Idle)
        else {
            return FrameStatus::Idle;
        };
        self.rotation = normalize_angle(spin.trajectory.end_rotation());

        // Entries may have been edited mid-spin; only highlight a segment that still holds the winner
        let index = spin.winner_index;
        self.highlight = (self.entries.get(index) == Some(&spin.winner)).then_some(index);

        hooks.render(self.rotation, &self.entries, self.highlight);
        hooks.spin_complete(&spin.winner, index);
        log::info!("Wheel stopped on entry {}", index);

        if self.settings.remove_winner_after_spin {
            if let Some(position) = self.entries.iter().position(|e| *e == spin.winner) {
                self.entries.remove(position);
                self.highlight = None;
                self.revalidate_pin();
            }
        }

        FrameStatus::Finished {
            winner: spin.winner,
            index,
        }
    }

    /// Draw the wheel at rest (entries changed, canvas resized, ...)
    pub fn redraw<H: WheelHooks + ?Sized>(&self, hooks: &mut H) {
        hooks.render(self.rotation, &self.entries, self.highlight);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::POINTER_ANGLE;
    use crate::wheel::geometry::{segment_click_point, segment_span, segment_under_pointer};
    use crate::wheel::trajectory::SpinRanges;
    use crate::{angle_between, settings::WheelSettings};

    #[derive(Default)]
    struct RecordingHooks {
        renders: Vec<(f64, usize, Option<usize>)>,
        completed: Vec<(String, usize)>,
    }

    impl WheelHooks for RecordingHooks {
        fn render(&mut self, rotation: f64, entries: &[String], highlight: Option<usize>) {
            self.renders.push((rotation, entries.len(), highlight));
        }

        fn spin_complete(&mut self, winner: &str, index: usize) {
            self.completed.push((winner.to_string(), index));
        }
    }

    fn quick_settings() -> WheelSettings {
        WheelSettings {
            spin: SpinRanges::fixed(2, 1000.0),
            ..WheelSettings::default()
        }
    }

    fn engine_with(text: &str) -> WheelEngine {
        let mut engine = WheelEngine::new(quick_settings(), 12345);
        engine.set_entries_from_text(text);
        engine
    }

    /// Step frames at ~60 Hz until the spin finishes
    fn run_to_completion(engine: &mut WheelEngine, hooks: &mut RecordingHooks, start: f64) -> FrameStatus {
        let mut now = start;
        for _ in 0..10_000 {
            let status = engine.advance(now, hooks);
            if !matches!(status, FrameStatus::Spinning { .. }) {
                return status;
            }
            now += 16.0;
        }
        panic!("spin never finished");
    }

    #[test]
    fn test_idle_advance_is_noop() {
        let mut engine = engine_with("a,b");
        let mut hooks = RecordingHooks::default();
        assert_eq!(engine.advance(100.0, &mut hooks), FrameStatus::Idle);
        assert!(hooks.renders.is_empty());
    }

    #[test]
    fn test_spin_lifecycle() {
        let mut engine = engine_with("Alice\nBob\nCarol");
        let mut hooks = RecordingHooks::default();

        assert!(engine.request_spin().is_ok());
        assert!(engine.is_spinning());

        let status = run_to_completion(&mut engine, &mut hooks, 5000.0);
        let FrameStatus::Finished { winner, index } = status else {
            panic!("expected finish, got {status:?}");
        };
        assert_eq!(engine.entries()[index], winner);
        assert_eq!(hooks.completed, vec![(winner.clone(), index)]);
        assert!(!engine.is_spinning());
        assert_eq!(engine.highlight(), Some(index));
        assert_eq!(segment_under_pointer(engine.rotation(), 3), index);

        // Every frame rendered, final frame carries the highlight
        let last = hooks.renders.last().copied();
        assert_eq!(last.map(|r| r.2), Some(Some(index)));
        assert!(hooks.renders[..hooks.renders.len() - 1].iter().all(|r| r.2.is_none()));
    }

    #[test]
    fn test_rest_rotation_is_normalized_and_on_target() {
        let mut engine = engine_with("a\nb\nc\nd\ne");
        let mut hooks = RecordingHooks::default();
        engine.force_next_winner("c");
        engine.request_spin().unwrap();
        run_to_completion(&mut engine, &mut hooks, 0.0);

        let rotation = engine.rotation();
        assert!((0.0..std::f64::consts::TAU).contains(&rotation));
        let span = segment_span(5);
        let center = 2.0 * span + span / 2.0 + rotation;
        assert!(angle_between(center, POINTER_ANGLE) < 1e-9);
    }

    #[test]
    fn test_rejects_while_spinning() {
        let mut engine = engine_with("a,b,c");
        engine.request_spin().unwrap();
        assert_eq!(engine.request_spin().unwrap_err(), SpinRejected::AlreadySpinning);
        assert!(!engine.can_spin());
    }

    #[test]
    fn test_rejects_empty_wheel() {
        let mut engine = engine_with("");
        assert_eq!(
            engine.request_spin().unwrap_err(),
            SpinRejected::NotEnoughEntries { have: 0, required: 1 }
        );
    }

    #[test]
    fn test_single_entry_threshold_is_configurable() {
        let mut engine = engine_with("Solo");
        assert!(engine.can_spin());
        let mut hooks = RecordingHooks::default();
        engine.request_spin().unwrap();
        let status = run_to_completion(&mut engine, &mut hooks, 0.0);
        assert_eq!(status, FrameStatus::Finished { winner: "Solo".into(), index: 0 });

        let mut strict = WheelEngine::new(
            WheelSettings {
                min_entries_to_spin: 2,
                ..quick_settings()
            },
            1,
        );
        strict.set_entries_from_text("Solo");
        assert_eq!(
            strict.request_spin().unwrap_err(),
            SpinRejected::NotEnoughEntries { have: 1, required: 2 }
        );
    }

    #[test]
    fn test_zero_threshold_still_needs_one_entry() {
        let mut engine = WheelEngine::new(
            WheelSettings {
                min_entries_to_spin: 0,
                ..quick_settings()
            },
            1,
        );
        assert!(engine.request_spin().is_err());
    }

    #[test]
    fn test_pinned_winner_always_wins() {
        let mut engine = engine_with("Alice\nBob\nCarol\nDave");
        let mut hooks = RecordingHooks::default();
        assert_eq!(engine.force_next_winner("ca"), Some("Carol"));

        let mut now = 0.0;
        for _ in 0..5 {
            engine.request_spin().unwrap();
            let status = run_to_completion(&mut engine, &mut hooks, now);
            assert_eq!(status, FrameStatus::Finished { winner: "Carol".into(), index: 2 });
            now += 10_000.0;
        }
        // Pin stays in force until cleared
        assert_eq!(engine.pinned_winner(), Some("Carol"));
        engine.clear_pinned_winner();
        assert_eq!(engine.pinned_winner(), None);
    }

    #[test]
    fn test_failed_pin_keeps_previous() {
        let mut engine = engine_with("Alice,Bob");
        engine.force_next_winner("bob");
        assert_eq!(engine.force_next_winner("zed"), None);
        assert_eq!(engine.pinned_winner(), Some("Bob"));
    }

    #[test]
    fn test_pin_cleared_when_entry_removed() {
        let mut engine = engine_with("Alice\nBob\nCarol");
        engine.force_next_winner("Bob");
        engine.set_entries(vec!["Alice".into(), "Carol".into()]);
        assert_eq!(engine.pinned_winner(), None);

        engine.force_next_winner("Carol");
        engine.set_entries_from_text("Carol, Dave");
        assert_eq!(engine.pinned_winner(), Some("Carol"));

        engine.set_entries_from_text("");
        assert_eq!(engine.pinned_winner(), None);
    }

    #[test]
    fn test_pin_at_uses_current_rotation() {
        let mut engine = engine_with("a\nb\nc\nd\ne\nf");
        let mut hooks = RecordingHooks::default();
        engine.request_spin().unwrap();
        run_to_completion(&mut engine, &mut hooks, 0.0);

        let offset = segment_click_point(4, 6, engine.rotation(), 50.0);
        assert_eq!(engine.pin_at(offset, 100.0), Some("e"));
        assert_eq!(engine.pin_at(DVec2::new(500.0, 0.0), 100.0), None);
        assert_eq!(engine.pinned_winner(), Some("e"));
    }

    #[test]
    fn test_rotation_persists_across_spins() {
        let mut engine = engine_with("a,b,c,d");
        let mut hooks = RecordingHooks::default();
        engine.request_spin().unwrap();
        run_to_completion(&mut engine, &mut hooks, 0.0);
        let resting = engine.rotation();

        let start = engine.request_spin().unwrap().start_rotation;
        assert_eq!(start, resting);
    }

    #[test]
    fn test_start_time_taken_from_first_frame() {
        let mut engine = engine_with("a,b");
        let mut hooks = RecordingHooks::default();
        engine.request_spin().unwrap();
        let first = engine.advance(50_000.0, &mut hooks);
        assert_eq!(
            first,
            FrameStatus::Spinning {
                rotation: engine.rotation(),
                progress: 0.0
            }
        );
        // Halfway through the fixed 1000 ms duration
        match engine.advance(50_500.0, &mut hooks) {
            FrameStatus::Spinning { progress, .. } => assert!((progress - 0.5).abs() < 1e-12),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(engine.advance(51_000.0, &mut hooks), FrameStatus::Finished { .. }));
    }

    #[test]
    fn test_remove_winner_after_spin() {
        let mut engine = WheelEngine::new(
            WheelSettings {
                remove_winner_after_spin: true,
                ..quick_settings()
            },
            9,
        );
        engine.set_entries_from_text("Alice\nBob\nCarol");
        engine.force_next_winner("bob");
        let mut hooks = RecordingHooks::default();
        engine.request_spin().unwrap();
        let status = run_to_completion(&mut engine, &mut hooks, 0.0);

        assert_eq!(status, FrameStatus::Finished { winner: "Bob".into(), index: 1 });
        assert_eq!(engine.entries(), ["Alice".to_string(), "Carol".to_string()]);
        assert_eq!(engine.pinned_winner(), None);
        assert_eq!(engine.highlight(), None);
    }

    #[test]
    fn test_entries_edited_mid_spin() {
        let mut engine = engine_with("Alice\nBob");
        engine.force_next_winner("Bob");
        let mut hooks = RecordingHooks::default();
        engine.request_spin().unwrap();
        engine.advance(0.0, &mut hooks);
        engine.set_entries_from_text("Zed");
        let status = run_to_completion(&mut engine, &mut hooks, 16.0);

        // The winner was fixed at request time; no stale highlight
        assert_eq!(status, FrameStatus::Finished { winner: "Bob".into(), index: 1 });
        assert_eq!(engine.highlight(), None);
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let spin_once = || {
            let mut engine = engine_with("a,b,c,d,e,f,g");
            let mut hooks = RecordingHooks::default();
            let trajectory = engine.request_spin().unwrap();
            (trajectory, run_to_completion(&mut engine, &mut hooks, 0.0))
        };
        assert_eq!(spin_once(), spin_once());
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            SpinRejected::NotEnoughEntries { have: 1, required: 2 }.to_string(),
            "need at least 2 entries to spin, have 1"
        );
        assert_eq!(SpinRejected::AlreadySpinning.to_string(), "a spin is already in progress");
    }

    #[test]
    fn test_redraw_reports_rest_state() {
        let engine = engine_with("a,b,c");
        let mut hooks = RecordingHooks::default();
        engine.redraw(&mut hooks);
        assert_eq!(hooks.renders, vec![(0.0, 3, None)]);
    }
}
