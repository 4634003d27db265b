//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! The tick cadence is plain arithmetic so it also runs (and is tested) natively.

#[cfg(target_arch = "wasm32")]
use web_sys::{
    AudioContext, BiquadFilterNode, BiquadFilterType, GainNode, OscillatorNode, OscillatorType,
};

/// First gap between spin ticks (ms)
pub const TICK_START_DELAY_MS: f64 = 50.0;
/// Each tick waits this much longer than the last (ms)
pub const TICK_SLOWDOWN_MS: f64 = 2.0;
/// Slowest tick gap (ms)
pub const TICK_MAX_DELAY_MS: f64 = 300.0;

/// Victory fanfare notes: C5, E5, G5, C6
pub const FANFARE_NOTES: [f32; 4] = [523.25, 659.25, 783.99, 1046.50];
/// Length of each fanfare note (seconds)
pub const FANFARE_NOTE_SECS: f64 = 0.15;

/// When the next spin tick is due; ticks slow down like a wheel clicking past pegs
#[derive(Debug, Clone)]
pub struct TickCadence {
    delay_ms: f64,
    next_at: Option<f64>,
}

impl Default for TickCadence {
    fn default() -> Self {
        Self::new()
    }
}

impl TickCadence {
    pub fn new() -> Self {
        Self {
            delay_ms: TICK_START_DELAY_MS,
            next_at: None,
        }
    }

    /// Current gap between ticks (ms)
    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    /// Whether a tick should sound at `now_ms`; the first poll always ticks
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.next_at {
            Some(next) if now_ms < next => false,
            _ => {
                self.next_at = Some(now_ms + self.delay_ms);
                self.delay_ms = (self.delay_ms + TICK_SLOWDOWN_MS).min(TICK_MAX_DELAY_MS);
                true
            }
        }
    }
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Button press
    Click,
    /// Wheel passing a peg
    Tick,
    /// Winner revealed
    Fanfare,
}

/// Audio manager for the wheel
#[cfg(target_arch = "wasm32")]
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
    /// Low hum under the ticks while spinning
    whoosh: Option<(OscillatorNode, GainNode)>,
}

#[cfg(target_arch = "wasm32")]
impl AudioManager {
    pub fn new(volume: f32) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: volume.clamp(0.0, 1.0),
            whoosh: None,
        }
    }

    /// Set volume (0.0 - 1.0); zero mutes
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    /// Context ready to play, resumed if the browser suspended it
    fn live_context(&self) -> Option<&AudioContext> {
        if self.volume <= 0.0 {
            return None;
        }
        let ctx = self.ctx.as_ref()?;
        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Some(ctx)
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let Some(ctx) = self.live_context() else { return };
        let vol = self.volume;

        match effect {
            SoundEffect::Click => self.play_click(ctx, vol),
            SoundEffect::Tick => self.play_tick(ctx, vol),
            SoundEffect::Fanfare => self.play_fanfare(ctx, vol),
        }
    }

    /// Start the background whoosh for a spin
    pub fn start_whoosh(&mut self) {
        self.stop_whoosh();
        let Some(ctx) = self.live_context() else { return };
        let vol = self.volume;

        let Some((osc, gain)) = self.create_osc(ctx, 80.0, OscillatorType::Sine) else {
            return;
        };
        // Reroute through a lowpass so only the rumble is left
        if let Some(filter) = self.create_filter(ctx, BiquadFilterType::Lowpass, 300.0, 1.0) {
            osc.disconnect().ok();
            osc.connect_with_audio_node(&filter).ok();
            filter.connect_with_audio_node(&gain).ok();
        }
        gain.gain().set_value_at_time(vol * 0.04, ctx.current_time()).ok();
        osc.start().ok();
        self.whoosh = Some((osc, gain));
    }

    /// Fade out and stop the whoosh
    pub fn stop_whoosh(&mut self) {
        let Some((osc, gain)) = self.whoosh.take() else { return };
        let Some(ctx) = &self.ctx else { return };
        let t = ctx.current_time();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.5)
            .ok();
        osc.stop_with_when(t + 0.5).ok();
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn create_filter(
        &self,
        ctx: &AudioContext,
        filter_type: BiquadFilterType,
        freq: f32,
        q: f32,
    ) -> Option<BiquadFilterNode> {
        let filter = ctx.create_biquad_filter().ok()?;
        filter.set_type(filter_type);
        filter.frequency().set_value(freq);
        filter.q().set_value(q);
        Some(filter)
    }

    /// Click - short high blip
    fn play_click(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 800.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.12, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Tick - crisp bandpassed square, like a flapper on a peg
    fn play_tick(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 1200.0, OscillatorType::Square) else {
            return;
        };
        if let Some(filter) = self.create_filter(ctx, BiquadFilterType::Bandpass, 1200.0, 5.0) {
            osc.disconnect().ok();
            osc.connect_with_audio_node(&filter).ok();
            filter.connect_with_audio_node(&gain).ok();
        }
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.19, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.05)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.05).ok();
    }

    /// Fanfare - rising major arpeggio
    fn play_fanfare(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        for (i, freq) in FANFARE_NOTES.iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) else {
                continue;
            };
            let start = t + i as f64 * FANFARE_NOTE_SECS;
            gain.gain().set_value_at_time(vol * 0.38, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + FANFARE_NOTE_SECS)
                .ok();
            osc.start_with_when(start).ok();
            osc.stop_with_when(start + FANFARE_NOTE_SECS).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_poll_ticks() {
        let mut cadence = TickCadence::new();
        assert!(cadence.poll(1000.0));
        assert!(!cadence.poll(1049.0));
        assert!(cadence.poll(1050.0));
    }

    #[test]
    fn test_ticks_slow_down_to_cap() {
        let mut cadence = TickCadence::new();
        let mut now = 0.0;
        let mut gaps = Vec::new();
        let mut last = None;
        while now < 60_000.0 {
            if cadence.poll(now) {
                if let Some(prev) = last {
                    gaps.push(now - prev);
                }
                last = Some(now);
            }
            now += 1.0;
        }
        assert!(gaps.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(gaps.first().copied(), Some(TICK_START_DELAY_MS));
        assert_eq!(gaps.last().copied(), Some(TICK_MAX_DELAY_MS));
        assert_eq!(cadence.delay_ms(), TICK_MAX_DELAY_MS);
    }
}
