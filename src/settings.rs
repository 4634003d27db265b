//! Wheel settings
//!
//! Supplied by the host page as JSON (the canvas `data-settings` attribute);
//! anything omitted falls back to the defaults below. Nothing is persisted.

use serde::{Deserialize, Serialize};

use crate::wheel::{Easing, SpinRanges};

/// Color themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    /// Dark luxurious colors with gold/orange accents
    #[default]
    Casino,
    /// Bright fairground primaries
    Carnival,
    /// Deep blues and violets
    Midnight,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Casino => "Casino",
            Theme::Carnival => "Carnival",
            Theme::Midnight => "Midnight",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "casino" => Some(Theme::Casino),
            "carnival" | "fair" => Some(Theme::Carnival),
            "midnight" | "night" => Some(Theme::Midnight),
            _ => None,
        }
    }

    /// Segment fill colors, cycled by segment index
    pub fn segment_colors(&self) -> &'static [&'static str] {
        match self {
            Theme::Casino => &[
                "#fd9201", // signature orange
                "#2a2a40", // dark purple
                "#ffa726", // light orange
                "#1e1e30", // darker blue
                "#ffb74d", // lighter orange
                "#16213e", // navy blue
                "#ff9800", // orange
                "#0f3460", // deep blue
                "#c97d01", // dark orange
                "#1a1a2e", // dark purple blue
                "#fd9201", // signature orange repeat
                "#2a4365", // slate blue
            ],
            Theme::Carnival => &[
                "#e53935", "#fdd835", "#1e88e5", "#43a047", "#fb8c00", "#8e24aa",
            ],
            Theme::Midnight => &[
                "#1a237e", "#311b92", "#0d47a1", "#4a148c", "#283593", "#01579b",
            ],
        }
    }

    /// Confetti colors for the winner reveal
    pub fn confetti_colors(&self) -> &'static [&'static str] {
        match self {
            Theme::Casino => &["#ffa726", "#fd9201", "#ff6f00", "#ffb74d", "#FFD700"],
            Theme::Carnival => &["#e53935", "#fdd835", "#1e88e5", "#43a047", "#FFD700"],
            Theme::Midnight => &["#7986cb", "#b39ddb", "#64b5f6", "#e1f5fe", "#FFD700"],
        }
    }
}

/// Wheel settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelSettings {
    /// Color theme
    pub theme: Theme,

    // === Spin ===
    /// Fewest entries a spin accepts (values below one act as one)
    pub min_entries_to_spin: usize,
    /// Extra-turn and duration ranges
    pub spin: SpinRanges,
    /// Deceleration curve
    pub easing: Easing,
    /// Take the winner off the wheel once revealed
    pub remove_winner_after_spin: bool,

    // === Presentation ===
    pub sound: bool,
    pub confetti: bool,
    /// Sparkles around the rim while spinning
    pub sparkles: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Casino,

            min_entries_to_spin: 1,
            spin: SpinRanges::default(),
            easing: Easing::CubicOut,
            remove_winner_after_spin: false,

            sound: true,
            confetti: true,
            sparkles: true,
            master_volume: 0.8,
        }
    }
}

impl WheelSettings {
    /// Parse settings from a (possibly partial) JSON object
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.spin = settings.spin.sanitized();
        Ok(settings)
    }

    /// Settings from optional page JSON, falling back to defaults
    pub fn from_page(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded wheel settings ({} theme)", settings.theme.as_str());
                settings
            }
            Some(Err(e)) => {
                log::warn!("Ignoring bad wheel settings: {}", e);
                Self::default()
            }
            None => {
                log::info!("Using default wheel settings");
                Self::default()
            }
        }
    }

    /// Effective gain for sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.sound { self.master_volume } else { 0.0 }
    }
}
