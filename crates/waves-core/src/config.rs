//! Typed, validated options for a wave field instance.
//!
//! Hosts hand over loosely typed option bags (a JS object, a JSON file). They
//! are deserialized into [`WavesConfig`] with every field defaulted and then
//! validated once with [`WavesConfig::validated`], so the per-frame code never
//! has to re-check them.

use crate::constants::MIN_GAP;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{axis} must be a number >= 1, got {value}")]
    InvalidGap { axis: &'static str, value: f32 },
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("invalid options: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Options recognised by the wave field. Keys are camelCase when
/// deserialized (`lineColor`, `xGap`, `maxCursorMove`, ...).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WavesConfig {
    /// Stroke color for every line, any CSS color string.
    pub line_color: String,
    /// Container background, may be `transparent`.
    pub background_color: String,
    pub wave_speed_x: f32,
    pub wave_speed_y: f32,
    pub wave_amp_x: f32,
    pub wave_amp_y: f32,
    /// Horizontal spacing between lines (px).
    pub x_gap: f32,
    /// Vertical spacing between points on a line (px).
    pub y_gap: f32,
    /// Per-frame velocity decay of the cursor spring, in \[0, 1\].
    pub friction: f32,
    /// Restoring force pulling the cursor offset back to zero, in \[0, 1\].
    pub tension: f32,
    /// Per-axis clamp for cursor-induced displacement (px).
    pub max_cursor_move: f32,
    /// Extra class names applied to the host container.
    pub class_name: Option<String>,
}

impl Default for WavesConfig {
    fn default() -> Self {
        Self {
            line_color: "black".to_string(),
            background_color: "transparent".to_string(),
            wave_speed_x: 0.0125,
            wave_speed_y: 0.005,
            wave_amp_x: 32.0,
            wave_amp_y: 16.0,
            x_gap: 10.0,
            y_gap: 32.0,
            friction: 0.925,
            tension: 0.005,
            max_cursor_move: 100.0,
            class_name: None,
        }
    }
}

impl WavesConfig {
    /// Parse a JSON option object and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let parsed: WavesConfig = serde_json::from_str(json)?;
        parsed.validated()
    }

    /// Reject unusable gaps and non-finite numbers; clamp the spring
    /// coefficients into a stable range.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        let numeric = [
            ("waveSpeedX", self.wave_speed_x),
            ("waveSpeedY", self.wave_speed_y),
            ("waveAmpX", self.wave_amp_x),
            ("waveAmpY", self.wave_amp_y),
            ("friction", self.friction),
            ("tension", self.tension),
            ("maxCursorMove", self.max_cursor_move),
        ];
        if let Some((field, _)) = numeric.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite { field: *field });
        }
        if !(self.x_gap.is_finite() && self.x_gap >= MIN_GAP) {
            return Err(ConfigError::InvalidGap {
                axis: "xGap",
                value: self.x_gap,
            });
        }
        if !(self.y_gap.is_finite() && self.y_gap >= MIN_GAP) {
            return Err(ConfigError::InvalidGap {
                axis: "yGap",
                value: self.y_gap,
            });
        }

        self.friction = clamp_logged("friction", self.friction, 0.0, 1.0);
        self.tension = clamp_logged("tension", self.tension, 0.0, 1.0);
        self.max_cursor_move = clamp_logged("maxCursorMove", self.max_cursor_move, 0.0, f32::MAX);
        Ok(self)
    }
}

fn clamp_logged(field: &str, value: f32, min: f32, max: f32) -> f32 {
    let clamped = value.clamp(min, max);
    if clamped != value {
        log::warn!("[config] {} {} out of range, using {}", field, value, clamped);
    }
    clamped
}
