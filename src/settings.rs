use crate::sand::model::{Color, LineJoin, StrokeStyle, SAND_COLOR, SAND_LINE_WIDTH};
use crate::sand::DEFAULT_SURFACE_HEIGHT_RATIO;
use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Stroke color as `#RRGGBB` or `#RRGGBBAA`.
    #[serde(default = "default_stroke_color")]
    pub stroke_color: String,
    #[serde(default = "default_line_width")]
    pub line_width: f32,
    #[serde(default)]
    pub line_join: LineJoin,
    /// Height of the sand surface relative to the window height. Read once
    /// when the surface is created.
    #[serde(default = "default_surface_height_ratio")]
    pub surface_height_ratio: f32,
    /// Initial window size in logical pixels.
    #[serde(default = "default_window_size")]
    pub window_size: (f32, f32),
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
}

fn default_stroke_color() -> String {
    SAND_COLOR.to_hex()
}

fn default_line_width() -> f32 {
    SAND_LINE_WIDTH
}

fn default_surface_height_ratio() -> f32 {
    DEFAULT_SURFACE_HEIGHT_RATIO
}

fn default_window_size() -> (f32, f32) {
    (1024.0, 768.0)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stroke_color: default_stroke_color(),
            line_width: default_line_width(),
            line_join: LineJoin::Round,
            surface_height_ratio: default_surface_height_ratio(),
            window_size: default_window_size(),
            debug_logging: false,
        }
    }
}

impl Settings {
    /// Loads settings from `path`. A missing or empty file yields defaults.
    /// Values are returned as written; call [`Settings::sanitize`] once
    /// logging is up.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("deserialize settings file {path}"))
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self).context("serialize settings")?;
        std::fs::write(path, json).with_context(|| format!("write settings file {path}"))?;
        Ok(())
    }

    /// Pulls out-of-range values back to usable ones. Returns `true` when
    /// anything changed.
    pub fn sanitize(&mut self) -> bool {
        let mut changed = false;
        if !(self.surface_height_ratio > 0.0 && self.surface_height_ratio <= 1.0) {
            tracing::warn!(
                ratio = self.surface_height_ratio,
                "surface_height_ratio must be within (0, 1]; using default"
            );
            self.surface_height_ratio = default_surface_height_ratio();
            changed = true;
        }
        if !self.line_width.is_finite() || self.line_width < 1.0 {
            tracing::warn!(width = self.line_width, "line_width must be >= 1; clamping");
            self.line_width = if self.line_width.is_finite() {
                1.0
            } else {
                default_line_width()
            };
            changed = true;
        }
        let (w, h) = self.window_size;
        if !(w.is_finite() && h.is_finite() && w >= 1.0 && h >= 1.0) {
            tracing::warn!(width = w, height = h, "invalid window_size; using default");
            self.window_size = default_window_size();
            changed = true;
        }
        changed
    }

    pub fn stroke_color(&self) -> Color {
        match Color::from_hex(&self.stroke_color) {
            Ok(color) => color,
            Err(err) => {
                tracing::warn!(
                    "provided stroke color '{}' is invalid ({err:#}); using sand default",
                    self.stroke_color
                );
                SAND_COLOR
            }
        }
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.stroke_color(),
            line_join: self.line_join,
            line_width: self.line_width,
        }
    }
}
