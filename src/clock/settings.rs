//! Clock settings embedded from `assets/config/particle_clock.json`.

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use super::error::Result;
use super::layout::{LayoutMetrics, ScaleRule};
use super::style::{ClockStyle, Rgb8};

const SETTINGS_JSON: &str = include_str!("../../assets/config/particle_clock.json");

/// Animation and polling timings, all in seconds
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    pub tick_interval: f32,
    /// Fixed wait between a hide and the paired reveal
    pub reveal_base_delay: f32,
    /// Added per draw-order step to stagger slots
    pub reveal_stagger: f32,
    pub fall_duration: f32,
    pub show_duration: f32,
    /// Wait before the one-time colon reveal
    pub colon_reveal_delay: f32,
    pub resize_debounce: f32,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            tick_interval: 1.0,
            reveal_base_delay: 0.3,
            reveal_stagger: 0.04,
            fall_duration: 1.25,
            show_duration: 0.7,
            colon_reveal_delay: 0.5,
            resize_debounce: 0.3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub digit_width: f32,
    pub colon_width: f32,
    pub glyph_height: f32,
    pub gap: f32,
    pub reference_width: f32,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        let metrics = LayoutMetrics::default();
        let rule = ScaleRule::default();
        Self {
            digit_width: metrics.digit_width,
            colon_width: metrics.colon_width,
            glyph_height: metrics.glyph_height,
            gap: metrics.gap,
            reference_width: rule.reference_width,
            min_scale: rule.min_scale,
            max_scale: rule.max_scale,
        }
    }
}

impl LayoutSettings {
    pub fn metrics(&self) -> LayoutMetrics {
        LayoutMetrics {
            digit_width: self.digit_width,
            colon_width: self.colon_width,
            glyph_height: self.glyph_height,
            gap: self.gap,
        }
    }

    pub fn scale_rule(&self) -> ScaleRule {
        ScaleRule {
            reference_width: self.reference_width,
            min_scale: self.min_scale,
            max_scale: self.max_scale,
        }
    }
}

/// Style as written in the settings file (hex colors)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSettings {
    pub background: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub particle_size: f32,
    pub fall_distance: f32,
}

impl Default for StyleSettings {
    fn default() -> Self {
        let style = ClockStyle::default();
        Self {
            background: style.background.to_hex(),
            primary_color: style.primary_color.to_hex(),
            secondary_color: style.secondary_color.to_hex(),
            particle_size: style.particle_size,
            fall_distance: style.fall_distance,
        }
    }
}

impl StyleSettings {
    pub fn to_style(&self) -> Result<ClockStyle> {
        Ok(ClockStyle {
            background: Rgb8::from_hex(&self.background)?,
            primary_color: Rgb8::from_hex(&self.primary_color)?,
            secondary_color: Rgb8::from_hex(&self.secondary_color)?,
            particle_size: self.particle_size,
            fall_distance: self.fall_distance,
        }
        .clamped())
    }
}

/// Where digit glyph masks come from
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum GlyphSettings {
    /// Rasterize seven-segment masks at startup
    Procedural { width: u32, height: u32 },
    /// Load `<dir>/0.png` .. `<dir>/9.png` and `<dir>/colon.png`
    Assets { dir: String },
}

impl Default for GlyphSettings {
    fn default() -> Self {
        GlyphSettings::Procedural {
            width: 64,
            height: 104,
        }
    }
}

/// Particle grid sampled over each glyph
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSettings {
    /// Particles across one digit; colons use proportionally fewer
    pub columns: u32,
    pub rows: u32,
    /// Random offset as a fraction of the grid spacing
    pub jitter: f32,
    pub seed: u64,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            columns: 40,
            rows: 64,
            jitter: 0.35,
            seed: 0x5eed,
        }
    }
}

#[derive(Resource, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockSettings {
    pub timing: TimingSettings,
    pub layout: LayoutSettings,
    pub style: StyleSettings,
    pub glyphs: GlyphSettings,
    pub particles: ParticleSettings,
}

impl ClockSettings {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Settings shipped with the binary, or defaults if they fail to parse
    pub fn embedded() -> Self {
        match Self::from_json(SETTINGS_JSON) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("{err}; using default clock settings");
                Self::default()
            }
        }
    }

    /// Style from settings, or the default style if a color is malformed
    pub fn style(&self) -> ClockStyle {
        self.style.to_style().unwrap_or_else(|err| {
            log::warn!("{err}; using default clock style");
            ClockStyle::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_settings_parse() {
        let settings = ClockSettings::from_json(SETTINGS_JSON).unwrap();
        assert_eq!(settings.timing.tick_interval, 1.0);
        assert_eq!(settings.timing.reveal_base_delay, 0.3);
        assert_eq!(settings.timing.fall_duration, 1.25);
        assert_eq!(settings.timing.show_duration, 0.7);
        assert_eq!(settings.timing.resize_debounce, 0.3);
        assert_eq!(settings.layout.reference_width, 1800.0);
        assert!(settings.style.to_style().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let settings = ClockSettings::from_json(r#"{ "timing": { "fall_duration": 2.0 } }"#)
            .unwrap();
        assert_eq!(settings.timing.fall_duration, 2.0);
        assert_eq!(settings.timing.show_duration, 0.7);
        assert_eq!(settings.layout, LayoutSettings::default());
        assert_eq!(settings.glyphs, GlyphSettings::default());
    }

    #[test]
    fn test_asset_glyphs() {
        let settings =
            ClockSettings::from_json(r#"{ "glyphs": { "source": "assets", "dir": "digits" } }"#)
                .unwrap();
        assert_eq!(
            settings.glyphs,
            GlyphSettings::Assets {
                dir: "digits".into()
            }
        );
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(ClockSettings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_bad_color_falls_back() {
        let mut settings = ClockSettings::default();
        settings.style.primary_color = "red".into();
        assert!(settings.style.to_style().is_err());
        assert_eq!(settings.style(), ClockStyle::default());
    }
}
