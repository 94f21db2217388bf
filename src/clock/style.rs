//! Styling shared by every particle object.
//!
//! The controller owns exactly one [`ClockStyle`]. A panel edit replaces it and
//! [`apply_style`] copies the new values into each slot's uniforms.

use super::error::{ClockError, Result};
use super::slots::SlotUniforms;

/// 8-bit sRGB color, written as `#rrggbb` in settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb8(pub [u8; 3]);

impl Rgb8 {
    pub fn from_hex(text: &str) -> Result<Self> {
        let digits = text.trim().trim_start_matches('#');
        // from_str_radix alone would accept a leading '+'
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ClockError::InvalidColor(text.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ClockError::InvalidColor(text.to_string()))
        };

        Ok(Rgb8([channel(0..2)?, channel(2..4)?, channel(4..6)?]))
    }

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.0;
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Normalized sRGB channels with alpha 1
    pub fn to_srgba_f32(self) -> [f32; 4] {
        let [r, g, b] = self.0;
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }
}

/// Values the debug panel can edit
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClockStyle {
    pub background: Rgb8,
    /// Particle color while a glyph is settled
    pub primary_color: Rgb8,
    /// Particle color particles blend toward as they fall
    pub secondary_color: Rgb8,
    /// Particle diameter in glyph units
    pub particle_size: f32,
    /// How far particles drop during the fall-away, in glyph units
    pub fall_distance: f32,
}

pub const PARTICLE_SIZE_RANGE: std::ops::RangeInclusive<f32> = 0.001..=0.1;
pub const FALL_DISTANCE_RANGE: std::ops::RangeInclusive<f32> = 0.3..=5.0;

impl Default for ClockStyle {
    fn default() -> Self {
        Self {
            background: Rgb8([0x0b, 0x0d, 0x17]),
            primary_color: Rgb8([0xff, 0xff, 0xff]),
            secondary_color: Rgb8([0x2f, 0x7c, 0xff]),
            particle_size: 0.02,
            fall_distance: 1.5,
        }
    }
}

impl ClockStyle {
    /// Clamp the numeric controls into their panel ranges
    pub fn clamped(mut self) -> Self {
        self.particle_size = self
            .particle_size
            .clamp(*PARTICLE_SIZE_RANGE.start(), *PARTICLE_SIZE_RANGE.end());
        self.fall_distance = self
            .fall_distance
            .clamp(*FALL_DISTANCE_RANGE.start(), *FALL_DISTANCE_RANGE.end());
        self
    }
}

/// Copy the style parameters into one object's uniforms
pub fn apply_style(uniforms: &mut SlotUniforms, style: &ClockStyle) {
    uniforms.particle_size = style.particle_size;
    uniforms.fall_distance = style.fall_distance;
    uniforms.primary_color = style.primary_color.to_srgba_f32();
    uniforms.secondary_color = style.secondary_color.to_srgba_f32();
}
