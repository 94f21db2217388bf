//! Particle digit material.
//!
//! Each digit slot and colon owns one instance of this material. The vertex
//! shader expands every particle into a small quad, samples the glyph mask to
//! decide whether the particle belongs to the glyph, and offsets it by the
//! fall/show progress uniforms.

use bevy::color::{ColorToComponents, LinearRgba, Srgba};
use bevy::pbr::{Material, MaterialPlugin};
use bevy::prelude::*;
use bevy::render::render_resource::{AsBindGroup, ShaderType};
use bevy::shader::ShaderRef;

use crate::clock::SlotUniforms;

const SHADER_PATH: &str = "shaders/particle_digit.wgsl";

/// Plugin that registers the ParticleDigitMaterial
pub struct ParticleDigitMaterialPlugin;

impl Plugin for ParticleDigitMaterialPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<ParticleDigitMaterial>::default());
    }
}

#[derive(ShaderType, Debug, Clone, Copy, PartialEq)]
pub struct ParticleDigitUniform {
    pub time: f32,
    pub scale: f32,
    pub fall_progress: f32,
    pub show_progress: f32,

    pub particle_size: f32,
    pub fall_distance: f32,
    pub _padding1: f32,
    pub _padding2: f32,

    /// Linear RGBA
    pub primary_color: Vec4,
    /// Linear RGBA
    pub secondary_color: Vec4,
}

impl Default for ParticleDigitUniform {
    fn default() -> Self {
        Self::from(&SlotUniforms::default())
    }
}

impl From<&SlotUniforms> for ParticleDigitUniform {
    fn from(uniforms: &SlotUniforms) -> Self {
        Self {
            time: uniforms.time,
            scale: uniforms.scale,
            fall_progress: uniforms.fall_progress,
            show_progress: uniforms.show_progress,
            particle_size: uniforms.particle_size,
            fall_distance: uniforms.fall_distance,
            _padding1: 0.0,
            _padding2: 0.0,
            primary_color: srgba_to_linear(uniforms.primary_color),
            secondary_color: srgba_to_linear(uniforms.secondary_color),
        }
    }
}

fn srgba_to_linear([r, g, b, a]: [f32; 4]) -> Vec4 {
    LinearRgba::from(Srgba::new(r, g, b, a)).to_vec4()
}

#[derive(Asset, TypePath, AsBindGroup, Debug, Clone, Default)]
pub struct ParticleDigitMaterial {
    #[uniform(0)]
    pub data: ParticleDigitUniform,

    /// Glyph intensity mask (red channel)
    #[texture(1)]
    #[sampler(2)]
    pub glyph: Handle<Image>,
}

impl Material for ParticleDigitMaterial {
    fn vertex_shader() -> ShaderRef {
        SHADER_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        SHADER_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Blend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_copies_progress() {
        let uniforms = SlotUniforms {
            time: 4.5,
            scale: 0.75,
            fall_progress: 0.25,
            show_progress: 0.5,
            ..SlotUniforms::default()
        };
        let data = ParticleDigitUniform::from(&uniforms);
        assert_eq!(data.time, 4.5);
        assert_eq!(data.scale, 0.75);
        assert_eq!(data.fall_progress, 0.25);
        assert_eq!(data.show_progress, 0.5);
    }

    #[test]
    fn test_colors_are_linearized() {
        let uniforms = SlotUniforms {
            primary_color: [1.0, 0.5, 0.0, 1.0],
            ..SlotUniforms::default()
        };
        let data = ParticleDigitUniform::from(&uniforms);
        assert!((data.primary_color.x - 1.0).abs() < 1e-5);
        // sRGB mid-grey is darker in linear space
        assert!(data.primary_color.y < 0.5 && data.primary_color.y > 0.1);
        assert_eq!(data.primary_color.z, 0.0);
        assert_eq!(data.primary_color.w, 1.0);
    }
}
