//! Atmosphere halo material.
//!
//! A thin additive shell around the planet whose brightness depends on how
//! directly each surface point faces the viewer: strongest at the limb,
//! fading to nothing over the disc.

use bevy::prelude::*;
use bevy::render::render_resource::AsBindGroup;
use bevy::shader::ShaderRef;

/// Shader asset path, relative to `assets/`.
const ATMOSPHERE_SHADER_PATH: &str = "shaders/atmosphere.wgsl";

/// Glow color of the halo.
pub const GLOW: LinearRgba = LinearRgba::rgb(0.3, 0.6, 1.0);

/// Shape of the limb falloff: `pow(max(bias - facing, 0), exponent) * gain`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Falloff {
    pub bias: f32,
    pub exponent: f32,
    pub gain: f32,
}

impl Default for Falloff {
    fn default() -> Self {
        Self {
            bias: 0.5,
            exponent: 4.5,
            gain: 2.0,
        }
    }
}

impl Falloff {
    /// Halo intensity for a surface whose normal has cosine `facing` with
    /// the direction to the viewer. Mirrors the fragment shader.
    pub fn intensity(&self, facing: f32) -> f32 {
        (self.bias - facing).max(0.0).powf(self.exponent) * self.gain
    }
}

/// Material drawing the atmosphere shell.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct AtmosphereMaterial {
    #[uniform(0)]
    pub glow: LinearRgba,
    /// `x` bias, `y` exponent, `z` gain.
    #[uniform(1)]
    pub falloff: Vec4,
}

impl AtmosphereMaterial {
    pub fn new(glow: LinearRgba, falloff: Falloff) -> Self {
        Self {
            glow,
            falloff: Vec4::new(falloff.bias, falloff.exponent, falloff.gain, 0.0),
        }
    }
}

impl Default for AtmosphereMaterial {
    fn default() -> Self {
        Self::new(GLOW, Falloff::default())
    }
}

impl Material for AtmosphereMaterial {
    fn fragment_shader() -> ShaderRef {
        ATMOSPHERE_SHADER_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Add
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_no_glow_over_the_disc() {
        let falloff = Falloff::default();
        assert_eq!(falloff.intensity(1.0), 0.0);
        assert_eq!(falloff.intensity(0.5), 0.0);
    }

    #[test]
    fn test_limb_glow() {
        let falloff = Falloff::default();
        assert_relative_eq!(falloff.intensity(0.0), 0.5f32.powf(4.5) * 2.0);
    }

    #[test]
    fn test_intensity_grows_toward_back_faces() {
        let falloff = Falloff::default();
        let mut previous = -1.0;
        for i in 0..=20 {
            let facing = 1.0 - i as f32 * 0.1;
            let intensity = falloff.intensity(facing);
            assert!(intensity >= previous);
            previous = intensity;
        }
    }

    #[test]
    fn test_material_packs_falloff() {
        let material = AtmosphereMaterial::default();
        assert_eq!(material.falloff, Vec4::new(0.5, 4.5, 2.0, 0.0));
        assert_eq!(material.glow, GLOW);
    }
}
