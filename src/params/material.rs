//! Surface material parameters pushed to the host renderer.

use std::path::Path;

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ParamsError};
use crate::host::SurfaceMaterial;

/// Opaque host texture handle (asset path or registry key)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureRef(pub String);

/// Texture slots of the surface material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Main,
    Normal,
    Occlusion,
    Metallic,
    Height,
}

/// Scalar slots of the surface material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatSlot {
    Metallic,
    Smoothness,
}

/// PBR surface parameters for the water material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialParams {
    /// Base color (linear RGBA)
    pub color: Vec4,

    pub main_texture: Option<TextureRef>,
    pub normal_texture: Option<TextureRef>,
    pub occlusion_texture: Option<TextureRef>,
    pub metallic_texture: Option<TextureRef>,
    pub height_texture: Option<TextureRef>,

    /// Metallic factor (0-1)
    pub metallic: f32,

    /// Smoothness factor (0-1)
    pub smoothness: f32,

    /// Main texture tiling (repeats per mesh along u, v)
    pub tiling: Vec2,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            color: Vec4::new(0.0, 0.35, 0.55, 1.0), // Deep sea blue
            main_texture: None,
            normal_texture: None,
            occlusion_texture: None,
            metallic_texture: None,
            height_texture: None,
            metallic: 0.0,
            smoothness: 0.9,
            tiling: Vec2::ONE,
        }
    }
}

impl MaterialParams {
    /// Reject factors outside [0, 1] and non-finite color/tiling.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.color.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "material color",
            });
        }
        if !self.tiling.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "material tiling",
            });
        }
        for (field, value) in [("metallic", self.metallic), ("smoothness", self.smoothness)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::MaterialFactorOutOfRange { field, value });
            }
        }
        Ok(())
    }

    /// Load and validate a JSON material file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ParamsError> {
        let json = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }

    /// Texture bound to each slot, in slot order
    pub fn textures(&self) -> [(TextureSlot, Option<&TextureRef>); 5] {
        [
            (TextureSlot::Main, self.main_texture.as_ref()),
            (TextureSlot::Normal, self.normal_texture.as_ref()),
            (TextureSlot::Occlusion, self.occlusion_texture.as_ref()),
            (TextureSlot::Metallic, self.metallic_texture.as_ref()),
            (TextureSlot::Height, self.height_texture.as_ref()),
        ]
    }

    /// Push every parameter to the host material
    pub fn apply(&self, material: &mut dyn SurfaceMaterial) {
        material.set_color(self.color);
        for (slot, texture) in self.textures() {
            material.set_texture(slot, texture);
        }
        material.set_float(FloatSlot::Smoothness, self.smoothness);
        material.set_float(FloatSlot::Metallic, self.metallic);
        material.set_texture_scale(TextureSlot::Main, self.tiling);
    }
}
