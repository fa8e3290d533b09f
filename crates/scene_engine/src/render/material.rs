//! Surface description handed to the pipeline with every mesh draw

use serde::{Deserialize, Serialize};

/// Fixed-function style material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Diffuse color (RGB)
    pub diffuse: [f32; 3],
    /// Ambient color (RGB)
    pub ambient: [f32; 3],
    /// Specular color (RGB)
    pub specular: [f32; 3],
    /// Emissive color (RGB)
    pub emissive: [f32; 3],
    /// Specular exponent
    pub shininess: f32,
}

impl Material {
    /// Create a new material with default properties
    pub fn new() -> Self {
        Self {
            diffuse: [0.8, 0.8, 0.8],
            ambient: [0.2, 0.2, 0.2],
            specular: [0.0, 0.0, 0.0],
            emissive: [0.0, 0.0, 0.0],
            shininess: 0.0,
        }
    }

    /// Set the diffuse color
    pub fn with_diffuse(mut self, r: f32, g: f32, b: f32) -> Self {
        self.diffuse = [r, g, b];
        self
    }

    /// Set the emissive color
    pub fn with_emissive(mut self, r: f32, g: f32, b: f32) -> Self {
        self.emissive = [r, g, b];
        self
    }

    /// Set the specular color and exponent
    pub fn with_specular(mut self, color: [f32; 3], shininess: f32) -> Self {
        self.specular = color;
        self.shininess = shininess.clamp(0.0, 128.0);
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new()
    }
}

/// Name of a texture resolved by the render collaborator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(pub String);

impl TextureHandle {
    /// Texture path as given in the scene description
    pub fn path(&self) -> &str {
        &self.0
    }
}
