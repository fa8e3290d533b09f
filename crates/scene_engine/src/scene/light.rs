//! Scene lights
//!
//! The scene graph only stores lights and hands them to the renderer as
//! uniform blocks; shading is the pipeline's business.

use bytemuck::{Pod, Zeroable};

use super::error::{SceneError, SceneResult};
use crate::foundation::math::{constants, utils, Vec3};

/// Light types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightType {
    /// Directional light (like sunlight)
    Directional,
    /// Point light (like a lightbulb)
    Point,
    /// Spot light (like a flashlight)
    Spot,
}

/// Light source
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Light type
    pub light_type: LightType,
    /// Light position (point and spot lights)
    pub position: Vec3,
    /// Unit light direction (directional and spot lights)
    pub direction: Vec3,
    /// Light color
    pub color: Vec3,
    /// Half-angle of the spot cone in radians
    pub cutoff: f32,
}

impl Light {
    /// Create a directional light shining along `direction`
    pub fn directional(direction: Vec3, color: Vec3) -> SceneResult<Self> {
        Ok(Self {
            light_type: LightType::Directional,
            position: Vec3::zeros(),
            direction: unit_direction(&direction)?,
            color,
            cutoff: 0.0,
        })
    }

    /// Create a point light
    pub fn point(position: Vec3, color: Vec3) -> Self {
        Self {
            light_type: LightType::Point,
            position,
            direction: Vec3::zeros(),
            color,
            cutoff: constants::PI,
        }
    }

    /// Create a spot light with a cone half-angle in radians
    pub fn spot(position: Vec3, direction: Vec3, color: Vec3, cutoff: f32) -> SceneResult<Self> {
        Ok(Self {
            light_type: LightType::Spot,
            position,
            direction: unit_direction(&direction)?,
            color,
            cutoff: utils::clamp(cutoff, 0.0, constants::HALF_PI),
        })
    }

    /// Uniform block for the render pipeline
    pub fn uniform(&self) -> LightUniform {
        let w = match self.light_type {
            LightType::Directional => 0.0,
            LightType::Point | LightType::Spot => 1.0,
        };
        LightUniform {
            position: [self.position.x, self.position.y, self.position.z, w],
            direction: [self.direction.x, self.direction.y, self.direction.z, 0.0],
            color: [self.color.x, self.color.y, self.color.z, 1.0],
            cone: [self.cutoff.cos(), self.cutoff, 0.0, 0.0],
        }
    }
}

/// Light block (std140 compatible)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LightUniform {
    /// Position; w = 0 for directional lights
    pub position: [f32; 4],
    /// Direction (w unused)
    pub direction: [f32; 4],
    /// RGB color (w unused)
    pub color: [f32; 4],
    /// Cosine of the cutoff, cutoff in radians
    pub cone: [f32; 4],
}

fn unit_direction(direction: &Vec3) -> SceneResult<Vec3> {
    if !utils::is_finite_vec3(direction) {
        return Err(SceneError::NonFiniteValue("light direction"));
    }
    direction
        .try_normalize(constants::LENGTH_EPSILON)
        .ok_or_else(|| SceneError::InvalidLight("direction must be non-zero".to_string()))
}
