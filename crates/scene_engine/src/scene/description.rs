//! Declarative scene descriptions
//!
//! Plain serde values mirroring the scene file: window, camera, lights and
//! the group tree. A description can come from the external scene parser or
//! straight from a `.ron`/`.toml` file through [`Config`]. Building it
//! validates every value and produces a ready [`Scene`].
//!
//! Angles are written in degrees here and converted to radians on build.

use serde::{Deserialize, Serialize};

use super::composite::CompositeTransform;
use super::entity::Entity;
use super::error::{SceneError, SceneResult};
use super::group::Group;
use super::light::Light;
use super::scene_root::Scene;
use super::transform::{RotationDirection, Transform};
use crate::camera::{Camera, CameraLimits, CameraParams, CameraType};
use crate::config::{Config, WindowConfig};
use crate::foundation::math::{utils, Vec3};
use crate::render::{Material, MeshLibrary, TextureHandle};

/// Complete scene file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    /// Window size used for the initial aspect ratio
    pub window: WindowConfig,
    /// Scene camera
    pub camera: CameraDescription,
    /// Lights in declaration order
    pub lights: Vec<LightDescription>,
    /// Root groups in declaration order
    pub groups: Vec<GroupDescription>,
}

impl Config for SceneDescription {}

/// Camera element
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDescription {
    /// `orbital`, `free` or `thirdperson`
    #[serde(rename = "type")]
    pub kind: String,
    /// Camera position
    pub position: [f32; 3],
    /// Look-at point
    pub look_at: [f32; 3],
    /// Up vector
    pub up: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping distance
    pub near: f32,
    /// Far clipping distance
    pub far: f32,
    /// Group followed by a third-person camera
    pub follow: Option<GroupDescription>,
}

impl Default for CameraDescription {
    fn default() -> Self {
        Self {
            kind: "orbital".to_string(),
            position: [0.0, 0.0, 10.0],
            look_at: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fov: 60.0,
            near: 1.0,
            far: 1000.0,
            follow: None,
        }
    }
}

/// Light element
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightDescription {
    /// Light at infinity shining along `direction`
    Directional {
        /// Direction the light travels
        direction: [f32; 3],
        /// RGB color
        #[serde(default = "white")]
        color: [f32; 3],
    },
    /// Omnidirectional light
    Point {
        /// Light position
        position: [f32; 3],
        /// RGB color
        #[serde(default = "white")]
        color: [f32; 3],
    },
    /// Cone light
    Spot {
        /// Light position
        position: [f32; 3],
        /// Cone axis
        direction: [f32; 3],
        /// Cone half-angle in degrees
        cutoff: f32,
        /// RGB color
        #[serde(default = "white")]
        color: [f32; 3],
    },
}

fn white() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

/// Group element
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupDescription {
    /// Name used in logs
    pub name: String,
    /// Transforms in declaration order (at most one of each kind)
    pub transforms: Vec<TransformDescription>,
    /// Models drawn by this group
    pub models: Vec<ModelDescription>,
    /// Child groups
    pub groups: Vec<GroupDescription>,
}

/// Transform element
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformDescription {
    /// Fixed translation
    Translate {
        /// Offset
        vector: [f32; 3],
    },
    /// Looping Catmull-Rom translation
    AnimatedTranslate {
        /// Seconds per lap
        period: f32,
        /// Orient the group along the path
        #[serde(default)]
        align: bool,
        /// At least four control points
        points: Vec<[f32; 3]>,
    },
    /// Fixed rotation
    Rotate {
        /// Rotation axis
        axis: [f32; 3],
        /// Angle in degrees
        angle: f32,
    },
    /// Continuous rotation
    AnimatedRotate {
        /// Rotation axis
        axis: [f32; 3],
        /// Seconds per turn
        period: f32,
        /// Spin clockwise instead of counter-clockwise
        #[serde(default)]
        clockwise: bool,
    },
    /// Per-axis scale
    Scale {
        /// Scale factors
        vector: [f32; 3],
    },
}

/// Model element
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelDescription {
    /// Mesh path resolved through the mesh library
    pub file: String,
    /// Optional texture path
    pub texture: Option<String>,
    /// Surface material
    pub material: Material,
}

impl SceneDescription {
    /// Validate the description and build the scene
    pub fn build(&self, meshes: &mut MeshLibrary, limits: CameraLimits) -> SceneResult<Scene> {
        let camera = self.camera.build(meshes, limits, &self.window)?;
        let mut scene = Scene::new(self.window.width, self.window.height, camera);

        for light in &self.lights {
            scene.add_light(light.build()?);
        }
        for group in &self.groups {
            scene.add_group(group.build(meshes)?);
        }

        log::info!(
            "Built scene: {} root groups, {} entities, {} lights, {} camera",
            scene.groups().len(),
            scene.entity_count(),
            scene.lights().len(),
            scene.camera_type()
        );
        Ok(scene)
    }
}

impl CameraDescription {
    /// Build the camera, including its followed group
    pub fn build(&self, meshes: &mut MeshLibrary, limits: CameraLimits, window: &WindowConfig) -> SceneResult<Camera> {
        let camera_type: CameraType = self.kind.parse()?;
        let params = CameraParams {
            position: vector(self.position, "camera position")?,
            look_at: vector(self.look_at, "camera look-at")?,
            up: vector(self.up, "camera up")?,
            fov: utils::deg_to_rad(self.fov),
            near: self.near,
            far: self.far,
            aspect: window.width.max(1) as f32 / window.height.max(1) as f32,
        };
        let followed = self.follow.as_ref().map(|group| group.build(meshes)).transpose()?;
        Camera::new(camera_type, params, limits, followed)
    }
}

impl LightDescription {
    /// Build the light
    pub fn build(&self) -> SceneResult<Light> {
        match self {
            Self::Directional { direction, color } => {
                Light::directional(vector(*direction, "light direction")?, vector(*color, "light color")?)
            }
            Self::Point { position, color } => Ok(Light::point(
                vector(*position, "light position")?,
                vector(*color, "light color")?,
            )),
            Self::Spot { position, direction, cutoff, color } => Light::spot(
                vector(*position, "light position")?,
                vector(*direction, "light direction")?,
                vector(*color, "light color")?,
                utils::deg_to_rad(*cutoff),
            ),
        }
    }
}

impl GroupDescription {
    /// Build the group subtree, loading meshes through `meshes`
    pub fn build(&self, meshes: &mut MeshLibrary) -> SceneResult<Group> {
        let transforms = self
            .transforms
            .iter()
            .map(TransformDescription::build)
            .collect::<SceneResult<Vec<_>>>()?;
        let mut group = Group::new(self.name.clone()).with_transform(CompositeTransform::from_transforms(transforms)?);

        for model in &self.models {
            let mesh = meshes.get_or_load(&model.file)?;
            let mut entity = Entity::new(mesh, model.material);
            if let Some(texture) = &model.texture {
                entity = entity.with_texture(TextureHandle(texture.clone()));
            }
            group.add_entity(entity);
        }
        for child in &self.groups {
            group.add_group(child.build(meshes)?);
        }

        log::debug!(
            "Built group '{}' ({} models, {} children)",
            self.name,
            self.models.len(),
            self.groups.len()
        );
        Ok(group)
    }
}

impl TransformDescription {
    /// Build the transform, converting degrees to radians
    pub fn build(&self) -> SceneResult<Transform> {
        match self {
            Self::Translate { vector: v } => Ok(Transform::translation(vector(*v, "translate vector")?)),
            Self::AnimatedTranslate { period, align, points } => {
                let points = points
                    .iter()
                    .map(|p| vector(*p, "animated translation control point"))
                    .collect::<SceneResult<Vec<_>>>()?;
                Transform::animated_translation(points, *period, *align)
            }
            Self::Rotate { axis, angle } => Transform::rotation(vector(*axis, "rotation axis")?, utils::deg_to_rad(*angle)),
            Self::AnimatedRotate { axis, period, clockwise } => {
                let direction = if *clockwise {
                    RotationDirection::Clockwise
                } else {
                    RotationDirection::CounterClockwise
                };
                Transform::animated_rotation(vector(*axis, "rotation axis")?, *period, direction)
            }
            Self::Scale { vector: v } => Ok(Transform::scale(vector(*v, "scale vector")?)),
        }
    }
}

fn vector(v: [f32; 3], what: &'static str) -> SceneResult<Vec3> {
    let v = Vec3::from(v);
    if utils::is_finite_vec3(&v) {
        Ok(v)
    } else {
        Err(SceneError::NonFiniteValue(what))
    }
}
