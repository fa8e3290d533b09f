//! Scene graph
//!
//! Transforms, bounding volumes and the node tree that the camera culls and
//! the render pipeline draws.

pub mod bounding;
pub mod composite;
pub mod description;
pub mod entity;
pub mod error;
pub mod group;
pub mod light;
pub mod scene_root;
pub mod spline;
pub mod transform;

pub use bounding::BoundingSphere;
pub use composite::CompositeTransform;
pub use description::{
    CameraDescription, GroupDescription, LightDescription, ModelDescription, SceneDescription,
    TransformDescription,
};
pub use entity::Entity;
pub use error::{SceneError, SceneResult};
pub use group::Group;
pub use light::{Light, LightType, LightUniform};
pub use scene_root::{FrameStats, Scene};
pub use spline::AnimatedTranslation;
pub use transform::{AnimatedRotation, RotationDirection, Transform, TransformKind};
