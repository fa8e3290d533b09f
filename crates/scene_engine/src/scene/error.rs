//! Scene configuration errors
//!
//! Everything here is raised while a scene is being constructed. Per-frame
//! evaluation (update, culling, drawing) is total and never produces errors.

use thiserror::Error;

use super::transform::TransformKind;
use crate::render::MeshError;

/// Errors raised while building scene graph nodes from description values
#[derive(Debug, Error)]
pub enum SceneError {
    /// Animated translation needs at least four control points
    #[error("Animated translation needs at least 4 control points, got {found}")]
    TooFewControlPoints {
        /// Number of points supplied
        found: usize,
    },

    /// Animation period must be a positive finite number of seconds
    #[error("Animation period must be positive, got {0}")]
    NonPositivePeriod(f32),

    /// Camera type tag not in {orbital, free, thirdperson}
    #[error("Unknown camera type: {0:?}")]
    UnknownCameraType(String),

    /// Two transforms of the same kind inside one composite transform
    #[error("Duplicate {0} transform in composite transform")]
    DuplicateTransformKind(TransformKind),

    /// More than three transforms inside one composite transform
    #[error("A composite transform holds at most 3 transforms")]
    TooManyTransforms,

    /// Rotation axis with zero length
    #[error("Rotation axis must be non-zero")]
    ZeroRotationAxis,

    /// NaN or infinite value in a description field
    #[error("Non-finite value in {0}")]
    NonFiniteValue(&'static str),

    /// Camera parameters that cannot define a projection
    #[error("Invalid camera parameters: {0}")]
    InvalidCamera(String),

    /// Light parameters that cannot be used
    #[error("Invalid light: {0}")]
    InvalidLight(String),

    /// A third-person camera was described without a followed group
    #[error("Third-person camera requires a followed group")]
    MissingFollowedGroup,

    /// Mesh could not be provided by the mesh source
    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),
}

/// Result alias for scene construction
pub type SceneResult<T> = Result<T, SceneError>;
