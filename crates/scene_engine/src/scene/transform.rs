//! Single geometric transform operations
//!
//! A [`Transform`] is one step of a node's local transform: a translation,
//! rotation or scale, either static or driven by the animation clock. Static
//! kinds ignore time; animated kinds carry their own state and refresh their
//! matrix in [`Transform::evaluate`].

use std::fmt;

use super::error::{SceneError, SceneResult};
use super::spline::AnimatedTranslation;
use crate::foundation::math::{constants, utils, Mat4, Unit, Vec3};

/// Kind of a transform, used to enforce one of each kind per composite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    /// Static or animated translation
    Translate,
    /// Static or animated rotation
    Rotate,
    /// Scale
    Scale,
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Translate => "translate",
            Self::Rotate => "rotate",
            Self::Scale => "scale",
        };
        f.write_str(name)
    }
}

/// Spin direction of an animated rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationDirection {
    /// Positive angles about the axis (right-hand rule)
    #[default]
    CounterClockwise,
    /// Negative angles about the axis
    Clockwise,
}

impl RotationDirection {
    /// Sign applied to the accumulated angle
    pub fn sign(self) -> f32 {
        match self {
            Self::CounterClockwise => 1.0,
            Self::Clockwise => -1.0,
        }
    }
}

/// Continuous rotation about a fixed axis, one turn per period
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedRotation {
    axis: Unit<Vec3>,
    period: f32,
    direction: RotationDirection,
    angle: f32,
    matrix: Mat4,
}

impl AnimatedRotation {
    /// Create a rotation completing one turn every `period` seconds
    pub fn new(axis: Vec3, period: f32, direction: RotationDirection) -> SceneResult<Self> {
        if !(period.is_finite() && period > 0.0) {
            return Err(SceneError::NonPositivePeriod(period));
        }
        let axis = normalized_axis(axis)?;
        Ok(Self {
            axis,
            period,
            direction,
            angle: 0.0,
            matrix: Mat4::identity(),
        })
    }

    /// Rotation axis (unit length)
    pub fn axis(&self) -> Vec3 {
        self.axis.into_inner()
    }

    /// Seconds per full turn
    pub fn period(&self) -> f32 {
        self.period
    }

    /// Spin direction
    pub fn direction(&self) -> RotationDirection {
        self.direction
    }

    /// Angle in radians from the last evaluation (not wrapped)
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Recompute the angle for `time` and return the rotation matrix
    pub fn evaluate(&mut self, time: f32) -> Mat4 {
        self.angle = self.direction.sign() * time * constants::TAU / self.period;
        self.matrix = Mat4::from_axis_angle(&self.axis, self.angle);
        self.matrix
    }

    /// Matrix from the last evaluation
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }
}

/// One geometric operation of a node's local transform
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Transform {
    /// No-op
    #[default]
    Identity,
    /// Fixed translation
    Translation(Vec3),
    /// Fixed rotation about a unit axis, angle in radians
    Rotation {
        /// Unit rotation axis
        axis: Unit<Vec3>,
        /// Angle in radians
        angle: f32,
    },
    /// Per-axis scale; negative components mirror
    Scale(Vec3),
    /// Looping spline translation
    AnimatedTranslation(AnimatedTranslation),
    /// Continuous rotation
    AnimatedRotation(AnimatedRotation),
}

impl Transform {
    /// Fixed translation
    pub fn translation(offset: Vec3) -> Self {
        Self::Translation(offset)
    }

    /// Fixed rotation of `angle` radians about `axis`
    pub fn rotation(axis: Vec3, angle: f32) -> SceneResult<Self> {
        if !angle.is_finite() {
            return Err(SceneError::NonFiniteValue("rotation angle"));
        }
        Ok(Self::Rotation { axis: normalized_axis(axis)?, angle })
    }

    /// Per-axis scale
    pub fn scale(factors: Vec3) -> Self {
        Self::Scale(factors)
    }

    /// Looping spline translation through `points`
    pub fn animated_translation(points: Vec<Vec3>, period: f32, align: bool) -> SceneResult<Self> {
        AnimatedTranslation::new(points, period, align).map(Self::AnimatedTranslation)
    }

    /// Continuous rotation about `axis`
    pub fn animated_rotation(axis: Vec3, period: f32, direction: RotationDirection) -> SceneResult<Self> {
        AnimatedRotation::new(axis, period, direction).map(Self::AnimatedRotation)
    }

    /// Kind of this transform; `None` for identity
    pub fn kind(&self) -> Option<TransformKind> {
        match self {
            Self::Identity => None,
            Self::Translation(_) | Self::AnimatedTranslation(_) => Some(TransformKind::Translate),
            Self::Rotation { .. } | Self::AnimatedRotation(_) => Some(TransformKind::Rotate),
            Self::Scale(_) => Some(TransformKind::Scale),
        }
    }

    /// True for kinds driven by the animation clock
    pub fn is_animated(&self) -> bool {
        matches!(self, Self::AnimatedTranslation(_) | Self::AnimatedRotation(_))
    }

    /// Refresh animated state for `time` and return the matrix
    pub fn evaluate(&mut self, time: f32) -> Mat4 {
        match self {
            Self::AnimatedTranslation(animation) => animation.evaluate(time),
            Self::AnimatedRotation(animation) => animation.evaluate(time),
            _ => self.matrix(),
        }
    }

    /// Current matrix; animated kinds return their last evaluation
    pub fn matrix(&self) -> Mat4 {
        match self {
            Self::Identity => Mat4::identity(),
            Self::Translation(offset) => Mat4::new_translation(offset),
            Self::Rotation { axis, angle } => Mat4::from_axis_angle(axis, *angle),
            Self::Scale(factors) => Mat4::new_nonuniform_scaling(factors),
            Self::AnimatedTranslation(animation) => animation.matrix(),
            Self::AnimatedRotation(animation) => animation.matrix(),
        }
    }
}

fn normalized_axis(axis: Vec3) -> SceneResult<Unit<Vec3>> {
    if !utils::is_finite_vec3(&axis) {
        return Err(SceneError::NonFiniteValue("rotation axis"));
    }
    Unit::try_new(axis, constants::LENGTH_EPSILON).ok_or(SceneError::ZeroRotationAxis)
}
