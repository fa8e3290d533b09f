//! Composite (TRS) transforms
//!
//! Up to three transforms composed in the order they were declared, with at
//! most one of each kind. `T·R·S` and `S·R·T` are both legal and give
//! different matrices; the declared order is kept as written.

use super::error::{SceneError, SceneResult};
use super::spline::AnimatedTranslation;
use super::transform::Transform;
use crate::foundation::math::Mat4;

/// Maximum number of transforms in one composite
pub const MAX_SLOTS: usize = 3;

/// Ordered composition of up to three transforms
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeTransform {
    slots: Vec<Transform>,
    declared: usize,
    matrix: Mat4,
}

impl Default for CompositeTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeTransform {
    /// Identity composite
    pub fn new() -> Self {
        Self {
            slots: Vec::with_capacity(MAX_SLOTS),
            declared: 0,
            matrix: Mat4::identity(),
        }
    }

    /// Build a composite from transforms in declaration order
    pub fn from_transforms(transforms: impl IntoIterator<Item = Transform>) -> SceneResult<Self> {
        let mut composite = Self::new();
        for transform in transforms {
            composite.push(transform)?;
        }
        Ok(composite)
    }

    /// Append a transform after the ones already declared
    ///
    /// Every declared transform counts toward [`MAX_SLOTS`]; identity
    /// transforms count but add nothing to the product.
    pub fn push(&mut self, transform: Transform) -> SceneResult<()> {
        if self.declared == MAX_SLOTS {
            return Err(SceneError::TooManyTransforms);
        }
        let Some(kind) = transform.kind() else {
            self.declared += 1;
            return Ok(());
        };
        if self.slots.iter().any(|slot| slot.kind() == Some(kind)) {
            return Err(SceneError::DuplicateTransformKind(kind));
        }
        self.declared += 1;

        self.slots.push(transform);
        self.recompose();
        Ok(())
    }

    /// Refresh animated slots for `time` and recompose the product
    pub fn update(&mut self, time: f32) {
        for slot in &mut self.slots {
            slot.evaluate(time);
        }
        self.recompose();
    }

    /// Composed local matrix from the last update
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Transforms in declared order
    pub fn slots(&self) -> &[Transform] {
        &self.slots
    }

    /// True when any slot depends on time
    pub fn is_animated(&self) -> bool {
        self.slots.iter().any(Transform::is_animated)
    }

    /// Animated translation slot together with the product of the slots
    /// declared before it
    ///
    /// The path overlay is drawn in the space reached after those slots.
    pub fn animated_translation_prefix(&self) -> Option<(&AnimatedTranslation, Mat4)> {
        let mut prefix = Mat4::identity();
        for slot in &self.slots {
            if let Transform::AnimatedTranslation(animation) = slot {
                return Some((animation, prefix));
            }
            prefix *= slot.matrix();
        }
        None
    }

    fn recompose(&mut self) {
        self.matrix = self
            .slots
            .iter()
            .fold(Mat4::identity(), |acc, slot| acc * slot.matrix());
    }
}
