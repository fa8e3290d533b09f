//! Third-person follow state
//!
//! The camera orbits a followed point and owns the group drawn there. Moving
//! the camera walks that point across the horizontal plane.

use super::orbital::Spherical;
use crate::foundation::math::{constants, Mat4, Mat4Ext, Vec3};
use crate::scene::Group;

/// Orbit plus the group standing at the look-at point
#[derive(Debug, Clone)]
pub struct ThirdPersonState {
    /// Spherical offset of the camera from the followed point
    pub orbit: Spherical,
    /// Group drawn at the followed point
    pub target: Box<Group>,
}

impl ThirdPersonState {
    /// Follow `target` with the given orbit
    pub fn new(orbit: Spherical, target: Group) -> Self {
        Self {
            orbit,
            target: Box::new(target),
        }
    }
}

/// Forward and right directions of the view projected onto the ground plane
///
/// Returns `(right, forward)`. When the view is vertical the forward falls
/// back to the azimuth direction facing away from the camera.
pub fn horizontal_basis(forward: &Vec3, orbit: &Spherical) -> (Vec3, Vec3) {
    let flat = Vec3::new(forward.x, 0.0, forward.z);
    let forward_h = flat
        .try_normalize(constants::LENGTH_EPSILON)
        .unwrap_or_else(|| -Vec3::new(orbit.azimuth.sin(), 0.0, orbit.azimuth.cos()));
    let right_h = forward_h.cross(&Vec3::y());
    (right_h, forward_h)
}

/// World matrix of the followed group: at `look_at`, facing `forward_h`
pub fn followed_transform(look_at: &Vec3, forward_h: &Vec3) -> Mat4 {
    let heading = forward_h.x.atan2(forward_h.z);
    Mat4::new_translation(look_at) * Mat4::rotation_y(heading)
}
