//! Spherical coordinates around a look-at point
//!
//! Shared by the orbital and third-person cameras. The polar angle is
//! measured from +Y and kept a little away from both poles, where the
//! azimuth would stop meaning anything. Azimuth 0 points down +Z.

use super::CameraLimits;
use crate::foundation::math::{constants, utils, Vec2, Vec3};

/// Minimum distance of the polar angle from either pole
pub const POLAR_EPSILON: f32 = 1e-3;

/// Radius, azimuth and polar angle of the camera offset from its look-at point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    /// Distance from the look-at point
    pub radius: f32,
    /// Angle around +Y in `[0, 2π)`, zero on +Z
    pub azimuth: f32,
    /// Angle from +Y in `[ε, π−ε]`
    pub polar: f32,
}

impl Spherical {
    /// Derive coordinates from a camera offset (`position - look_at`)
    ///
    /// A zero-length offset has no direction; the angles fall back to zero
    /// (then clamped off the pole) and the radius to the minimum.
    pub fn from_offset(offset: &Vec3, limits: &CameraLimits) -> Self {
        let radius = offset.magnitude();
        let mut spherical = if radius < constants::LENGTH_EPSILON || !radius.is_finite() {
            Self {
                radius: limits.min_radius,
                azimuth: 0.0,
                polar: 0.0,
            }
        } else {
            Self {
                radius,
                azimuth: offset.x.atan2(offset.z),
                polar: utils::clamp(offset.y / radius, -1.0, 1.0).acos(),
            }
        };
        spherical.constrain(limits);
        spherical
    }

    /// Offset from the look-at point to the camera
    pub fn to_offset(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        Vec3::new(
            self.radius * sin_polar * sin_azimuth,
            self.radius * cos_polar,
            self.radius * sin_polar * cos_azimuth,
        )
    }

    /// Orbit by `movement.x`, raise by `movement.y`, approach by `movement.z`
    pub fn move_by(&mut self, movement: &Vec3, limits: &CameraLimits) {
        self.azimuth += movement.x;
        self.polar -= movement.y;
        self.radius -= movement.z;
        self.constrain(limits);
    }

    /// Raw azimuth and polar deltas
    pub fn pan(&mut self, delta: &Vec2, limits: &CameraLimits) {
        self.azimuth += delta.x;
        self.polar += delta.y;
        self.constrain(limits);
    }

    /// Zoom in for positive factors, out for negative ones
    pub fn zoom(&mut self, factor: f32, limits: &CameraLimits) {
        if factor >= 0.0 {
            self.radius /= 1.0 + factor * limits.zoom_speed;
        } else {
            self.radius *= 1.0 + factor.abs() * limits.zoom_speed;
        }
        self.constrain(limits);
    }

    /// Wrap the azimuth, clamp the polar angle and radius into their ranges
    pub fn constrain(&mut self, limits: &CameraLimits) {
        self.azimuth = utils::wrap_angle(self.azimuth);
        self.polar = utils::clamp(self.polar, POLAR_EPSILON, constants::PI - POLAR_EPSILON);
        self.radius = utils::clamp(self.radius, limits.min_radius, limits.max_radius);
    }
}
