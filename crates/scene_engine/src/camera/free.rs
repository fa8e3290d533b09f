//! First-person yaw/pitch orientation

use crate::foundation::math::{constants, utils, Vec2, Vec3};

/// Maximum pitch magnitude, just short of straight up or down
pub const PITCH_LIMIT: f32 = constants::HALF_PI - 1e-3;

/// Look direction of a free camera
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FreeLook {
    /// Rotation around +Y, zero looking down +Z
    pub yaw: f32,
    /// Elevation above the horizontal plane
    pub pitch: f32,
}

impl FreeLook {
    /// Orientation looking along `direction`; zero angles when it has no length
    pub fn from_direction(direction: &Vec3) -> Self {
        let Some(direction) = direction.try_normalize(constants::LENGTH_EPSILON) else {
            return Self::default();
        };
        Self {
            yaw: direction.x.atan2(direction.z),
            pitch: utils::clamp(direction.y, -1.0, 1.0)
                .asin()
                .clamp(-PITCH_LIMIT, PITCH_LIMIT),
        }
    }

    /// Unit look direction
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    /// Turn by `delta.x` (yaw) and `delta.y` (pitch)
    pub fn pan(&mut self, delta: &Vec2) {
        self.yaw = utils::wrap_angle(self.yaw + delta.x);
        self.pitch = utils::clamp(self.pitch + delta.y, -PITCH_LIMIT, PITCH_LIMIT);
    }
}
