//! Held keys to continuous camera motion
//!
//! Default bindings:
//!
//! | Keys            | Delta                   |
//! |-----------------|-------------------------|
//! | W / S           | movement z +1 / -1      |
//! | D / A           | movement x +1 / -1      |
//! | E / Q           | movement y +1 / -1      |
//! | Left / Right    | pan x +1 / -1           |
//! | Up / Down       | pan y +1 / -1           |
//! | Z / X           | zoom +1 / -1            |
//! | left-drag       | pan, scaled per pixel   |
//!
//! Key rates are per second and scaled by the frame delta; mouse drag is
//! already a per-frame amount and is not.

use super::{InputManager, KeyCode};
use crate::camera::Camera;
use crate::config::CameraControlConfig;
use crate::foundation::math::{Vec2, Vec3};

/// Motion requested for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraDeltas {
    /// Argument for [`Camera::move_by`]
    pub movement: Vec3,
    /// Argument for [`Camera::pan`]
    pub pan: Vec2,
    /// Argument for [`Camera::zoom`]
    pub zoom: f32,
}

impl CameraDeltas {
    /// True when nothing would change
    pub fn is_zero(&self) -> bool {
        self.movement == Vec3::zeros() && self.pan == Vec2::zeros() && self.zoom == 0.0
    }
}

/// Translates input state into camera deltas
#[derive(Debug, Clone, Default)]
pub struct CameraController {
    config: CameraControlConfig,
}

impl CameraController {
    /// Controller with the given rates
    pub fn new(config: CameraControlConfig) -> Self {
        Self { config }
    }

    /// Rates in use
    pub fn config(&self) -> &CameraControlConfig {
        &self.config
    }

    /// Deltas for a frame of `dt` seconds; consumes the accumulated mouse drag
    pub fn compute(&self, input: &mut InputManager, dt: f32) -> CameraDeltas {
        let movement = Vec3::new(
            input.axis(KeyCode::D, KeyCode::A),
            input.axis(KeyCode::E, KeyCode::Q),
            input.axis(KeyCode::W, KeyCode::S),
        ) * (self.config.move_speed * dt);

        let keys_pan = Vec2::new(
            input.axis(KeyCode::Left, KeyCode::Right),
            input.axis(KeyCode::Up, KeyCode::Down),
        ) * (self.config.pan_speed * dt);
        let drag = input.take_mouse_delta();
        let pan = keys_pan - drag * self.config.mouse_sensitivity;

        let zoom = input.axis(KeyCode::Z, KeyCode::X) * self.config.zoom_rate * dt;

        CameraDeltas { movement, pan, zoom }
    }

    /// Apply deltas to the camera, skipping the zero ones
    pub fn apply(&self, deltas: &CameraDeltas, camera: &mut Camera) {
        if deltas.movement != Vec3::zeros() {
            camera.move_by(&deltas.movement);
        }
        if deltas.pan != Vec2::zeros() {
            camera.pan(&deltas.pan);
        }
        if deltas.zoom != 0.0 {
            camera.zoom(deltas.zoom);
        }
    }

    /// Compute and apply in one step, returning what was applied
    pub fn update(&self, input: &mut InputManager, camera: &mut Camera, dt: f32) -> CameraDeltas {
        let deltas = self.compute(input, dt);
        if !deltas.is_zero() {
            self.apply(&deltas, camera);
            log::trace!("Camera deltas applied: {:?}", deltas);
        }
        deltas
    }
}
