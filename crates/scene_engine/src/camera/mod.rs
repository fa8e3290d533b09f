//! # Camera System
//!
//! One [`Camera`] struct holds the state every kind shares (position, look-at
//! point, projection parameters and the derived matrices and frustum) and a
//! [`CameraKind`] with the per-kind motion model:
//!
//! - **Orbital**: spherical coordinates around a fixed look-at point
//! - **Free**: first-person yaw/pitch, the look-at point follows the camera
//! - **ThirdPerson**: orbital motion around a followed group the camera owns
//!
//! Every mutation recomputes the view, projection and view-projection
//! matrices and the frustum, so reads never see stale culling planes.
//!
//! ## Coordinate System
//! Right-handed, Y-up world. The projection follows the Vulkan convention:
//! `view_projection = P · X · V` where `X` flips Y and Z into clip space.

pub mod free;
pub mod frustum;
pub mod orbital;
pub mod third_person;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use free::FreeLook;
pub use frustum::{Frustum, Plane, PlaneSide};
pub use orbital::Spherical;
pub use third_person::ThirdPersonState;

use crate::foundation::math::{constants, utils, Mat4, Mat4Ext, Vec2, Vec3};
use crate::render::CameraUniform;
use crate::scene::error::{SceneError, SceneResult};
use crate::scene::{BoundingSphere, Group};

/// Zoom rate and radius range for orbiting cameras
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraLimits {
    /// Zoom rate; also the dolly distance per zoom unit of the free camera
    pub zoom_speed: f32,
    /// Closest orbit radius
    pub min_radius: f32,
    /// Farthest orbit radius
    pub max_radius: f32,
}

impl Default for CameraLimits {
    fn default() -> Self {
        Self {
            zoom_speed: 0.8,
            min_radius: 0.5,
            max_radius: 500.0,
        }
    }
}

impl CameraLimits {
    /// Reject limits that cannot be satisfied
    pub fn validate(&self) -> SceneResult<()> {
        if !(self.zoom_speed.is_finite() && self.zoom_speed >= 0.0) {
            return Err(SceneError::InvalidCamera(format!("zoom speed must be >= 0, got {}", self.zoom_speed)));
        }
        if !(self.min_radius.is_finite() && self.min_radius > 0.0) {
            return Err(SceneError::InvalidCamera(format!("min radius must be > 0, got {}", self.min_radius)));
        }
        if !(self.max_radius.is_finite() && self.max_radius >= self.min_radius) {
            return Err(SceneError::InvalidCamera(format!(
                "max radius {} below min radius {}",
                self.max_radius, self.min_radius
            )));
        }
        Ok(())
    }
}

/// Camera kind tag as written in scene descriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraType {
    /// Spherical orbit around the look-at point
    Orbital,
    /// First-person fly camera
    Free,
    /// Orbit around a followed group
    ThirdPerson,
}

impl FromStr for CameraType {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orbital" => Ok(Self::Orbital),
            "free" => Ok(Self::Free),
            "thirdperson" => Ok(Self::ThirdPerson),
            _ => Err(SceneError::UnknownCameraType(s.to_string())),
        }
    }
}

impl fmt::Display for CameraType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Orbital => "orbital",
            Self::Free => "free",
            Self::ThirdPerson => "thirdperson",
        };
        f.write_str(name)
    }
}

/// Shared construction parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraParams {
    /// Camera position in world space
    pub position: Vec3,
    /// Point the camera is looking at in world space
    pub look_at: Vec3,
    /// Up vector (typically [0, 1, 0])
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Distance to near clipping plane
    pub near: f32,
    /// Distance to far clipping plane
    pub far: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            look_at: Vec3::zeros(),
            up: Vec3::y(),
            fov: utils::deg_to_rad(60.0),
            near: 1.0,
            far: 1000.0,
            aspect: 1.0,
        }
    }
}

impl CameraParams {
    fn validate(&self) -> SceneResult<()> {
        let vectors = [self.position, self.look_at, self.up];
        if !vectors.iter().all(utils::is_finite_vec3) {
            return Err(SceneError::NonFiniteValue("camera vector"));
        }
        if self.up.magnitude() < constants::LENGTH_EPSILON {
            return Err(SceneError::InvalidCamera("up vector must be non-zero".to_string()));
        }
        if !(self.fov > 0.0 && self.fov < constants::PI) {
            return Err(SceneError::InvalidCamera(format!("fov must be in (0, π), got {}", self.fov)));
        }
        if !(self.near.is_finite() && self.near > 0.0) {
            return Err(SceneError::InvalidCamera(format!("near must be > 0, got {}", self.near)));
        }
        if !(self.far.is_finite() && self.far > self.near) {
            return Err(SceneError::InvalidCamera(format!(
                "far {} must be greater than near {}",
                self.far, self.near
            )));
        }
        if !(self.aspect.is_finite() && self.aspect > 0.0) {
            return Err(SceneError::InvalidCamera(format!("aspect must be > 0, got {}", self.aspect)));
        }
        Ok(())
    }
}

/// Per-kind motion state
#[derive(Debug, Clone)]
pub enum CameraKind {
    /// Orbit around the look-at point
    Orbital(Spherical),
    /// Yaw/pitch fly camera
    Free(FreeLook),
    /// Orbit around a followed group
    ThirdPerson(ThirdPersonState),
}

/// Perspective camera with kind-specific motion
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    look_at: Vec3,
    up: Vec3,
    fov: f32,
    near: f32,
    far: f32,
    aspect: f32,
    limits: CameraLimits,
    kind: CameraKind,
    view: Mat4,
    projection: Mat4,
    view_projection: Mat4,
    frustum: Frustum,
}

impl Camera {
    /// Create a camera of the given type
    ///
    /// `followed` is required for third-person cameras and ignored otherwise.
    pub fn new(
        camera_type: CameraType,
        params: CameraParams,
        limits: CameraLimits,
        followed: Option<Group>,
    ) -> SceneResult<Self> {
        params.validate()?;
        limits.validate()?;

        if camera_type != CameraType::ThirdPerson && followed.is_some() {
            log::warn!("Followed group ignored for {} camera", camera_type);
        }

        let offset = params.position - params.look_at;
        let kind = match camera_type {
            CameraType::Orbital => CameraKind::Orbital(Spherical::from_offset(&offset, &limits)),
            CameraType::Free => CameraKind::Free(FreeLook::from_direction(&-offset)),
            CameraType::ThirdPerson => {
                let target = followed.ok_or(SceneError::MissingFollowedGroup)?;
                CameraKind::ThirdPerson(ThirdPersonState::new(Spherical::from_offset(&offset, &limits), target))
            }
        };

        let mut camera = Self {
            position: params.position,
            look_at: params.look_at,
            up: params.up.normalize(),
            fov: params.fov,
            near: params.near,
            far: params.far,
            aspect: params.aspect,
            limits,
            kind,
            view: Mat4::identity(),
            projection: Mat4::identity(),
            view_projection: Mat4::identity(),
            frustum: Frustum::from_camera(
                &params.position,
                &-offset,
                &params.up,
                params.fov,
                params.aspect,
                params.near,
                params.far,
            ),
        };
        camera.sync();
        log::debug!(
            "Created {} camera at {:?} looking at {:?}",
            camera_type,
            camera.position,
            camera.look_at
        );
        Ok(camera)
    }

    /// Orbital camera around `params.look_at`
    pub fn orbital(params: CameraParams, limits: CameraLimits) -> SceneResult<Self> {
        Self::new(CameraType::Orbital, params, limits, None)
    }

    /// Free-flying camera
    pub fn free(params: CameraParams, limits: CameraLimits) -> SceneResult<Self> {
        Self::new(CameraType::Free, params, limits, None)
    }

    /// Third-person camera following `target`
    pub fn third_person(params: CameraParams, limits: CameraLimits, target: Group) -> SceneResult<Self> {
        Self::new(CameraType::ThirdPerson, params, limits, Some(target))
    }

    /// Apply a movement delta in the camera's own terms
    ///
    /// - Orbital: `x` orbits, `y` raises, `z` approaches the look-at point
    /// - Free: translate along right, world up and forward
    /// - ThirdPerson: walk the followed point along the ground (`x`, `z`)
    pub fn move_by(&mut self, movement: &Vec3) {
        let forward = self.forward();
        let right = self.right();
        let up = self.up;
        match &mut self.kind {
            CameraKind::Orbital(orbit) => orbit.move_by(movement, &self.limits),
            CameraKind::Free(_) => {
                self.position += right * movement.x + up * movement.y + forward * movement.z;
            }
            CameraKind::ThirdPerson(state) => {
                let (right_h, forward_h) = third_person::horizontal_basis(&forward, &state.orbit);
                let delta = right_h * movement.x + forward_h * movement.z;
                self.look_at += delta;
                self.position += delta;
                state.orbit = Spherical::from_offset(&(self.position - self.look_at), &self.limits);
            }
        }
        self.sync();
    }

    /// Apply a look delta: azimuth/polar for orbiting kinds, yaw/pitch for free
    pub fn pan(&mut self, delta: &Vec2) {
        match &mut self.kind {
            CameraKind::Orbital(orbit) => orbit.pan(delta, &self.limits),
            CameraKind::ThirdPerson(state) => state.orbit.pan(delta, &self.limits),
            CameraKind::Free(look) => look.pan(delta),
        }
        self.sync();
    }

    /// Zoom in (positive) or out (negative)
    pub fn zoom(&mut self, factor: f32) {
        match &mut self.kind {
            CameraKind::Orbital(orbit) => orbit.zoom(factor, &self.limits),
            CameraKind::ThirdPerson(state) => state.orbit.zoom(factor, &self.limits),
            CameraKind::Free(look) => {
                self.position += look.forward() * (factor * self.limits.zoom_speed);
            }
        }
        self.sync();
    }

    /// Move the camera, re-deriving its orbit or look direction
    pub fn set_position(&mut self, position: Vec3) {
        match &mut self.kind {
            CameraKind::Orbital(orbit) => {
                *orbit = Spherical::from_offset(&(position - self.look_at), &self.limits);
            }
            CameraKind::ThirdPerson(state) => {
                state.orbit = Spherical::from_offset(&(position - self.look_at), &self.limits);
            }
            CameraKind::Free(look) => {
                *look = FreeLook::from_direction(&(self.look_at - position));
                self.position = position;
            }
        }
        self.sync();
        log::trace!("Camera position updated to: {:?}", self.position);
    }

    /// Move the look-at point; orbiting kinds keep their orbit and follow it
    pub fn set_look_at(&mut self, look_at: Vec3) {
        self.look_at = look_at;
        if let CameraKind::Free(look) = &mut self.kind {
            *look = FreeLook::from_direction(&(look_at - self.position));
        }
        self.sync();
        log::trace!("Camera look-at updated to: {:?}", self.look_at);
    }

    /// Update the aspect ratio for a new window size
    pub fn set_window_size(&mut self, width: u32, height: u32) {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        if (self.aspect - aspect).abs() > 0.01 {
            log::debug!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
        self.sync();
    }

    /// True unless the sphere lies entirely outside one frustum plane
    pub fn is_in_frustum(&self, sphere: &BoundingSphere) -> bool {
        self.frustum.contains_sphere(&sphere.center, sphere.radius)
    }

    /// Camera position in world space
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Look-at point in world space
    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    /// Normalized up vector
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Vertical field of view in radians
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Near clipping distance
    pub fn near(&self) -> f32 {
        self.near
    }

    /// Far clipping distance
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Width over height
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Zoom and radius limits
    pub fn limits(&self) -> &CameraLimits {
        &self.limits
    }

    /// Unit view direction
    pub fn forward(&self) -> Vec3 {
        (self.look_at - self.position)
            .try_normalize(constants::LENGTH_EPSILON)
            .unwrap_or_else(|| -Vec3::z())
    }

    /// Unit right direction
    pub fn right(&self) -> Vec3 {
        self.forward()
            .cross(&self.up)
            .try_normalize(constants::LENGTH_EPSILON)
            .unwrap_or_else(Vec3::x)
    }

    /// World-to-view matrix
    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// View-to-clip matrix
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// World-to-clip matrix
    pub fn view_projection(&self) -> Mat4 {
        self.view_projection
    }

    /// Current frustum planes
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Motion state
    pub fn kind(&self) -> &CameraKind {
        &self.kind
    }

    /// Kind tag
    pub fn camera_type(&self) -> CameraType {
        match self.kind {
            CameraKind::Orbital(_) => CameraType::Orbital,
            CameraKind::Free(_) => CameraType::Free,
            CameraKind::ThirdPerson(_) => CameraType::ThirdPerson,
        }
    }

    /// Human-readable kind name for UI display
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            CameraKind::Orbital(_) => "Orbital",
            CameraKind::Free(_) => "Free",
            CameraKind::ThirdPerson(_) => "Third person",
        }
    }

    /// Spherical coordinates of orbiting kinds
    pub fn orbit(&self) -> Option<Spherical> {
        match &self.kind {
            CameraKind::Orbital(orbit) => Some(*orbit),
            CameraKind::ThirdPerson(state) => Some(state.orbit),
            CameraKind::Free(_) => None,
        }
    }

    /// Followed group of a third-person camera
    pub fn followed_group(&self) -> Option<&Group> {
        match &self.kind {
            CameraKind::ThirdPerson(state) => Some(&state.target),
            _ => None,
        }
    }

    /// Mutable followed group of a third-person camera
    pub fn followed_group_mut(&mut self) -> Option<&mut Group> {
        match &mut self.kind {
            CameraKind::ThirdPerson(state) => Some(&mut state.target),
            _ => None,
        }
    }

    /// World matrix at which the followed group is drawn
    pub fn followed_transform(&self) -> Option<Mat4> {
        match &self.kind {
            CameraKind::ThirdPerson(state) => {
                let (_, forward_h) = third_person::horizontal_basis(&self.forward(), &state.orbit);
                Some(third_person::followed_transform(&self.look_at, &forward_h))
            }
            _ => None,
        }
    }

    /// Followed group together with the world matrix it is drawn at
    pub(crate) fn followed_parts_mut(&mut self) -> Option<(&mut Group, Mat4)> {
        let world = self.followed_transform()?;
        self.followed_group_mut().map(|group| (group, world))
    }

    /// Uniform block for the render pipeline
    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view.into(),
            projection: self.projection.into(),
            view_projection: self.view_projection.into(),
            position: [self.position.x, self.position.y, self.position.z, 1.0],
        }
    }

    /// Derive position or look-at from the motion state, then rebuild
    /// matrices and frustum
    fn sync(&mut self) {
        match &self.kind {
            CameraKind::Orbital(orbit) => self.position = self.look_at + orbit.to_offset(),
            CameraKind::ThirdPerson(state) => self.position = self.look_at + state.orbit.to_offset(),
            CameraKind::Free(look) => self.look_at = self.position + look.forward(),
        }

        let forward = self.forward();
        self.view = Mat4::look_at(self.position, self.look_at, self.up);
        self.projection = Mat4::perspective(self.fov, self.aspect, self.near, self.far);
        self.view_projection = self.projection * Mat4::vulkan_coordinate_transform() * self.view;
        self.frustum = Frustum::from_camera(
            &self.position,
            &forward,
            &self.up,
            self.fov,
            self.aspect,
            self.near,
            self.far,
        );
    }
}
