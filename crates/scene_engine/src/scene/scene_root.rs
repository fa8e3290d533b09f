//! Scene root: camera, root groups and lights

use super::bounding::BoundingSphere;
use super::group::Group;
use super::light::Light;
use crate::camera::{Camera, CameraType};
use crate::foundation::math::{Mat4, Vec3};
use crate::render::{DrawFlags, RenderPipeline};

/// Length of the world axes overlay
const AXES_LENGTH: f32 = 1.0;

/// Counters gathered by one draw pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Entities submitted to the pipeline
    pub entities_drawn: usize,
    /// Entities in the scene, followed group included
    pub entities_total: usize,
}

impl FrameStats {
    /// Entities skipped by culling
    pub fn entities_culled(&self) -> usize {
        self.entities_total - self.entities_drawn
    }
}

/// Root of the scene graph
#[derive(Debug, Clone)]
pub struct Scene {
    width: u32,
    height: u32,
    camera: Camera,
    groups: Vec<Group>,
    lights: Vec<Light>,
}

impl Scene {
    /// Scene with a window size and camera; the camera aspect follows the window
    pub fn new(width: u32, height: u32, mut camera: Camera) -> Self {
        camera.set_window_size(width, height);
        Self {
            width,
            height,
            camera,
            groups: Vec::new(),
            lights: Vec::new(),
        }
    }

    /// Append a root group
    pub fn add_group(&mut self, group: Group) {
        self.groups.push(group);
    }

    /// Append a light
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Window size in pixels
    pub fn window_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Resize the window and the camera aspect with it
    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.camera.set_window_size(width, height);
    }

    /// Scene camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable scene camera, for the input controller
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Camera position for UI display
    pub fn camera_position(&self) -> Vec3 {
        self.camera.position()
    }

    /// Camera kind for UI display
    pub fn camera_type(&self) -> CameraType {
        self.camera.camera_type()
    }

    /// Root groups
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Lights
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Entities in the scene, followed group included
    pub fn entity_count(&self) -> usize {
        let followed = self.camera.followed_group().map_or(0, Group::entity_count);
        self.groups.iter().map(Group::entity_count).sum::<usize>() + followed
    }

    /// Advance every animated transform to `time`
    pub fn update(&mut self, time: f32) {
        for group in &mut self.groups {
            group.update(time);
        }
        if let Some(group) = self.camera.followed_group_mut() {
            group.update(time);
        }
    }

    /// Rebuild world bounds of every root group and of the followed group
    pub fn update_bounding_spheres(&mut self) {
        let identity = Mat4::identity();
        for group in &mut self.groups {
            group.update_bounding_sphere(&identity);
        }
        if let Some((group, world)) = self.camera.followed_parts_mut() {
            group.update_bounding_sphere(&world);
        }
    }

    /// Bounds enclosing every root group, `None` for an empty scene
    pub fn bounds(&self) -> Option<BoundingSphere> {
        let spheres: Vec<_> = self.groups.iter().map(Group::world_bounds).collect();
        BoundingSphere::from_children(&spheres)
    }

    /// Run the bounding pass, then cull and draw everything through `pipeline`
    pub fn draw(&mut self, pipeline: &mut dyn RenderPipeline, flags: DrawFlags) -> FrameStats {
        self.update_bounding_spheres();

        let lights: Vec<_> = self.lights.iter().map(Light::uniform).collect();
        pipeline.begin_frame(&self.camera.uniform(), &lights);
        if flags.contains(DrawFlags::SHOW_AXES) {
            pipeline.draw_axes(&Mat4::identity(), AXES_LENGTH);
        }

        let identity = Mat4::identity();
        let mut drawn = 0;
        for group in &self.groups {
            drawn += group.draw(pipeline, &self.camera, &identity, flags);
        }
        if let (Some(group), Some(world)) = (self.camera.followed_group(), self.camera.followed_transform()) {
            drawn += group.draw(pipeline, &self.camera, &world, flags);
        }

        let stats = FrameStats {
            entities_drawn: drawn,
            entities_total: self.entity_count(),
        };
        log::trace!("Drew {}/{} entities", stats.entities_drawn, stats.entities_total);
        stats
    }
}
