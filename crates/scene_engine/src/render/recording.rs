//! Headless pipeline that records draw calls
//!
//! Used by the viewer when no graphics backend is attached, and by tests to
//! check what the traversal asked to draw and in which order.

use std::sync::Arc;

use super::material::{Material, TextureHandle};
use super::mesh::Mesh;
use super::pipeline::{CameraUniform, DebugSphereMesh, ModelUniform, RenderPipeline};
use crate::foundation::math::{utils, Mat4, Vec3};
use crate::scene::{BoundingSphere, LightUniform};

/// One recorded pipeline call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Frame start with its view-projection matrix and lights
    BeginFrame {
        /// World-to-clip matrix of the frame
        view_projection: Mat4,
        /// Light blocks in scene order
        lights: Vec<LightUniform>,
    },
    /// Mesh draw
    Mesh {
        /// Mesh path
        path: String,
        /// World matrix used for the draw
        model: Mat4,
        /// Filled or wireframe
        fill: bool,
        /// Texture path, if any
        texture: Option<String>,
    },
    /// Bounding sphere overlay, as the debug sphere instance matrix
    BoundingSphere {
        /// Sphere that was drawn
        sphere: BoundingSphere,
        /// Matrix applied to the unit debug sphere
        instance: Mat4,
    },
    /// Normals overlay
    Normals {
        /// Mesh path
        path: String,
        /// Number of normal lines
        count: usize,
    },
    /// Polyline overlay, points already in world space
    LineStrip {
        /// World-space points
        points: Vec<Vec3>,
        /// Whether the strip closes back on its first point
        closed: bool,
    },
    /// Axes overlay
    Axes {
        /// Axis length
        length: f32,
    },
}

/// Pipeline that stores every call instead of drawing
#[derive(Debug, Default)]
pub struct RecordingPipeline {
    debug_sphere: DebugSphereMesh,
    commands: Vec<DrawCommand>,
    triangles: usize,
}

impl RecordingPipeline {
    /// Create an empty recorder with its own debug sphere
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded calls in order
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Paths of the recorded mesh draws, in order
    pub fn mesh_draws(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Mesh { path, .. } => Some(path.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Triangles submitted since creation
    pub fn triangles_submitted(&self) -> usize {
        self.triangles
    }
}

impl RenderPipeline for RecordingPipeline {
    fn begin_frame(&mut self, camera: &CameraUniform, lights: &[LightUniform]) {
        self.commands.clear();
        self.commands.push(DrawCommand::BeginFrame {
            view_projection: Mat4::from(camera.view_projection),
            lights: lights.to_vec(),
        });
    }

    fn draw_mesh(
        &mut self,
        mesh: &Arc<Mesh>,
        _material: &Material,
        texture: Option<&TextureHandle>,
        model: &ModelUniform,
        fill: bool,
    ) {
        log::trace!("draw_mesh {} fill={}", mesh.path(), fill);
        self.triangles += mesh.triangle_count();
        self.commands.push(DrawCommand::Mesh {
            path: mesh.path().to_string(),
            model: model.model_matrix(),
            fill,
            texture: texture.map(|t| t.path().to_string()),
        });
    }

    fn draw_bounding_sphere(&mut self, sphere: &BoundingSphere) {
        let instance = self.debug_sphere.instance_transform(sphere);
        self.triangles += self.debug_sphere.mesh().triangle_count();
        self.commands.push(DrawCommand::BoundingSphere { sphere: *sphere, instance });
    }

    fn draw_normals(&mut self, mesh: &Arc<Mesh>, _model: &ModelUniform) {
        self.commands.push(DrawCommand::Normals {
            path: mesh.path().to_string(),
            count: mesh.normals().len(),
        });
    }

    fn draw_line_strip(&mut self, points: &[Vec3], transform: &Mat4, closed: bool) {
        let points = points
            .iter()
            .map(|p| utils::transform_point(transform, p))
            .collect();
        self.commands.push(DrawCommand::LineStrip { points, closed });
    }

    fn draw_axes(&mut self, _transform: &Mat4, length: f32) {
        self.commands.push(DrawCommand::Axes { length });
    }
}
