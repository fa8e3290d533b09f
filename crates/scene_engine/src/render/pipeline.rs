//! Render pipeline boundary
//!
//! The scene graph never talks to a graphics API. Everything it wants drawn
//! goes through [`RenderPipeline`], already reduced to world-space matrices
//! and GPU-ready uniform blocks.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};

use super::material::{Material, TextureHandle};
use super::mesh::Mesh;
use crate::foundation::math::{constants, Mat4, Mat4Ext, Vec3};
use crate::scene::{BoundingSphere, LightUniform};

/// Per-draw transform block (std140 compatible)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ModelUniform {
    /// Model-to-world matrix, column-major
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of the model matrix, column-major
    pub normal: [[f32; 4]; 4],
}

impl ModelUniform {
    /// Build the block for a world transform
    pub fn new(model: &Mat4) -> Self {
        Self {
            model: (*model).into(),
            normal: model.normal_matrix().into(),
        }
    }

    /// Model matrix back as a nalgebra matrix
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from(self.model)
    }
}

/// Per-frame camera block (std140 compatible)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    /// World-to-view matrix
    pub view: [[f32; 4]; 4],
    /// View-to-clip matrix
    pub projection: [[f32; 4]; 4],
    /// Full world-to-clip chain
    pub view_projection: [[f32; 4]; 4],
    /// Camera world position (w = 1)
    pub position: [f32; 4],
}

/// Drawing operations the scene graph needs from a renderer
pub trait RenderPipeline {
    /// Start a frame with the camera and lights used for every draw in it
    fn begin_frame(&mut self, camera: &CameraUniform, lights: &[LightUniform]);

    /// Draw a mesh with its material and optional texture
    fn draw_mesh(
        &mut self,
        mesh: &Arc<Mesh>,
        material: &Material,
        texture: Option<&TextureHandle>,
        model: &ModelUniform,
        fill: bool,
    );

    /// Draw a world-space bounding sphere overlay
    fn draw_bounding_sphere(&mut self, sphere: &BoundingSphere);

    /// Draw the vertex normals of a mesh
    fn draw_normals(&mut self, mesh: &Arc<Mesh>, model: &ModelUniform);

    /// Draw a polyline through `points`, transformed by `transform`
    fn draw_line_strip(&mut self, points: &[Vec3], transform: &Mat4, closed: bool);

    /// Draw RGB axes of the given length
    fn draw_axes(&mut self, transform: &Mat4, length: f32);
}

/// Unit sphere used to draw bounding sphere overlays
///
/// Built once when the pipeline is set up and owned by it.
#[derive(Debug, Clone)]
pub struct DebugSphereMesh {
    mesh: Arc<Mesh>,
}

impl DebugSphereMesh {
    /// Path the sphere is registered under
    pub const PATH: &'static str = "<debug-sphere>";

    /// Build a UV sphere with the given tessellation
    pub fn new(slices: u32, stacks: u32) -> Self {
        let slices = slices.max(3);
        let stacks = stacks.max(2);

        let mut positions = Vec::with_capacity(((slices + 1) * (stacks + 1)) as usize);
        for stack in 0..=stacks {
            let polar = constants::PI * stack as f32 / stacks as f32;
            for slice in 0..=slices {
                let azimuth = constants::TAU * slice as f32 / slices as f32;
                positions.push(Vec3::new(
                    polar.sin() * azimuth.sin(),
                    polar.cos(),
                    polar.sin() * azimuth.cos(),
                ));
            }
        }

        let ring = slices + 1;
        let mut indices = Vec::with_capacity((slices * stacks * 6) as usize);
        for stack in 0..stacks {
            for slice in 0..slices {
                let a = stack * ring + slice;
                let b = a + ring;
                indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
            }
        }

        // Unit sphere: normals equal positions
        let normals = positions.clone();
        let mesh = Mesh::generated(Self::PATH, positions, normals, indices);
        Self { mesh: Arc::new(mesh) }
    }

    /// Sphere mesh
    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    /// Model matrix placing the unit sphere over `sphere`
    pub fn instance_transform(&self, sphere: &BoundingSphere) -> Mat4 {
        Mat4::new_translation(&sphere.center) * Mat4::new_scaling(sphere.radius)
    }
}

impl Default for DebugSphereMesh {
    fn default() -> Self {
        Self::new(16, 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::utils;
    use approx::assert_relative_eq;

    #[test]
    fn test_model_uniform_layout() {
        assert_eq!(std::mem::size_of::<ModelUniform>(), 128);
        assert_eq!(std::mem::size_of::<CameraUniform>(), 208);

        let model = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0));
        let uniform = ModelUniform::new(&model);
        assert_eq!(uniform.model_matrix(), model);
        // Column-major: translation lives in the last column
        assert_eq!(uniform.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(bytemuck::bytes_of(&uniform).len(), 128);
    }

    #[test]
    fn test_debug_sphere_on_unit_sphere() {
        let debug = DebugSphereMesh::default();
        for p in debug.mesh().positions() {
            assert_relative_eq!(p.magnitude(), 1.0, epsilon = 1e-5);
        }
        assert_eq!(debug.mesh().triangle_count(), 16 * 8 * 2);
    }

    #[test]
    fn test_debug_sphere_instance_transform() {
        let debug = DebugSphereMesh::default();
        let sphere = BoundingSphere::new(Vec3::new(0.0, 4.0, 0.0), 3.0);
        let m = debug.instance_transform(&sphere);
        assert_relative_eq!(utils::transform_point(&m, &Vec3::x()), Vec3::new(3.0, 4.0, 0.0));
    }
}
