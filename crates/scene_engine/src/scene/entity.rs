//! Leaf scene nodes

use std::sync::Arc;

use super::bounding::BoundingSphere;
use crate::foundation::math::Mat4;
use crate::render::{DrawFlags, Material, Mesh, ModelUniform, RenderPipeline, TextureHandle};

/// Mesh instance with its surface and bounds
#[derive(Debug, Clone)]
pub struct Entity {
    mesh: Arc<Mesh>,
    material: Material,
    texture: Option<TextureHandle>,
    local_bounds: BoundingSphere,
    world_bounds: BoundingSphere,
}

impl Entity {
    /// Entity drawing `mesh`; local bounds come from the mesh positions
    pub fn new(mesh: Arc<Mesh>, material: Material) -> Self {
        let local_bounds = BoundingSphere::from_points(mesh.positions());
        Self {
            mesh,
            material,
            texture: None,
            local_bounds,
            world_bounds: local_bounds,
        }
    }

    /// Attach a texture
    pub fn with_texture(mut self, texture: TextureHandle) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Override the model-space bounds
    pub fn with_local_bounds(mut self, bounds: BoundingSphere) -> Self {
        self.local_bounds = bounds;
        self.world_bounds = bounds;
        self
    }

    /// Shared mesh
    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    /// Surface material
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Texture, if any
    pub fn texture(&self) -> Option<&TextureHandle> {
        self.texture.as_ref()
    }

    /// Bounds in model space
    pub fn local_bounds(&self) -> BoundingSphere {
        self.local_bounds
    }

    /// Bounds from the last bounding pass
    pub fn world_bounds(&self) -> BoundingSphere {
        self.world_bounds
    }

    /// Carry the local bounds through `world` and store the result
    pub fn update_bounding_sphere(&mut self, world: &Mat4) -> BoundingSphere {
        self.world_bounds = self.local_bounds.transformed(world);
        self.world_bounds
    }

    /// Submit the mesh and its enabled overlays
    pub fn draw(&self, pipeline: &mut dyn RenderPipeline, world: &Mat4, flags: DrawFlags) {
        let model = ModelUniform::new(world);
        pipeline.draw_mesh(
            &self.mesh,
            &self.material,
            self.texture.as_ref(),
            &model,
            flags.contains(DrawFlags::FILL),
        );
        if flags.contains(DrawFlags::SHOW_NORMALS) {
            pipeline.draw_normals(&self.mesh, &model);
        }
        if flags.contains(DrawFlags::SHOW_BOUNDING_SPHERES) {
            pipeline.draw_bounding_sphere(&self.world_bounds);
        }
    }
}
