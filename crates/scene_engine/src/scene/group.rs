//! Interior scene nodes
//!
//! A group owns its entities and child groups plus one composite transform.
//! Each frame runs three passes over the tree, each completing before the
//! next starts:
//!
//! 1. `update(time)`: refresh animated transforms, depth-first
//! 2. `update_bounding_sphere(world)`: rebuild world bounds bottom-up
//! 3. `draw(...)`: cull and submit top-down, accumulating world transforms

use super::bounding::BoundingSphere;
use super::composite::CompositeTransform;
use super::entity::Entity;
use crate::camera::Camera;
use crate::foundation::math::{utils, Mat4};
use crate::render::{DrawFlags, RenderPipeline};

/// Samples used for the animation path overlay
const PATH_SAMPLES: usize = 64;

/// Scene graph node with a local transform and owned children
#[derive(Debug, Clone)]
pub struct Group {
    name: String,
    transform: CompositeTransform,
    entities: Vec<Entity>,
    groups: Vec<Group>,
    world_bounds: BoundingSphere,
}

impl Group {
    /// Empty group with an identity transform
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: CompositeTransform::new(),
            entities: Vec::new(),
            groups: Vec::new(),
            world_bounds: BoundingSphere::default(),
        }
    }

    /// Replace the local transform
    pub fn with_transform(mut self, transform: CompositeTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Append an entity
    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Append a child group
    pub fn add_group(&mut self, group: Group) {
        self.groups.push(group);
    }

    /// Group name from the scene description
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Local transform
    pub fn transform(&self) -> &CompositeTransform {
        &self.transform
    }

    /// Entities in container order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Child groups in container order
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Bounds from the last bounding pass
    pub fn world_bounds(&self) -> BoundingSphere {
        self.world_bounds
    }

    /// Entities in this group and all descendants
    pub fn entity_count(&self) -> usize {
        self.entities.len() + self.groups.iter().map(Group::entity_count).sum::<usize>()
    }

    /// Refresh this group's transform, then every descendant's
    pub fn update(&mut self, time: f32) {
        self.transform.update(time);
        for group in &mut self.groups {
            group.update(time);
        }
    }

    /// Rebuild world bounds of the subtree under `world`
    ///
    /// A group with no children has no extent; it gets a zero-radius sphere at
    /// its own origin.
    pub fn update_bounding_sphere(&mut self, world: &Mat4) -> BoundingSphere {
        let sub = world * self.transform.matrix();

        let mut children = Vec::with_capacity(self.entities.len() + self.groups.len());
        for entity in &mut self.entities {
            children.push(entity.update_bounding_sphere(&sub));
        }
        for group in &mut self.groups {
            children.push(group.update_bounding_sphere(&sub));
        }

        self.world_bounds = BoundingSphere::from_children(&children)
            .unwrap_or_else(|| BoundingSphere::point(utils::origin_of(&sub)));
        self.world_bounds
    }

    /// Cull and draw the subtree under `world`, returning the entities drawn
    ///
    /// Needs world bounds from a bounding pass over the same frame state.
    pub fn draw(&self, pipeline: &mut dyn RenderPipeline, camera: &Camera, world: &Mat4, flags: DrawFlags) -> usize {
        if flags.culling() && !camera.is_in_frustum(&self.world_bounds) {
            log::trace!("Group {} culled", self.name);
            return 0;
        }

        let sub = world * self.transform.matrix();

        if flags.contains(DrawFlags::SHOW_ANIMATION_PATHS) {
            if let Some((animation, prefix)) = self.transform.animated_translation_prefix() {
                pipeline.draw_line_strip(&animation.sample_path(PATH_SAMPLES), &(world * prefix), true);
            }
        }

        let mut drawn = 0;
        for entity in &self.entities {
            if !flags.culling() || camera.is_in_frustum(&entity.world_bounds()) {
                entity.draw(pipeline, &sub, flags);
                drawn += 1;
            }
        }
        for group in &self.groups {
            drawn += group.draw(pipeline, camera, &sub, flags);
        }

        if flags.contains(DrawFlags::SHOW_BOUNDING_SPHERES) {
            pipeline.draw_bounding_sphere(&self.world_bounds);
        }
        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::render::{Material, Mesh};
    use crate::scene::transform::Transform;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn unit_entity(center: Vec3) -> Entity {
        let mesh = Arc::new(Mesh::new("tri", vec![Vec3::zeros(), Vec3::x(), Vec3::y()], Vec::new(), vec![0, 1, 2]).unwrap());
        Entity::new(mesh, Material::default()).with_local_bounds(BoundingSphere::new(center, 1.0))
    }

    #[test]
    fn test_empty_group_sphere_at_origin_of_transform() {
        let transform = CompositeTransform::from_transforms([Transform::translation(Vec3::new(3.0, 0.0, -1.0))]).unwrap();
        let mut group = Group::new("empty").with_transform(transform);
        let sphere = group.update_bounding_sphere(&Mat4::new_translation(&Vec3::new(0.0, 2.0, 0.0)));
        assert_eq!(sphere, BoundingSphere::point(Vec3::new(3.0, 2.0, -1.0)));
    }

    #[test]
    fn test_nested_bounds_follow_parent_transform() {
        let mut child = Group::new("child");
        child.add_entity(unit_entity(Vec3::zeros()));

        let scale = CompositeTransform::from_transforms([
            Transform::translation(Vec3::new(10.0, 0.0, 0.0)),
            Transform::scale(Vec3::repeat(3.0)),
        ])
        .unwrap();
        let mut root = Group::new("root").with_transform(scale);
        root.add_group(child);

        let sphere = root.update_bounding_sphere(&Mat4::identity());
        assert_relative_eq!(sphere.center, Vec3::new(10.0, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(sphere.radius, 3.0, epsilon = 1e-5);
        assert_eq!(root.groups()[0].world_bounds(), sphere);
    }

    #[test]
    fn test_entity_count_recursive() {
        let mut leaf = Group::new("leaf");
        leaf.add_entity(unit_entity(Vec3::zeros()));
        leaf.add_entity(unit_entity(Vec3::x()));
        let mut root = Group::new("root");
        root.add_entity(unit_entity(Vec3::y()));
        root.add_group(leaf);
        assert_eq!(root.entity_count(), 3);
    }
}
