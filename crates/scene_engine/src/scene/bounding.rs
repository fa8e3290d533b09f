//! Bounding spheres for frustum culling
//!
//! Spheres are rebuilt every frame: entity spheres come from the mesh
//! positions carried into world space, group spheres aggregate their
//! children. Both constructions use the centroid rather than the minimal
//! enclosing sphere, which is loose but cheap and always conservative.

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// Sphere used as a conservative bound for culling
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingSphere {
    /// The center position of the sphere
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    ///
    /// # Panics
    /// When the radius is negative or NaN, or the center is not finite.
    pub fn new(center: Vec3, radius: f32) -> Self {
        assert!(radius >= 0.0 && radius.is_finite(), "bounding sphere radius must be finite and >= 0, got {radius}");
        assert!(utils::is_finite_vec3(&center), "bounding sphere center must be finite, got {center:?}");
        Self { center, radius }
    }

    /// Zero-radius sphere at `center`
    pub fn point(center: Vec3) -> Self {
        Self::new(center, 0.0)
    }

    /// Centroid sphere of a point cloud
    ///
    /// Center is the arithmetic mean, radius the distance to the farthest
    /// point. An empty cloud gives a zero-radius sphere at the origin.
    pub fn from_points(points: &[Vec3]) -> Self {
        if points.is_empty() {
            return Self::default();
        }

        let center = points.iter().sum::<Vec3>() / points.len() as f32;
        let radius = points
            .iter()
            .map(|p| (p - center).magnitude())
            .fold(0.0, f32::max);
        Self::new(center, radius)
    }

    /// Sphere enclosing every child sphere, `None` when there are no children
    pub fn from_children(children: &[BoundingSphere]) -> Option<Self> {
        if children.is_empty() {
            return None;
        }

        let center = children.iter().map(|s| s.center).sum::<Vec3>() / children.len() as f32;
        let radius = children
            .iter()
            .map(|s| (s.center - center).magnitude() + s.radius)
            .fold(0.0, f32::max);
        Some(Self::new(center, radius))
    }

    /// Sphere carried through `matrix`
    ///
    /// The radius grows by the longest transformed basis vector, so the result
    /// still bounds the transformed contents under anisotropic scale.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self::new(
            utils::transform_point(matrix, &self.center),
            self.radius * matrix.max_axis_scale(),
        )
    }

    /// Check whether a point lies inside or on the sphere
    pub fn contains_point(&self, point: &Vec3) -> bool {
        (point - self.center).magnitude() <= self.radius
    }

    /// Check whether `other` lies entirely inside this sphere, within `epsilon`
    pub fn contains_sphere(&self, other: &BoundingSphere, epsilon: f32) -> bool {
        (other.center - self.center).magnitude() + other.radius <= self.radius + epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_points_centroid() {
        let points = [
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
            Vec3::new(0.0, -3.0, 0.0),
        ];
        let sphere = BoundingSphere::from_points(&points);
        assert_relative_eq!(sphere.center, Vec3::zeros());
        assert_relative_eq!(sphere.radius, 3.0);
        assert!(points.iter().all(|p| sphere.contains_point(p)));
    }

    #[test]
    fn test_from_points_empty() {
        assert_eq!(BoundingSphere::from_points(&[]), BoundingSphere::point(Vec3::zeros()));
    }

    #[test]
    fn test_from_children_empty_is_none() {
        assert!(BoundingSphere::from_children(&[]).is_none());
    }

    #[test]
    fn test_aggregate_contains_children() {
        let children = [
            BoundingSphere::new(Vec3::zeros(), 1.0),
            BoundingSphere::new(Vec3::new(10.0, 0.0, 0.0), 1.0),
            BoundingSphere::new(Vec3::new(3.0, -7.0, 2.5), 4.0),
            BoundingSphere::new(Vec3::new(-2.0, 1.0, 9.0), 0.0),
            BoundingSphere::new(Vec3::new(0.5, 0.5, 0.5), 12.0),
        ];
        for count in 1..=children.len() {
            let aggregate = BoundingSphere::from_children(&children[..count]).unwrap();
            for child in &children[..count] {
                assert!(aggregate.contains_sphere(child, 1e-4), "{aggregate:?} does not contain {child:?}");
            }
        }
    }

    #[test]
    fn test_two_spheres_aggregate() {
        let aggregate = BoundingSphere::from_children(&[
            BoundingSphere::new(Vec3::zeros(), 1.0),
            BoundingSphere::new(Vec3::new(10.0, 0.0, 0.0), 1.0),
        ])
        .unwrap();
        assert_relative_eq!(aggregate.center, Vec3::new(5.0, 0.0, 0.0));
        assert!(aggregate.radius >= 6.0 - 1e-5);
    }

    #[test]
    fn test_transformed_uses_largest_axis_scale() {
        let sphere = BoundingSphere::new(Vec3::new(1.0, 0.0, 0.0), 2.0);
        let matrix = Mat4::new_translation(&Vec3::new(0.0, 5.0, 0.0))
            * Mat4::new_nonuniform_scaling(&Vec3::new(1.0, 4.0, 2.0));
        let moved = sphere.transformed(&matrix);
        assert_relative_eq!(moved.center, Vec3::new(1.0, 5.0, 0.0));
        assert_relative_eq!(moved.radius, 8.0);
    }

    #[test]
    #[should_panic(expected = "radius")]
    fn test_negative_radius_panics() {
        let _ = BoundingSphere::new(Vec3::zeros(), -1.0);
    }
}
