//! View frustum planes
//!
//! The six planes are built from the corners of the near and far rectangles.
//! Each plane takes three corners in a fixed winding so its normal points
//! into the visible volume; swapping any two corners inverts that plane and
//! silently breaks culling.

use crate::foundation::math::{constants, Vec3};

/// A plane defined by a normal and distance from origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal, pointing into the frustum
    pub normal: Vec3,
    /// Offset so that `normal · p + distance == 0` on the plane
    pub distance: f32,
}

impl Plane {
    /// Plane through `point` with the given normal
    pub fn from_point_normal(point: &Vec3, normal: &Vec3) -> Self {
        let normal = normal.normalize();
        let distance = -normal.dot(point);
        Self { normal, distance }
    }

    /// Plane through three points, normal = (c - b) × (a - b)
    pub fn from_points(a: &Vec3, b: &Vec3, c: &Vec3) -> Self {
        let normal = (c - b).cross(&(a - b));
        Self::from_point_normal(b, &normal)
    }

    /// Get signed distance from point to plane (positive = inside)
    pub fn distance_to_point(&self, point: &Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }
}

/// Index of each plane in [`Frustum::planes`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum PlaneSide {
    Top = 0,
    Bottom = 1,
    Left = 2,
    Right = 3,
    Near = 4,
    Far = 5,
}

/// View frustum for culling
#[derive(Debug, Clone, PartialEq)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Frustum {
    /// Build the frustum of a perspective camera
    ///
    /// `forward` and `up` need not be orthogonal; the basis is rebuilt from them.
    pub fn from_camera(
        position: &Vec3,
        forward: &Vec3,
        up: &Vec3,
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let forward = forward
            .try_normalize(constants::LENGTH_EPSILON)
            .unwrap_or_else(|| -Vec3::z());
        let right = forward
            .cross(up)
            .try_normalize(constants::LENGTH_EPSILON)
            .unwrap_or_else(Vec3::x);
        let up = right.cross(&forward);

        let tan_half = (fov_y * 0.5).tan();
        let near_h = tan_half * near;
        let near_w = near_h * aspect;
        let far_h = tan_half * far;
        let far_w = far_h * aspect;

        let near_center = position + forward * near;
        let far_center = position + forward * far;

        let ntl = near_center + up * near_h - right * near_w;
        let ntr = near_center + up * near_h + right * near_w;
        let nbl = near_center - up * near_h - right * near_w;
        let nbr = near_center - up * near_h + right * near_w;

        let ftl = far_center + up * far_h - right * far_w;
        let ftr = far_center + up * far_h + right * far_w;
        let fbl = far_center - up * far_h - right * far_w;
        let fbr = far_center - up * far_h + right * far_w;

        Self {
            planes: [
                Plane::from_points(&ntr, &ntl, &ftl),
                Plane::from_points(&nbl, &nbr, &fbr),
                Plane::from_points(&ntl, &nbl, &fbl),
                Plane::from_points(&nbr, &ntr, &fbr),
                Plane::from_points(&ntl, &ntr, &nbr),
                Plane::from_points(&ftr, &ftl, &fbl),
            ],
        }
    }

    /// All six planes, indexed by [`PlaneSide`]
    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    /// Plane on one side of the frustum
    pub fn plane(&self, side: PlaneSide) -> &Plane {
        &self.planes[side as usize]
    }

    /// Test if a sphere intersects the frustum
    ///
    /// Only a sphere entirely behind some plane is rejected; spheres that
    /// straddle a plane are kept.
    pub fn contains_sphere(&self, center: &Vec3, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(center) >= -radius)
    }

    /// Test if a point is inside the frustum
    pub fn contains_point(&self, point: &Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(point) >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::utils;
    use approx::assert_relative_eq;

    fn looking_down_negative_z() -> Frustum {
        Frustum::from_camera(
            &Vec3::new(0.0, 0.0, 10.0),
            &-Vec3::z(),
            &Vec3::y(),
            utils::deg_to_rad(60.0),
            16.0 / 9.0,
            1.0,
            100.0,
        )
    }

    #[test]
    fn test_normals_point_inward() {
        let frustum = looking_down_negative_z();
        assert_relative_eq!(frustum.plane(PlaneSide::Near).normal, -Vec3::z(), epsilon = 1e-5);
        assert_relative_eq!(frustum.plane(PlaneSide::Far).normal, Vec3::z(), epsilon = 1e-5);
        assert!(frustum.plane(PlaneSide::Left).normal.x > 0.0);
        assert!(frustum.plane(PlaneSide::Right).normal.x < 0.0);
        assert!(frustum.plane(PlaneSide::Top).normal.y < 0.0);
        assert!(frustum.plane(PlaneSide::Bottom).normal.y > 0.0);

        // A point on the view axis between near and far is inside every plane
        assert!(frustum.contains_point(&Vec3::new(0.0, 0.0, 0.0)));
        assert!(!frustum.contains_point(&Vec3::new(0.0, 0.0, 20.0)));
    }

    #[test]
    fn test_sphere_classification() {
        let frustum = looking_down_negative_z();
        assert!(frustum.contains_sphere(&Vec3::zeros(), 0.5));
        // Beyond the far plane by more than the radius
        assert!(!frustum.contains_sphere(&Vec3::new(0.0, 0.0, -200.0), 1.0));
        // Behind the camera
        assert!(!frustum.contains_sphere(&Vec3::new(0.0, 0.0, 15.0), 1.0));
        // Straddling the far plane at z = -90
        assert!(frustum.contains_sphere(&Vec3::new(0.0, 0.0, -90.5), 1.0));
    }

    #[test]
    fn test_straddling_side_plane() {
        let frustum = looking_down_negative_z();
        let left = frustum.plane(PlaneSide::Left);
        // Center just outside the left plane, radius reaches back in
        let inside = Vec3::new(0.0, 0.0, 0.0);
        let d = left.distance_to_point(&inside);
        let outside = inside - left.normal * (d + 0.5);
        assert!(left.distance_to_point(&outside) < 0.0);
        assert!(frustum.contains_sphere(&outside, 1.0));
        assert!(!frustum.contains_sphere(&outside, 0.25));
    }
}
