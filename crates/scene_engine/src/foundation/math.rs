//! Math utilities and types
//!
//! Provides fundamental math types for scene graph evaluation and camera math.

pub use nalgebra::{
    Vector2, Vector3,
    Matrix4,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Threshold under which a length is treated as zero
    pub const LENGTH_EPSILON: f32 = 1e-6;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Mat4, Point3, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min { min } else if value > max { max } else { value }
    }

    /// Wrap an angle into `[0, 2π)`
    pub fn wrap_angle(angle: f32) -> f32 {
        let wrapped = angle.rem_euclid(constants::TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs
        if wrapped >= constants::TAU { 0.0 } else { wrapped }
    }

    /// Transform a position (w = 1) by a homogeneous matrix
    pub fn transform_point(matrix: &Mat4, point: &Vec3) -> Vec3 {
        matrix.transform_point(&Point3::from(*point)).coords
    }

    /// Translation part of a homogeneous matrix (the image of the local origin)
    pub fn origin_of(matrix: &Mat4) -> Vec3 {
        Vec3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)])
    }

    /// Returns true when every component of the vector is finite
    pub fn is_finite_vec3(v: &Vec3) -> bool {
        v.iter().all(|c| c.is_finite())
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis
    fn rotation_z(angle: f32) -> Mat4;

    /// Create a perspective projection matrix
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;

    /// Create the intermediate coordinate system transformation for Vulkan
    /// This implements the X matrix from the guide to prepare coordinates for Vulkan's conventions
    fn vulkan_coordinate_transform() -> Mat4;

    /// Length of the longest transformed basis vector of the upper 3x3 block
    ///
    /// Exact scale factor for uniform scaling, conservative upper bound for
    /// anisotropic scaling.
    fn max_axis_scale(&self) -> f32;

    /// Inverse transpose of the matrix, identity when it is not invertible
    fn normal_matrix(&self) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        // Vulkan-style perspective (depth mapped to [0, 1]), paired with
        // vulkan_coordinate_transform() when building the view-projection chain.
        //
        // P = [a⁻¹/tan(φ/2)    0              0                    0           ]
        //     [0               1/tan(φ/2)     0                    0           ]
        //     [0               0              f/(f-n)              -nf/(f-n)   ]
        //     [0               0              1                    0           ]
        let tan_half_fovy = (fov_y * 0.5).tan();

        let mut result = Mat4::zeros();
        result[(0, 0)] = 1.0 / (aspect * tan_half_fovy);
        result[(1, 1)] = 1.0 / tan_half_fovy;
        result[(2, 2)] = far / (far - near);
        result[(2, 3)] = -(near * far) / (far - near);
        result[(3, 2)] = 1.0;

        result
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        // Right-handed look-at matrix
        let forward = (target - eye).normalize();
        let right = forward.cross(&up).normalize();
        let camera_up = right.cross(&forward);

        #[rustfmt::skip]
        let translation = Mat4::new(
            1.0, 0.0, 0.0, -eye.x,
            0.0, 1.0, 0.0, -eye.y,
            0.0, 0.0, 1.0, -eye.z,
            0.0, 0.0, 0.0, 1.0,
        );

        #[rustfmt::skip]
        let rotation = Mat4::new(
            right.x, right.y, right.z, 0.0,
            camera_up.x, camera_up.y, camera_up.z, 0.0,
            -forward.x, -forward.y, -forward.z, 0.0,  // Negative forward for right-handed
            0.0, 0.0, 0.0, 1.0,
        );

        rotation * translation
    }

    fn vulkan_coordinate_transform() -> Mat4 {
        // Flips Y and Z so Y-up right-handed view space lines up with
        // Vulkan's Y-down, Z-into-screen clip space.
        #[rustfmt::skip]
        let flip = Mat4::new(
            1.0,  0.0,  0.0, 0.0,
            0.0, -1.0,  0.0, 0.0,
            0.0,  0.0, -1.0, 0.0,
            0.0,  0.0,  0.0, 1.0,
        );
        flip
    }

    fn max_axis_scale(&self) -> f32 {
        (0..3)
            .map(|col| Vec3::new(self[(0, col)], self[(1, col)], self[(2, col)]).magnitude())
            .fold(0.0, f32::max)
    }

    fn normal_matrix(&self) -> Mat4 {
        const EPSILON: f32 = 1e-6;
        if self.determinant().abs() < EPSILON {
            return Mat4::identity();
        }
        self.try_inverse()
            .map_or_else(Mat4::identity, |inverse| inverse.transpose())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wrap_angle_range() {
        assert_relative_eq!(utils::wrap_angle(constants::TAU + 0.5), 0.5, epsilon = 1e-5);
        assert_relative_eq!(utils::wrap_angle(-0.5), constants::TAU - 0.5, epsilon = 1e-5);
        assert!(utils::wrap_angle(-1e-9) < constants::TAU);
    }

    #[test]
    fn test_rotation_y_right_handed() {
        // +X rotated a quarter turn about +Y lands on -Z
        let rotated = utils::transform_point(&Mat4::rotation_y(constants::HALF_PI), &Vec3::x());
        assert_relative_eq!(rotated, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_max_axis_scale_anisotropic() {
        let m = Mat4::new_nonuniform_scaling(&Vec3::new(1.0, 3.0, 2.0));
        assert_relative_eq!(m.max_axis_scale(), 3.0, epsilon = 1e-6);

        let rotated = Mat4::rotation_z(0.7) * Mat4::new_scaling(2.5);
        assert_relative_eq!(rotated.max_axis_scale(), 2.5, epsilon = 1e-5);
    }

    #[test]
    fn test_normal_matrix_non_invertible_falls_back() {
        let m = Mat4::new_nonuniform_scaling(&Vec3::new(0.0, 1.0, 1.0));
        assert_eq!(m.normal_matrix(), Mat4::identity());
    }

    #[test]
    fn test_look_at_maps_eye_to_origin() {
        let eye = Vec3::new(0.0, 0.0, 10.0);
        let view = Mat4::look_at(eye, Vec3::zeros(), Vec3::y());
        assert_relative_eq!(utils::transform_point(&view, &eye), Vec3::zeros(), epsilon = 1e-5);
        // Target lies straight down -Z in view space
        assert_relative_eq!(
            utils::transform_point(&view, &Vec3::zeros()),
            Vec3::new(0.0, 0.0, -10.0),
            epsilon = 1e-5
        );
    }
}
