//! Closed Catmull-Rom motion paths
//!
//! An [`AnimatedTranslation`] moves its node along a looping Catmull-Rom curve
//! through the control points, completing one lap every `period` seconds.
//! With alignment enabled the node is also rotated so its local X axis follows
//! the curve tangent. The up vector of that frame is carried from one
//! evaluation to the next so the orientation never flips between frames.

use super::error::{SceneError, SceneResult};
use crate::foundation::math::{constants, utils, Mat4, Vec3};

/// Minimum number of control points for a closed Catmull-Rom loop
pub const MIN_CONTROL_POINTS: usize = 4;

/// Looping spline translation with optional tangent alignment
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedTranslation {
    points: Vec<Vec3>,
    period: f32,
    align: bool,
    last_up: Vec3,
    orientation: Mat4,
    matrix: Mat4,
}

impl AnimatedTranslation {
    /// Create a looping path through `points`, one lap per `period` seconds
    pub fn new(points: Vec<Vec3>, period: f32, align: bool) -> SceneResult<Self> {
        if points.len() < MIN_CONTROL_POINTS {
            return Err(SceneError::TooFewControlPoints { found: points.len() });
        }
        if !(period.is_finite() && period > 0.0) {
            return Err(SceneError::NonPositivePeriod(period));
        }
        if !points.iter().all(utils::is_finite_vec3) {
            return Err(SceneError::NonFiniteValue("animated translation control point"));
        }

        let mut animation = Self {
            points,
            period,
            align,
            last_up: Vec3::y(),
            orientation: Mat4::identity(),
            matrix: Mat4::identity(),
        };
        animation.evaluate(0.0);
        Ok(animation)
    }

    /// Control points in declaration order
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Seconds per lap
    pub fn period(&self) -> f32 {
        self.period
    }

    /// Whether the node is oriented along the path tangent
    pub fn is_aligned(&self) -> bool {
        self.align
    }

    /// Matrix produced by the most recent evaluation
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Position and tangent on the curve at `time`, without touching the frame state
    pub fn sample(&self, time: f32) -> (Vec3, Vec3) {
        let count = self.points.len();
        let phase = time.rem_euclid(self.period) / self.period;
        let global = phase * count as f32;
        let segment = global.floor();
        let local = global - segment;
        // phase can round up to exactly 1.0; the modulo folds that back onto the first point
        let segment = segment as usize % count;

        let p0 = self.points[(segment + count - 1) % count];
        let p1 = self.points[segment];
        let p2 = self.points[(segment + 1) % count];
        let p3 = self.points[(segment + 2) % count];

        catmull_rom(&p0, &p1, &p2, &p3, local)
    }

    /// Advance to `time`, update the running frame and return the new matrix
    pub fn evaluate(&mut self, time: f32) -> Mat4 {
        let (position, tangent) = self.sample(time);
        let translation = Mat4::new_translation(&position);

        self.matrix = if self.align {
            self.advance_frame(&tangent);
            translation * self.orientation
        } else {
            translation
        };
        self.matrix
    }

    /// Evenly spaced points along one full lap, for path overlays
    pub fn sample_path(&self, samples: usize) -> Vec<Vec3> {
        let samples = samples.max(self.points.len());
        (0..samples)
            .map(|i| self.sample(self.period * i as f32 / samples as f32).0)
            .collect()
    }

    fn advance_frame(&mut self, tangent: &Vec3) {
        let Some(x_axis) = tangent.try_normalize(constants::LENGTH_EPSILON) else {
            return;
        };
        let z_axis = x_axis
            .cross(&self.last_up)
            .try_normalize(constants::LENGTH_EPSILON)
            .unwrap_or_else(|| x_axis.cross(&least_aligned_axis(&x_axis)).normalize());
        let y_axis = z_axis.cross(&x_axis).normalize();
        self.last_up = y_axis;

        #[rustfmt::skip]
        let orientation = Mat4::new(
            x_axis.x, y_axis.x, z_axis.x, 0.0,
            x_axis.y, y_axis.y, z_axis.y, 0.0,
            x_axis.z, y_axis.z, z_axis.z, 0.0,
            0.0,      0.0,      0.0,      1.0,
        );
        self.orientation = orientation;
    }
}

/// World axis closest to perpendicular to `v`
fn least_aligned_axis(v: &Vec3) -> Vec3 {
    let a = v.abs();
    if a.x <= a.y && a.x <= a.z {
        Vec3::x()
    } else if a.y <= a.z {
        Vec3::y()
    } else {
        Vec3::z()
    }
}

/// Uniform Catmull-Rom segment between `p1` and `p2` (tension 0.5)
///
/// Returns the position and the derivative with respect to `t`.
fn catmull_rom(p0: &Vec3, p1: &Vec3, p2: &Vec3, p3: &Vec3, t: f32) -> (Vec3, Vec3) {
    let a = p1 * 2.0;
    let b = p2 - p0;
    let c = p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3;
    let d = -p0 + p1 * 3.0 - p2 * 3.0 + p3;

    let t2 = t * t;
    let t3 = t2 * t;

    let position = (a + b * t + c * t2 + d * t3) * 0.5;
    let derivative = (b + c * (2.0 * t) + d * (3.0 * t2)) * 0.5;
    (position, derivative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn square_loop() -> Vec<Vec3> {
        vec![
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -2.0),
            Vec3::new(-2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
        ]
    }

    #[test]
    fn test_rejects_too_few_points() {
        let points = vec![Vec3::zeros(), Vec3::x(), Vec3::y()];
        assert!(matches!(
            AnimatedTranslation::new(points, 1.0, false),
            Err(SceneError::TooFewControlPoints { found: 3 })
        ));
    }

    #[test]
    fn test_rejects_bad_period() {
        for period in [0.0, -2.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                AnimatedTranslation::new(square_loop(), period, false),
                Err(SceneError::NonPositivePeriod(_))
            ));
        }
    }

    #[test]
    fn test_rejects_non_finite_point() {
        let mut points = square_loop();
        points[2].y = f32::NAN;
        assert!(matches!(
            AnimatedTranslation::new(points, 4.0, false),
            Err(SceneError::NonFiniteValue(_))
        ));
    }

    #[test]
    fn test_periodicity() {
        let path = AnimatedTranslation::new(square_loop(), 4.0, false).unwrap();
        let (start, _) = path.sample(0.0);
        let (lap, _) = path.sample(4.0);
        let (two_laps, _) = path.sample(8.0);
        assert_relative_eq!(start, lap, epsilon = 1e-5);
        assert_relative_eq!(start, two_laps, epsilon = 1e-4);
        assert_relative_eq!(start, Vec3::new(2.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_negative_time_wraps() {
        let path = AnimatedTranslation::new(square_loop(), 4.0, false).unwrap();
        let (behind, _) = path.sample(-1.0);
        let (ahead, _) = path.sample(3.0);
        assert_relative_eq!(behind, ahead, epsilon = 1e-5);
    }

    #[test]
    fn test_passes_through_control_points() {
        let points = square_loop();
        let path = AnimatedTranslation::new(points.clone(), 8.0, false).unwrap();
        for (i, point) in points.iter().enumerate() {
            let (position, _) = path.sample(2.0 * i as f32);
            assert_relative_eq!(position, *point, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_continuous_across_segment_boundaries() {
        let path = AnimatedTranslation::new(square_loop(), 4.0, false).unwrap();
        let delta = 1e-3;
        // Boundaries at t = 1, 2, 3 and the wraparound at t = 4 (== 0)
        for boundary in [1.0_f32, 2.0, 3.0, 4.0] {
            let (before, _) = path.sample(boundary - delta);
            let (after, _) = path.sample(boundary + delta);
            assert!(
                (before - after).magnitude() < 1e-2,
                "jump at t = {boundary}: {before:?} vs {after:?}"
            );
        }
    }

    #[test]
    fn test_unaligned_matrix_is_pure_translation() {
        let mut path = AnimatedTranslation::new(square_loop(), 4.0, false).unwrap();
        let matrix = path.evaluate(1.0);
        assert_relative_eq!(
            matrix,
            Mat4::new_translation(&Vec3::new(0.0, 0.0, -2.0)),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_aligned_frame_follows_tangent() {
        let mut path = AnimatedTranslation::new(square_loop(), 4.0, true).unwrap();
        for step in 0..40 {
            let time = step as f32 * 0.1;
            let matrix = path.evaluate(time);
            let (_, tangent) = path.sample(time);

            let x_axis = Vec3::new(matrix[(0, 0)], matrix[(1, 0)], matrix[(2, 0)]);
            assert_relative_eq!(x_axis, tangent.normalize(), epsilon = 1e-4);

            let rotation = matrix.fixed_view::<3, 3>(0, 0).into_owned();
            assert_abs_diff_eq!(rotation.determinant(), 1.0, epsilon = 1e-4);
            // Flat loop in XZ: the carried up vector stays on +Y
            assert_relative_eq!(
                Vec3::new(matrix[(0, 1)], matrix[(1, 1)], matrix[(2, 1)]),
                Vec3::y(),
                epsilon = 1e-4
            );
        }
    }

    #[test]
    fn test_vertical_loop_frame_starts_on_tangent() {
        let points = vec![
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(-2.0, 0.0, 0.0),
            Vec3::new(0.0, -2.0, 0.0),
        ];
        // First tangent is +Y, parallel to the initial up vector
        let mut path = AnimatedTranslation::new(points, 4.0, true).unwrap();
        let mut previous_up: Option<Vec3> = None;
        for step in 0..400 {
            let time = step as f32 * 0.01;
            let matrix = path.evaluate(time);
            let (_, tangent) = path.sample(time);

            let x_axis = Vec3::new(matrix[(0, 0)], matrix[(1, 0)], matrix[(2, 0)]);
            assert_relative_eq!(x_axis, tangent.normalize(), epsilon = 1e-4);

            let up = Vec3::new(matrix[(0, 1)], matrix[(1, 1)], matrix[(2, 1)]);
            if let Some(previous) = previous_up {
                assert!(up.dot(&previous) > 0.9, "up vector jumped at step {step}");
            }
            previous_up = Some(up);
        }
    }

    #[test]
    fn test_sample_path_closed_loop() {
        let path = AnimatedTranslation::new(square_loop(), 4.0, false).unwrap();
        let samples = path.sample_path(64);
        assert_eq!(samples.len(), 64);
        assert_relative_eq!(samples[0], Vec3::new(2.0, 0.0, 0.0), epsilon = 1e-6);
        let last = samples[samples.len() - 1];
        assert!((last - samples[0]).magnitude() < 0.5);
    }
}
