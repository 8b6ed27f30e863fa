//! 4x4 transformation matrix using column-vector convention.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//! - Coordinate system is **right-handed**: the camera looks down -Z
//!
//! # Example
//! ```ignore
//! let model_to_world = translation * rotation;  // rotation applied first
//! let clip = world_to_clip * model_to_world * Vec4::from(vertex);
//! ```

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub const fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub const fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Counter-clockwise rotation around +X when looking down the axis.
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Counter-clockwise rotation around +Y when looking down the axis.
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a right-handed perspective matrix with depth in `[0, 1]`.
    ///
    /// After the perspective divide, view-space `z = -near` lands on 0 and
    /// `z = -far` on 1. X and Y are scaled by `1 / tan(fov_y / 2)`, X
    /// additionally divided by the aspect ratio.
    ///
    /// `near == far` or `fov_y == 0` produce non-finite entries; no check.
    pub fn perspective_rh(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let tf = 1.0 / (fov_y * 0.5).tan();

        // Classic [-1, 1] depth projection.
        let gl = Mat4::new([
            [tf / aspect_ratio, 0.0, 0.0, 0.0],
            [0.0, tf, 0.0, 0.0],
            [0.0, 0.0, (far + near) / (near - far), 2.0 * far * near / (near - far)],
            [0.0, 0.0, -1.0, 0.0],
        ]);

        // z' = 0.5 * z + 0.5 * w remaps [-w, w] to [0, w].
        let depth_remap = Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 0.5, 0.5],
            [0.0, 0.0, 0.0, 1.0],
        ]);

        depth_remap * gl
    }

    /// Creates a right-handed view matrix looking from `eye` at `target`.
    pub fn look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        Self::orient_rh(eye, (target - eye).normalize(), up)
    }

    /// Creates a right-handed view matrix from an eye position and a
    /// (normalized) forward direction.
    ///
    /// The camera basis is `z = -forward`, `right = up x z`,
    /// `up' = z x right`. The view matrix is the inverse of that basis:
    /// the rotation transposed with translation `-dot(axis, eye)`.
    ///
    /// `up` parallel to `forward` leaves the basis undefined (NaN).
    pub fn orient_rh(eye: Vec3, forward: Vec3, up: Vec3) -> Self {
        let z = -forward;
        let right = up.cross(z).normalize();
        let up = z.cross(right).normalize();

        Self::new([
            [right.x, right.y, right.z, -right.dot(eye)],
            [up.x, up.y, up.z, -up.dot(eye)],
            [z.x, z.y, z.z, -z.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Transforms a point (implicit `w = 1`) without perspective division.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        (*self * Vec4::from(p)).xyz()
    }

    /// Largest absolute element-wise difference, for tolerance checks.
    #[cfg(test)]
    pub(crate) fn max_abs_diff(&self, other: &Mat4) -> f32 {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max)
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// For column-vector convention, `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, values) in result.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        let row = |r: usize| {
            self.data[r][0] * v.x + self.data[r][1] * v.y + self.data[r][2] * v.z + self.data[r][3] * v.w
        };
        Vec4::new(row(0), row(1), row(2), row(3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn perspective_maps_near_to_zero_and_far_to_one() {
        let proj = Mat4::perspective_rh(FRAC_PI_2, 1.0, 0.5, 10.0);

        let near = proj * Vec4::point(0.0, 0.0, -0.5);
        assert_relative_eq!(near.z / near.w, 0.0, epsilon = 1e-6);

        let far = proj * Vec4::point(0.0, 0.0, -10.0);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn perspective_w_is_view_distance() {
        let proj = Mat4::perspective_rh(FRAC_PI_2, 1.0, 0.1, 100.0);
        let clip = proj * Vec4::point(1.0, 2.0, -7.0);
        assert_relative_eq!(clip.w, 7.0, epsilon = 1e-6);
    }

    #[test]
    fn perspective_scales_by_fov_and_aspect() {
        // fov 90 deg -> tan(45) = 1, so a point at x = -z lands on the edge
        let proj = Mat4::perspective_rh(FRAC_PI_2, 2.0, 0.1, 100.0);
        let clip = proj * Vec4::point(4.0, 2.0, -2.0);
        assert_relative_eq!(clip.x / clip.w, 1.0, epsilon = 1e-6);
        assert_relative_eq!(clip.y / clip.w, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn look_at_puts_target_on_negative_z() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        let origin = view.transform_point(Vec3::ZERO);
        assert_relative_eq!(origin.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(origin.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(origin.z, -5.0, epsilon = 1e-6);
    }

    #[test]
    fn view_rotation_is_orthonormal() {
        let view = Mat4::look_at_rh(Vec3::new(3.0, 2.0, 1.0), Vec3::new(-1.0, 0.0, 4.0), Vec3::Y);
        let origin = view.transform_point(Vec3::ZERO);
        let axes = [Vec3::X, Vec3::Y, Vec3::Z].map(|a| view.transform_point(a) - origin);

        for (i, a) in axes.iter().enumerate() {
            assert_relative_eq!(a.magnitude(), 1.0, epsilon = 1e-5);
            for b in &axes[i + 1..] {
                assert_relative_eq!(a.dot(*b), 0.0, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn rotation_y_turns_x_toward_negative_z() {
        let p = Mat4::rotation_y(FRAC_PI_2).transform_point(Vec3::X);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn multiplication_applies_right_first() {
        // Rotate X onto -Z first, then move along +X.
        let m = Mat4::translation(1.0, 0.0, 0.0) * Mat4::rotation_y(FRAC_PI_2);
        let p = m.transform_point(Vec3::X);
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, -1.0, epsilon = 1e-6);

        let swapped = Mat4::rotation_y(FRAC_PI_2) * Mat4::translation(1.0, 0.0, 0.0);
        let q = swapped.transform_point(Vec3::X);
        assert_relative_eq!(q.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(q.z, -2.0, epsilon = 1e-6);
    }
}
