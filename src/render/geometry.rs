//! Geometry shared by the line and triangle rasterizers.
//!
//! # Spaces
//!
//! ```text
//! clip (x, y, z, w)  --divide-->  NDC x,y in [-1, 1], z in [0, 1]
//!                    --viewport-> window x in [0, width], y in [0, height]
//! ```
//!
//! Window space has its origin at the bottom-left corner with y pointing
//! up, so a counter-clockwise triangle in NDC stays counter-clockwise on
//! screen and has a positive [`edge_function`] area.

use super::clipper::ClipPlane;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;

/// Signed doubled area of the triangle `(a, b, c)`.
///
/// ```text
/// E = (c.y - a.y) * (b.x - a.x) - (c.x - a.x) * (b.y - a.y)
/// ```
///
/// Positive when `c` lies to the left of the directed edge `a -> b`
/// (counter-clockwise), negative to the right, zero on the line. Evaluated
/// at a pixel center it is the unnormalized barycentric weight of the
/// vertex opposite the edge.
#[inline]
pub fn edge_function(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (c.y - a.y) * (b.x - a.x) - (c.x - a.x) * (b.y - a.y)
}

/// Tie-break for samples lying exactly on the edge `a -> b`.
///
/// An edge owns its samples when its vector points up (`dy > 0`) or is
/// horizontal and points toward +x. The reversed edge of a neighbouring
/// triangle never satisfies this, so every shared-edge sample is claimed
/// by exactly one of the two triangles.
#[inline]
pub fn is_top_left(a: Vec2, b: Vec2) -> bool {
    let d = b - a;
    d.y > 0.0 || (d.y == 0.0 && d.x > 0.0)
}

/// Coverage test for one edge value: strictly inside, or on a top-left edge.
#[inline]
pub fn edge_covers(value: f32, top_left: bool) -> bool {
    value > 0.0 || (value == 0.0 && top_left)
}

/// Whether the whole triangle lies outside one clip-space half-space.
///
/// Tests `x > w`, `x < -w`, `y > w`, `y < -w`, `z > w` and `z < 0` (the
/// near plane of the `[0, 1]` depth range). This is a conservative
/// early-out only; it does not clip.
pub fn trivially_rejected(v: &[Vec4; 3]) -> bool {
    ClipPlane::ALL
        .iter()
        .any(|plane| v.iter().all(|&p| plane.signed_distance(p) < 0.0))
}

/// Divides by `w` and keeps `1 / w` in the fourth component for
/// perspective-correct interpolation.
///
/// `w == 0` produces infinities; callers reject such vertices first.
#[inline]
pub fn perspective_divide(clip: Vec4) -> Vec4 {
    let inv_w = 1.0 / clip.w;
    Vec4::new(clip.x * inv_w, clip.y * inv_w, clip.z * inv_w, inv_w)
}

/// Maps NDC x/y in `[-1, 1]` to window coordinates in `[0, resolution]`.
#[inline]
pub fn ndc_to_window(x: f32, y: f32, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        (x + 1.0) * (width as f32 * 0.5),
        (y + 1.0) * (height as f32 * 0.5),
    )
}

/// Maps an NDC point to the nearest integer raster coordinate.
#[inline]
pub fn ndc_to_raster(ndc: Vec3, width: u32, height: u32) -> (i32, i32) {
    let window = ndc_to_window(ndc.x, ndc.y, width, height);
    (window.x.round() as i32, window.y.round() as i32)
}

/// Half-open pixel rectangle `[min_x, max_x) x [min_y, max_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    /// Pixel footprint of window-space points, clamped to the buffer.
    ///
    /// Returns `None` when the clamped box holds no pixel. Inputs must be
    /// finite.
    pub fn of(points: &[Vec2], width: u32, height: u32) -> Option<Self> {
        let (min, max) = points.iter().fold(
            (Vec2::new(f32::MAX, f32::MAX), Vec2::new(f32::MIN, f32::MIN)),
            |(min, max), p| {
                (
                    Vec2::new(min.x.min(p.x), min.y.min(p.y)),
                    Vec2::new(max.x.max(p.x), max.y.max(p.y)),
                )
            },
        );

        let bbox = Self {
            min_x: (min.x.floor() as i32).max(0),
            min_y: (min.y.floor() as i32).max(0),
            max_x: (max.x.ceil() as i32).min(width as i32),
            max_y: (max.y.ceil() as i32).min(height as i32),
        };

        (!bbox.is_empty()).then_some(bbox)
    }

    pub fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn edge_function_sign_follows_winding() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(4.0, 0.0);
        let c = Vec2::new(2.0, 4.0);

        assert_eq!(edge_function(a, b, c), 16.0);
        assert_eq!(edge_function(a, c, b), -16.0);
        assert_eq!(edge_function(a, b, Vec2::new(1.0, 0.0)), 0.0);
    }

    #[test]
    fn top_left_owns_exactly_one_direction() {
        let dirs = [
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
            Vec2::new(3.0, -2.0),
        ];
        for d in dirs {
            let a = Vec2::new(0.5, 0.5);
            let b = a + d;
            assert_ne!(is_top_left(a, b), is_top_left(b, a), "direction {d:?}");
        }
    }

    #[test]
    fn edge_covers_zero_only_on_top_left() {
        assert!(edge_covers(0.5, false));
        assert!(edge_covers(0.0, true));
        assert!(!edge_covers(0.0, false));
        assert!(!edge_covers(-0.1, true));
    }

    #[test]
    fn rejects_triangle_beyond_one_plane() {
        let right = [
            Vec4::new(2.0, 0.0, 0.5, 1.0),
            Vec4::new(3.0, 1.0, 0.5, 1.0),
            Vec4::new(1.5, -1.0, 0.5, 1.0),
        ];
        assert!(trivially_rejected(&right));

        let behind = [
            Vec4::new(0.0, 0.0, -0.5, 1.0),
            Vec4::new(1.0, 0.0, -0.1, 1.0),
            Vec4::new(0.0, 1.0, -2.0, 1.0),
        ];
        assert!(trivially_rejected(&behind));
    }

    #[test]
    fn keeps_triangle_spanning_planes() {
        // Each vertex is outside a different plane, none shared.
        let spanning = [
            Vec4::new(2.0, 0.0, 0.5, 1.0),
            Vec4::new(-2.0, 0.0, 0.5, 1.0),
            Vec4::new(0.0, 2.0, 0.5, 1.0),
        ];
        assert!(!trivially_rejected(&spanning));
    }

    #[test]
    fn divide_keeps_reciprocal_w() {
        let ndc = perspective_divide(Vec4::new(2.0, -4.0, 1.0, 4.0));
        assert_relative_eq!(ndc.x, 0.5);
        assert_relative_eq!(ndc.y, -1.0);
        assert_relative_eq!(ndc.z, 0.25);
        assert_relative_eq!(ndc.w, 0.25);
    }

    #[test]
    fn viewport_maps_corners() {
        assert_eq!(ndc_to_window(-1.0, -1.0, 640, 480), Vec2::new(0.0, 0.0));
        assert_eq!(ndc_to_window(1.0, 1.0, 640, 480), Vec2::new(640.0, 480.0));
        assert_eq!(ndc_to_window(0.0, 0.0, 640, 480), Vec2::new(320.0, 240.0));
    }

    #[test]
    fn raster_rounds_to_nearest() {
        assert_eq!(ndc_to_raster(Vec3::new(-0.74, 0.0, 0.0), 4, 4), (1, 2));
        assert_eq!(ndc_to_raster(Vec3::new(-0.76, 0.1, 0.0), 4, 4), (0, 2));
    }

    #[test]
    fn bounding_box_is_clamped() {
        let points = [
            Vec2::new(-3.0, 1.2),
            Vec2::new(2.5, 7.0),
            Vec2::new(1.0, -1.0),
        ];
        let bbox = BoundingBox::of(&points, 4, 4).unwrap();
        assert_eq!(
            bbox,
            BoundingBox {
                min_x: 0,
                min_y: 0,
                max_x: 3,
                max_y: 4
            }
        );
    }

    #[test]
    fn bounding_box_outside_buffer_is_none() {
        let points = [
            Vec2::new(5.0, 5.0),
            Vec2::new(6.0, 5.0),
            Vec2::new(5.0, 6.0),
        ];
        assert!(BoundingBox::of(&points, 4, 4).is_none());
    }
}
