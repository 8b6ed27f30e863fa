//! Clipping in homogeneous clip space.
//!
//! Clipping runs after projection and before the perspective divide. The
//! clip volume for the `[0, 1]` depth range is:
//!
//! ```text
//! -w <= x <= w
//! -w <= y <= w
//!  0 <= z <= w
//! ```
//!
//! Triangles are only clipped against the near plane: for a perspective
//! projection `z >= 0` implies `w >= z_near > 0`, so every clipped vertex
//! divides safely. Their side and far planes are left to the screen-space
//! bounding box and the depth test. Line segments have no bounding box to
//! lean on and are clipped against all six planes.
//!
//! Each clip vertex carries its barycentric coordinates relative to the
//! source triangle. Intersections lerp them together with the position,
//! which lets the rasterizer report weights for the original triangle even
//! when it draws a clipped piece.

use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;

/// A clip-space position plus its weights in the source triangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipVertex {
    /// Position in clip space (x, y, z, w) - before perspective divide
    pub position: Vec4,
    /// Barycentric coordinates relative to the unclipped triangle
    pub bary: Vec3,
}

impl ClipVertex {
    pub fn new(position: Vec4, bary: Vec3) -> Self {
        Self { position, bary }
    }

    /// Linearly interpolate position and weights between two vertices.
    /// Used when a polygon edge crosses the clipping plane.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            bary: self.bary + (other.bary - self.bary) * t,
        }
    }

    #[inline]
    fn near_distance(&self) -> f32 {
        ClipPlane::Near.signed_distance(self.position)
    }
}

/// The six planes of the clip volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipPlane {
    /// x >= -w
    Left,
    /// x <= w
    Right,
    /// y >= -w
    Bottom,
    /// y <= w
    Top,
    /// z >= 0
    Near,
    /// z <= w
    Far,
}

impl ClipPlane {
    pub const ALL: [ClipPlane; 6] = [
        ClipPlane::Left,
        ClipPlane::Right,
        ClipPlane::Bottom,
        ClipPlane::Top,
        ClipPlane::Near,
        ClipPlane::Far,
    ];

    /// Signed distance of `p` to this plane. Positive = inside.
    #[inline]
    pub fn signed_distance(&self, p: Vec4) -> f32 {
        match self {
            Self::Left => p.w + p.x,
            Self::Right => p.w - p.x,
            Self::Bottom => p.w + p.y,
            Self::Top => p.w - p.y,
            Self::Near => p.z,
            Self::Far => p.w - p.z,
        }
    }
}

/// A convex polygon in clip space produced by clipping one triangle.
#[derive(Debug, Clone)]
pub struct ClipPolygon {
    pub vertices: Vec<ClipVertex>,
}

impl ClipPolygon {
    /// Wraps a triangle, tagging its corners with unit barycentrics.
    pub fn from_triangle(v: &[Vec4; 3]) -> Self {
        Self {
            vertices: vec![
                ClipVertex::new(v[0], Vec3::X),
                ClipVertex::new(v[1], Vec3::Y),
                ClipVertex::new(v[2], Vec3::Z),
            ],
        }
    }

    /// Returns true if the polygon has been completely clipped away.
    pub fn is_empty(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Clips against `z >= 0` using Sutherland-Hodgman.
    ///
    /// A triangle yields 0, 3 or 4 vertices. Vertex order (and therefore
    /// winding) is preserved.
    pub fn clip_near(&self) -> Self {
        if self.is_empty() {
            return Self { vertices: vec![] };
        }

        let mut output = Vec::with_capacity(self.vertices.len() + 1);

        for (i, current) in self.vertices.iter().enumerate() {
            let next = &self.vertices[(i + 1) % self.vertices.len()];

            let d1 = current.near_distance();
            let d2 = next.near_distance();

            if d1 >= 0.0 {
                output.push(*current);
                if d2 < 0.0 {
                    // Leaving the volume
                    output.push(current.lerp(next, d1 / (d1 - d2)));
                }
            } else if d2 >= 0.0 {
                // Entering the volume
                output.push(current.lerp(next, d1 / (d1 - d2)));
            }
        }

        Self { vertices: output }
    }

    /// Fan triangulation of this convex polygon.
    ///
    /// Returns an iterator of `[v0, vi, vi+1]` triangles sharing the first
    /// vertex, all with the winding of the source polygon.
    pub fn triangulate(&self) -> impl Iterator<Item = [ClipVertex; 3]> + '_ {
        (1..self.vertices.len().saturating_sub(1))
            .map(move |i| [self.vertices[0], self.vertices[i], self.vertices[i + 1]])
    }
}

/// Whether any vertex lies behind the near plane.
#[inline]
pub fn crosses_near(v: &[Vec4; 3]) -> bool {
    v.iter().any(|&p| ClipPlane::Near.signed_distance(p) < 0.0)
}

/// Clips the segment `a -> b` to the clip volume (Liang-Barsky).
///
/// Returns the surviving piece, or `None` when the segment lies entirely
/// outside. Endpoints already inside are returned unchanged. Inputs must
/// be finite.
pub fn clip_segment(a: Vec4, b: Vec4) -> Option<(Vec4, Vec4)> {
    let mut t_enter = 0.0f32;
    let mut t_leave = 1.0f32;

    for plane in ClipPlane::ALL {
        let d0 = plane.signed_distance(a);
        let d1 = plane.signed_distance(b);

        if d0 < 0.0 && d1 < 0.0 {
            return None;
        }
        if d0 < 0.0 {
            t_enter = t_enter.max(d0 / (d0 - d1));
        } else if d1 < 0.0 {
            t_leave = t_leave.min(d0 / (d0 - d1));
        }
    }

    if t_enter > t_leave {
        return None;
    }

    let start = if t_enter > 0.0 { a.lerp(b, t_enter) } else { a };
    let end = if t_leave < 1.0 { a.lerp(b, t_leave) } else { b };
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn triangle_in_front_is_unchanged() {
        let tri = [
            Vec4::new(0.0, 0.0, 0.5, 1.0),
            Vec4::new(1.0, 0.0, 0.5, 1.0),
            Vec4::new(0.0, 1.0, 0.5, 1.0),
        ];
        let poly = ClipPolygon::from_triangle(&tri).clip_near();
        assert_eq!(poly.vertices.len(), 3);
        assert_eq!(poly.vertices[1].position, tri[1]);
        assert_eq!(poly.triangulate().count(), 1);
    }

    #[test]
    fn triangle_behind_is_removed() {
        let tri = [
            Vec4::new(0.0, 0.0, -0.5, 1.0),
            Vec4::new(1.0, 0.0, -0.5, 1.0),
            Vec4::new(0.0, 1.0, -0.5, 1.0),
        ];
        let poly = ClipPolygon::from_triangle(&tri).clip_near();
        assert!(poly.is_empty());
        assert_eq!(poly.triangulate().count(), 0);
    }

    #[test]
    fn one_vertex_behind_yields_quad() {
        let tri = [
            Vec4::new(0.0, 0.0, -1.0, 1.0),
            Vec4::new(1.0, 0.0, 1.0, 1.0),
            Vec4::new(0.0, 1.0, 1.0, 1.0),
        ];
        let poly = ClipPolygon::from_triangle(&tri).clip_near();
        assert_eq!(poly.vertices.len(), 4);
        assert_eq!(poly.triangulate().count(), 2);

        for v in &poly.vertices {
            assert!(v.position.z >= 0.0);
            assert_relative_eq!(v.bary.x + v.bary.y + v.bary.z, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn intersection_weights_follow_position() {
        let tri = [
            Vec4::new(0.0, 0.0, 1.0, 1.0),
            Vec4::new(2.0, 0.0, -1.0, 1.0),
            Vec4::new(0.0, 2.0, 1.0, 1.0),
        ];
        let poly = ClipPolygon::from_triangle(&tri).clip_near();

        // Edge v0 -> v1 crosses z = 0 halfway.
        let hit = poly.vertices[1];
        assert_relative_eq!(hit.position.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(hit.position.z, 0.0, epsilon = 1e-6);
        assert_relative_eq!(hit.bary.x, 0.5, epsilon = 1e-6);
        assert_relative_eq!(hit.bary.y, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn segment_inside_is_unchanged() {
        let a = Vec4::new(-0.5, 0.2, 0.3, 1.0);
        let b = Vec4::new(1.0, -2.0, 1.5, 2.0);
        assert_eq!(clip_segment(a, b), Some((a, b)));
    }

    #[test]
    fn segment_outside_one_plane_is_dropped() {
        let a = Vec4::new(2.0, 0.0, 0.5, 1.0);
        let b = Vec4::new(3.0, 0.5, 0.5, 1.0);
        assert_eq!(clip_segment(a, b), None);

        // Crosses the right and top planes without ever being inside.
        let a = Vec4::new(3.0, 0.0, 0.5, 1.0);
        let b = Vec4::new(0.0, 3.0, 0.5, 1.0);
        assert_eq!(clip_segment(a, b), None);
    }

    #[test]
    fn segment_is_cut_at_both_sides() {
        let a = Vec4::new(-3.0, 0.0, 0.5, 1.0);
        let b = Vec4::new(3.0, 0.0, 0.5, 1.0);
        let (start, end) = clip_segment(a, b).unwrap();
        assert_relative_eq!(start.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(end.x, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn segment_near_the_eye_keeps_positive_w() {
        // One endpoint has a vanishing w: beyond the far plane and outside
        // both side planes once divided.
        let a = Vec4::new(-1.0, 0.0, 0.5, 1e-30);
        let b = Vec4::new(0.0, 0.5, 0.5, 1.0);
        let (start, end) = clip_segment(a, b).unwrap();

        assert_eq!(end, b);
        assert_relative_eq!(start.w, 0.5, epsilon = 1e-6);
        assert_relative_eq!(start.x / start.w, -1.0, epsilon = 1e-6);
        for plane in ClipPlane::ALL {
            assert!(plane.signed_distance(start) >= -1e-6, "{plane:?}");
        }
    }

    #[test]
    fn crosses_near_detects_any_vertex() {
        let mut tri = [Vec4::new(0.0, 0.0, 0.5, 1.0); 3];
        assert!(!crosses_near(&tri));
        tri[2].z = -0.01;
        assert!(crosses_near(&tri));
    }
}
