//! Edge function-based triangle rasterization.
//!
//! Triangles arrive as **homogeneous clip-space** vertices (not yet divided
//! by `w`) with counter-clockwise winding.
//!
//! # Pipeline
//!
//! 1. Trivial reject against the clip volume half-spaces
//! 2. Near-plane clipping, when enabled and a vertex is behind it
//! 3. Perspective divide, keeping `1/w`
//! 4. Viewport transform to window space (origin bottom-left)
//! 5. Signed area; zero or negative area is culled (degenerate or back face)
//! 6. Bounding box clamped to the buffer
//! 7. Per-pixel coverage with the top-left fill rule
//! 8. Barycentric and perspective-correct weights, screen-linear depth
//! 9. Depth test with joined color + depth write
//!
//! # Edge Function
//!
//! For an edge from A to B, evaluated at P:
//!
//! ```text
//! E(P) = (P.y - A.y) * (B.x - A.x) - (P.x - A.x) * (B.y - A.y)
//! ```
//!
//! Positive when P is left of A -> B. For a CCW triangle all three values
//! are positive inside; `E_i / area` are the screen-space barycentrics.
//!
//! # Perspective Correction
//!
//! Screen-space weights are linear on screen, not on the surface. Weighting
//! each by the vertex `1/w` and renormalizing gives the surface weights:
//!
//! ```text
//! c_i = (s_i / w_i) / sum_j (s_j / w_j)
//! ```
//!
//! Depth deliberately stays screen-linear (`sum s_i * z_i`), the convention
//! hardware depth buffers use.
//!
//! # References
//!
//! - Juan Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)
//! - Mileff, Nehéz, Dudra, "Accelerated Half-Space Triangle Rasterization" (2015)

use super::shader::{FlatShader, Fragment, FragmentShader};
use crate::color::Color;
use crate::config::RenderConfig;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::render::clipper::{self, ClipPolygon, ClipVertex};
use crate::render::framebuffer::FrameBuffer;
use crate::render::geometry::{
    edge_covers, edge_function, is_top_left, ndc_to_window, perspective_divide,
    trivially_rejected, BoundingBox,
};

/// Triangle rasterizer using the edge function algorithm.
///
/// Stateless apart from its clipping mode; one instance can draw into any
/// number of frame buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeFunctionRasterizer {
    near_clipping: bool,
}

impl Default for EdgeFunctionRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeFunctionRasterizer {
    /// Creates a rasterizer with near-plane clipping enabled.
    pub fn new() -> Self {
        Self {
            near_clipping: true,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            near_clipping: config.near_clipping,
        }
    }

    /// Enables or disables near-plane clipping.
    ///
    /// Without it, triangles partially behind the eye are rasterized from
    /// their divided vertices as-is, which can smear fragments across the
    /// screen.
    pub fn with_near_clipping(mut self, enabled: bool) -> Self {
        self.near_clipping = enabled;
        self
    }

    /// Fills a CCW clip-space triangle with a solid color.
    ///
    /// Returns the number of fragments that passed the depth test.
    pub fn draw_tri(&self, clip: [Vec4; 3], color: Color, buffer: &mut FrameBuffer) -> usize {
        self.draw_tri_shaded(clip, &FlatShader::new(color), buffer)
    }

    /// Fills a CCW clip-space triangle, coloring each fragment with `shader`.
    ///
    /// Returns the number of fragments that passed the depth test.
    pub fn draw_tri_shaded<S: FragmentShader + ?Sized>(
        &self,
        clip: [Vec4; 3],
        shader: &S,
        buffer: &mut FrameBuffer,
    ) -> usize {
        if trivially_rejected(&clip) {
            log::trace!("triangle trivially rejected: {clip:?}");
            return 0;
        }

        if self.near_clipping && clipper::crosses_near(&clip) {
            let polygon = ClipPolygon::from_triangle(&clip).clip_near();
            if polygon.is_empty() {
                log::trace!("triangle clipped away by the near plane");
                return 0;
            }
            return polygon
                .triangulate()
                .map(|piece| Self::rasterize(&piece, shader, buffer))
                .sum();
        }

        let [a, b, c] = clip;
        let whole = [
            ClipVertex::new(a, Vec3::X),
            ClipVertex::new(b, Vec3::Y),
            ClipVertex::new(c, Vec3::Z),
        ];
        Self::rasterize(&whole, shader, buffer)
    }

    /// Rasterizes one (possibly clipped) triangle.
    ///
    /// Weights handed to the shader are remapped through each vertex's
    /// `bary`, so they always refer to the caller's original triangle.
    fn rasterize<S: FragmentShader + ?Sized>(
        verts: &[ClipVertex; 3],
        shader: &S,
        buffer: &mut FrameBuffer,
    ) -> usize {
        // ─────────────────────────────────────────────────────────────────────
        // Step 1: Reject vertices that cannot be divided
        // ─────────────────────────────────────────────────────────────────────
        if verts
            .iter()
            .any(|v| !v.position.is_finite() || v.position.w <= 0.0)
        {
            log::trace!("triangle skipped: non-finite or non-positive w");
            return 0;
        }

        // ─────────────────────────────────────────────────────────────────────
        // Step 2: Perspective divide and viewport transform
        // ─────────────────────────────────────────────────────────────────────
        let (width, height) = buffer.resolution();
        let ndc = verts.map(|v| perspective_divide(v.position));
        let win = ndc.map(|n| ndc_to_window(n.x, n.y, width, height));
        let [v0, v1, v2] = win;

        // ─────────────────────────────────────────────────────────────────────
        // Step 3: Signed area (2x triangle area), doubles as the denominator
        // ─────────────────────────────────────────────────────────────────────
        let area = edge_function(v0, v1, v2);
        if area.is_nan() || area <= 0.0 {
            log::trace!("triangle culled: area {area}");
            return 0;
        }
        let inv_area = 1.0 / area;

        // ─────────────────────────────────────────────────────────────────────
        // Step 4: Bounding box, clamped to the buffer
        // ─────────────────────────────────────────────────────────────────────
        let Some(bbox) = BoundingBox::of(&win, width, height) else {
            return 0;
        };

        // Edge i is the one opposite vertex i.
        let top_left = [is_top_left(v1, v2), is_top_left(v2, v0), is_top_left(v0, v1)];
        let inv_w = [ndc[0].w, ndc[1].w, ndc[2].w];
        let depths = [ndc[0].z, ndc[1].z, ndc[2].z];

        let mut written = 0;

        // ─────────────────────────────────────────────────────────────────────
        // Step 5: Iterate over all pixels in the bounding box
        // ─────────────────────────────────────────────────────────────────────
        for y in bbox.min_y..bbox.max_y {
            for x in bbox.min_x..bbox.max_x {
                // Sample at pixel center
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);

                let e = [
                    edge_function(v1, v2, p),
                    edge_function(v2, v0, p),
                    edge_function(v0, v1, p),
                ];

                if !(0..3).all(|i| edge_covers(e[i], top_left[i])) {
                    continue;
                }

                // Screen-space weights; depth is interpolated with these
                let s = [e[0] * inv_area, e[1] * inv_area, e[2] * inv_area];
                let depth = s[0] * depths[0] + s[1] * depths[1] + s[2] * depths[2];

                // Early depth test, so rejected fragments are never shaded
                if !(depth < buffer.depth(x, y)) {
                    continue;
                }

                // Perspective-correct weights for everything else
                let q = [s[0] * inv_w[0], s[1] * inv_w[1], s[2] * inv_w[2]];
                let inv_sum = 1.0 / (q[0] + q[1] + q[2]);
                let c = [q[0] * inv_sum, q[1] * inv_sum, q[2] * inv_sum];

                let fragment = Fragment {
                    x,
                    y,
                    depth,
                    screen_bary: Self::to_source(verts, s),
                    bary: Self::to_source(verts, c),
                };

                if buffer.test_and_set(x, y, depth, shader.shade(&fragment)) {
                    written += 1;
                }
            }
        }

        written
    }

    /// Maps weights over a clipped piece back onto the source triangle.
    #[inline]
    fn to_source(verts: &[ClipVertex; 3], w: [f32; 3]) -> Vec3 {
        verts[0].bary * w[0] + verts[1].bary * w[1] + verts[2].bary * w[2]
    }
}
