//! Line drawing with Bresenham's algorithm.
//!
//! Lines are not depth tested and are drawn over whatever the buffer holds.
//! The NDC and clip-space entry points clip geometrically first, so the
//! raster walk only covers the visible part; any pixel that still falls
//! outside the buffer is skipped.

use crate::color::Color;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::render::clipper;
use crate::render::framebuffer::FrameBuffer;
use crate::render::geometry::{ndc_to_raster, perspective_divide};

/// Draws a line between two NDC points.
///
/// The segment is first clipped to the `[-1, 1]` viewport square, then its
/// endpoints map to raster space with
/// `round((ndc.xy + 1) * resolution / 2)`. Non-finite endpoints draw
/// nothing. Returns the number of pixels written.
pub fn draw_line(p0: Vec3, p1: Vec3, color: Color, buffer: &mut FrameBuffer) -> usize {
    if !p0.is_finite() || !p1.is_finite() {
        log::trace!("line skipped: non-finite endpoint");
        return 0;
    }

    // z = 0 sits inside the depth range, so only x and y get clipped.
    let Some((a, b)) = clipper::clip_segment(
        Vec4::new(p0.x, p0.y, 0.0, 1.0),
        Vec4::new(p1.x, p1.y, 0.0, 1.0),
    ) else {
        return 0;
    };

    let (width, height) = buffer.resolution();
    draw_line_raster(
        ndc_to_raster(a.xyz(), width, height),
        ndc_to_raster(b.xyz(), width, height),
        color,
        buffer,
    )
}

/// Draws a line between two raster coordinates, both endpoints included.
///
/// Bresenham's algorithm tracks an integer error term: for each step it
/// decides whether to move along x, along y, or both (a diagonal step).
/// The result is an 8-connected line with no gaps.
///
/// No geometric clipping happens here: the walk visits every step between
/// the endpoints and skips the ones outside the buffer. A segment whose
/// bounding box misses the buffer returns immediately.
pub fn draw_line_raster(
    p0: (i32, i32),
    p1: (i32, i32),
    color: Color,
    buffer: &mut FrameBuffer,
) -> usize {
    let (x0, y0) = p0;
    let (x1, y1) = p1;

    let (width, height) = buffer.resolution();
    if x0.max(x1) < 0
        || y0.max(y1) < 0
        || i64::from(x0.min(x1)) >= i64::from(width)
        || i64::from(y0.min(y1)) >= i64::from(height)
    {
        return 0;
    }

    // i64 so extreme endpoints cannot overflow the deltas or the error term
    let dx = (i64::from(x1) - i64::from(x0)).abs();
    let dy = (i64::from(y1) - i64::from(y0)).abs();

    // +1 or -1 depending on direction, so every octant works
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };

    // Positive error favors x movement, negative favors y.
    let mut err = dx - dy;

    // x and y never step past x1 and y1, so they stay in i32.
    let mut x = x0;
    let mut y = y0;
    let mut written = 0;

    loop {
        if buffer.contains(x, y) {
            buffer.set_pixel(x, y, color);
            written += 1;
        }

        if x == x1 && y == y1 {
            break;
        }

        // Doubled to stay in integers
        let e2 = 2 * err;

        if e2 > -dy {
            err -= dy;
            x += sx;
        }

        // Both branches may fire, giving a diagonal step.
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }

    written
}

/// Draws the outline of a clip-space triangle.
///
/// Each edge is clipped to the clip volume before the perspective divide,
/// so vertices behind the eye or with a vanishing `w` only shorten the
/// edges that touch them. A triangle with a non-finite vertex is skipped.
pub fn draw_wireframe(clip: [Vec4; 3], color: Color, buffer: &mut FrameBuffer) -> usize {
    if clip.iter().any(|v| !v.is_finite()) {
        log::trace!("wireframe skipped: non-finite vertex");
        return 0;
    }

    let [a, b, c] = clip;
    [(a, b), (b, c), (c, a)]
        .into_iter()
        .filter_map(|(p, q)| clipper::clip_segment(p, q))
        .filter(|(p, q)| p.w > 0.0 && q.w > 0.0)
        .map(|(p, q)| {
            draw_line(
                perspective_divide(p).xyz(),
                perspective_divide(q).xyz(),
                color,
                buffer,
            )
        })
        .sum()
}
