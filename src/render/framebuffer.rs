//! Color and depth planes for software rendering.
//!
//! The color plane and the depth plane always have `width * height` cells
//! and are indexed identically, row-major by `y * width + x`, with the
//! origin at the **bottom-left** corner (window space, y up).
//!
//! Depth is stored in `[0, 1]` with 0 at the near plane. The depth test is
//! strict "nearer wins": a fragment is kept only if its depth is less than
//! the stored value, so equal depths keep the earlier write.

use std::path::Path;

use crate::color::Color;
use crate::config::RenderConfig;
use crate::error::Result;

/// Depth a freshly cleared buffer holds (the far plane).
pub const FAR_DEPTH: f32 = 1.0;

/// An owning pair of color and depth planes.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    color: Vec<Color>,
    depth: Vec<f32>,
    width: u32,
    height: u32,
    output_width: u32,
    output_height: u32,
}

impl FrameBuffer {
    /// Creates a buffer cleared to black with depth at [`FAR_DEPTH`].
    ///
    /// # Panics
    /// Panics if the allocation fails; there is no partial buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_output(width, height, width, height)
    }

    /// Creates a buffer that records a separate presentation resolution.
    ///
    /// The output resolution is never used by rasterization; it is carried
    /// for whoever blits the color plane to the screen.
    pub fn with_output(width: u32, height: u32, output_width: u32, output_height: u32) -> Self {
        let size = width as usize * height as usize;
        log::debug!(
            "framebuffer {width}x{height} (output {output_width}x{output_height}), {size} cells"
        );
        Self {
            color: vec![Color::BLACK; size],
            depth: vec![FAR_DEPTH; size],
            width,
            height,
            output_width,
            output_height,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        let (output_width, output_height) = config.output_resolution();
        let mut fb = Self::with_output(config.width, config.height, output_width, output_height);
        fb.clear(config.clear_color);
        fb
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Logical resolution `(width, height)`.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Presentation resolution `(width, height)`.
    pub fn output_resolution(&self) -> (u32, u32) {
        (self.output_width, self.output_height)
    }

    /// Sets every pixel to `color`.
    pub fn clear(&mut self, color: Color) {
        self.color.fill(color);
    }

    /// Sets every depth cell to `value` (normally [`FAR_DEPTH`]).
    pub fn clear_depth(&mut self, value: f32) {
        self.depth.fill(value);
    }

    /// Whether `(x, y)` addresses a cell of this buffer.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        assert!(
            self.contains(x, y),
            "pixel ({x}, {y}) outside {}x{} buffer",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    /// Writes a color without any depth test.
    ///
    /// No clipping is done here: callers clip first.
    ///
    /// # Panics
    /// Panics if `(x, y)` is outside the buffer (see [`contains`](Self::contains)).
    /// This holds for every accessor taking coordinates, so the color and
    /// depth planes can never be written out of step.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        let idx = self.index(x, y);
        self.color[idx] = color;
    }

    /// Writes a depth value without any test. Same contract as [`set_pixel`](Self::set_pixel).
    #[inline]
    pub fn set_depth(&mut self, x: i32, y: i32, depth: f32) {
        let idx = self.index(x, y);
        self.depth[idx] = depth;
    }

    /// Reads the stored depth at `(x, y)`.
    #[inline]
    pub fn depth(&self, x: i32, y: i32) -> f32 {
        self.depth[self.index(x, y)]
    }

    /// Reads the stored color at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Color {
        self.color[self.index(x, y)]
    }

    /// Depth-tested write of a fragment.
    ///
    /// If `depth` is strictly less than the stored depth, both the color
    /// and the depth are written and `true` is returned. Otherwise the
    /// fragment is discarded. Color and depth are never written apart.
    #[inline]
    pub fn test_and_set(&mut self, x: i32, y: i32, depth: f32, color: Color) -> bool {
        let idx = self.index(x, y);
        if depth < self.depth[idx] {
            self.depth[idx] = depth;
            self.color[idx] = color;
            true
        } else {
            false
        }
    }

    /// The color plane, row-major, bottom row first.
    pub fn pixels(&self) -> &[Color] {
        &self.color
    }

    /// The depth plane, laid out like [`pixels`](Self::pixels).
    pub fn depths(&self) -> &[f32] {
        &self.depth
    }

    /// Packs the color plane into ARGB8888, top row first, ready to upload
    /// into a streaming texture.
    pub fn to_argb(&self) -> Vec<u32> {
        self.rows_top_down()
            .flat_map(|row| row.iter().map(|c| c.to_argb()))
            .collect()
    }

    /// Writes the color plane as an upright PNG image.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes: Vec<u8> = self
            .rows_top_down()
            .flat_map(|row| row.iter().flat_map(|c| <[u8; 3]>::from(*c)))
            .collect();
        image::save_buffer(
            path.as_ref(),
            &bytes,
            self.width,
            self.height,
            image::ExtendedColorType::Rgb8,
        )?;
        log::debug!("saved {}x{} frame to {}", self.width, self.height, path.as_ref().display());
        Ok(())
    }

    fn rows_top_down(&self) -> impl Iterator<Item = &[Color]> {
        // chunks_exact panics on a zero chunk size
        self.color
            .chunks_exact(self.width.max(1) as usize)
            .rev()
    }
}
