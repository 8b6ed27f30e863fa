//! Frame driver.
//!
//! [`Renderer`] owns the frame buffer, the camera and the rasterizer, and
//! runs the per-vertex stage: object space to clip space with
//! `world_to_clip * model_to_world * vertex`. Everything after that is the
//! rasterizer's job.

use super::framebuffer::{FrameBuffer, FAR_DEPTH};
use super::rasterizer::{draw_wireframe, EdgeFunctionRasterizer};
use crate::camera::Camera;
use crate::color::Color;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::math::mat4::Mat4;
use crate::math::vec4::Vec4;
use crate::mesh::Mesh;

/// Counters for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Triangles handed to the rasterizer.
    pub triangles: usize,
    /// Fragments that passed the depth test, or line pixels written.
    pub pixels: usize,
}

pub struct Renderer {
    config: RenderConfig,
    frame_buffer: FrameBuffer,
    camera: Camera,
    rasterizer: EdgeFunctionRasterizer,
    stats: FrameStats,
}

impl Renderer {
    /// Validates `config` and builds the buffer, camera and rasterizer from it.
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        log::debug!("renderer {}x{}", config.width, config.height);
        Ok(Self {
            frame_buffer: FrameBuffer::from_config(&config),
            camera: Camera::from_config(&config),
            rasterizer: EdgeFunctionRasterizer::from_config(&config),
            config,
            stats: FrameStats::default(),
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    /// Counters accumulated since the last [`begin_frame`](Self::begin_frame).
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Clears color to the configured clear color and depth to the far plane.
    pub fn begin_frame(&mut self) {
        self.frame_buffer.clear(self.config.clear_color);
        self.frame_buffer.clear_depth(FAR_DEPTH);
        self.stats = FrameStats::default();
    }

    /// Logs the frame counters and returns them.
    pub fn end_frame(&self) -> FrameStats {
        log::debug!(
            "frame done: {} triangles, {} pixels",
            self.stats.triangles,
            self.stats.pixels
        );
        self.stats
    }

    /// Transforms every face of `mesh` to clip space.
    fn clip_triangles<'a>(
        &self,
        mesh: &'a Mesh,
        model_to_world: &Mat4,
    ) -> impl Iterator<Item = [Vec4; 3]> + 'a {
        let model_to_clip = *self.camera.world_to_clip() * *model_to_world;
        mesh.triangles()
            .map(move |tri| tri.map(|p| model_to_clip * Vec4::from(p)))
    }

    /// Draws `mesh` filled with a solid color, depth tested.
    pub fn draw_mesh(&mut self, mesh: &Mesh, model_to_world: &Mat4, color: Color) -> FrameStats {
        let mut drawn = FrameStats::default();
        for clip in self.clip_triangles(mesh, model_to_world) {
            drawn.triangles += 1;
            drawn.pixels += self.rasterizer.draw_tri(clip, color, &mut self.frame_buffer);
        }
        self.record(drawn)
    }

    /// Draws the edges of every face of `mesh`, without depth testing.
    pub fn draw_mesh_wireframe(
        &mut self,
        mesh: &Mesh,
        model_to_world: &Mat4,
        color: Color,
    ) -> FrameStats {
        let mut drawn = FrameStats::default();
        for clip in self.clip_triangles(mesh, model_to_world) {
            drawn.triangles += 1;
            drawn.pixels += draw_wireframe(clip, color, &mut self.frame_buffer);
        }
        self.record(drawn)
    }

    fn record(&mut self, drawn: FrameStats) -> FrameStats {
        self.stats.triangles += drawn.triangles;
        self.stats.pixels += drawn.pixels;
        drawn
    }
}
