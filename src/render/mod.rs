//! The rasterization pipeline.
//!
//! - [`FrameBuffer`]: color and depth planes
//! - [`geometry`]: edge functions, fill rule, viewport mapping
//! - [`clipper`]: near-plane clipping in clip space
//! - [`rasterizer`]: triangle and line drawing
//! - [`Renderer`]: per-frame driver for meshes

pub mod clipper;
pub mod framebuffer;
pub mod geometry;
pub mod rasterizer;
pub mod renderer;

pub use framebuffer::{FrameBuffer, FAR_DEPTH};
pub use rasterizer::{
    draw_line, draw_line_raster, draw_wireframe, EdgeFunctionRasterizer, FlatShader, Fragment,
    FragmentShader,
};
pub use renderer::{FrameStats, Renderer};
