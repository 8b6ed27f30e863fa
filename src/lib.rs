//! A CPU triangle and line rasterizer.
//!
//! Geometry goes in as homogeneous clip-space vertices and comes out as
//! depth-tested pixels in a [`FrameBuffer`]. No GPU and no window are
//! involved; presenting the finished frame is up to the caller.
//!
//! # Quick Start
//!
//! ```ignore
//! use rasterry::prelude::*;
//!
//! let mut renderer = Renderer::new(RenderConfig::new(320, 240))?;
//! renderer.camera_mut().look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
//! renderer.begin_frame();
//! renderer.draw_mesh(&Mesh::cube(), &Mat4::identity(), Color::RED);
//! renderer.frame_buffer().save_png("frame.png")?;
//! ```

pub mod camera;
pub mod color;
pub mod config;
pub mod error;
pub mod math;
pub mod mesh;
pub mod render;

// Re-export commonly needed types at crate root for convenience
pub use camera::Camera;
pub use color::Color;
pub use config::RenderConfig;
pub use error::{Error, Result};
pub use mesh::{Face, Mesh};
pub use render::{EdgeFunctionRasterizer, FrameBuffer, Renderer};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use rasterry::prelude::*;
/// ```
pub mod prelude {
    pub use crate::camera::Camera;
    pub use crate::color::Color;
    pub use crate::config::RenderConfig;
    pub use crate::error::{Error, Result};

    // Math
    pub use crate::math::{Mat4, Vec2, Vec3, Vec4};

    // Geometry
    pub use crate::mesh::{Face, Mesh};

    // Rendering
    pub use crate::render::{
        draw_line, draw_line_raster, draw_wireframe, EdgeFunctionRasterizer, FlatShader,
        Fragment, FragmentShader, FrameBuffer, FrameStats, Renderer, FAR_DEPTH,
    };
}
