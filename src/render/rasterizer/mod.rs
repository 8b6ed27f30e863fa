//! Triangle and line rasterization.
//!
//! - [`EdgeFunctionRasterizer`]: clip-space triangles, top-left fill rule,
//!   perspective-correct weights and depth testing
//! - [`draw_line`] / [`draw_line_raster`]: Bresenham lines without depth
//! - [`draw_wireframe`]: triangle outlines built from lines

mod edgefunction;
mod line;
mod shader;

pub use edgefunction::EdgeFunctionRasterizer;
pub use line::{draw_line, draw_line_raster, draw_wireframe};
pub use shader::{FlatShader, Fragment, FragmentShader};
