//! Render configuration.
//!
//! [`RenderConfig`] is the single source of truth for resolution and
//! projection parameters. It is passed explicitly into
//! [`FrameBuffer`](crate::render::FrameBuffer),
//! [`Camera`](crate::camera::Camera) and the rasterizer instead of living
//! in process-wide constants.

use crate::color::Color;
use crate::error::{Error, Result};

/// Resolution, projection and clear parameters for a render session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Logical framebuffer width in pixels.
    pub width: u32,
    /// Logical framebuffer height in pixels.
    pub height: u32,
    /// Integer upscale applied by the presentation layer.
    pub output_scale: u32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Near clipping plane distance (must be > 0).
    pub z_near: f32,
    /// Far clipping plane distance (must be > z_near).
    pub z_far: f32,
    pub clear_color: Color,
    /// Clip triangles against the near plane instead of only rejecting
    /// triangles that are entirely behind it.
    pub near_clipping: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            output_scale: 2,
            fov_y: 60.0_f32.to_radians(),
            z_near: 0.1,
            z_far: 100.0,
            clear_color: Color::BLACK,
            near_clipping: true,
        }
    }
}

impl RenderConfig {
    /// Creates a config with the given resolution and default projection.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Sets the vertical field of view from degrees.
    pub fn with_fov_degrees(mut self, fov_y_degrees: f32) -> Self {
        self.fov_y = fov_y_degrees.to_radians();
        self
    }

    pub fn with_depth_range(mut self, z_near: f32, z_far: f32) -> Self {
        self.z_near = z_near;
        self.z_far = z_far;
        self
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_output_scale(mut self, scale: u32) -> Self {
        self.output_scale = scale;
        self
    }

    pub fn with_near_clipping(mut self, enabled: bool) -> Self {
        self.near_clipping = enabled;
        self
    }

    /// Returns the aspect ratio (width / height).
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Resolution the presentation layer blits to.
    pub fn output_resolution(&self) -> (u32, u32) {
        (self.width * self.output_scale, self.height * self.output_scale)
    }

    /// Checks every field against the ranges the pipeline relies on.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "resolution must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.output_scale == 0 {
            return Err(Error::InvalidConfig("output scale must be at least 1".into()));
        }
        if !self.fov_y.is_finite() || self.fov_y <= 0.0 || self.fov_y >= std::f32::consts::PI {
            return Err(Error::InvalidConfig(format!(
                "fov_y must be in (0, pi), got {}",
                self.fov_y
            )));
        }
        if !self.z_near.is_finite() || self.z_near <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "z_near must be positive, got {}",
                self.z_near
            )));
        }
        if !self.z_far.is_finite() || self.z_far <= self.z_near {
            return Err(Error::InvalidConfig(format!(
                "z_far must be greater than z_near ({}), got {}",
                self.z_near, self.z_far
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn default_config_is_valid() {
        assert!(RenderConfig::default().validate().is_ok());
    }

    #[test]
    fn from_degrees_converts_correctly() {
        let config = RenderConfig::new(4, 4).with_fov_degrees(45.0);
        assert_relative_eq!(config.fov_y, FRAC_PI_4, epsilon = 1e-6);
    }

    #[test]
    fn output_resolution_applies_scale() {
        let config = RenderConfig::new(640, 480).with_output_scale(2);
        assert_eq!(config.output_resolution(), (1280, 960));
        assert_relative_eq!(config.aspect_ratio(), 4.0 / 3.0, epsilon = 1e-6);
    }

    #[test]
    fn rejects_zero_resolution() {
        let err = RenderConfig::new(0, 10).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn rejects_inverted_depth_range() {
        let config = RenderConfig::default().with_depth_range(10.0, 1.0);
        assert!(config.validate().is_err());

        let config = RenderConfig::default().with_depth_range(1.0, 1.0);
        assert!(config.validate().is_err());

        let config = RenderConfig::default().with_depth_range(0.0, 1.0);
        assert!(config.validate().is_err());
    }
}
