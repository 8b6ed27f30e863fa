//! Fragment shaders for triangle rasterization.
//!
//! The rasterizer handles:
//! - Trivial reject and near-plane clipping
//! - Bounding box and edge function coverage
//! - Barycentric and perspective-correct weights
//! - The depth test
//!
//! The shader only turns a covered, interpolated sample into a color. It
//! runs after an early depth test against the value stored at that moment.

use crate::color::Color;
use crate::math::vec3::Vec3;

/// A covered sample handed to a [`FragmentShader`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fragment {
    /// Pixel column.
    pub x: i32,
    /// Pixel row, counted from the bottom.
    pub y: i32,
    /// Depth in `[0, 1]`, interpolated linearly in screen space.
    pub depth: f32,
    /// Screen-space barycentric weights of the source triangle's vertices.
    pub screen_bary: Vec3,
    /// Perspective-correct barycentric weights of the source triangle's
    /// vertices. Use these for every attribute except depth.
    pub bary: Vec3,
}

impl Fragment {
    /// Perspective-correct interpolation of a per-vertex scalar.
    #[inline]
    pub fn interpolate(&self, values: [f32; 3]) -> f32 {
        self.bary.x * values[0] + self.bary.y * values[1] + self.bary.z * values[2]
    }
}

/// Trait for per-fragment shading computations.
///
/// Any `Fn(&Fragment) -> Color` closure is a shader.
pub trait FragmentShader {
    fn shade(&self, fragment: &Fragment) -> Color;
}

/// Flat shader - returns a constant color for all fragments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlatShader {
    color: Color,
}

impl FlatShader {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl FragmentShader for FlatShader {
    #[inline]
    fn shade(&self, _fragment: &Fragment) -> Color {
        self.color
    }
}

impl<F> FragmentShader for F
where
    F: Fn(&Fragment) -> Color,
{
    #[inline]
    fn shade(&self, fragment: &Fragment) -> Color {
        self(fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(bary: Vec3) -> Fragment {
        Fragment {
            x: 0,
            y: 0,
            depth: 0.5,
            screen_bary: bary,
            bary,
        }
    }

    #[test]
    fn flat_shader_ignores_weights() {
        let shader = FlatShader::new(Color::GREEN);
        assert_eq!(shader.shade(&fragment(Vec3::X)), Color::GREEN);
        assert_eq!(shader.shade(&fragment(Vec3::Z)), Color::GREEN);
    }

    #[test]
    fn closures_are_shaders() {
        let shader = |f: &Fragment| Color::gray((f.interpolate([0.0, 100.0, 200.0])) as u8);
        assert_eq!(shader.shade(&fragment(Vec3::new(0.0, 0.5, 0.5))), Color::gray(150));
    }
}
