//! Perspective camera
//!
//! # Coordinate System
//!
//! Uses a **right-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive toward the viewer (the camera looks down -Z)
//!
//! # Matrices
//!
//! The camera caches three matrices and keeps them consistent:
//!
//! ```text
//! world_to_clip = camera_to_clip * world_to_camera
//! ```
//!
//! Every mutator recomposes `world_to_clip`, so readers never observe a
//! stale product. Accessors are plain reads.
//!
//! Clip-space depth lands in `[0, 1]` after the divide (near = 0, far = 1).

use crate::config::RenderConfig;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    eye: Vec3,
    world_to_camera: Mat4,
    camera_to_clip: Mat4,
    world_to_clip: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Creates a camera at the origin with identity view and projection.
    pub fn new() -> Self {
        Self {
            eye: Vec3::ZERO,
            world_to_camera: Mat4::identity(),
            camera_to_clip: Mat4::identity(),
            world_to_clip: Mat4::identity(),
        }
    }

    /// Creates a camera using the projection parameters of `config`.
    pub fn from_config(config: &RenderConfig) -> Self {
        let mut camera = Self::new();
        camera.perspective(
            config.fov_y,
            config.aspect_ratio(),
            config.z_near,
            config.z_far,
        );
        camera
    }

    /// Creates a camera at `eye` looking toward `target`, keeping the
    /// projection of `config`.
    pub fn looking_at(config: &RenderConfig, eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let mut camera = Self::from_config(config);
        camera.look_at(eye, target, up);
        camera
    }

    /// Points the camera from `eye` at `target`.
    ///
    /// `target == eye` or `up` parallel to the view direction leave the
    /// matrices full of NaN. That precondition is not checked.
    pub fn look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        let forward = (target - eye).normalize();
        self.orient(eye, forward, up);
    }

    /// Places the camera at `eye` looking along `forward` (normalized).
    pub fn orient(&mut self, eye: Vec3, forward: Vec3, up: Vec3) {
        self.eye = eye;
        self.world_to_camera = Mat4::orient_rh(eye, forward, up);
        self.recompose();
        log::trace!("camera oriented at {:?} along {:?}", eye, forward);
    }

    /// Sets a right-handed perspective projection with `[0, 1]` depth.
    ///
    /// `z_near == z_far` yields non-finite matrices; use
    /// [`RenderConfig::validate`] to catch that ahead of time.
    pub fn perspective(&mut self, fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) {
        self.camera_to_clip = Mat4::perspective_rh(fov_y, aspect_ratio, z_near, z_far);
        self.recompose();
        log::debug!(
            "camera projection: fov_y={fov_y} aspect={aspect_ratio} near={z_near} far={z_far}"
        );
    }

    fn recompose(&mut self) {
        self.world_to_clip = self.camera_to_clip * self.world_to_camera;
    }

    /// Returns the camera's world position.
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn world_to_camera(&self) -> &Mat4 {
        &self.world_to_camera
    }

    pub fn camera_to_clip(&self) -> &Mat4 {
        &self.camera_to_clip
    }

    pub fn world_to_clip(&self) -> &Mat4 {
        &self.world_to_clip
    }
}
