//! Perspective camera state shared by the frame updater and the renderers.
//!
//! The camera avoids any platform-specific API. Renderers read the view and
//! projection matrices; the frame updater moves the eye and re-aims it.

use crate::constants::{CAMERA_Z, FAR_PLANE, FOV_Y_DEGREES, NEAR_PLANE};
use crate::Viewport;
use glam::{Mat4, Vec2, Vec3};

/// Right-handed camera with a cached perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    projection: Mat4,
}

impl Camera {
    pub fn new(aspect: f32, fovy_radians: f32, znear: f32, zfar: f32) -> Self {
        let mut camera = Self {
            eye: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians,
            znear,
            zfar,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    /// The star field camera: 75° vertical fov, planes 1..3000, sitting on the
    /// Z axis at a third of the far plane and looking at the origin.
    pub fn for_viewport(viewport: Viewport) -> Self {
        let mut camera = Self::new(
            viewport.aspect(),
            FOV_Y_DEGREES.to_radians(),
            NEAR_PLANE,
            FAR_PLANE,
        );
        camera.eye = Vec3::new(0.0, 0.0, CAMERA_Z);
        camera.look_at(Vec3::ZERO);
        camera
    }

    /// Re-derive the cached projection after changing fov, aspect or planes.
    pub fn update_projection(&mut self) {
        self.projection = Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar);
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection();
    }

    #[inline]
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Move the eye's X/Y a fixed fraction of the way toward `target`.
    /// Z is left alone.
    pub fn ease_toward(&mut self, target: Vec2, factor: f32) {
        self.eye.x += (target.x - self.eye.x) * factor;
        self.eye.y += (target.y - self.eye.y) * factor;
    }

    /// Clip-space projection matrix (depth range 0..1).
    #[inline]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// View matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}
