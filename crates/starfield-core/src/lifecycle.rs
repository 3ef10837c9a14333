//! The star field as one owning object with explicit `create` / `update` /
//! `dispose` calls for the host front-end to drive.

use crate::camera::Camera;
use crate::frame;
use crate::input::InputTracker;
use crate::render::SceneRenderer;
use crate::scene::{SceneBuilder, SceneParams, StarScene};
use crate::{StarfieldError, Viewport};
use glam::Vec2;
use rand::Rng;
use std::cell::Cell;
use std::rc::Rc;

/// Cooperative stop flag shared between the owner and its animation loop.
/// Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn cancel(&self) {
        self.0.set(true);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

pub struct StarField {
    scene: StarScene,
    camera: Camera,
    input: InputTracker,
    viewport: Viewport,
    cancel: CancelToken,
}

impl StarField {
    /// Build the scene for a measured mount surface of `width` x `height`.
    ///
    /// Fails fast on a zero or unmeasurable size instead of producing a
    /// degenerate camera aspect.
    pub fn create(width: f32, height: f32) -> Result<Self, StarfieldError> {
        let viewport = Viewport::new(width, height)?;
        Ok(Self::with_rng(
            viewport,
            SceneParams::default(),
            &mut rand::thread_rng(),
        ))
    }

    pub fn with_rng<R: Rng>(viewport: Viewport, params: SceneParams, rng: &mut R) -> Self {
        let scene = SceneBuilder::new(params).build(rng);
        Self {
            scene,
            camera: Camera::for_viewport(viewport),
            input: InputTracker::new(viewport),
            viewport,
            cancel: CancelToken::new(),
        }
    }

    #[inline]
    pub fn scene(&self) -> &StarScene {
        &self.scene
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn input(&self) -> &InputTracker {
        &self.input
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Token the animation loop checks before scheduling each frame.
    #[inline]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    #[inline]
    pub fn pointer_move(&mut self, client: Vec2) {
        self.input.pointer_move(client);
    }

    /// See [`InputTracker::touch`]; `true` means suppress the default action.
    #[inline]
    pub fn touch(&mut self, points: &[Vec2]) -> bool {
        self.input.touch(points)
    }

    /// Recompute half extents, camera aspect and projection, and the render
    /// surface size together from the live `viewport`.
    pub fn resize<R: SceneRenderer>(&mut self, viewport: Viewport, renderer: &mut R) {
        self.viewport = viewport;
        self.input.resize(viewport);
        self.camera.set_aspect(viewport.aspect());
        renderer.resize(viewport);
        log::debug!(
            "[starfield] resized to {}x{}",
            viewport.width(),
            viewport.height()
        );
    }

    /// Advance camera, rotations and colors to `timestamp_ms` (wall clock).
    #[inline]
    pub fn update(&mut self, timestamp_ms: f64) {
        frame::advance(
            &mut self.scene,
            &mut self.camera,
            self.input.offset(),
            timestamp_ms,
        );
    }

    /// One animation tick: update, then render once.
    pub fn frame<R: SceneRenderer>(
        &mut self,
        timestamp_ms: f64,
        renderer: &mut R,
    ) -> Result<(), R::Error> {
        self.update(timestamp_ms);
        renderer.render(&self.scene, &self.camera)
    }

    /// Stop the animation loop at its next check. Releasing the surface and
    /// detaching listeners is up to the front-end that created them.
    pub fn dispose(&self) {
        if !self.cancel.is_cancelled() {
            log::info!("[starfield] disposed");
        }
        self.cancel.cancel();
    }
}
