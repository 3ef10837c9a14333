use crate::camera::Camera;
use crate::scene::StarScene;
use crate::Viewport;

/// The rendering engine as seen from the core: something that can draw a
/// scene through a camera and follow the viewport size.
pub trait SceneRenderer {
    type Error;

    /// Match the render surface to a new viewport size.
    fn resize(&mut self, viewport: Viewport);

    /// Draw one frame of `scene` as seen by `camera`.
    fn render(&mut self, scene: &StarScene, camera: &Camera) -> Result<(), Self::Error>;
}
