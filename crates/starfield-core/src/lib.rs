pub mod camera;
pub mod color;
pub mod constants;
pub mod error;
pub mod frame;
pub mod input;
pub mod lifecycle;
pub mod render;
pub mod scene;
pub mod viewport;

pub use camera::Camera;
pub use color::Color;
pub use error::StarfieldError;
pub use input::InputTracker;
pub use lifecycle::{CancelToken, StarField};
pub use render::SceneRenderer;
pub use scene::{
    point_size_px, FogExp2, Layer, LayerParams, ParticleField, SceneBuilder, SceneParams, StarScene,
};
pub use viewport::Viewport;
