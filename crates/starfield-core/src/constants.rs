use crate::scene::LayerParams;

// Shared scene and motion tuning constants used by both web and native frontends.

// Point cloud
pub const PARTICLE_COUNT: usize = 20_000;
pub const PARTICLE_SPREAD: f32 = 2000.0; // full width of the cube, centered on the origin

// Layers, brightest and largest first. Hue seeds descend so the shells keep a
// fixed spacing around the color wheel while the whole palette drifts.
pub const LAYER_PARAMS: [LayerParams; 5] = [
    LayerParams::new(1.00, 1.0, 0.5, 5.0),
    LayerParams::new(0.95, 1.0, 0.5, 4.0),
    LayerParams::new(0.90, 1.0, 0.5, 3.0),
    LayerParams::new(0.85, 1.0, 0.5, 2.0),
    LayerParams::new(0.80, 1.0, 0.5, 1.0),
];

// Upper bound (radians) of the random static tilt given to each layer
pub const MAX_INITIAL_ROTATION: f64 = 6.0;

// Layers below this index spin forward, the rest spin backward
pub const FORWARD_SPIN_LAYERS: usize = 4;

// Camera
pub const FOV_Y_DEGREES: f32 = 75.0;
pub const NEAR_PLANE: f32 = 1.0;
pub const FAR_PLANE: f32 = 3000.0;
pub const CAMERA_Z: f32 = FAR_PLANE / 3.0;

// Fraction of the remaining distance to the pointer target covered per frame
pub const CAMERA_EASING: f32 = 0.05;

// Background and exponential-squared fog share one color so distant points
// fade out instead of popping.
pub const BACKGROUND_RGB: [f32; 3] = [0.0, 0.0, 0.0];
pub const FOG_DENSITY: f32 = 0.0007;

// Animation phase per wall-clock millisecond
pub const PHASE_PER_MS: f64 = 0.000_05;
