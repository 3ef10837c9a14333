use crate::camera::Camera;
use crate::constants::{CAMERA_EASING, FORWARD_SPIN_LAYERS, PHASE_PER_MS};
use crate::scene::StarScene;
use glam::{Vec2, Vec3};

/// Slow animation phase derived from wall-clock milliseconds. Never wrapped.
#[inline]
pub fn phase(timestamp_ms: f64) -> f64 {
    timestamp_ms * PHASE_PER_MS
}

/// Y-spin multiplier for layer `index`: `1, 2, 3, 4` for the first four
/// layers, then `-(index + 1)` so the outer shells counter-rotate.
#[inline]
pub fn spin_rate(index: usize) -> f64 {
    let magnitude = (index + 1) as f64;
    if index < FORWARD_SPIN_LAYERS {
        magnitude
    } else {
        -magnitude
    }
}

/// Hue in turns (`[0, 1)`) for a layer seeded at `hue_seed` at phase `t`.
///
/// Computed in degrees and wrapped at 360 so every layer drifts at the same
/// rate while keeping its offset from the others.
#[inline]
pub fn layer_hue(hue_seed: f32, t: f64) -> f64 {
    (360.0 * (hue_seed as f64 + t)).rem_euclid(360.0) / 360.0
}

/// Camera target for a pointer offset. Screen Y grows downward, world Y up.
#[inline]
pub fn camera_target(pointer_offset: Vec2) -> Vec2 {
    Vec2::new(pointer_offset.x, -pointer_offset.y)
}

/// Advance camera, layer rotations and layer colors to `timestamp_ms`.
///
/// Pure in wall-clock time and pointer offset: calling it twice with the same
/// inputs only differs in the camera, which eases once per call. The easing
/// step is per frame, not per second, so convergence speed follows the
/// display refresh rate.
pub fn advance(scene: &mut StarScene, camera: &mut Camera, pointer_offset: Vec2, timestamp_ms: f64) {
    let t = phase(timestamp_ms);

    camera.ease_toward(camera_target(pointer_offset), CAMERA_EASING);
    camera.look_at(Vec3::ZERO);

    for (i, layer) in scene.layers_mut().iter_mut().enumerate() {
        layer.rotation.y = t * spin_rate(i);
        let h = layer_hue(layer.params.hue_seed, t) as f32;
        layer
            .color
            .set_hsl(h, layer.params.saturation, layer.params.lightness);
    }
}
