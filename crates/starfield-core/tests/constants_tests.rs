// Host-side tests for constants and their relationships.

use starfield_core::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_constants_are_consistent() {
    assert_eq!(CAMERA_Z, FAR_PLANE / 3.0);
    assert_eq!(CAMERA_Z, 1000.0);
    assert!(NEAR_PLANE > 0.0 && NEAR_PLANE < CAMERA_Z);
    assert!(FOV_Y_DEGREES > 0.0 && FOV_Y_DEGREES < 180.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn particle_cube_fits_inside_the_far_plane() {
    // The farthest corner seen from the camera must stay inside the frustum depth
    let half = PARTICLE_SPREAD / 2.0;
    let farthest = ((CAMERA_Z + half).powi(2) + 2.0 * half * half).sqrt();
    assert!(farthest < FAR_PLANE);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn easing_is_a_fraction() {
    assert!(CAMERA_EASING > 0.0 && CAMERA_EASING < 1.0);
}

#[test]
fn layer_table_descends_in_hue_and_size() {
    for pair in LAYER_PARAMS.windows(2) {
        assert!(pair[0].hue_seed > pair[1].hue_seed);
        assert!(pair[0].point_size > pair[1].point_size);
    }
    for p in LAYER_PARAMS {
        assert_eq!(p.saturation, 1.0);
        assert_eq!(p.lightness, 0.5);
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn counter_rotation_starts_inside_the_layer_table() {
    assert!(FORWARD_SPIN_LAYERS < LAYER_PARAMS.len());
}
