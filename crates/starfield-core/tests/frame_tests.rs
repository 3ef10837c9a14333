// Host-side tests for the per-frame update: phase, spin, hue cycling, camera easing.

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use starfield_core::constants::*;
use starfield_core::frame::*;
use starfield_core::*;

fn scene_and_camera(layers: Vec<LayerParams>) -> (StarScene, Camera) {
    let params = SceneParams {
        particle_count: 32,
        layers,
        ..SceneParams::default()
    };
    let scene = SceneBuilder::new(params).build(&mut StdRng::seed_from_u64(17));
    let camera = Camera::for_viewport(Viewport::new(800.0, 600.0).unwrap());
    (scene, camera)
}

#[test]
fn phase_scales_milliseconds() {
    assert_eq!(phase(0.0), 0.0);
    assert!((phase(20_000.0) - 1.0).abs() < 1e-12);
    // Wall-clock timestamps are large; the phase is not wrapped
    let t = phase(1.7e12);
    assert!((t - 8.5e7).abs() < 1e-3);
}

#[test]
fn spin_rate_forward_then_backward() {
    assert_eq!(spin_rate(0), 1.0);
    assert_eq!(spin_rate(1), 2.0);
    assert_eq!(spin_rate(2), 3.0);
    assert_eq!(spin_rate(3), 4.0);
    assert_eq!(spin_rate(4), -5.0);
    assert_eq!(spin_rate(5), -6.0);
    assert_eq!(spin_rate(9), -10.0);
}

#[test]
fn hue_at_phase_zero_is_seed_mod_one() {
    for params in LAYER_PARAMS {
        let expected = (params.hue_seed as f64).rem_euclid(1.0);
        let got = layer_hue(params.hue_seed, 0.0);
        assert!((got - expected).abs() < 1e-9, "seed {} -> {}", params.hue_seed, got);
    }
    // Seed 1.0 wraps to red
    assert_eq!(layer_hue(1.0, 0.0), 0.0);
}

#[test]
fn hue_is_periodic_in_phase() {
    for params in LAYER_PARAMS {
        for t in [0.0, 0.3, 12.25] {
            let a = layer_hue(params.hue_seed, t);
            let b = layer_hue(params.hue_seed, t + 1.0);
            assert!((a - b).abs() < 1e-6, "seed {} t {}: {} vs {}", params.hue_seed, t, a, b);
        }
    }
}

#[test]
fn hue_stays_in_unit_range() {
    for i in 0..1000 {
        let t = i as f64 * 0.0137;
        let h = layer_hue(0.85, t);
        assert!((0.0..1.0).contains(&h));
    }
}

#[test]
fn advance_sets_colors_from_hsl_at_phase_zero() {
    let (mut scene, mut camera) = scene_and_camera(LAYER_PARAMS.to_vec());
    advance(&mut scene, &mut camera, Vec2::ZERO, 0.0);
    for layer in scene.layers() {
        let p = layer.params;
        let expected = Color::from_hsl(p.hue_seed.rem_euclid(1.0), p.saturation, p.lightness);
        assert!((layer.color.r - expected.r).abs() < 1e-5);
        assert!((layer.color.g - expected.g).abs() < 1e-5);
        assert!((layer.color.b - expected.b).abs() < 1e-5);
    }
    // First layer (seed 1.0) is pure red at full saturation, half lightness
    let first = scene.layers()[0].color;
    assert!((first.r - 1.0).abs() < 1e-6 && first.g.abs() < 1e-6 && first.b.abs() < 1e-6);
}

#[test]
fn advance_spins_layers_with_alternating_direction() {
    let seven: Vec<LayerParams> = (0..7).map(|_| LAYER_PARAMS[0]).collect();
    let (mut scene, mut camera) = scene_and_camera(seven);
    let ts = 40_000.0; // t = 2.0
    advance(&mut scene, &mut camera, Vec2::ZERO, ts);
    let t = phase(ts);
    for (i, layer) in scene.layers().iter().enumerate() {
        let y = layer.rotation.y;
        assert!((y - t * spin_rate(i)).abs() < 1e-9);
        if i < 4 {
            assert!(y > 0.0, "layer {} should spin forward", i);
        } else {
            assert!(y < 0.0, "layer {} should spin backward", i);
        }
        assert!((y.abs() - t * (i + 1) as f64).abs() < 1e-9);
    }
}

#[test]
fn advance_leaves_static_tilt_untouched() {
    let (mut scene, mut camera) = scene_and_camera(LAYER_PARAMS.to_vec());
    let before: Vec<(f64, f64)> = scene
        .layers()
        .iter()
        .map(|l| (l.rotation.x, l.rotation.z))
        .collect();
    for frame in 0..10 {
        advance(&mut scene, &mut camera, Vec2::new(30.0, -12.0), frame as f64 * 16.0);
    }
    for (layer, (x, z)) in scene.layers().iter().zip(before) {
        assert_eq!(layer.rotation.x, x);
        assert_eq!(layer.rotation.z, z);
    }
}

#[test]
fn camera_target_inverts_screen_y() {
    assert_eq!(camera_target(Vec2::new(100.0, 100.0)), Vec2::new(100.0, -100.0));
    assert_eq!(camera_target(Vec2::new(-5.0, -7.0)), Vec2::new(-5.0, 7.0));
}

#[test]
fn camera_moves_five_percent_toward_pointer_per_frame() {
    let (mut scene, mut camera) = scene_and_camera(LAYER_PARAMS.to_vec());
    advance(&mut scene, &mut camera, Vec2::new(100.0, 100.0), 0.0);
    assert!((camera.eye.x - 5.0).abs() < 1e-5);
    assert!((camera.eye.y + 5.0).abs() < 1e-5);
    assert_eq!(camera.eye.z, CAMERA_Z);
    assert_eq!(camera.target, Vec3::ZERO);
}

#[test]
fn camera_converges_geometrically_without_overshoot() {
    let (mut scene, mut camera) = scene_and_camera(LAYER_PARAMS.to_vec());
    let offset = Vec2::new(240.0, 180.0);
    let target = camera_target(offset);
    let mut prev = (camera.eye.truncate() - target).length();
    for frame in 0..300 {
        advance(&mut scene, &mut camera, offset, frame as f64 * 16.0);
        let dist = (camera.eye.truncate() - target).length();
        assert!(dist <= prev, "distance grew at frame {}", frame);
        if prev > 1.0 {
            let ratio = dist / prev;
            assert!((ratio - 0.95).abs() < 1e-3, "ratio {} at frame {}", ratio, frame);
        }
        // Never passes the target on either axis
        assert!(camera.eye.x <= target.x + 1e-3);
        assert!(camera.eye.y >= target.y - 1e-3);
        prev = dist;
    }
    assert!(prev < 0.01);
}

#[test]
fn camera_reaims_at_origin_after_moving() {
    let (mut scene, mut camera) = scene_and_camera(LAYER_PARAMS.to_vec());
    camera.look_at(Vec3::new(50.0, 50.0, 0.0));
    advance(&mut scene, &mut camera, Vec2::new(400.0, 0.0), 0.0);
    assert_eq!(camera.target, Vec3::ZERO);
    // Origin projects to the view axis
    let origin_view = camera.view_matrix().transform_point3(Vec3::ZERO);
    assert!(origin_view.x.abs() < 1e-3 && origin_view.y.abs() < 1e-3);
    assert!(origin_view.z < 0.0);
}
