// Host-side tests for scene construction: particle field, layers, camera setup.

use rand::rngs::StdRng;
use rand::SeedableRng;
use starfield_core::constants::*;
use starfield_core::*;
use std::rc::Rc;

fn build_default(seed: u64) -> StarField {
    let viewport = Viewport::new(800.0, 600.0).unwrap();
    StarField::with_rng(
        viewport,
        SceneParams::default(),
        &mut StdRng::seed_from_u64(seed),
    )
}

#[test]
fn default_scene_matches_800x600_scenario() {
    let field = build_default(42);
    let scene = field.scene();

    assert_eq!(scene.field().len(), 20_000);
    assert_eq!(scene.layers().len(), 5);
    assert_eq!(field.camera().eye.z, 1000.0);
    assert_eq!(field.camera().eye.x, 0.0);
    assert_eq!(field.camera().eye.y, 0.0);
    assert!((field.camera().aspect - 800.0 / 600.0).abs() < 1e-6);
}

#[test]
fn every_particle_lies_inside_the_spread_cube() {
    let field = build_default(7);
    let half = PARTICLE_SPREAD / 2.0;
    for p in field.scene().field().positions() {
        assert!(p.x >= -half && p.x <= half, "x out of range: {}", p.x);
        assert!(p.y >= -half && p.y <= half, "y out of range: {}", p.y);
        assert!(p.z >= -half && p.z <= half, "z out of range: {}", p.z);
    }
}

#[test]
fn particles_fill_both_sides_of_each_axis() {
    // Uniform sampling over 20k points should reach well into both halves
    let field = build_default(3);
    let positions = field.scene().field().positions();
    let max_x = positions.iter().map(|p| p.x).fold(f32::MIN, f32::max);
    let min_x = positions.iter().map(|p| p.x).fold(f32::MAX, f32::min);
    assert!(max_x > 900.0);
    assert!(min_x < -900.0);
}

#[test]
fn layers_share_one_particle_field() {
    let field = build_default(11);
    let scene = field.scene();
    for layer in scene.layers() {
        assert!(Rc::ptr_eq(layer.field(), scene.shared_field()));
    }
    // Scene plus one handle per layer
    assert_eq!(Rc::strong_count(scene.shared_field()), 1 + scene.layers().len());
}

#[test]
fn layers_follow_the_parameter_table_in_order() {
    let field = build_default(5);
    for (layer, params) in field.scene().layers().iter().zip(LAYER_PARAMS.iter()) {
        assert_eq!(layer.params, *params);
        assert_eq!(layer.point_size(), params.point_size);
    }
    let sizes: Vec<f32> = field.scene().layers().iter().map(|l| l.point_size()).collect();
    assert_eq!(sizes, vec![5.0, 4.0, 3.0, 2.0, 1.0]);
}

#[test]
fn initial_rotations_are_within_range_and_distinct_per_layer() {
    let field = build_default(99);
    let layers = field.scene().layers();
    for layer in layers {
        for a in [layer.rotation.x, layer.rotation.y, layer.rotation.z] {
            assert!((0.0..MAX_INITIAL_ROTATION).contains(&a), "angle {}", a);
        }
    }
    for i in 0..layers.len() {
        for j in (i + 1)..layers.len() {
            assert_ne!(layers[i].rotation, layers[j].rotation);
        }
    }
}

#[test]
fn same_seed_builds_the_same_scene() {
    let a = build_default(1234);
    let b = build_default(1234);
    assert_eq!(a.scene().field().positions(), b.scene().field().positions());
    for (la, lb) in a.scene().layers().iter().zip(b.scene().layers()) {
        assert_eq!(la.rotation, lb.rotation);
    }
}

#[test]
fn background_and_fog_are_black_with_configured_density() {
    let field = build_default(8);
    let scene = field.scene();
    assert_eq!(scene.background, Color::BLACK);
    assert_eq!(scene.fog.color, Color::BLACK);
    assert_eq!(scene.fog.density, 0.0007);
}

#[test]
fn fog_factor_grows_with_depth() {
    let fog = FogExp2 {
        color: Color::BLACK,
        density: FOG_DENSITY,
    };
    assert_eq!(fog.factor(0.0), 0.0);
    let near = fog.factor(CAMERA_Z);
    let far = fog.factor(FAR_PLANE);
    assert!(near > 0.0 && near < far && far < 1.0);
    // 1 - exp(-(0.0007 * 1000)^2)
    assert!((near - (1.0 - (-0.49f32).exp())).abs() < 1e-5);
}

#[test]
fn custom_params_control_count_and_layers() {
    let params = SceneParams {
        particle_count: 64,
        spread: 10.0,
        layers: vec![LayerParams::new(0.5, 0.8, 0.4, 2.0)],
        ..SceneParams::default()
    };
    let scene = SceneBuilder::new(params).build(&mut StdRng::seed_from_u64(0));
    assert_eq!(scene.field().len(), 64);
    assert_eq!(scene.layers().len(), 1);
    for p in scene.field().positions() {
        assert!(p.abs().max_element() <= 5.0);
    }
}

#[test]
fn model_matrix_wraps_large_angles() {
    let mut scene = SceneBuilder::default().build(&mut StdRng::seed_from_u64(21));
    let layer = &mut scene.layers_mut()[0];
    layer.rotation = glam::DVec3::new(0.0, std::f64::consts::TAU * 1000.0 + 0.5, 0.0);
    let expected = glam::Mat4::from_rotation_y(0.5);
    assert!(layer.model_matrix().abs_diff_eq(expected, 1e-4));
}

#[test]
fn point_size_scales_linearly_with_pixel_ratio() {
    // 800x600 CSS viewport, size 5, depth 1000
    let dpr1 = point_size_px(5.0, 1.0, 600.0, 1000.0);
    let dpr2 = point_size_px(5.0, 2.0, 600.0, 1000.0);
    assert!((dpr1 - 1.5).abs() < 1e-6);
    assert!((dpr2 - 3.0).abs() < 1e-6);
    assert!((dpr2 / dpr1 - 2.0).abs() < 1e-6);
}

#[test]
fn point_size_shrinks_with_depth() {
    let near = point_size_px(5.0, 1.0, 600.0, 500.0);
    let far = point_size_px(5.0, 1.0, 600.0, 1000.0);
    assert!((near / far - 2.0).abs() < 1e-6);
    // Unit depth gives the numerator the renderer uploads
    assert!((point_size_px(5.0, 2.0, 600.0, 1.0) / 1000.0 - 3.0).abs() < 1e-6);
}
