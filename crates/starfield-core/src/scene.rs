//! Procedural point-cloud scene: one shared particle field rendered by a
//! fixed set of independently tilted, independently colored layers.

use crate::color::Color;
use crate::constants::{
    BACKGROUND_RGB, FOG_DENSITY, LAYER_PARAMS, MAX_INITIAL_ROTATION, PARTICLE_COUNT,
    PARTICLE_SPREAD,
};
use glam::{DVec3, Mat4, Vec3};
use rand::Rng;
use std::f64::consts::TAU;
use std::rc::Rc;

/// Fixed look of one layer: the hue it starts from, its saturation and
/// lightness, and the point size of its material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerParams {
    pub hue_seed: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub point_size: f32,
}

impl LayerParams {
    pub const fn new(hue_seed: f32, saturation: f32, lightness: f32, point_size: f32) -> Self {
        Self {
            hue_seed,
            saturation,
            lightness,
            point_size,
        }
    }
}

/// Immutable set of particle positions, generated once and shared by every layer.
#[derive(Debug)]
pub struct ParticleField {
    positions: Vec<Vec3>,
}

impl ParticleField {
    /// Sample `count` points with each coordinate uniform in `[-spread/2, spread/2]`.
    pub fn generate<R: Rng>(count: usize, spread: f32, rng: &mut R) -> Self {
        let half = spread / 2.0;
        let mut axis = || rng.gen_range(-half..=half);
        let positions = (0..count)
            .map(|_| Vec3::new(axis(), axis(), axis()))
            .collect();
        Self { positions }
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// One rendering of the shared field with its own rotation and material color.
#[derive(Clone, Debug)]
pub struct Layer {
    pub params: LayerParams,
    pub color: Color,
    /// Euler angles in radians, applied X then Y then Z.
    pub rotation: DVec3,
    field: Rc<ParticleField>,
}

impl Layer {
    fn new(params: LayerParams, rotation: DVec3, field: Rc<ParticleField>) -> Self {
        Self {
            params,
            color: Color::WHITE,
            rotation,
            field,
        }
    }

    #[inline]
    pub fn field(&self) -> &Rc<ParticleField> {
        &self.field
    }

    #[inline]
    pub fn point_size(&self) -> f32 {
        self.params.point_size
    }

    /// Object-to-world transform for this layer.
    ///
    /// Angles keep growing with time, so they are wrapped to one turn in f64
    /// before narrowing to keep the f32 matrix precise.
    pub fn model_matrix(&self) -> Mat4 {
        let wrap = |a: f64| a.rem_euclid(TAU) as f32;
        Mat4::from_rotation_x(wrap(self.rotation.x))
            * Mat4::from_rotation_y(wrap(self.rotation.y))
            * Mat4::from_rotation_z(wrap(self.rotation.z))
    }
}

/// On-screen diameter, in drawing-buffer pixels, of a point of `size` seen at
/// view-space `depth` on a viewport `css_height` CSS pixels tall.
///
/// Pass `depth = 1.0` to get the numerator the vertex shader divides by depth.
#[inline]
pub fn point_size_px(size: f32, pixel_ratio: f32, css_height: f32, depth: f32) -> f32 {
    size * pixel_ratio * (css_height * 0.5) / depth
}

/// Exponential-squared fog: `factor = 1 - exp(-(density * depth)^2)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FogExp2 {
    pub color: Color,
    pub density: f32,
}

impl FogExp2 {
    pub fn factor(&self, depth: f32) -> f32 {
        let d = self.density * depth;
        1.0 - (-d * d).exp()
    }
}

/// Everything a renderer needs to draw one frame, apart from the camera.
#[derive(Debug)]
pub struct StarScene {
    field: Rc<ParticleField>,
    layers: Vec<Layer>,
    pub background: Color,
    pub fog: FogExp2,
}

impl StarScene {
    #[inline]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    #[inline]
    pub fn shared_field(&self) -> &Rc<ParticleField> {
        &self.field
    }

    #[inline]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Mutable access to the layers; the count itself is fixed at build time.
    #[inline]
    pub fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }
}

/// Build-time knobs. `Default` gives the star field constants.
#[derive(Clone, Debug)]
pub struct SceneParams {
    pub particle_count: usize,
    pub spread: f32,
    pub layers: Vec<LayerParams>,
    pub background: Color,
    pub fog_density: f32,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            spread: PARTICLE_SPREAD,
            layers: LAYER_PARAMS.to_vec(),
            background: Color::from_array(BACKGROUND_RGB),
            fog_density: FOG_DENSITY,
        }
    }
}

pub struct SceneBuilder {
    params: SceneParams,
}

impl SceneBuilder {
    pub fn new(params: SceneParams) -> Self {
        Self { params }
    }

    /// Generate the shared field and one randomly tilted layer per parameter entry.
    pub fn build<R: Rng>(&self, rng: &mut R) -> StarScene {
        let p = &self.params;
        let field = Rc::new(ParticleField::generate(p.particle_count, p.spread, rng));
        let layers = p
            .layers
            .iter()
            .map(|lp| {
                let rotation = DVec3::new(
                    rng.gen_range(0.0..MAX_INITIAL_ROTATION),
                    rng.gen_range(0.0..MAX_INITIAL_ROTATION),
                    rng.gen_range(0.0..MAX_INITIAL_ROTATION),
                );
                Layer::new(*lp, rotation, Rc::clone(&field))
            })
            .collect::<Vec<_>>();
        log::info!(
            "[scene] built {} particles across {} layers",
            field.len(),
            layers.len()
        );
        StarScene {
            field,
            layers,
            background: p.background,
            fog: FogExp2 {
                color: p.background,
                density: p.fog_density,
            },
        }
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new(SceneParams::default())
    }
}
