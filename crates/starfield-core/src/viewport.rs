use crate::StarfieldError;
use glam::Vec2;

/// Measured size of the mount surface in CSS (logical) pixels.
///
/// Construction is the only place a size is validated; every consumer of a
/// `Viewport` can rely on a positive, finite aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self, StarfieldError> {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        if usable(width) && usable(height) {
            Ok(Self { width, height })
        } else {
            Err(StarfieldError::DegenerateViewport { width, height })
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Half width and half height, i.e. the viewport center in its own coordinates.
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Backing-store size in physical pixels for the given device pixel ratio.
    pub fn physical_size(&self, pixel_ratio: f32) -> (u32, u32) {
        let ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        let w = (self.width * ratio).round() as u32;
        let h = (self.height * ratio).round() as u32;
        (w.max(1), h.max(1))
    }

    /// [`physical_size`](Self::physical_size) limited to `max_dim` per side,
    /// the largest texture the device can present.
    pub fn physical_size_within(&self, pixel_ratio: f32, max_dim: u32) -> (u32, u32) {
        let (w, h) = self.physical_size(pixel_ratio);
        let max_dim = max_dim.max(1);
        (w.min(max_dim), h.min(max_dim))
    }
}
