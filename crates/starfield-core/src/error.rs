use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StarfieldError {
    /// The mount surface has no usable area, so the camera aspect would be
    /// zero, infinite or NaN.
    #[error("viewport must have a positive, finite size (got {width}x{height})")]
    DegenerateViewport { width: f32, height: f32 },
}
