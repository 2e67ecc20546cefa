//! Error types for the crop engine.

use thiserror::Error;

/// Errors reported by the crop engine.
///
/// Missing images and zero-sized views are not errors: operations silently
/// do nothing in those states. Everything here is either a rejected setter
/// argument (the previous value is kept) or a broken geometry invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CropError {
    /// The affine matrix has no inverse.
    #[error("Transform matrix is singular")]
    SingularMatrix,

    /// Maximum zoom must be greater than 1.
    #[error("Invalid max zoom: {0} (must be > 1)")]
    InvalidMaxZoom(f64),

    /// Aspect ratio components must both be positive.
    #[error("Invalid aspect ratio: {x}:{y}")]
    InvalidAspectRatio { x: u32, y: u32 },

    /// Snap radius cannot be negative.
    #[error("Invalid snap radius: {0} (must be >= 0)")]
    NegativeSnapRadius(f64),

    /// Initial padding must leave a non-empty window.
    #[error("Invalid initial padding ratio: {0} (must be in [0, 0.5))")]
    InvalidPaddingRatio(f64),

    /// Minimum crop window size must be finite and non-negative.
    #[error("Invalid minimum crop window size: {0}")]
    InvalidMinWindowSize(f64),

    /// Crop result size limits are inconsistent.
    #[error("Invalid crop result size: min {min_width}x{min_height}, max {max_width}x{max_height}")]
    InvalidCropResultSize {
        min_width: u32,
        min_height: u32,
        max_width: u32,
        max_height: u32,
    },

    /// Sample size must be at least 1.
    #[error("Invalid sample size: {0}")]
    InvalidSampleSize(u32),

    /// The raster has zero width or height.
    #[error("Image has no pixels")]
    EmptyImage,
}
