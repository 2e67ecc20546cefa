//! The raster as seen by the engine: its decoded dimensions.
//!
//! Decoding and pixel access stay with the host; the engine only needs the
//! size of the bitmap that is actually displayed.

use image::GenericImageView;
use serde::{Deserialize, Serialize};

/// Dimensions of the displayed (possibly downsampled) raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterSize {
    pub width: u32,
    pub height: u32,
}

impl RasterSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Size of any image the `image` crate can view.
    pub fn of<I: GenericImageView>(image: &I) -> Self {
        let (width, height) = image.dimensions();
        Self { width, height }
    }

    /// True when the raster has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Size of the original image this raster was decoded from at
    /// `sample_size` (1 = full resolution).
    pub fn original(&self, sample_size: u32) -> RasterSize {
        RasterSize::new(
            self.width.saturating_mul(sample_size),
            self.height.saturating_mul(sample_size),
        )
    }
}
