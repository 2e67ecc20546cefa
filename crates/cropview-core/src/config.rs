//! Engine configuration.
//!
//! `CropConfig` is sent by hosts as a (possibly partial) JSON object; missing
//! fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::error::CropError;

/// How the rotated raster is fitted into the view before zooming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScaleFitMode {
    /// Scale up or down so the whole outline fits the view.
    #[default]
    Fill,
    /// Only scale down images larger than the view.
    ShrinkOnly,
    /// Keep the raster at native size, even when larger than the view.
    Exact,
}

impl ScaleFitMode {
    /// Whether a fit scale of `scale` should be applied.
    ///
    /// Upscaling also happens in every mode while auto-zoom is on, so the
    /// zoom levels always start from a view-filling image.
    pub fn applies(self, scale: f64, auto_zoom_enabled: bool) -> bool {
        match self {
            ScaleFitMode::Fill => true,
            ScaleFitMode::ShrinkOnly if scale < 1.0 => true,
            _ => scale > 1.0 && auto_zoom_enabled,
        }
    }
}

/// Fixed crop window aspect ratio `x:y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectRatio {
    pub x: u32,
    pub y: u32,
}

impl AspectRatio {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Width divided by height.
    pub fn ratio(self) -> f64 {
        self.x as f64 / self.y as f64
    }

    pub fn is_square(self) -> bool {
        self.x == self.y
    }

    /// # Errors
    ///
    /// Returns `CropError::InvalidAspectRatio` when either side is zero.
    pub fn validate(self) -> Result<(), CropError> {
        if self.x == 0 || self.y == 0 {
            return Err(CropError::InvalidAspectRatio {
                x: self.x,
                y: self.y,
            });
        }
        Ok(())
    }
}

/// Size in raster pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropSize {
    pub width: u32,
    pub height: u32,
}

impl CropSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Configuration for [`CropEngine`](crate::CropEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    pub scale_fit_mode: ScaleFitMode,
    pub auto_zoom_enabled: bool,
    /// Upper zoom bound, strictly greater than 1
    pub max_zoom: f64,
    pub fixed_aspect_ratio: Option<AspectRatio>,
    /// Smallest crop result, in original-resolution pixels
    pub min_crop_result_size: CropSize,
    /// Largest crop result, in original-resolution pixels
    pub max_crop_result_size: CropSize,
    /// Smallest crop window side, in view units
    pub min_crop_window_size: f64,
    /// Distance in view units within which edited edges snap to the image
    pub snap_radius: f64,
    /// Inset of the default crop window, as a fraction of the image bounds
    pub initial_padding_ratio: f64,
    /// Produce an animation hand-off when auto-zoom changes the zoom
    pub animate_zoom: bool,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            scale_fit_mode: ScaleFitMode::Fill,
            auto_zoom_enabled: true,
            max_zoom: 4.0,
            fixed_aspect_ratio: None,
            min_crop_result_size: CropSize::new(40, 40),
            max_crop_result_size: CropSize::new(99999, 99999),
            min_crop_window_size: 42.0,
            snap_radius: 3.0,
            initial_padding_ratio: 0.1,
            animate_zoom: true,
        }
    }
}

impl CropConfig {
    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), CropError> {
        validate_max_zoom(self.max_zoom)?;
        if let Some(aspect) = self.fixed_aspect_ratio {
            aspect.validate()?;
        }
        validate_result_sizes(self.min_crop_result_size, self.max_crop_result_size)?;
        validate_snap_radius(self.snap_radius)?;
        if !(self.min_crop_window_size.is_finite() && self.min_crop_window_size >= 0.0) {
            return Err(CropError::InvalidMinWindowSize(self.min_crop_window_size));
        }
        if !(0.0..0.5).contains(&self.initial_padding_ratio) {
            return Err(CropError::InvalidPaddingRatio(self.initial_padding_ratio));
        }
        Ok(())
    }
}

pub(crate) fn validate_max_zoom(max_zoom: f64) -> Result<(), CropError> {
    if max_zoom.is_finite() && max_zoom > 1.0 {
        Ok(())
    } else {
        Err(CropError::InvalidMaxZoom(max_zoom))
    }
}

pub(crate) fn validate_snap_radius(radius: f64) -> Result<(), CropError> {
    if radius.is_finite() && radius >= 0.0 {
        Ok(())
    } else {
        Err(CropError::NegativeSnapRadius(radius))
    }
}

pub(crate) fn validate_result_sizes(min: CropSize, max: CropSize) -> Result<(), CropError> {
    if min.width > max.width || min.height > max.height || max.width == 0 || max.height == 0 {
        return Err(CropError::InvalidCropResultSize {
            min_width: min.width,
            min_height: min.height,
            max_width: max.width,
            max_height: max.height,
        });
    }
    Ok(())
}
