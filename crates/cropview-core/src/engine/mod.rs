//! The crop geometry engine.
//!
//! `CropEngine` owns the image matrix, zoom and pan state and the image
//! orientation, and keeps the crop window consistent with them. Hosts feed
//! it resolved intents (resize, rotate, flip, crop window edits, pan and
//! pinch) and read back the matrix to render with and the crop window to
//! draw.
//!
//! # Lifecycle
//!
//! Operations are synchronous and run on the host's UI thread. Every
//! operation returns with the matrix and crop window fully settled.
//! Operations called with no image or with a zero-sized view do nothing:
//! that state is normal before the first layout.

mod animation;
mod gesture;

use std::fmt;

use image::GenericImageView;
use log::{debug, trace};

use crate::config::{
    validate_max_zoom, validate_result_sizes, validate_snap_radius, AspectRatio, CropConfig,
    CropSize, ScaleFitMode,
};
use crate::error::CropError;
use crate::geometry::{rect_from_points, IntRect, Point, Quad, Rect};
use crate::overlay::CropOverlay;
use crate::raster::RasterSize;
use crate::transform::{normalize_degrees, rotated_bounds, swaps_crop_axes, Affine};
use crate::zoom::ZoomController;

pub use animation::{TransformAnimation, TransformSnapshot};

/// Callback fired with the raster-space crop rectangle when an edit is
/// committed.
pub type ReleaseListener = Box<dyn FnMut(IntRect)>;

/// How pan offsets are derived on a recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OffsetMode {
    /// Bring the crop window as close to the view centre as the image allows.
    Center,
    /// Keep the current offset, sliding only as far as needed to keep the
    /// crop window inside the view.
    KeepCropVisible,
}

/// Transform and crop-geometry engine for one crop view.
pub struct CropEngine {
    config: CropConfig,
    raster: Option<RasterSize>,
    sample_size: u32,
    view_width: f64,
    view_height: f64,
    matrix: Affine,
    outline: Quad,
    zoom: f64,
    /// Pan applied after the zoom scale, divided by the signed zoom
    zoom_offset_x: f64,
    zoom_offset_y: f64,
    degrees_rotated: u32,
    flip_horizontal: bool,
    flip_vertical: bool,
    overlay: CropOverlay,
    /// Initial crop rectangle in original-resolution raster space
    crop_rect_hint: Option<IntRect>,
    animation: Option<TransformAnimation>,
    release_listener: Option<ReleaseListener>,
}

impl fmt::Debug for CropEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CropEngine")
            .field("config", &self.config)
            .field("raster", &self.raster)
            .field("sample_size", &self.sample_size)
            .field("view", &(self.view_width, self.view_height))
            .field("matrix", &self.matrix)
            .field("zoom", &self.zoom)
            .field("zoom_offset", &(self.zoom_offset_x, self.zoom_offset_y))
            .field("degrees_rotated", &self.degrees_rotated)
            .field("flip_horizontal", &self.flip_horizontal)
            .field("flip_vertical", &self.flip_vertical)
            .field("crop_window", &self.overlay.rect())
            .field("animating", &self.animation.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for CropEngine {
    fn default() -> Self {
        Self::with_valid_config(CropConfig::default())
    }
}

impl CropEngine {
    /// Create an engine with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns the first invalid configuration field.
    pub fn new(config: CropConfig) -> Result<Self, CropError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: CropConfig) -> Self {
        Self {
            overlay: CropOverlay::new(&config),
            config,
            raster: None,
            sample_size: 1,
            view_width: 0.0,
            view_height: 0.0,
            matrix: Affine::IDENTITY,
            outline: Quad::default(),
            zoom: 1.0,
            zoom_offset_x: 0.0,
            zoom_offset_y: 0.0,
            degrees_rotated: 0,
            flip_horizontal: false,
            flip_vertical: false,
            crop_rect_hint: None,
            animation: None,
            release_listener: None,
        }
    }

    // ------------------------------------------------------------------
    // Image lifecycle
    // ------------------------------------------------------------------

    /// Load a raster for cropping.
    ///
    /// `sample_size` is the factor the raster was downsampled by when it was
    /// decoded (1 = full resolution); `degrees` is the initial clockwise
    /// rotation.
    ///
    /// # Errors
    ///
    /// Rejects empty rasters and a zero sample size.
    pub fn set_image<I: GenericImageView>(
        &mut self,
        raster: &I,
        sample_size: u32,
        degrees: i32,
    ) -> Result<(), CropError> {
        self.set_image_size(RasterSize::of(raster), sample_size, degrees)
    }

    /// Load a raster for cropping given only its decoded dimensions.
    ///
    /// # Errors
    ///
    /// Rejects empty rasters and a zero sample size.
    pub fn set_image_size(
        &mut self,
        raster: RasterSize,
        sample_size: u32,
        degrees: i32,
    ) -> Result<(), CropError> {
        if raster.is_empty() {
            return Err(CropError::EmptyImage);
        }
        if sample_size == 0 {
            return Err(CropError::InvalidSampleSize(sample_size));
        }

        self.finish_animation();
        self.clear_image_state();
        self.crop_rect_hint = None;
        self.overlay.set_initial_rect(None);
        self.overlay.set_bounds(None, self.view_width, self.view_height);
        self.overlay.set_rect(Rect::ZERO);

        self.raster = Some(raster);
        self.sample_size = sample_size;
        self.degrees_rotated = normalize_degrees(degrees);
        debug!(
            "image set: {}x{} (sample size {}, {}°)",
            raster.width, raster.height, sample_size, self.degrees_rotated
        );

        self.apply_image_matrix(OffsetMode::Center);
        self.overlay.reset();
        Ok(())
    }

    /// Remove the current image and reset all geometry.
    pub fn clear_image(&mut self) {
        self.finish_animation();
        self.clear_image_state();
        self.crop_rect_hint = None;
        self.overlay.set_initial_rect(None);
        self.overlay.set_bounds(None, self.view_width, self.view_height);
        self.overlay.set_rect(Rect::ZERO);
        debug!("image cleared");
    }

    fn clear_image_state(&mut self) {
        self.raster = None;
        self.sample_size = 1;
        self.degrees_rotated = 0;
        self.flip_horizontal = false;
        self.flip_vertical = false;
        self.zoom = 1.0;
        self.zoom_offset_x = 0.0;
        self.zoom_offset_y = 0.0;
        self.matrix.reset();
        self.outline = Quad::default();
    }

    /// Set the crop window from a rectangle in original-resolution raster
    /// space, or go back to the default window with `None`.
    pub fn set_crop_rect_hint(&mut self, rect: Option<IntRect>) {
        self.finish_animation();
        self.crop_rect_hint = rect;
        if self.raster.is_some() {
            self.overlay.set_initial_rect(self.hint_in_view());
            self.overlay.reset();
        }
    }

    /// Reset zoom, pan and orientation and rebuild the initial crop window.
    pub fn reset_crop_rect(&mut self) {
        self.finish_animation();
        self.zoom = 1.0;
        self.zoom_offset_x = 0.0;
        self.zoom_offset_y = 0.0;
        self.degrees_rotated = 0;
        self.flip_horizontal = false;
        self.flip_vertical = false;
        self.apply_image_matrix(OffsetMode::Center);
        self.overlay.set_initial_rect(self.hint_in_view());
        self.overlay.reset();
    }

    // ------------------------------------------------------------------
    // Host-driven geometry changes
    // ------------------------------------------------------------------

    /// The host view was laid out at a new size.
    pub fn on_resize(&mut self, width: f64, height: f64) {
        self.finish_animation();
        let size_changed = self.has_valid_view()
            && (self.view_width != width || self.view_height != height);
        self.view_width = width;
        self.view_height = height;

        if self.raster.is_none() || !self.has_valid_view() {
            trace!("resize to {width}x{height} skipped: no image or empty view");
            self.overlay.set_bounds(None, width, height);
            return;
        }

        self.apply_image_matrix(OffsetMode::Center);
        if size_changed {
            self.handle_crop_window_changed(false, false);
        }
    }

    /// Rotate the image clockwise by `degrees` (negative = counter-clockwise).
    ///
    /// The crop window keeps its place on the image and its apparent size on
    /// screen. Rotating by roughly a quarter turn without a fixed aspect
    /// ratio also turns the window on its side and swaps the flip flags, so
    /// the window keeps its visual orientation.
    pub fn rotate(&mut self, degrees: i32) {
        if self.raster.is_none() {
            return;
        }
        self.finish_animation();
        let delta = normalize_degrees(degrees);

        if !self.has_valid_view() {
            self.degrees_rotated = (self.degrees_rotated + delta) % 360;
            return;
        }
        let Some(inverse) = self.inverse() else {
            return;
        };

        let flip_axes = self.config.fixed_aspect_ratio.is_none() && swaps_crop_axes(delta);
        let crop = self.overlay.rect();
        let (mut half_width, mut half_height) = if flip_axes {
            (crop.height() / 2.0, crop.width() / 2.0)
        } else {
            (crop.width() / 2.0, crop.height() / 2.0)
        };
        if flip_axes {
            std::mem::swap(&mut self.flip_horizontal, &mut self.flip_vertical);
        }

        // crop centre plus a unit step, pinned in raster space
        let probes =
            [crop.center(), Point::ORIGIN, Point::new(1.0, 0.0)].map(|p| inverse.map_point(p));

        self.degrees_rotated = (self.degrees_rotated + delta) % 360;
        self.apply_image_matrix(OffsetMode::Center);

        // undo the fit-scale change so the window keeps its on-screen size
        let mapped = probes.map(|p| self.matrix.map_point(p));
        let change = mapped[1].distance(mapped[2]);
        self.zoom = (self.zoom / change).clamp(1.0, self.config.max_zoom.max(1.0));
        self.apply_image_matrix(OffsetMode::Center);

        let mapped = probes.map(|p| self.matrix.map_point(p));
        let change = mapped[1].distance(mapped[2]);
        half_width *= change;
        half_height *= change;

        self.overlay
            .set_rect(Rect::from_center(mapped[0], half_width, half_height));
        self.apply_image_matrix(OffsetMode::Center);
        self.handle_crop_window_changed(false, false);
        self.overlay.fix_current_rect();
        debug!(
            "rotated by {delta}° to {}° (zoom {:.3})",
            self.degrees_rotated, self.zoom
        );
    }

    /// Set the absolute clockwise rotation.
    pub fn set_rotated_degrees(&mut self, degrees: i32) {
        let target = normalize_degrees(degrees);
        if target != self.degrees_rotated {
            self.rotate(target as i32 - self.degrees_rotated as i32);
        }
    }

    /// Mirror the image left-to-right.
    pub fn flip_horizontally(&mut self) {
        if self.raster.is_none() {
            return;
        }
        self.finish_animation();
        self.flip_horizontal = !self.flip_horizontal;
        self.apply_image_matrix(OffsetMode::Center);
    }

    /// Mirror the image top-to-bottom.
    pub fn flip_vertically(&mut self) {
        if self.raster.is_none() {
            return;
        }
        self.finish_animation();
        self.flip_vertical = !self.flip_vertical;
        self.apply_image_matrix(OffsetMode::Center);
    }

    pub fn set_flipped_horizontally(&mut self, flipped: bool) {
        if self.flip_horizontal != flipped {
            self.flip_horizontally();
        }
    }

    pub fn set_flipped_vertically(&mut self, flipped: bool) {
        if self.flip_vertical != flipped {
            self.flip_vertically();
        }
    }

    /// The user moved or resized the crop window to `rect` (view space).
    ///
    /// While `in_progress` the image only slides to keep the window visible.
    /// On commit the auto-zoom policy runs and the release listener is
    /// called with the final raster-space rectangle.
    pub fn on_crop_window_edited(&mut self, rect: Rect, in_progress: bool) {
        if self.raster.is_none() {
            return;
        }
        self.finish_animation();
        self.overlay.constrain_edit(rect);
        self.handle_crop_window_changed(in_progress, self.config.animate_zoom);

        if !in_progress {
            if let Some(rect) = self.crop_rect() {
                if let Some(listener) = self.release_listener.as_mut() {
                    listener(rect);
                }
            }
        }
    }

    /// Register the callback fired when a crop window edit is committed.
    pub fn set_release_listener(&mut self, listener: impl FnMut(IntRect) + 'static) {
        self.release_listener = Some(Box::new(listener));
    }

    pub fn clear_release_listener(&mut self) {
        self.release_listener = None;
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    /// Change the fit mode; zoom and pan are reset and the crop window is
    /// rebuilt.
    pub fn set_scale_fit_mode(&mut self, mode: ScaleFitMode) {
        if self.config.scale_fit_mode == mode {
            return;
        }
        self.finish_animation();
        self.config.scale_fit_mode = mode;
        self.zoom = 1.0;
        self.zoom_offset_x = 0.0;
        self.zoom_offset_y = 0.0;
        self.apply_image_matrix(OffsetMode::Center);
        self.overlay.set_initial_rect(self.hint_in_view());
        self.overlay.reset();
    }

    pub fn set_auto_zoom_enabled(&mut self, enabled: bool) {
        if self.config.auto_zoom_enabled != enabled {
            self.finish_animation();
            self.config.auto_zoom_enabled = enabled;
            self.handle_crop_window_changed(false, false);
        }
    }

    /// # Errors
    ///
    /// Rejects values not greater than 1; the previous value is kept.
    pub fn set_max_zoom(&mut self, max_zoom: f64) -> Result<(), CropError> {
        validate_max_zoom(max_zoom).inspect_err(|e| debug!("rejected: {e}"))?;
        if self.config.max_zoom != max_zoom {
            self.finish_animation();
            self.config.max_zoom = max_zoom;
            self.handle_crop_window_changed(false, false);
        }
        Ok(())
    }

    /// Fix the crop window to `aspect`, or free it with `None`. The crop
    /// window is rebuilt.
    ///
    /// # Errors
    ///
    /// Rejects ratios with a zero side; the previous value is kept.
    pub fn set_fixed_aspect_ratio(&mut self, aspect: Option<AspectRatio>) -> Result<(), CropError> {
        if let Some(aspect) = aspect {
            aspect
                .validate()
                .inspect_err(|e| debug!("rejected: {e}"))?;
        }
        if self.config.fixed_aspect_ratio != aspect {
            self.finish_animation();
            self.config.fixed_aspect_ratio = aspect;
            self.overlay.apply_config(&self.config);
            self.overlay.reset();
        }
        Ok(())
    }

    pub fn clear_aspect_ratio(&mut self) {
        // `None` always validates
        let _ = self.set_fixed_aspect_ratio(None);
    }

    /// # Errors
    ///
    /// Rejects negative or non-finite radii; the previous value is kept.
    pub fn set_snap_radius(&mut self, radius: f64) -> Result<(), CropError> {
        validate_snap_radius(radius).inspect_err(|e| debug!("rejected: {e}"))?;
        self.config.snap_radius = radius;
        self.overlay.apply_config(&self.config);
        Ok(())
    }

    /// # Errors
    ///
    /// Rejects a minimum larger than the current maximum.
    pub fn set_min_crop_result_size(&mut self, size: CropSize) -> Result<(), CropError> {
        validate_result_sizes(size, self.config.max_crop_result_size)
            .inspect_err(|e| debug!("rejected: {e}"))?;
        self.config.min_crop_result_size = size;
        self.overlay.apply_config(&self.config);
        Ok(())
    }

    /// # Errors
    ///
    /// Rejects a maximum smaller than the current minimum.
    pub fn set_max_crop_result_size(&mut self, size: CropSize) -> Result<(), CropError> {
        validate_result_sizes(self.config.min_crop_result_size, size)
            .inspect_err(|e| debug!("rejected: {e}"))?;
        self.config.max_crop_result_size = size;
        self.overlay.apply_config(&self.config);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Outbound state
    // ------------------------------------------------------------------

    pub fn has_image(&self) -> bool {
        self.raster.is_some()
    }

    pub fn view_size(&self) -> (f64, f64) {
        (self.view_width, self.view_height)
    }

    /// Matrix mapping raster space to view space.
    pub fn image_matrix(&self) -> Affine {
        self.matrix
    }

    /// The raster's outline in view space.
    pub fn image_outline(&self) -> Option<Quad> {
        self.raster.map(|_| self.outline)
    }

    /// The crop window in view space.
    pub fn crop_window(&self) -> Rect {
        self.overlay.rect()
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn zoom_offset(&self) -> (f64, f64) {
        (self.zoom_offset_x, self.zoom_offset_y)
    }

    /// Clockwise rotation in `[0, 360)`.
    pub fn rotated_degrees(&self) -> u32 {
        self.degrees_rotated
    }

    pub fn is_flipped_horizontally(&self) -> bool {
        self.flip_horizontal
    }

    pub fn is_flipped_vertically(&self) -> bool {
        self.flip_vertical
    }

    pub fn sample_size(&self) -> u32 {
        self.sample_size
    }

    /// Full original-resolution bounds of the image.
    pub fn whole_image_rect(&self) -> Option<IntRect> {
        let original = self.raster?.original(self.sample_size);
        Some(IntRect::new(
            0,
            0,
            original.width as i32,
            original.height as i32,
        ))
    }

    /// The 4 crop window corners in original-resolution raster space.
    ///
    /// After a rotation that is not a multiple of 90° these form a rotated
    /// quad, not a straight rectangle.
    pub fn crop_points(&self) -> Option<Quad> {
        self.raster?;
        let inverse = self.inverse()?;
        let mut points = inverse.map_quad(&Quad::from_rect(&self.overlay.rect()));
        points.scale(self.sample_size as f64);
        Some(points)
    }

    /// The crop window as a straight rectangle in original-resolution raster
    /// space, clamped to the image.
    pub fn crop_rect(&self) -> Option<IntRect> {
        let original = self.raster?.original(self.sample_size);
        self.crop_rect_with(original.width, original.height, self.sample_size)
    }

    /// Like [`crop_rect`](Self::crop_rect) with explicit original dimensions
    /// and sample size.
    pub fn crop_rect_with(
        &self,
        original_width: u32,
        original_height: u32,
        sample_size: u32,
    ) -> Option<IntRect> {
        self.raster?;
        let inverse = self.inverse()?;
        let mut points = inverse.map_quad(&Quad::from_rect(&self.overlay.rect()));
        points.scale(sample_size.max(1) as f64);
        Some(rect_from_points(
            &points.points,
            original_width,
            original_height,
            self.config.fixed_aspect_ratio,
        ))
    }

    /// The current state as an animation endpoint.
    pub fn snapshot(&self) -> TransformSnapshot {
        TransformSnapshot {
            matrix: self.matrix,
            outline: self.outline,
            crop_window: self.overlay.rect(),
        }
    }

    /// The animation the host should play, if any.
    pub fn pending_animation(&self) -> Option<&TransformAnimation> {
        self.animation.as_ref()
    }

    /// Hand the pending animation to the host. The engine already sits at
    /// its end snapshot.
    pub fn take_animation(&mut self) -> Option<TransformAnimation> {
        self.animation.take()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Mark the current animation as complete.
    ///
    /// The engine state already equals the animation's end snapshot, so this
    /// only drops the hand-off. Every transform-changing call does this
    /// first.
    pub fn finish_animation(&mut self) {
        if self.animation.take().is_some() {
            trace!("animation finished");
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn has_valid_view(&self) -> bool {
        self.view_width > 0.0 && self.view_height > 0.0
    }

    fn inverse(&self) -> Option<Affine> {
        match self.matrix.invert() {
            Ok(inverse) => Some(inverse),
            Err(err) => {
                debug_assert!(false, "image matrix lost invertibility: {err}");
                None
            }
        }
    }

    /// Signed zoom scale per axis, negative where the image is flipped.
    fn signed_zoom(&self) -> (f64, f64) {
        let sx = if self.flip_horizontal {
            -self.zoom
        } else {
            self.zoom
        };
        let sy = if self.flip_vertical {
            -self.zoom
        } else {
            self.zoom
        };
        (sx, sy)
    }

    fn hint_in_view(&self) -> Option<Rect> {
        let hint = self.crop_rect_hint?;
        self.raster?;
        let decoded = hint.to_rect().scaled(1.0 / self.sample_size as f64);
        Some(self.matrix.map_rect(&decoded))
    }

    /// Run the auto-zoom policy, or slide the image while an edit is in
    /// progress.
    fn handle_crop_window_changed(&mut self, in_progress: bool, animate: bool) {
        if self.raster.is_none() || !self.has_valid_view() {
            return;
        }
        let (width, height) = (self.view_width, self.view_height);
        let crop = self.overlay.rect();

        if in_progress {
            if crop.left < 0.0 || crop.top < 0.0 || crop.right > width || crop.bottom > height {
                self.apply_image_matrix(OffsetMode::KeepCropVisible);
            }
            return;
        }

        if !(self.config.auto_zoom_enabled || self.zoom > 1.0) {
            return;
        }
        let controller = ZoomController::new(self.config.max_zoom, self.config.auto_zoom_enabled);
        let Some(new_zoom) = controller.propose(self.zoom, crop.width(), crop.height(), width, height)
        else {
            return;
        };

        debug!("auto-zoom {:.3} -> {:.3}", self.zoom, new_zoom);
        let start = self.snapshot();
        self.zoom = new_zoom;
        self.apply_image_matrix(OffsetMode::Center);
        if animate {
            self.animation = Some(TransformAnimation {
                start,
                end: self.snapshot(),
            });
        }
    }

    /// Rebuild the image matrix from the raster rectangle and carry the crop
    /// window over from the previous matrix.
    fn apply_image_matrix(&mut self, mode: OffsetMode) {
        let Some(raster) = self.raster else {
            return;
        };
        if !self.has_valid_view() {
            return;
        }
        let Some(inverse) = self.inverse() else {
            return;
        };
        let (width, height) = (self.view_width, self.view_height);
        let raster_quad = Quad::from_size(raster.width as f64, raster.height as f64);

        let mut matrix = Affine::IDENTITY;
        matrix.translate(
            (width - raster.width as f64) / 2.0,
            (height - raster.height as f64) / 2.0,
        );
        let mut outline = matrix.map_quad(&raster_quad);

        if self.degrees_rotated > 0 {
            matrix.rotate_about(
                self.degrees_rotated as f64,
                outline.center_x(),
                outline.center_y(),
            );
            outline = matrix.map_quad(&raster_quad);
        }

        let (bounds_width, bounds_height) = rotated_bounds(
            raster.width as f64,
            raster.height as f64,
            self.degrees_rotated as f64,
        );
        let scale = (width / bounds_width).min(height / bounds_height);
        if self
            .config
            .scale_fit_mode
            .applies(scale, self.config.auto_zoom_enabled)
        {
            matrix.scale_about(scale, scale, outline.center_x(), outline.center_y());
            outline = matrix.map_quad(&raster_quad);
        }

        let (scale_x, scale_y) = self.signed_zoom();
        matrix.scale_about(scale_x, scale_y, outline.center_x(), outline.center_y());
        outline = matrix.map_quad(&raster_quad);

        // old view space to new view space in one step; without a rotation
        // change this has no shear and the window maps exactly
        let mut crop = inverse.then(&matrix).map_rect(&self.overlay.rect());

        match mode {
            OffsetMode::Center => {
                let target = if crop.is_empty() {
                    Point::new(width / 2.0, height / 2.0)
                } else {
                    crop.center()
                };
                self.zoom_offset_x = if width > outline.width() {
                    0.0
                } else {
                    (width / 2.0 - target.x)
                        .min(-outline.left())
                        .max(width - outline.right())
                        / scale_x
                };
                self.zoom_offset_y = if height > outline.height() {
                    0.0
                } else {
                    (height / 2.0 - target.y)
                        .min(-outline.top())
                        .max(height - outline.bottom())
                        / scale_y
                };
            }
            OffsetMode::KeepCropVisible => {
                let tx = keep_visible(self.zoom_offset_x * scale_x, crop.left, crop.right, width);
                let ty = keep_visible(self.zoom_offset_y * scale_y, crop.top, crop.bottom, height);
                self.zoom_offset_x = tx / scale_x;
                self.zoom_offset_y = ty / scale_y;
            }
        }

        let tx = cover_translation(self.zoom_offset_x * scale_x, &outline, width, Axis::X);
        let ty = cover_translation(self.zoom_offset_y * scale_y, &outline, height, Axis::Y);
        self.zoom_offset_x = tx / scale_x;
        self.zoom_offset_y = ty / scale_y;

        matrix.translate(tx, ty);
        crop.offset(tx, ty);

        self.matrix = matrix;
        self.outline = matrix.map_quad(&raster_quad);
        self.overlay.set_rect(crop);
        self.update_image_bounds();
    }

    /// Hand the outline and crop size limits to the overlay.
    fn update_image_bounds(&mut self) {
        if self.raster.is_none() {
            self.overlay.set_bounds(None, self.view_width, self.view_height);
            return;
        }
        // original-resolution pixels per view unit
        let view_scale = self.matrix.determinant().abs().sqrt();
        let factor = self.sample_size as f64 / view_scale;
        self.overlay
            .set_window_limits(self.view_width, self.view_height, factor, factor);
        self.overlay.set_initial_rect(self.hint_in_view());
        self.overlay
            .set_bounds(Some(self.outline), self.view_width, self.view_height);
    }
}

/// Clamp a translation so the span `low..high` stays inside `0..extent`.
/// A span larger than the view keeps the translation unchanged.
fn keep_visible(translation: f64, low: f64, high: f64, extent: f64) -> f64 {
    if high - low > extent {
        translation
    } else {
        translation.max(-low).min(extent - high)
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// Clamp a pan translation so the outline leaves no gap at the view edges.
///
/// Along an axis where the outline is at least as large as the view, the
/// translation keeps both view edges covered; where it is smaller the
/// outline stays centred.
fn cover_translation(translation: f64, outline: &Quad, extent: f64, axis: Axis) -> f64 {
    let (low, high) = match axis {
        Axis::X => (outline.left(), outline.right()),
        Axis::Y => (outline.top(), outline.bottom()),
    };
    if high - low >= extent {
        translation.max(extent - high).min(-low)
    } else {
        0.0
    }
}



#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn outline_covers_view(engine: &CropEngine) -> Result<(), TestCaseError> {
        let (width, height) = engine.view_size();
        let bounds = engine.image_outline().unwrap().bounding_rect();
        let tolerance = 1e-6 * width.max(height);
        for (low, high, extent) in [
            (bounds.left, bounds.right, width),
            (bounds.top, bounds.bottom, height),
        ] {
            if high - low >= extent {
                prop_assert!(low <= tolerance, "gap before edge: {:?}", bounds);
                prop_assert!(high >= extent - tolerance, "gap after edge: {:?}", bounds);
            } else {
                prop_assert!(
                    ((low + high) / 2.0 - extent / 2.0).abs() <= tolerance,
                    "small outline off centre: {:?}",
                    bounds
                );
            }
        }
        Ok(())
    }

    fn assert_rect_close(before: Rect, after: Rect, tolerance: f64) -> Result<(), TestCaseError> {
        for (a, b) in [
            (before.left, after.left),
            (before.top, after.top),
            (before.right, after.right),
            (before.bottom, after.bottom),
        ] {
            prop_assert!((a - b).abs() <= tolerance, "{:?} vs {:?}", before, after);
        }
        Ok(())
    }

    fn no_auto_zoom_engine(view: f64, raster_w: u32, raster_h: u32, degrees: i32) -> CropEngine {
        let config = CropConfig {
            auto_zoom_enabled: false,
            ..CropConfig::default()
        };
        let mut engine = CropEngine::new(config).unwrap();
        engine.on_resize(view, view);
        engine
            .set_image_size(RasterSize::new(raster_w, raster_h), 1, degrees)
            .unwrap();
        engine
    }

    proptest! {
        /// Property: no recompute opens a gap between the image and the view
        /// edge along an axis the image covers.
        #[test]
        fn prop_no_gap_after_gestures(
            raster_w in 200u32..3000,
            raster_h in 200u32..3000,
            view_w in 200.0f64..1500.0,
            view_h in 200.0f64..1500.0,
            degrees in 0i32..360,
            factor in 1.0f64..4.0,
            dx in -2000.0f64..2000.0,
            dy in -2000.0f64..2000.0,
            turn in -360i32..360,
            flip_h in any::<bool>(),
            flip_v in any::<bool>(),
            resized_w in 200.0f64..1500.0,
            resized_h in 200.0f64..1500.0,
        ) {
            let mut engine = CropEngine::default();
            engine.on_resize(view_w, view_h);
            engine.set_image_size(RasterSize::new(raster_w, raster_h), 1, degrees).unwrap();
            outline_covers_view(&engine)?;

            engine.pinch(factor, view_w / 3.0, view_h / 3.0);
            outline_covers_view(&engine)?;

            engine.pan_by(dx, dy);
            outline_covers_view(&engine)?;

            engine.rotate(turn);
            outline_covers_view(&engine)?;

            if flip_h {
                engine.flip_horizontally();
                outline_covers_view(&engine)?;
            }
            if flip_v {
                engine.flip_vertically();
                outline_covers_view(&engine)?;
            }

            engine.on_resize(resized_w, resized_h);
            outline_covers_view(&engine)?;

            engine.pan_by(-dx, -dy);
            outline_covers_view(&engine)?;
        }

        /// Property: four quarter turns from any starting angle bring back
        /// the same transform and crop window.
        #[test]
        fn prop_full_turn_is_identity(
            raster_w in 500u32..2000,
            raster_h in 500u32..2000,
            view in 500.0f64..1000.0,
            degrees in 0i32..360,
        ) {
            let mut engine = no_auto_zoom_engine(view, raster_w, raster_h, degrees);
            let matrix = engine.image_matrix();
            let window = engine.crop_window();

            for _ in 0..4 {
                engine.rotate(90);
            }

            prop_assert_eq!(engine.rotated_degrees() as i32, degrees);
            let tolerance = 1e-6 * view;
            for (a, b) in matrix.as_coeffs().iter().zip(engine.image_matrix().as_coeffs()) {
                prop_assert!((a - b).abs() <= tolerance, "{:?} vs {:?}", matrix, engine.image_matrix());
            }
            assert_rect_close(window, engine.crop_window(), tolerance)?;
        }

        /// Property: on an image at any angle, `rotate(360)` and a double
        /// flip leave an edited crop window unchanged.
        #[test]
        fn prop_full_turn_and_double_flip_keep_window(
            raster_w in 800u32..1200,
            raster_h in 800u32..1200,
            degrees in 0i32..360,
            left in 300.0f64..450.0,
            top in 300.0f64..450.0,
            width in 60.0f64..250.0,
            height in 60.0f64..250.0,
        ) {
            let mut engine = no_auto_zoom_engine(1000.0, raster_w, raster_h, degrees);
            engine.on_crop_window_edited(Rect::new(left, top, left + width, top + height), false);
            let window = engine.crop_window();

            engine.rotate(360);
            assert_rect_close(window, engine.crop_window(), 1e-6)?;

            engine.flip_horizontally();
            engine.flip_horizontally();
            assert_rect_close(window, engine.crop_window(), 1e-6)?;

            engine.flip_vertically();
            engine.flip_vertically();
            assert_rect_close(window, engine.crop_window(), 1e-6)?;
        }
    }
}
