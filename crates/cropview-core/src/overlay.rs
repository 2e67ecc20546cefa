//! Engine-side model of the crop window.
//!
//! The host draws the window and decodes handle drags; this type holds the
//! rectangle those edits produce together with the rules they must obey:
//! size limits derived from the crop result limits, snapping to the image
//! edges, staying on the image, and the fixed aspect ratio.

use crate::config::{AspectRatio, CropConfig, CropSize};
use crate::geometry::{Quad, Rect};

/// Crop window state and constraints, all in view space.
#[derive(Debug, Clone)]
pub struct CropOverlay {
    rect: Rect,
    bounds: Option<Quad>,
    view_width: f64,
    view_height: f64,
    initial_rect: Option<Rect>,
    fixed_aspect: Option<AspectRatio>,
    snap_radius: f64,
    padding_ratio: f64,
    min_window_size: f64,
    min_result: CropSize,
    max_result: CropSize,
    /// Original-resolution raster pixels per view unit
    scale_factor_width: f64,
    scale_factor_height: f64,
}

impl CropOverlay {
    pub fn new(config: &CropConfig) -> Self {
        Self {
            rect: Rect::ZERO,
            bounds: None,
            view_width: 0.0,
            view_height: 0.0,
            initial_rect: None,
            fixed_aspect: config.fixed_aspect_ratio,
            snap_radius: config.snap_radius,
            padding_ratio: config.initial_padding_ratio,
            min_window_size: config.min_crop_window_size,
            min_result: config.min_crop_result_size,
            max_result: config.max_crop_result_size,
            scale_factor_width: 1.0,
            scale_factor_height: 1.0,
        }
    }

    /// Pick up changed constraints. The window itself is not touched.
    pub fn apply_config(&mut self, config: &CropConfig) {
        self.fixed_aspect = config.fixed_aspect_ratio;
        self.snap_radius = config.snap_radius;
        self.padding_ratio = config.initial_padding_ratio;
        self.min_window_size = config.min_crop_window_size;
        self.min_result = config.min_crop_result_size;
        self.max_result = config.max_crop_result_size;
    }

    /// The crop window in view space.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    /// The image outline the window is constrained to.
    pub fn bounds(&self) -> Option<&Quad> {
        self.bounds.as_ref()
    }

    /// Set the initial window (view space) used by the next [`reset`](Self::reset).
    pub fn set_initial_rect(&mut self, rect: Option<Rect>) {
        self.initial_rect = rect.filter(|r| !r.is_empty());
    }

    /// Update the raster-per-view scale factors used to turn crop result
    /// limits into window limits.
    pub fn set_window_limits(
        &mut self,
        view_width: f64,
        view_height: f64,
        scale_factor_width: f64,
        scale_factor_height: f64,
    ) {
        self.view_width = view_width;
        self.view_height = view_height;
        self.scale_factor_width = scale_factor_width;
        self.scale_factor_height = scale_factor_height;
    }

    /// Store the image outline; an empty window is initialized from it.
    pub fn set_bounds(&mut self, bounds: Option<Quad>, view_width: f64, view_height: f64) {
        self.view_width = view_width;
        self.view_height = view_height;
        self.bounds = bounds;
        if self.bounds.is_some() && self.rect.is_empty() {
            self.init_crop_window();
        }
    }

    /// Throw the window away and build the default one again.
    pub fn reset(&mut self) {
        self.rect = Rect::ZERO;
        if self.bounds.is_some() {
            self.init_crop_window();
        }
    }

    pub fn min_crop_width(&self) -> f64 {
        let min = self
            .min_window_size
            .max(self.min_result.width as f64 / self.scale_factor_width);
        min.min(self.max_crop_width())
    }

    pub fn min_crop_height(&self) -> f64 {
        let min = self
            .min_window_size
            .max(self.min_result.height as f64 / self.scale_factor_height);
        min.min(self.max_crop_height())
    }

    pub fn max_crop_width(&self) -> f64 {
        (self.max_result.width as f64 / self.scale_factor_width).min(self.view_width)
    }

    pub fn max_crop_height(&self) -> f64 {
        (self.max_result.height as f64 / self.scale_factor_height).min(self.view_height)
    }

    /// Accept a user edit: snap to the image edges, apply the size limits
    /// and keep the window on the image. The window may extend past the
    /// view; the engine slides the image to follow it.
    pub fn constrain_edit(&mut self, rect: Rect) -> Rect {
        let mut rect = rect;
        if let Some(image) = self.bounds.map(|b| b.bounding_rect()) {
            self.snap_to(&mut rect, &image);
            self.enforce_size_limits(&mut rect);
            clip_edges(&mut rect, &image);
        } else {
            self.enforce_size_limits(&mut rect);
        }
        self.enforce_aspect(&mut rect);
        self.rect = rect;
        rect
    }

    /// Bring the current window back inside the visible part of the image,
    /// preferring to move it over shrinking it.
    pub fn fix_current_rect(&mut self) {
        let mut rect = self.rect;
        self.enforce_size_limits(&mut rect);
        if let Some(visible) = self.visible_bounds() {
            shift_inside(&mut rect, &visible);
            clip_edges(&mut rect, &visible);
        }
        self.enforce_aspect(&mut rect);
        self.rect = rect;
    }

    /// Bounding box of the outline intersected with the view.
    pub fn visible_bounds(&self) -> Option<Rect> {
        let image = self.bounds?.bounding_rect();
        image.intersect(&Rect::from_size(self.view_width, self.view_height))
    }

    fn init_crop_window(&mut self) {
        let Some(visible) = self.visible_bounds() else {
            return;
        };

        if let Some(initial) = self.initial_rect {
            self.rect = initial;
            self.fix_current_rect();
            return;
        }

        let h_pad = self.padding_ratio * visible.width();
        let v_pad = self.padding_ratio * visible.height();
        let mut rect = Rect::new(
            visible.left + h_pad,
            visible.top + v_pad,
            visible.right - h_pad,
            visible.bottom - v_pad,
        );

        if let Some(aspect) = self.fixed_aspect {
            let target = aspect.ratio();
            let center = visible.center();
            if visible.width() / visible.height() > target {
                let half = (rect.height() * target).max(self.min_crop_width()) / 2.0;
                rect.left = center.x - half;
                rect.right = center.x + half;
            } else {
                let half = (rect.width() / target).max(self.min_crop_height()) / 2.0;
                rect.top = center.y - half;
                rect.bottom = center.y + half;
            }
        }

        self.rect = rect;
        self.fix_current_rect();
    }

    fn snap_to(&self, rect: &mut Rect, image: &Rect) {
        let r = self.snap_radius;
        if (rect.left - image.left).abs() < r {
            rect.left = image.left;
        }
        if (rect.top - image.top).abs() < r {
            rect.top = image.top;
        }
        if (rect.right - image.right).abs() < r {
            rect.right = image.right;
        }
        if (rect.bottom - image.bottom).abs() < r {
            rect.bottom = image.bottom;
        }
    }

    fn enforce_size_limits(&self, rect: &mut Rect) {
        let (cx, cy) = (rect.center_x(), rect.center_y());
        let (min_w, min_h) = (self.min_crop_width(), self.min_crop_height());
        let width = rect.width().clamp(min_w, self.max_crop_width().max(min_w));
        let height = rect.height().clamp(min_h, self.max_crop_height().max(min_h));
        if width != rect.width() {
            rect.left = cx - width / 2.0;
            rect.right = cx + width / 2.0;
        }
        if height != rect.height() {
            rect.top = cy - height / 2.0;
            rect.bottom = cy + height / 2.0;
        }
    }

    /// Shrink the longer side around the centre until the ratio holds.
    fn enforce_aspect(&self, rect: &mut Rect) {
        let Some(aspect) = self.fixed_aspect else {
            return;
        };
        if rect.is_empty() {
            return;
        }
        let target = aspect.ratio();
        let current = rect.width() / rect.height();
        if (current - target).abs() < 1e-9 {
            return;
        }
        if current > target {
            let half = rect.height() * target / 2.0;
            let cx = rect.center_x();
            rect.left = cx - half;
            rect.right = cx + half;
        } else {
            let half = rect.width() / target / 2.0;
            let cy = rect.center_y();
            rect.top = cy - half;
            rect.bottom = cy + half;
        }
    }
}

/// Move `rect` so it lies in `bounds` along every axis where it fits.
fn shift_inside(rect: &mut Rect, bounds: &Rect) {
    if rect.width() <= bounds.width() {
        if rect.left < bounds.left {
            rect.offset(bounds.left - rect.left, 0.0);
        } else if rect.right > bounds.right {
            rect.offset(bounds.right - rect.right, 0.0);
        }
    }
    if rect.height() <= bounds.height() {
        if rect.top < bounds.top {
            rect.offset(0.0, bounds.top - rect.top);
        } else if rect.bottom > bounds.bottom {
            rect.offset(0.0, bounds.bottom - rect.bottom);
        }
    }
}

/// Cut every edge that sticks out of `bounds`.
fn clip_edges(rect: &mut Rect, bounds: &Rect) {
    rect.left = rect.left.max(bounds.left);
    rect.top = rect.top.max(bounds.top);
    rect.right = rect.right.min(bounds.right);
    rect.bottom = rect.bottom.min(bounds.bottom);
}
