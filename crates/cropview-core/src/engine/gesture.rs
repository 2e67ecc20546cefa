//! Pan and pinch intents.
//!
//! The host decodes raw pointer input; these entry points only take the
//! resolved deltas. The crop window rides along with the image, so both
//! gestures keep it on screen and keep the view covered.

use log::trace;

use super::{CropEngine, OffsetMode};
use crate::geometry::Point;

impl CropEngine {
    /// Move the image by `(dx, dy)` view units.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if self.raster.is_none() || !self.has_valid_view() {
            return;
        }
        self.finish_animation();
        let (scale_x, scale_y) = self.signed_zoom();
        self.zoom_offset_x += dx / scale_x;
        self.zoom_offset_y += dy / scale_y;
        self.apply_image_matrix(OffsetMode::KeepCropVisible);
        trace!("pan by ({dx:.1}, {dy:.1})");
    }

    /// Multiply the zoom by `scale_factor`, keeping the image point under
    /// `(focal_x, focal_y)` in place as far as the pan limits allow.
    pub fn pinch(&mut self, scale_factor: f64, focal_x: f64, focal_y: f64) {
        if self.raster.is_none() || !self.has_valid_view() {
            return;
        }
        if !(scale_factor.is_finite() && scale_factor > 0.0) {
            trace!("pinch ignored: scale factor {scale_factor}");
            return;
        }
        let Some(inverse) = self.inverse() else {
            return;
        };
        self.finish_animation();

        let focal = Point::new(focal_x, focal_y);
        let anchor = inverse.map_point(focal);
        let zoom = (self.zoom * scale_factor).clamp(1.0, self.config.max_zoom);
        if zoom == self.zoom {
            return;
        }
        self.zoom = zoom;
        self.apply_image_matrix(OffsetMode::KeepCropVisible);

        let landed = self.matrix.map_point(anchor);
        let (scale_x, scale_y) = self.signed_zoom();
        self.zoom_offset_x += (focal.x - landed.x) / scale_x;
        self.zoom_offset_y += (focal.y - landed.y) / scale_y;
        self.apply_image_matrix(OffsetMode::KeepCropVisible);
        self.overlay.fix_current_rect();
        trace!("pinch to zoom {zoom:.3} at ({focal_x:.1}, {focal_y:.1})");
    }
}
