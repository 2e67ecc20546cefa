//! WASM bindings for the crop geometry engine.
//!
//! `JsCropEngine` wraps one `CropEngine` per crop view. The host page
//! measures its canvas, decodes pointer input into pan, pinch and handle
//! drags, and draws using the matrix and crop window read back from here.

use crate::types::{rect_to_vec, JsCropRect};
use cropview_core::{
    AspectRatio, CropConfig, CropEngine, CropError, CropSize, RasterSize, Rect, ScaleFitMode,
};
use wasm_bindgen::prelude::*;

fn to_js_error(err: CropError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Parse a fit mode name as used in the config object.
fn parse_scale_fit_mode(name: &str) -> Option<ScaleFitMode> {
    match name {
        "fill" => Some(ScaleFitMode::Fill),
        "shrink-only" => Some(ScaleFitMode::ShrinkOnly),
        "exact" => Some(ScaleFitMode::Exact),
        _ => None,
    }
}

/// Crop view engine for JavaScript.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const engine = new JsCropEngine({ max_zoom: 4 });
/// engine.on_resize(canvas.width, canvas.height);
/// engine.set_image(bitmap.width, bitmap.height, 1, 0);
///
/// // draw with the matrix: [a, b, c, d, e, f]
/// ctx.setTransform(...engine.image_matrix());
///
/// // after a handle drag ends
/// engine.on_crop_window_edited(l, t, r, b, false);
/// const rect = engine.crop_rect();
/// ```
#[wasm_bindgen]
pub struct JsCropEngine {
    inner: CropEngine,
}

#[wasm_bindgen]
impl JsCropEngine {
    /// Create an engine from a config object. Missing fields (or a missing
    /// object) take the defaults.
    ///
    /// # Errors
    /// Returns error if the config cannot be deserialized or is invalid
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsCropEngine, JsValue> {
        let config: CropConfig = if config.is_undefined() || config.is_null() {
            CropConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid crop config: {}", e)))?
        };
        let inner = CropEngine::new(config).map_err(to_js_error)?;
        Ok(JsCropEngine { inner })
    }

    /// Create an engine with the default configuration.
    pub fn with_defaults() -> JsCropEngine {
        JsCropEngine {
            inner: CropEngine::default(),
        }
    }

    /// Load a decoded image by its dimensions.
    ///
    /// # Arguments
    /// * `width`, `height` - Decoded bitmap size
    /// * `sample_size` - Downsampling factor used when decoding (1 = full size)
    /// * `degrees` - Initial clockwise rotation
    pub fn set_image(
        &mut self,
        width: u32,
        height: u32,
        sample_size: u32,
        degrees: i32,
    ) -> Result<(), JsValue> {
        self.inner
            .set_image_size(RasterSize::new(width, height), sample_size, degrees)
            .map_err(to_js_error)
    }

    pub fn clear_image(&mut self) {
        self.inner.clear_image();
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    /// The canvas was laid out at a new size.
    pub fn on_resize(&mut self, width: f64, height: f64) {
        self.inner.on_resize(width, height);
    }

    /// Rotate clockwise by `degrees` (negative = counter-clockwise).
    pub fn rotate(&mut self, degrees: i32) {
        self.inner.rotate(degrees);
    }

    pub fn set_rotated_degrees(&mut self, degrees: i32) {
        self.inner.set_rotated_degrees(degrees);
    }

    pub fn flip_horizontally(&mut self) {
        self.inner.flip_horizontally();
    }

    pub fn flip_vertically(&mut self) {
        self.inner.flip_vertically();
    }

    /// A crop window handle was dragged to the given view rectangle.
    ///
    /// Pass `in_progress = true` while the pointer is down and `false` on
    /// release; only the release runs auto-zoom and fires the listener.
    pub fn on_crop_window_edited(
        &mut self,
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
        in_progress: bool,
    ) {
        self.inner
            .on_crop_window_edited(Rect::new(left, top, right, bottom), in_progress);
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.inner.pan_by(dx, dy);
    }

    pub fn pinch(&mut self, scale_factor: f64, focal_x: f64, focal_y: f64) {
        self.inner.pinch(scale_factor, focal_x, focal_y);
    }

    /// Start the crop window from a rectangle in original image pixels.
    pub fn set_crop_rect_hint(&mut self, left: i32, top: i32, right: i32, bottom: i32) {
        self.inner
            .set_crop_rect_hint(Some(JsCropRect::new(left, top, right, bottom).into()));
    }

    pub fn clear_crop_rect_hint(&mut self) {
        self.inner.set_crop_rect_hint(None);
    }

    pub fn reset_crop_rect(&mut self) {
        self.inner.reset_crop_rect();
    }

    /// Register a callback fired with a `JsCropRect` when an edit is
    /// released.
    pub fn set_on_release(&mut self, callback: js_sys::Function) {
        self.inner.set_release_listener(move |rect| {
            let arg = JsValue::from(JsCropRect::from(rect));
            if let Err(err) = callback.call1(&JsValue::NULL, &arg) {
                web_sys::console::error_1(&err);
            }
        });
    }

    pub fn clear_on_release(&mut self) {
        self.inner.clear_release_listener();
    }

    // ---------------------------------------------------------------------
    // Configuration
    // ---------------------------------------------------------------------

    /// Set the fit mode: `"fill"`, `"shrink-only"` or `"exact"`.
    pub fn set_scale_fit_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode = parse_scale_fit_mode(mode)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown scale fit mode: {}", mode)))?;
        self.inner.set_scale_fit_mode(mode);
        Ok(())
    }

    pub fn set_auto_zoom_enabled(&mut self, enabled: bool) {
        self.inner.set_auto_zoom_enabled(enabled);
    }

    pub fn set_max_zoom(&mut self, max_zoom: f64) -> Result<(), JsValue> {
        self.inner.set_max_zoom(max_zoom).map_err(to_js_error)
    }

    pub fn set_fixed_aspect_ratio(&mut self, x: u32, y: u32) -> Result<(), JsValue> {
        self.inner
            .set_fixed_aspect_ratio(Some(AspectRatio::new(x, y)))
            .map_err(to_js_error)
    }

    pub fn clear_aspect_ratio(&mut self) {
        self.inner.clear_aspect_ratio();
    }

    pub fn set_snap_radius(&mut self, radius: f64) -> Result<(), JsValue> {
        self.inner.set_snap_radius(radius).map_err(to_js_error)
    }

    pub fn set_min_crop_result_size(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        self.inner
            .set_min_crop_result_size(CropSize::new(width, height))
            .map_err(to_js_error)
    }

    pub fn set_max_crop_result_size(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        self.inner
            .set_max_crop_result_size(CropSize::new(width, height))
            .map_err(to_js_error)
    }

    // ---------------------------------------------------------------------
    // Outbound state
    // ---------------------------------------------------------------------

    /// Raster-to-canvas matrix as `[a, b, c, d, e, f]`, ready for
    /// `CanvasRenderingContext2D.setTransform`.
    pub fn image_matrix(&self) -> Vec<f64> {
        self.inner.image_matrix().as_coeffs().to_vec()
    }

    /// Image outline corners `[x0, y0, ... x3, y3]` in canvas space, empty
    /// without an image.
    pub fn image_outline(&self) -> Vec<f64> {
        self.inner
            .image_outline()
            .map(|quad| quad.points.to_vec())
            .unwrap_or_default()
    }

    /// Crop window `[left, top, right, bottom]` in canvas space.
    pub fn crop_window(&self) -> Vec<f64> {
        rect_to_vec(self.inner.crop_window())
    }

    /// The crop as a straight rectangle in original image pixels.
    pub fn crop_rect(&self) -> Option<JsCropRect> {
        self.inner.crop_rect().map(JsCropRect::from)
    }

    /// The crop window corners in original image pixels, empty without an
    /// image.
    pub fn crop_points(&self) -> Vec<f64> {
        self.inner
            .crop_points()
            .map(|quad| quad.points.to_vec())
            .unwrap_or_default()
    }

    pub fn whole_image_rect(&self) -> Option<JsCropRect> {
        self.inner.whole_image_rect().map(JsCropRect::from)
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.inner.zoom()
    }

    #[wasm_bindgen(getter)]
    pub fn rotated_degrees(&self) -> u32 {
        self.inner.rotated_degrees()
    }

    #[wasm_bindgen(getter)]
    pub fn flipped_horizontally(&self) -> bool {
        self.inner.is_flipped_horizontally()
    }

    #[wasm_bindgen(getter)]
    pub fn flipped_vertically(&self) -> bool {
        self.inner.is_flipped_vertically()
    }

    #[wasm_bindgen(getter)]
    pub fn is_animating(&self) -> bool {
        self.inner.is_animating()
    }

    /// Take the pending `{ start, end }` animation, or `null`.
    ///
    /// Each end holds `matrix`, `outline` and `crop_window`. The engine is
    /// already at `end`; play the tween and carry on.
    pub fn take_animation(&mut self) -> Result<JsValue, JsValue> {
        match self.inner.take_animation() {
            Some(animation) => serde_wasm_bindgen::to_value(&animation)
                .map_err(|e| JsValue::from_str(&format!("Failed to serialize animation: {}", e))),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn finish_animation(&mut self) {
        self.inner.finish_animation();
    }
}
