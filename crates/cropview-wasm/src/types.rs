//! WASM-compatible wrapper types for crop geometry.
//!
//! Rectangles cross the boundary as small classes with getters; the full
//! animation snapshot is handed over as a plain object through
//! `serde-wasm-bindgen`.

use cropview_core::{IntRect, Rect};
use wasm_bindgen::prelude::*;

/// An integer rectangle in original-resolution image pixels.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsCropRect {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

#[wasm_bindgen]
impl JsCropRect {
    #[wasm_bindgen(constructor)]
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> JsCropRect {
        JsCropRect {
            left,
            top,
            right,
            bottom,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn left(&self) -> i32 {
        self.left
    }

    #[wasm_bindgen(getter)]
    pub fn top(&self) -> i32 {
        self.top
    }

    #[wasm_bindgen(getter)]
    pub fn right(&self) -> i32 {
        self.right
    }

    #[wasm_bindgen(getter)]
    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

impl From<IntRect> for JsCropRect {
    fn from(rect: IntRect) -> Self {
        JsCropRect::new(rect.left, rect.top, rect.right, rect.bottom)
    }
}

impl From<JsCropRect> for IntRect {
    fn from(rect: JsCropRect) -> Self {
        IntRect::new(rect.left, rect.top, rect.right, rect.bottom)
    }
}

/// Flatten a view-space rectangle to `[left, top, right, bottom]`.
pub(crate) fn rect_to_vec(rect: Rect) -> Vec<f64> {
    vec![rect.left, rect.top, rect.right, rect.bottom]
}
