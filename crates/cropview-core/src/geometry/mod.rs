//! Plain geometry types shared by the transform pipeline and the engine.
//!
//! # Coordinate System
//!
//! - Raster space: native pixels of the source image, origin top-left
//! - View space: pixels of the display surface showing the transformed image
//! - Both spaces use y growing downwards
//!
//! A [`Quad`] is the 4-corner polygon (8 scalars, `x0,y0 .. x3,y3`) that a
//! rectangle becomes after an affine transform. The free functions in
//! [`bounds`] compute axis-aligned bounds over such corner arrays and are
//! correct for any rotation.

pub mod bounds;
mod quad;
mod rect;

pub use bounds::{fix_rect_for_aspect_ratio, rect_from_points};
pub use quad::Quad;
pub use rect::{IntRect, Point, Rect};
