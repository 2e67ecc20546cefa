//! Affine transform pipeline between raster space and view space.
//!
//! # Transform Order
//!
//! The image matrix is rebuilt from the raster's native rectangle on every
//! recompute, post-multiplying in this order:
//! 1. Translate the raster so its centre sits at the view centre
//! 2. Rotate about the outline centre
//! 3. Fit-scale about the outline centre
//! 4. Zoom-scale about the outline centre (negative on flipped axes)
//! 5. Translate by the pan offset
//!
//! Rebuilding instead of incrementally updating keeps the outline free of
//! accumulated floating point drift.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise on screen (y down)
//! - Composition is always in view space

mod matrix;
mod rotation;

pub use matrix::Affine;
pub use rotation::{normalize_degrees, rotated_bounds, swaps_crop_axes};
