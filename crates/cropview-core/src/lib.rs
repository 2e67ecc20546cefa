//! Cropview Core - crop geometry engine
//!
//! This crate provides the transform and crop-geometry engine behind an
//! interactive crop view: the raster-to-view affine pipeline under
//! rotation, flip, zoom and pan, the auto-zoom policy, and the extraction of
//! an axis-aligned source rectangle from the on-screen crop window.
//!
//! Decoding, drawing and gesture recognition belong to the host. The engine
//! consumes resolved intents and publishes geometry.

pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod overlay;
pub mod raster;
pub mod transform;
pub mod zoom;

pub use config::{AspectRatio, CropConfig, CropSize, ScaleFitMode};
pub use engine::{CropEngine, ReleaseListener, TransformAnimation, TransformSnapshot};
pub use error::CropError;
pub use geometry::{fix_rect_for_aspect_ratio, rect_from_points, IntRect, Point, Quad, Rect};
pub use raster::RasterSize;
pub use transform::{rotated_bounds, Affine};
pub use zoom::ZoomController;
