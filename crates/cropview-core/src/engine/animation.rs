//! Start/end state handed to an external animator.
//!
//! The engine never interpolates. When auto-zoom changes the transform it
//! records where the transform started and where it ended; the host tweens
//! between them however it likes. The engine's own state is always the end
//! snapshot.

use serde::{Deserialize, Serialize};

use crate::geometry::{Quad, Rect};
use crate::transform::Affine;

/// Everything the host needs to draw one frame of the crop view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformSnapshot {
    pub matrix: Affine,
    pub outline: Quad,
    pub crop_window: Rect,
}

/// A transform change the host may animate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformAnimation {
    pub start: TransformSnapshot,
    pub end: TransformSnapshot,
}
