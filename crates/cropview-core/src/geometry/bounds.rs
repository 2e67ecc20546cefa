//! Bounding-box queries over 4-corner point arrays.
//!
//! Every function takes the corners as `x0,y0,x1,y1,x2,y2,x3,y3` and reduces
//! them with min/max, so the results stay correct when the quad is rotated
//! and no longer axis-aligned.

use super::IntRect;
use crate::config::AspectRatio;

/// Left edge of the bounding rectangle of the given points.
#[inline]
pub fn rect_left(points: &[f64; 8]) -> f64 {
    points[0].min(points[2]).min(points[4]).min(points[6])
}

/// Top edge of the bounding rectangle of the given points.
#[inline]
pub fn rect_top(points: &[f64; 8]) -> f64 {
    points[1].min(points[3]).min(points[5]).min(points[7])
}

/// Right edge of the bounding rectangle of the given points.
#[inline]
pub fn rect_right(points: &[f64; 8]) -> f64 {
    points[0].max(points[2]).max(points[4]).max(points[6])
}

/// Bottom edge of the bounding rectangle of the given points.
#[inline]
pub fn rect_bottom(points: &[f64; 8]) -> f64 {
    points[1].max(points[3]).max(points[5]).max(points[7])
}

#[inline]
pub fn rect_width(points: &[f64; 8]) -> f64 {
    rect_right(points) - rect_left(points)
}

#[inline]
pub fn rect_height(points: &[f64; 8]) -> f64 {
    rect_bottom(points) - rect_top(points)
}

#[inline]
pub fn rect_center_x(points: &[f64; 8]) -> f64 {
    (rect_right(points) + rect_left(points)) / 2.0
}

#[inline]
pub fn rect_center_y(points: &[f64; 8]) -> f64 {
    (rect_bottom(points) + rect_top(points)) / 2.0
}

/// Integer rectangle that contains the 4 points, clamped to the image.
///
/// The points may describe a rotated quad (when the image was rotated by an
/// angle that is not a multiple of 90°), in which case the result is the
/// straight rectangle around them and therefore larger than the quad.
///
/// When `fixed_aspect` is set only the 1:1 ratio is enforced: the longer side
/// is trimmed from its right or bottom edge, left/top never move. Other
/// fixed ratios pass through unchanged, see [`fix_rect_for_aspect_ratio`].
pub fn rect_from_points(
    points: &[f64; 8],
    image_width: u32,
    image_height: u32,
    fixed_aspect: Option<AspectRatio>,
) -> IntRect {
    let left = rect_left(points).max(0.0).round() as i32;
    let top = rect_top(points).max(0.0).round() as i32;
    let right = rect_right(points).min(image_width as f64).round() as i32;
    let bottom = rect_bottom(points).min(image_height as f64).round() as i32;

    let mut rect = IntRect::new(left, top, right, bottom);
    if let Some(aspect) = fixed_aspect {
        fix_rect_for_aspect_ratio(&mut rect, aspect);
    }
    rect
}

/// Make a rectangle square when a 1:1 fixed aspect ratio is requested.
///
/// Only the square case is defined. For any other ratio the rectangle is
/// left untouched: callers receive the bounding rectangle as-is.
pub fn fix_rect_for_aspect_ratio(rect: &mut IntRect, aspect: AspectRatio) {
    if !aspect.is_square() || rect.width() == rect.height() {
        return;
    }
    if rect.height() > rect.width() {
        rect.bottom -= rect.height() - rect.width();
    } else {
        rect.right -= rect.width() - rect.height();
    }
}
