//! Four-corner polygon produced by transforming a rectangle.

use serde::{Deserialize, Serialize};

use super::bounds;
use super::{Point, Rect};

/// Corners `x0,y0,x1,y1,x2,y2,x3,y3` of a transformed rectangle.
///
/// For the image outline the corners are, before any transform, the raster's
/// top-left, top-right, bottom-right and bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Quad {
    pub points: [f64; 8],
}

impl Quad {
    pub fn new(points: [f64; 8]) -> Self {
        Self { points }
    }

    /// Corners of an untransformed rectangle.
    pub fn from_rect(rect: &Rect) -> Self {
        Self::new(rect.corners())
    }

    /// Corners of the raster's native `(0,0)-(width,height)` rectangle.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::from_rect(&Rect::from_size(width, height))
    }

    /// The `i`-th corner (0..4).
    pub fn corner(&self, i: usize) -> Point {
        Point::new(self.points[i * 2], self.points[i * 2 + 1])
    }

    pub fn left(&self) -> f64 {
        bounds::rect_left(&self.points)
    }

    pub fn top(&self) -> f64 {
        bounds::rect_top(&self.points)
    }

    pub fn right(&self) -> f64 {
        bounds::rect_right(&self.points)
    }

    pub fn bottom(&self) -> f64 {
        bounds::rect_bottom(&self.points)
    }

    pub fn width(&self) -> f64 {
        bounds::rect_width(&self.points)
    }

    pub fn height(&self) -> f64 {
        bounds::rect_height(&self.points)
    }

    pub fn center_x(&self) -> f64 {
        bounds::rect_center_x(&self.points)
    }

    pub fn center_y(&self) -> f64 {
        bounds::rect_center_y(&self.points)
    }

    /// Axis-aligned bounding rectangle of the corners.
    pub fn bounding_rect(&self) -> Rect {
        Rect::new(self.left(), self.top(), self.right(), self.bottom())
    }

    /// Multiply every coordinate by a scalar.
    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.points {
            *v *= factor;
        }
    }
}

impl From<Quad> for [f64; 8] {
    fn from(quad: Quad) -> Self {
        quad.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_size_corner_order() {
        let q = Quad::from_size(200.0, 100.0);
        assert_eq!(q.corner(0), Point::new(0.0, 0.0));
        assert_eq!(q.corner(1), Point::new(200.0, 0.0));
        assert_eq!(q.corner(2), Point::new(200.0, 100.0));
        assert_eq!(q.corner(3), Point::new(0.0, 100.0));
    }

    #[test]
    fn test_bounding_rect() {
        let q = Quad::new([5.0, 0.0, 10.0, 5.0, 5.0, 10.0, 0.0, 5.0]);
        assert_eq!(q.bounding_rect(), Rect::from_size(10.0, 10.0));
        assert_eq!(q.center_x(), 5.0);
        assert_eq!(q.center_y(), 5.0);
    }

    #[test]
    fn test_scale() {
        let mut q = Quad::from_size(10.0, 20.0);
        q.scale(2.0);
        assert_eq!(q.bounding_rect(), Rect::from_size(20.0, 40.0));
    }
}
