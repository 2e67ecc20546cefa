//! Rectangle and point primitives.

use serde::{Deserialize, Serialize};

/// A point in raster or view space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Axis-aligned floating point rectangle given by its edges.
///
/// Edges are not normalized: a rectangle with `right < left` is considered
/// empty rather than flipped.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle anchored at the origin with the given size.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Rectangle of the given half extents around a centre point.
    pub fn from_center(center: Point, half_width: f64, half_height: f64) -> Self {
        Self::new(
            center.x - half_width,
            center.y - half_height,
            center.x + half_width,
            center.y + half_height,
        )
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    #[inline]
    pub fn center_x(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    /// True when the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// Translate all edges by the given delta.
    pub fn offset(&mut self, dx: f64, dy: f64) {
        self.left += dx;
        self.right += dx;
        self.top += dy;
        self.bottom += dy;
    }

    /// Copy of this rectangle translated by the given delta.
    pub fn offset_by(mut self, dx: f64, dy: f64) -> Self {
        self.offset(dx, dy);
        self
    }

    /// Intersection with another rectangle, or `None` when they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let r = Rect::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        );
        (!r.is_empty()).then_some(r)
    }

    /// True when `other` lies fully inside this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }

    /// The 4 corners in clockwise order starting at the top-left,
    /// as `x0,y0,x1,y1,x2,y2,x3,y3`.
    pub fn corners(&self) -> [f64; 8] {
        [
            self.left,
            self.top,
            self.right,
            self.top,
            self.right,
            self.bottom,
            self.left,
            self.bottom,
        ]
    }

    /// Divide every edge by a scalar (used to convert original-resolution
    /// coordinates into decoded-raster coordinates).
    pub fn scaled(&self, factor: f64) -> Rect {
        Rect::new(
            self.left * factor,
            self.top * factor,
            self.right * factor,
            self.bottom * factor,
        )
    }
}

/// Integer rectangle in raster space, as returned to hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IntRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl IntRect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn to_rect(self) -> Rect {
        Rect::new(
            self.left as f64,
            self.top as f64,
            self.right as f64,
            self.bottom as f64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_dimensions() {
        let r = Rect::new(10.0, 20.0, 110.0, 70.0);
        assert_eq!(r.width(), 100.0);
        assert_eq!(r.height(), 50.0);
        assert_eq!(r.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn test_rect_empty() {
        assert!(Rect::ZERO.is_empty());
        assert!(Rect::new(10.0, 0.0, 5.0, 10.0).is_empty());
        assert!(!Rect::from_size(1.0, 1.0).is_empty());
    }

    #[test]
    fn test_rect_offset() {
        let r = Rect::from_size(10.0, 10.0).offset_by(5.0, -5.0);
        assert_eq!(r, Rect::new(5.0, -5.0, 15.0, 5.0));
    }

    #[test]
    fn test_rect_intersect() {
        let a = Rect::from_size(100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 150.0, 150.0);
        assert_eq!(a.intersect(&b), Some(Rect::new(50.0, 50.0, 100.0, 100.0)));

        let c = Rect::new(200.0, 200.0, 300.0, 300.0);
        assert_eq!(a.intersect(&c), None);
    }

    #[test]
    fn test_rect_from_center() {
        let r = Rect::from_center(Point::new(50.0, 50.0), 10.0, 20.0);
        assert_eq!(r, Rect::new(40.0, 30.0, 60.0, 70.0));
    }

    #[test]
    fn test_int_rect_dimensions() {
        let r = IntRect::new(0, 0, 2000, 1000);
        assert_eq!(r.width(), 2000);
        assert_eq!(r.height(), 1000);
        assert_eq!(r.to_rect(), Rect::from_size(2000.0, 1000.0));
    }

    #[test]
    fn test_point_distance() {
        assert_eq!(Point::ORIGIN.distance(Point::new(3.0, 4.0)), 5.0);
    }
}
