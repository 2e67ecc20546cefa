//! 2D affine matrix with post-multiplying composition.

use serde::{Deserialize, Serialize};

use crate::error::CropError;
use crate::geometry::{Point, Quad, Rect};

/// Determinants smaller than this are treated as singular.
const SINGULAR_EPSILON: f64 = 1e-12;

/// A 2×3 affine matrix.
///
/// Coefficients follow the `[a b c d e f]` convention:
///
/// ```text
/// x' = a * x + c * y + e
/// y' = b * x + d * y + f
/// ```
///
/// The composing methods (`translate`, `rotate_about`, `scale_about`) apply
/// the new operation *after* the existing transform, so a chain of calls
/// reads in the order the operations happen to a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Affine {
    coeffs: [f64; 6],
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        coeffs: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    pub fn new(coeffs: [f64; 6]) -> Self {
        Self { coeffs }
    }

    /// The raw `[a b c d e f]` coefficients.
    pub fn as_coeffs(&self) -> [f64; 6] {
        self.coeffs
    }

    /// Reset to identity.
    pub fn reset(&mut self) {
        *self = Self::IDENTITY;
    }

    pub fn determinant(&self) -> f64 {
        let [a, b, c, d, _, _] = self.coeffs;
        a * d - b * c
    }

    /// `other ∘ self`: apply `self` first, then `other`.
    pub fn then(&self, other: &Affine) -> Affine {
        let [a, b, c, d, e, f] = self.coeffs;
        let [oa, ob, oc, od, oe, of] = other.coeffs;
        Affine::new([
            oa * a + oc * b,
            ob * a + od * b,
            oa * c + oc * d,
            ob * c + od * d,
            oa * e + oc * f + oe,
            ob * e + od * f + of,
        ])
    }

    /// Post-translate by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) -> &mut Self {
        *self = self.then(&Affine::new([1.0, 0.0, 0.0, 1.0, dx, dy]));
        self
    }

    /// Post-rotate clockwise by `degrees` about `(cx, cy)`.
    pub fn rotate_about(&mut self, degrees: f64, cx: f64, cy: f64) -> &mut Self {
        let (sin, cos) = sin_cos_degrees(degrees);
        let rotation = Affine::new([
            cos,
            sin,
            -sin,
            cos,
            cx - cos * cx + sin * cy,
            cy - sin * cx - cos * cy,
        ]);
        *self = self.then(&rotation);
        self
    }

    /// Post-scale by `(sx, sy)` about `(cx, cy)`.
    pub fn scale_about(&mut self, sx: f64, sy: f64, cx: f64, cy: f64) -> &mut Self {
        let scale = Affine::new([sx, 0.0, 0.0, sy, cx - sx * cx, cy - sy * cy]);
        *self = self.then(&scale);
        self
    }

    /// The inverse transform.
    ///
    /// # Errors
    ///
    /// Returns `CropError::SingularMatrix` when the determinant is zero or
    /// not finite, which cannot happen while zoom and fit scale stay > 0.
    pub fn invert(&self) -> Result<Affine, CropError> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
            return Err(CropError::SingularMatrix);
        }
        let [a, b, c, d, e, f] = self.coeffs;
        Ok(Affine::new([
            d / det,
            -b / det,
            -c / det,
            a / det,
            (c * f - d * e) / det,
            (b * e - a * f) / det,
        ]))
    }

    pub fn map_point(&self, p: Point) -> Point {
        let [a, b, c, d, e, f] = self.coeffs;
        Point::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }

    /// Map `x,y` pairs in place. A trailing odd scalar is left untouched.
    pub fn map_points(&self, points: &mut [f64]) {
        for pair in points.chunks_exact_mut(2) {
            let mapped = self.map_point(Point::new(pair[0], pair[1]));
            pair[0] = mapped.x;
            pair[1] = mapped.y;
        }
    }

    pub fn map_quad(&self, quad: &Quad) -> Quad {
        let mut out = *quad;
        self.map_points(&mut out.points);
        out
    }

    /// Bounding rectangle of the mapped corners of `rect`.
    pub fn map_rect(&self, rect: &Rect) -> Rect {
        self.map_quad(&Quad::from_rect(rect)).bounding_rect()
    }
}

/// Sine and cosine of an angle in degrees, exact on multiples of 90°.
fn sin_cos_degrees(degrees: f64) -> (f64, f64) {
    let normalized = degrees.rem_euclid(360.0);
    if normalized == 0.0 {
        (0.0, 1.0)
    } else if normalized == 90.0 {
        (1.0, 0.0)
    } else if normalized == 180.0 {
        (0.0, -1.0)
    } else if normalized == 270.0 {
        (-1.0, 0.0)
    } else {
        normalized.to_radians().sin_cos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_point_eq(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_identity() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(Affine::IDENTITY.map_point(p), p);
    }

    #[test]
    fn test_translate() {
        let mut m = Affine::IDENTITY;
        m.translate(10.0, -5.0);
        assert_eq!(m.map_point(Point::new(1.0, 1.0)), Point::new(11.0, -4.0));
    }

    #[test]
    fn test_rotate_90_clockwise() {
        let mut m = Affine::IDENTITY;
        m.rotate_about(90.0, 0.0, 0.0);
        // +x axis turns into +y (down) on screen
        assert_eq!(m.map_point(Point::new(1.0, 0.0)), Point::new(0.0, 1.0));
        assert_eq!(m.map_point(Point::new(0.0, 1.0)), Point::new(-1.0, 0.0));
    }

    #[test]
    fn test_rotate_about_center_keeps_center() {
        let mut m = Affine::IDENTITY;
        m.rotate_about(37.0, 50.0, 25.0);
        assert_point_eq(m.map_point(Point::new(50.0, 25.0)), Point::new(50.0, 25.0));
    }

    #[test]
    fn test_scale_about() {
        let mut m = Affine::IDENTITY;
        m.scale_about(2.0, -1.0, 10.0, 10.0);
        assert_eq!(m.map_point(Point::new(10.0, 10.0)), Point::new(10.0, 10.0));
        assert_eq!(m.map_point(Point::new(20.0, 20.0)), Point::new(30.0, 0.0));
    }

    #[test]
    fn test_composition_order() {
        // translate then scale about the origin doubles the translation
        let mut m = Affine::IDENTITY;
        m.translate(5.0, 0.0).scale_about(2.0, 2.0, 0.0, 0.0);
        assert_eq!(m.map_point(Point::ORIGIN), Point::new(10.0, 0.0));
    }

    #[test]
    fn test_invert_round_trip() {
        let mut m = Affine::IDENTITY;
        m.translate(100.0, 50.0)
            .rotate_about(30.0, 120.0, 80.0)
            .scale_about(-1.5, 2.0, 120.0, 80.0);
        let inv = m.invert().unwrap();
        let p = Point::new(12.5, -7.25);
        assert_point_eq(inv.map_point(m.map_point(p)), p);
    }

    #[test]
    fn test_invert_singular() {
        let mut m = Affine::IDENTITY;
        m.scale_about(0.0, 1.0, 0.0, 0.0);
        assert!(matches!(m.invert(), Err(CropError::SingularMatrix)));
    }

    #[test]
    fn test_map_rect_rotated_is_bounding_box() {
        let mut m = Affine::IDENTITY;
        m.rotate_about(90.0, 0.0, 0.0);
        let r = m.map_rect(&Rect::from_size(200.0, 100.0));
        assert_eq!(r, Rect::new(-100.0, 0.0, 0.0, 200.0));
    }

    #[test]
    fn test_map_points_in_place() {
        let mut m = Affine::IDENTITY;
        m.translate(1.0, 2.0);
        let mut pts = [0.0, 0.0, 10.0, 10.0];
        m.map_points(&mut pts);
        assert_eq!(pts, [1.0, 2.0, 11.0, 12.0]);
    }

    #[test]
    fn test_reset() {
        let mut m = Affine::IDENTITY;
        m.translate(1.0, 1.0);
        m.reset();
        assert_eq!(m, Affine::IDENTITY);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn transform_strategy() -> impl Strategy<Value = Affine> {
        (
            -500.0f64..500.0,
            -500.0f64..500.0,
            0.0f64..360.0,
            0.1f64..10.0,
            0.1f64..10.0,
            any::<bool>(),
            any::<bool>(),
        )
            .prop_map(|(tx, ty, deg, sx, sy, flip_x, flip_y)| {
                let mut m = Affine::IDENTITY;
                m.translate(tx, ty)
                    .rotate_about(deg, tx, ty)
                    .scale_about(
                        if flip_x { -sx } else { sx },
                        if flip_y { -sy } else { sy },
                        tx,
                        ty,
                    );
                m
            })
    }

    proptest! {
        /// Property: mapping through the inverse restores the original point.
        #[test]
        fn prop_inverse_round_trip(
            m in transform_strategy(),
            x in -2000.0f64..2000.0,
            y in -2000.0f64..2000.0,
        ) {
            let inv = m.invert().unwrap();
            let p = Point::new(x, y);
            let back = inv.map_point(m.map_point(p));
            prop_assert!((back.x - x).abs() < 1e-6, "x: {} vs {}", back.x, x);
            prop_assert!((back.y - y).abs() < 1e-6, "y: {} vs {}", back.y, y);
        }

        /// Property: a full turn maps every point back onto itself.
        #[test]
        fn prop_full_turn_is_identity(
            turns in 1i32..4,
            x in -1000.0f64..1000.0,
            y in -1000.0f64..1000.0,
        ) {
            let mut m = Affine::IDENTITY;
            m.rotate_about(360.0 * turns as f64, 17.0, -3.0);
            let p = m.map_point(Point::new(x, y));
            prop_assert!((p.x - x).abs() < 1e-9);
            prop_assert!((p.y - y).abs() < 1e-9);
        }
    }
}
