//! Rotation angle helpers.

/// Normalize any integer rotation into `[0, 360)`.
///
/// # Example
///
/// ```
/// use cropview_core::transform::normalize_degrees;
///
/// assert_eq!(normalize_degrees(-90), 270);
/// assert_eq!(normalize_degrees(720), 0);
/// ```
pub fn normalize_degrees(degrees: i32) -> u32 {
    degrees.rem_euclid(360) as u32
}

/// Whether rotating by `delta` (already normalized) turns the crop window
/// onto its side, so its width and height should be exchanged.
///
/// The windows are open intervals around 90° and 270° (`45..135` and
/// `215..305`).
pub fn swaps_crop_axes(delta: u32) -> bool {
    (delta > 45 && delta < 135) || (delta > 215 && delta < 305)
}

/// Size of the bounding box of a `width × height` rectangle rotated by
/// `angle_degrees`.
///
/// Multiples of 90° are answered exactly; other angles use
/// `w' = |w cos| + |h sin|`, `h' = |w sin| + |h cos|`.
pub fn rotated_bounds(width: f64, height: f64, angle_degrees: f64) -> (f64, f64) {
    let normalized = angle_degrees.rem_euclid(360.0);

    if normalized == 0.0 || normalized == 180.0 {
        return (width, height);
    }
    if normalized == 90.0 || normalized == 270.0 {
        return (height, width);
    }

    let (sin, cos) = normalized.to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    (width * cos + height * sin, width * sin + height * cos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0), 0);
        assert_eq!(normalize_degrees(90), 90);
        assert_eq!(normalize_degrees(360), 0);
        assert_eq!(normalize_degrees(450), 90);
        assert_eq!(normalize_degrees(-30), 330);
        assert_eq!(normalize_degrees(-720), 0);
    }

    #[test]
    fn test_swaps_crop_axes_windows() {
        assert!(!swaps_crop_axes(0));
        assert!(!swaps_crop_axes(45));
        assert!(swaps_crop_axes(46));
        assert!(swaps_crop_axes(90));
        assert!(!swaps_crop_axes(135));
        assert!(!swaps_crop_axes(180));
        assert!(swaps_crop_axes(270));
        assert!(!swaps_crop_axes(305));
    }

    #[test]
    fn test_rotated_bounds_right_angles() {
        assert_eq!(rotated_bounds(100.0, 50.0, 0.0), (100.0, 50.0));
        assert_eq!(rotated_bounds(100.0, 50.0, 90.0), (50.0, 100.0));
        assert_eq!(rotated_bounds(100.0, 50.0, 180.0), (100.0, 50.0));
        assert_eq!(rotated_bounds(100.0, 50.0, -90.0), (50.0, 100.0));
        assert_eq!(rotated_bounds(100.0, 50.0, 720.0), (100.0, 50.0));
    }

    #[test]
    fn test_rotated_bounds_45() {
        let (w, h) = rotated_bounds(100.0, 100.0, 45.0);
        let diagonal = 100.0 * std::f64::consts::SQRT_2;
        assert!((w - diagonal).abs() < 1e-9, "width was {}", w);
        assert!((h - diagonal).abs() < 1e-9, "height was {}", h);
    }

    #[test]
    fn test_rotated_bounds_symmetric() {
        let (w1, h1) = rotated_bounds(100.0, 80.0, 30.0);
        let (w2, h2) = rotated_bounds(100.0, 80.0, -30.0);
        assert!((w1 - w2).abs() < 1e-9);
        assert!((h1 - h2).abs() < 1e-9);
    }
}
