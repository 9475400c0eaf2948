//! Rotation around the element center.

use crate::elements::normalize_degrees;
use kurbo::Point;

/// Angle in degrees from `center` to `point`, clockwise from the +x axis
/// (screen y grows downward).
pub fn angle_degrees(center: Point, point: Point) -> f64 {
    (point.y - center.y).atan2(point.x - center.x).to_degrees()
}

/// Snap an angle to the nearest multiple of `increment`, normalized to
/// `[0, 360)`.
pub fn snap_angle(angle_degrees: f64, increment: f64) -> f64 {
    if increment <= 0.0 {
        return normalize_degrees(angle_degrees);
    }
    normalize_degrees((angle_degrees / increment).round() * increment)
}

/// Rotation after the pointer moved from `start_angle` to `current_angle`
/// around the center, starting from `start_rotation`.
pub fn rotated(start_rotation: f64, start_angle: f64, current_angle: f64, snap: Option<f64>) -> f64 {
    let rotation = start_rotation + (current_angle - start_angle);
    match snap {
        Some(increment) => snap_angle(rotation, increment),
        None => normalize_degrees(rotation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_degrees() {
        let center = Point::new(0.0, 0.0);
        assert!(angle_degrees(center, Point::new(10.0, 0.0)).abs() < 1e-9);
        assert!((angle_degrees(center, Point::new(0.0, 10.0)) - 90.0).abs() < 1e-9);
        assert!((angle_degrees(center, Point::new(0.0, -10.0)) + 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_snap_angle() {
        assert!((snap_angle(0.0, 15.0) - 0.0).abs() < f64::EPSILON);
        assert!((snap_angle(7.0, 15.0) - 0.0).abs() < f64::EPSILON);
        assert!((snap_angle(8.0, 15.0) - 15.0).abs() < f64::EPSILON);
        assert!((snap_angle(44.0, 15.0) - 45.0).abs() < f64::EPSILON);
        assert!((snap_angle(-10.0, 15.0) - 345.0).abs() < f64::EPSILON);
        assert!((snap_angle(359.0, 15.0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rotated_relative_to_start() {
        // Element already at 30°, pointer swept 45° clockwise.
        let rotation = rotated(30.0, -90.0, -45.0, None);
        assert!((rotation - 75.0).abs() < 1e-9);

        let rotation = rotated(30.0, -90.0, -45.0, Some(15.0));
        assert!((rotation - 75.0).abs() < 1e-9);

        let rotation = rotated(350.0, 0.0, 20.0, None);
        assert!((rotation - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_snapped_rotation_is_multiple_of_increment() {
        for step in 0..72 {
            let current = -180.0 + step as f64 * 5.3;
            let rotation = rotated(12.5, 3.0, current, Some(15.0));
            let remainder = rotation % 15.0;
            assert!(remainder.abs() < 1e-9 || (15.0 - remainder).abs() < 1e-9);
            assert!((0.0..360.0).contains(&rotation));
        }
    }
}
