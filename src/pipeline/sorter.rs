//! Angular ordering of ring points around the centroid.

use crate::models::GeoPoint;

/// Planar polar angle of `point` around `center`, in radians `(-π, π]`
pub fn angle_around(point: GeoPoint, center: GeoPoint) -> f64 {
    (point.lat - center.lat).atan2(point.lng - center.lng)
}

/// Order points by polar angle around `center` (ascending). The result is open.
pub fn sort_by_angle(mut points: Vec<GeoPoint>, center: GeoPoint) -> Vec<GeoPoint> {
    points.sort_by(|a, b| angle_around(*a, center).total_cmp(&angle_around(*b, center)));
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_angles_non_decreasing() {
        let center = GeoPoint::new(23.0, 72.0);
        // Scrambled points at assorted angles and distances
        let points: Vec<GeoPoint> = [7, 2, 11, 0, 5, 9, 1, 4, 10, 3, 8, 6]
            .iter()
            .map(|&i| {
                let a = (i as f64) * std::f64::consts::PI / 6.0;
                let r = 0.01 + 0.002 * (i % 3) as f64;
                GeoPoint::new(center.lat + r * a.sin(), center.lng + r * a.cos())
            })
            .collect();

        let sorted = sort_by_angle(points, center);
        assert_eq!(sorted.len(), 12);
        for pair in sorted.windows(2) {
            assert!(angle_around(pair[0], center) <= angle_around(pair[1], center));
        }
    }

    #[test]
    fn test_axis_convention() {
        let center = GeoPoint::new(0.0, 0.0);
        // East is angle 0, north is π/2
        assert_eq!(angle_around(GeoPoint::new(0.0, 1.0), center), 0.0);
        assert!((angle_around(GeoPoint::new(1.0, 0.0), center) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }
}
