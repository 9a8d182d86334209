//! Point-like value types shared by every pipeline stage.

use geo::{Coord, Point};
use serde::{Deserialize, Serialize};

/// Geographic point (lat/lng)
///
/// Geometry code works on `(lng, lat)` pairs, i.e. `x = lng`, `y = lat`.
/// Always cross over through the conversions below rather than building
/// `Coord`s by hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn to_coord(self) -> Coord<f64> {
        Coord {
            x: self.lng,
            y: self.lat,
        }
    }

    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lng, self.lat)
    }

    /// `[lng, lat]`, the GeoJSON position order
    pub fn position(self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

impl From<Coord<f64>> for GeoPoint {
    fn from(c: Coord<f64>) -> Self {
        Self { lat: c.y, lng: c.x }
    }
}

impl From<Point<f64>> for GeoPoint {
    fn from(p: Point<f64>) -> Self {
        Self {
            lat: p.y(),
            lng: p.x(),
        }
    }
}

/// Bounding viewport reported by the geocoding provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub northeast: GeoPoint,
    pub southwest: GeoPoint,
}

impl Viewport {
    pub fn new(northeast: GeoPoint, southwest: GeoPoint) -> Self {
        Self {
            northeast,
            southwest,
        }
    }
}

/// A candidate boundary point cast from the centroid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialPoint {
    pub point: GeoPoint,
    /// Bearing in degrees, `[0, 360)`
    pub angle: f64,
}

/// A point moved onto the road network by the snapping provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnappedPoint {
    pub point: GeoPoint,
    /// Index into the radial sample this point was snapped from.
    /// `None` for points the provider interpolated along a road.
    pub original_index: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_axis_order() {
        let p = GeoPoint::new(23.0330, 72.5714);
        let c = p.to_coord();
        assert_eq!(c.x, 72.5714);
        assert_eq!(c.y, 23.0330);
        assert_eq!(GeoPoint::from(c), p);
        assert_eq!(p.position(), [72.5714, 23.0330]);
    }
}
