//! Boundary record, the value stored in the cache and handed to consumers.

use chrono::{DateTime, Utc};
use geo::{BoundingRect, LineString};
use serde::{Serialize, Serializer};
use serde_json::json;

use super::{GeoPoint, Viewport};

/// How a boundary was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundarySource {
    /// Radial sampling, road snapping and curve smoothing around a geocoded centroid
    RoadMlApproximation,
}

/// A single closed ring, first and last point identical. No holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    ring: Vec<GeoPoint>,
}

impl Polygon {
    /// Build a polygon from an open or closed ring, closing it if needed.
    ///
    /// Returns `None` when fewer than 3 points are given.
    pub fn from_ring(mut ring: Vec<GeoPoint>) -> Option<Self> {
        if ring.len() < 3 {
            return None;
        }
        if ring.first() != ring.last() {
            ring.push(ring[0]);
        }
        if ring.len() < 4 {
            return None;
        }
        Some(Self { ring })
    }

    /// Closed ring, first point repeated at the end
    pub fn ring(&self) -> &[GeoPoint] {
        &self.ring
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    pub fn to_geo(&self) -> geo::Polygon<f64> {
        let exterior: LineString<f64> = self.ring.iter().map(|p| p.to_coord()).collect();
        geo::Polygon::new(exterior, vec![])
    }

    /// `(min_lng, min_lat, max_lng, max_lat)`
    pub fn bbox(&self) -> Option<(f64, f64, f64, f64)> {
        self.to_geo()
            .bounding_rect()
            .map(|rect| (rect.min().x, rect.min().y, rect.max().x, rect.max().y))
    }

    /// GeoJSON `coordinates` member: one ring of `[lng, lat]` positions
    pub fn coordinates(&self) -> Vec<Vec<[f64; 2]>> {
        vec![self.ring.iter().map(|p| p.position()).collect()]
    }
}

#[derive(Serialize)]
struct PolygonGeometry {
    #[serde(rename = "type")]
    geo_type: &'static str,
    coordinates: Vec<Vec<[f64; 2]>>,
}

impl Serialize for Polygon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PolygonGeometry {
            geo_type: "Polygon",
            coordinates: self.coordinates(),
        }
        .serialize(serializer)
    }
}

/// Approximate boundary of one postal code.
///
/// Immutable once built; the cache replaces records wholesale.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryRecord {
    pub postal_code: String,
    pub source: BoundarySource,
    pub centroid: GeoPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
    pub polygon: Polygon,
    /// The closed ring as plain points, for map rendering
    pub boundary_points: Vec<GeoPoint>,
    pub point_count: usize,
    pub localities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl BoundaryRecord {
    /// GeoJSON Feature with the generating metadata as properties
    pub fn to_feature(&self) -> serde_json::Value {
        json!({
            "type": "Feature",
            "geometry": self.polygon,
            "properties": {
                "postalCode": self.postal_code,
                "source": self.source,
                "centroid": self.centroid,
                "viewport": self.viewport,
                "pointCount": self.point_count,
                "localities": self.localities,
                "placeId": self.place_id,
                "generatedAt": self.generated_at.to_rfc3339(),
            }
        })
    }
}

/// Snapshot of the boundary cache
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    pub keys: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(1.0, 0.0),
        ]
    }

    #[test]
    fn test_from_ring_closes() {
        let polygon = Polygon::from_ring(square()).unwrap();
        assert_eq!(polygon.len(), 5);
        assert_eq!(polygon.ring().first(), polygon.ring().last());
    }

    #[test]
    fn test_from_ring_keeps_closed_ring() {
        let mut ring = square();
        ring.push(ring[0]);
        let polygon = Polygon::from_ring(ring).unwrap();
        assert_eq!(polygon.len(), 5);
    }

    #[test]
    fn test_from_ring_rejects_degenerate() {
        assert!(Polygon::from_ring(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)]).is_none());
        let p = GeoPoint::new(0.0, 0.0);
        assert!(Polygon::from_ring(vec![p, GeoPoint::new(1.0, 1.0), p]).is_none());
    }

    #[test]
    fn test_geojson_geometry() {
        let polygon = Polygon::from_ring(square()).unwrap();
        let value = serde_json::to_value(&polygon).unwrap();
        assert_eq!(value["type"], "Polygon");
        // lng first
        assert_eq!(value["coordinates"][0][1][0], 1.0);
        assert_eq!(value["coordinates"][0][1][1], 0.0);
        assert_eq!(value["coordinates"][0].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_bbox() {
        let polygon = Polygon::from_ring(square()).unwrap();
        assert_eq!(polygon.bbox(), Some((0.0, 0.0, 1.0, 1.0)));
    }
}
