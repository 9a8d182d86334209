//! Scoping listings, projects and professionals to a postal boundary.

use super::contains;
use crate::models::{BoundaryRecord, GeoPoint};

/// Anything that can be placed inside or outside a postal boundary
pub trait Locatable {
    /// Coordinates, when the entity has them
    fn coordinates(&self) -> Option<GeoPoint>;

    /// Postal code the entity was registered with
    fn pincode(&self) -> Option<&str>;
}

/// Polygon test when the entity has coordinates, exact pincode match otherwise
pub fn is_within<T: Locatable + ?Sized>(entity: &T, boundary: &BoundaryRecord) -> bool {
    match entity.coordinates() {
        Some(point) => contains(point, &boundary.polygon),
        None => entity.pincode() == Some(boundary.postal_code.as_str()),
    }
}

pub fn filter_within<'a, T: Locatable>(entities: &'a [T], boundary: &BoundaryRecord) -> Vec<&'a T> {
    entities.iter().filter(|e| is_within(*e, boundary)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoundarySource, Polygon};
    use chrono::Utc;

    struct Listing {
        location: Option<GeoPoint>,
        pincode: Option<String>,
    }

    impl Locatable for Listing {
        fn coordinates(&self) -> Option<GeoPoint> {
            self.location
        }

        fn pincode(&self) -> Option<&str> {
            self.pincode.as_deref()
        }
    }

    fn boundary() -> BoundaryRecord {
        let polygon = Polygon::from_ring(vec![
            GeoPoint::new(23.02, 72.56),
            GeoPoint::new(23.02, 72.58),
            GeoPoint::new(23.04, 72.58),
            GeoPoint::new(23.04, 72.56),
        ])
        .unwrap();

        BoundaryRecord {
            postal_code: "380015".to_string(),
            source: BoundarySource::RoadMlApproximation,
            centroid: GeoPoint::new(23.03, 72.57),
            viewport: None,
            boundary_points: polygon.ring().to_vec(),
            point_count: polygon.len(),
            polygon,
            localities: vec![],
            place_id: None,
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_coordinates_take_precedence() {
        let b = boundary();
        // Inside the polygon, but registered under another pincode
        let inside = Listing {
            location: Some(GeoPoint::new(23.03, 72.57)),
            pincode: Some("380009".to_string()),
        };
        // Outside, but claims the same pincode
        let outside = Listing {
            location: Some(GeoPoint::new(23.10, 72.57)),
            pincode: Some("380015".to_string()),
        };

        assert!(is_within(&inside, &b));
        assert!(!is_within(&outside, &b));
    }

    #[test]
    fn test_pincode_fallback() {
        let b = boundary();
        let listings = vec![
            Listing {
                location: None,
                pincode: Some("380015".to_string()),
            },
            Listing {
                location: None,
                pincode: Some("380009".to_string()),
            },
            Listing {
                location: None,
                pincode: None,
            },
        ];

        let within = filter_within(&listings, &b);
        assert_eq!(within.len(), 1);
        assert_eq!(within[0].pincode.as_deref(), Some("380015"));
    }
}
