//! Closing the ring and packaging the boundary record.

use chrono::Utc;

use super::ResolvedLocation;
use crate::error::BoundaryError;
use crate::models::{BoundaryRecord, BoundarySource, GeoPoint, Polygon};

/// Close `smoothed` and build the record for `postal_code`.
pub fn assemble(
    postal_code: &str,
    smoothed: Vec<GeoPoint>,
    location: ResolvedLocation,
) -> Result<BoundaryRecord, BoundaryError> {
    let points = smoothed.len();
    let polygon = Polygon::from_ring(smoothed).ok_or(BoundaryError::DegenerateRing { points })?;
    let boundary_points = polygon.ring().to_vec();

    Ok(BoundaryRecord {
        postal_code: postal_code.to_string(),
        source: BoundarySource::RoadMlApproximation,
        centroid: location.centroid,
        viewport: location.viewport,
        point_count: boundary_points.len(),
        boundary_points,
        polygon,
        localities: location.localities,
        place_id: location.place_id,
        generated_at: Utc::now(),
    })
}
