//! Spatial index for reverse lookups over generated boundaries.

use rstar::{RTree, RTreeObject, AABB};
use std::sync::Arc;
use tracing::debug;

use super::contains;
use crate::models::{BoundaryRecord, GeoPoint};

/// Wrapper for R-tree indexing of boundary records
#[derive(Clone)]
pub struct IndexedBoundary {
    pub record: Arc<BoundaryRecord>,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedBoundary {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl IndexedBoundary {
    pub fn new(record: Arc<BoundaryRecord>) -> Option<Self> {
        let (min_x, min_y, max_x, max_y) = record.polygon.bbox()?;
        Some(Self {
            record,
            envelope: AABB::from_corners([min_x, min_y], [max_x, max_y]),
        })
    }
}

/// R-tree over boundary bounding boxes, exact polygon test on candidates
pub struct BoundarySpatialIndex {
    tree: RTree<IndexedBoundary>,
}

impl BoundarySpatialIndex {
    pub fn build(records: Vec<Arc<BoundaryRecord>>) -> Self {
        let indexed: Vec<IndexedBoundary> =
            records.into_iter().filter_map(IndexedBoundary::new).collect();
        let tree = RTree::bulk_load(indexed);
        debug!("Boundary index built with {} entries", tree.size());
        Self { tree }
    }

    /// Every boundary containing `point`, sorted by postal code
    pub fn lookup(&self, point: GeoPoint) -> Vec<Arc<BoundaryRecord>> {
        let query_envelope = AABB::from_point([point.lng, point.lat]);

        let mut found: Vec<Arc<BoundaryRecord>> = self
            .tree
            .locate_in_envelope_intersecting(&query_envelope)
            .filter(|ib| contains(point, &ib.record.polygon))
            .map(|ib| Arc::clone(&ib.record))
            .collect();
        found.sort_by(|a, b| a.postal_code.cmp(&b.postal_code));
        found
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoundarySource, Polygon};
    use chrono::Utc;

    fn square(code: &str, lat0: f64, lng0: f64, size: f64) -> Arc<BoundaryRecord> {
        let polygon = Polygon::from_ring(vec![
            GeoPoint::new(lat0, lng0),
            GeoPoint::new(lat0, lng0 + size),
            GeoPoint::new(lat0 + size, lng0 + size),
            GeoPoint::new(lat0 + size, lng0),
        ])
        .unwrap();

        Arc::new(BoundaryRecord {
            postal_code: code.to_string(),
            source: BoundarySource::RoadMlApproximation,
            centroid: GeoPoint::new(lat0 + size / 2.0, lng0 + size / 2.0),
            viewport: None,
            boundary_points: polygon.ring().to_vec(),
            point_count: polygon.len(),
            polygon,
            localities: vec![],
            place_id: None,
            generated_at: Utc::now(),
        })
    }

    #[test]
    fn test_empty_index() {
        let index = BoundarySpatialIndex::build(vec![]);
        assert!(index.is_empty());
        assert!(index.lookup(GeoPoint::new(23.0, 72.5)).is_empty());
    }

    #[test]
    fn test_overlapping_boundaries() {
        let index = BoundarySpatialIndex::build(vec![
            square("380015", 23.00, 72.50, 0.02),
            square("380009", 23.01, 72.51, 0.02),
            square("560001", 12.90, 77.50, 0.02),
        ]);
        assert_eq!(index.len(), 3);

        let both: Vec<String> = index
            .lookup(GeoPoint::new(23.015, 72.515))
            .iter()
            .map(|r| r.postal_code.clone())
            .collect();
        assert_eq!(both, vec!["380009", "380015"]);

        let one = index.lookup(GeoPoint::new(23.005, 72.505));
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].postal_code, "380015");

        assert!(index.lookup(GeoPoint::new(0.0, 0.0)).is_empty());
    }
}
