//! Spherical and planar primitives used by the pipeline, on top of `geo`.

use geo::{ConvexHull, Destination, Distance, Haversine, Intersects, Line, MultiPoint};

use crate::models::{GeoPoint, Polygon};

/// Point reached by travelling `distance_m` meters from `origin` along the
/// great circle with initial bearing `bearing_deg` (clockwise from north).
pub fn destination_point(origin: GeoPoint, bearing_deg: f64, distance_m: f64) -> GeoPoint {
    Haversine
        .destination(origin.to_point(), bearing_deg, distance_m)
        .into()
}

/// Great-circle distance in meters
pub fn great_circle_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    Haversine.distance(a.to_point(), b.to_point())
}

/// Point-in-polygon. Points on the ring count as inside.
pub fn point_in_polygon(point: GeoPoint, polygon: &Polygon) -> bool {
    polygon.to_geo().intersects(&point.to_point())
}

/// True when no two non-adjacent edges of the closed ring `ring` cross.
///
/// `ring` is open (the closing edge is implied). Repeated consecutive
/// vertices collapse to one and do not count as a crossing.
pub fn ring_is_simple(ring: &[GeoPoint]) -> bool {
    let mut ring: Vec<GeoPoint> = ring.to_vec();
    ring.dedup();
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }

    let n = ring.len();
    if n < 4 {
        return true;
    }

    let edges: Vec<Line<f64>> = (0..n)
        .map(|i| Line::new(ring[i].to_coord(), ring[(i + 1) % n].to_coord()))
        .collect();

    for i in 0..n {
        for j in (i + 2)..n {
            // First and last edges share the closing vertex
            if i == 0 && j == n - 1 {
                continue;
            }
            if edges[i].intersects(&edges[j]) {
                return false;
            }
        }
    }

    true
}

/// Convex hull of `points` as an open ring
pub fn convex_hull(points: &[GeoPoint]) -> Vec<GeoPoint> {
    let multi: MultiPoint<f64> = points.iter().map(|p| p.to_point()).collect();
    let hull = multi.convex_hull();

    let mut ring: Vec<GeoPoint> = hull.exterior().coords().map(|c| GeoPoint::from(*c)).collect();
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}
