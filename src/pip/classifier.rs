use crate::geometry::point_in_polygon;
use crate::models::{GeoPoint, Polygon};

/// True when `point` lies inside `polygon` or on its ring
pub fn contains(point: GeoPoint, polygon: &Polygon) -> bool {
    point_in_polygon(point, polygon)
}
