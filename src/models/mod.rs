//! Core data models for the boundary engine.

pub mod point;
pub mod record;

pub use point::{GeoPoint, RadialPoint, SnappedPoint, Viewport};
pub use record::{BoundaryRecord, BoundarySource, CacheStats, Polygon};
