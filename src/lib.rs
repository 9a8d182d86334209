//! Pinbound - approximate postal code boundaries from geocoding and road snapping
//!
//! Given a 6-digit postal code, the engine geocodes a centroid, casts jittered
//! rays around it, snaps the ray ends onto nearby roads, orders and smooths the
//! result into a closed ring, and caches the boundary for point-in-polygon
//! queries. The output is a visually plausible approximation, not a cadastral
//! boundary.

pub mod cache;
pub mod config;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod models;
pub mod pip;
pub mod pipeline;
pub mod providers;

pub use cache::BoundaryCache;
pub use config::Config;
pub use error::{BoundaryError, ProviderError};
pub use generator::BoundaryGenerator;
pub use models::{BoundaryRecord, CacheStats, GeoPoint, Polygon, Viewport};
