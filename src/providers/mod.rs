//! External providers consumed by the pipeline.
//!
//! The pipeline only sees the two traits below; the Google Maps clients are
//! the production implementations.

mod google_geocoder;
mod google_roads;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::models::{GeoPoint, Viewport};

pub use google_geocoder::GoogleGeocoder;
pub use google_roads::GoogleRoadsClient;

/// One address component of a geocoding result
#[derive(Debug, Clone, PartialEq)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    pub types: Vec<String>,
}

/// Best geocoding result for a postal code
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub location: GeoPoint,
    pub viewport: Option<Viewport>,
    pub place_id: Option<String>,
    pub address_components: Vec<AddressComponent>,
}

/// A point returned by the road snapping provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadPoint {
    pub location: GeoPoint,
    /// Index into the submitted path; absent for interpolated points
    pub original_index: Option<usize>,
}

#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    /// Geocode a postal code within the provider's configured country.
    async fn geocode_postal_code(&self, postal_code: &str)
        -> Result<GeocodeResult, ProviderError>;
}

#[async_trait]
pub trait RoadSnappingProvider: Send + Sync {
    /// Snap an ordered path onto the nearest roads.
    async fn snap_path(
        &self,
        path: &[GeoPoint],
        interpolate: bool,
    ) -> Result<Vec<RoadPoint>, ProviderError>;
}
