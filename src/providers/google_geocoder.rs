//! Google Geocoding API client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::{AddressComponent, GeocodeResult, GeocodingProvider};
use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::models::{GeoPoint, Viewport};

const USER_AGENT: &str = "pinbound/0.1 (postal boundary approximation)";

pub struct GoogleGeocoder {
    client: Client,
    endpoint: Url,
    api_key: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeEntry>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeEntry {
    geometry: Geometry,
    place_id: Option<String>,
    #[serde(default)]
    address_components: Vec<Component>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
    viewport: Option<Bounds>,
}

#[derive(Debug, Deserialize)]
struct Bounds {
    northeast: LatLng,
    southwest: LatLng,
}

#[derive(Debug, Deserialize, Clone, Copy)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl LatLng {
    fn point(self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

#[derive(Debug, Deserialize)]
struct Component {
    long_name: String,
    short_name: String,
    #[serde(default)]
    types: Vec<String>,
}

impl GoogleGeocoder {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let endpoint = Url::parse(&config.geocode_url)?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
            country: config.country.clone(),
        })
    }
}

#[async_trait]
impl GeocodingProvider for GoogleGeocoder {
    async fn geocode_postal_code(
        &self,
        postal_code: &str,
    ) -> Result<GeocodeResult, ProviderError> {
        let components = format!("postal_code:{}|country:{}", postal_code, self.country);

        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("address", postal_code)
            .append_pair("components", &components)
            .append_pair("key", &self.api_key);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status {
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        debug!("Geocode response for {}: {} bytes", postal_code, body.len());
        parse_geocode_response(&body)
    }
}

/// Decode a Geocoding API body and keep its first result
fn parse_geocode_response(body: &str) -> Result<GeocodeResult, ProviderError> {
    let data: GeocodeResponse = serde_json::from_str(body)?;

    match data.status.as_str() {
        "OK" => {}
        "ZERO_RESULTS" => return Err(ProviderError::NoResults),
        _ => {
            return Err(ProviderError::Api {
                message: data.error_message.unwrap_or_default(),
                status: data.status,
            })
        }
    }

    let first = data
        .results
        .into_iter()
        .next()
        .ok_or(ProviderError::NoResults)?;

    Ok(GeocodeResult {
        location: first.geometry.location.point(),
        viewport: first
            .geometry
            .viewport
            .map(|b| Viewport::new(b.northeast.point(), b.southwest.point())),
        place_id: first.place_id,
        address_components: first
            .address_components
            .into_iter()
            .map(|c| AddressComponent {
                long_name: c.long_name,
                short_name: c.short_name,
                types: c.types,
            })
            .collect(),
    })
}
