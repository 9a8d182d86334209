//! Google Roads API `snapToRoads` client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::{RoadPoint, RoadSnappingProvider};
use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::models::GeoPoint;

const USER_AGENT: &str = "pinbound/0.1 (postal boundary approximation)";

pub struct GoogleRoadsClient {
    client: Client,
    endpoint: Url,
    api_key: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapResponse {
    #[serde(default)]
    snapped_points: Vec<SnappedEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnappedEntry {
    location: Location,
    original_index: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct Location {
    latitude: f64,
    longitude: f64,
}

impl GoogleRoadsClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let endpoint = Url::parse(&config.roads_url)?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }
}

/// `lat,lng|lat,lng|...`
fn encode_path(path: &[GeoPoint]) -> String {
    path.iter()
        .map(|p| format!("{},{}", p.lat, p.lng))
        .collect::<Vec<_>>()
        .join("|")
}

fn parse_snap_response(body: &str) -> Result<Vec<RoadPoint>, ProviderError> {
    let data: SnapResponse = serde_json::from_str(body)?;
    Ok(data
        .snapped_points
        .into_iter()
        .map(|p| RoadPoint {
            location: GeoPoint::new(p.location.latitude, p.location.longitude),
            original_index: p.original_index,
        })
        .collect())
}

#[async_trait]
impl RoadSnappingProvider for GoogleRoadsClient {
    async fn snap_path(
        &self,
        path: &[GeoPoint],
        interpolate: bool,
    ) -> Result<Vec<RoadPoint>, ProviderError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("path", &encode_path(path))
            .append_pair("interpolate", if interpolate { "true" } else { "false" })
            .append_pair("key", &self.api_key);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status {
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        let points = parse_snap_response(&body)?;
        debug!("Snapped {} path points to {} road points", path.len(), points.len());
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_path() {
        let path = [GeoPoint::new(23.5, 72.25), GeoPoint::new(-1.0, 2.0)];
        assert_eq!(encode_path(&path), "23.5,72.25|-1,2");
    }

    #[test]
    fn test_parse_with_interpolated_points() {
        let body = r#"{
            "snappedPoints": [
                {"location": {"latitude": 23.01, "longitude": 72.51}, "originalIndex": 0, "placeId": "a"},
                {"location": {"latitude": 23.02, "longitude": 72.52}, "placeId": "b"},
                {"location": {"latitude": 23.03, "longitude": 72.53}, "originalIndex": 1, "placeId": "c"}
            ]
        }"#;
        let points = parse_snap_response(body).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].original_index, Some(0));
        assert_eq!(points[1].original_index, None);
        assert_eq!(points[2].location, GeoPoint::new(23.03, 72.53));
    }

    #[test]
    fn test_parse_empty_body() {
        assert!(parse_snap_response("{}").unwrap().is_empty());
    }
}
