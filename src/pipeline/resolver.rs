//! Postal code to centroid, viewport and locality names.

use tracing::{debug, warn};

use crate::error::BoundaryError;
use crate::models::{GeoPoint, Viewport};
use crate::providers::{AddressComponent, GeocodingProvider};

/// Everything the geocoder told us about a postal code
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub centroid: GeoPoint,
    pub viewport: Option<Viewport>,
    pub place_id: Option<String>,
    pub localities: Vec<String>,
}

/// Geocode `postal_code`. Any provider failure is fatal for the caller.
pub async fn resolve(
    provider: &dyn GeocodingProvider,
    postal_code: &str,
) -> Result<ResolvedLocation, BoundaryError> {
    let result = provider
        .geocode_postal_code(postal_code)
        .await
        .map_err(|source| {
            warn!("Geocoding {} failed: {}", postal_code, source);
            BoundaryError::GeocodeFailed {
                postal_code: postal_code.to_string(),
                source,
            }
        })?;

    let localities = extract_localities(&result.address_components);
    debug!(
        "Resolved {} to ({}, {}), viewport: {}, localities: {:?}",
        postal_code,
        result.location.lat,
        result.location.lng,
        result.viewport.is_some(),
        localities
    );

    Ok(ResolvedLocation {
        centroid: result.location,
        viewport: result.viewport,
        place_id: result.place_id,
        localities,
    })
}

/// Names of `sublocality`/`locality` components, first occurrence wins
pub fn extract_localities(components: &[AddressComponent]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for component in components {
        let is_locality = component
            .types
            .iter()
            .any(|t| t == "sublocality" || t == "locality");

        if is_locality && !names.contains(&component.long_name) {
            names.push(component.long_name.clone());
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::providers::GeocodeResult;
    use async_trait::async_trait;

    fn component(name: &str, types: &[&str]) -> AddressComponent {
        AddressComponent {
            long_name: name.to_string(),
            short_name: name.to_string(),
            types: types.iter().map(|t| t.to_string()).collect(),
        }
    }

    struct FixedGeocoder(Option<GeocodeResult>);

    #[async_trait]
    impl GeocodingProvider for FixedGeocoder {
        async fn geocode_postal_code(&self, _: &str) -> Result<GeocodeResult, ProviderError> {
            self.0.clone().ok_or(ProviderError::NoResults)
        }
    }

    #[test]
    fn test_extract_localities_dedup() {
        let components = vec![
            component("380015", &["postal_code"]),
            component("Satellite", &["sublocality_level_1", "sublocality", "political"]),
            component("Ahmedabad", &["locality", "political"]),
            component("Satellite", &["sublocality", "political"]),
            component("Gujarat", &["administrative_area_level_1", "political"]),
        ];
        assert_eq!(extract_localities(&components), vec!["Satellite", "Ahmedabad"]);
    }

    #[test]
    fn test_sublocality_level_alone_is_ignored() {
        let components = vec![component("Jodhpur", &["sublocality_level_2"])];
        assert!(extract_localities(&components).is_empty());
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let geocoder = FixedGeocoder(Some(GeocodeResult {
            location: GeoPoint::new(23.0330, 72.5714),
            viewport: None,
            place_id: Some("abc".to_string()),
            address_components: vec![component("Ahmedabad", &["locality"])],
        }));

        let resolved = resolve(&geocoder, "380015").await.unwrap();
        assert_eq!(resolved.centroid, GeoPoint::new(23.0330, 72.5714));
        assert_eq!(resolved.place_id.as_deref(), Some("abc"));
        assert_eq!(resolved.localities, vec!["Ahmedabad"]);
    }

    #[tokio::test]
    async fn test_resolve_failure_is_geocode_failed() {
        let err = resolve(&FixedGeocoder(None), "000000").await.unwrap_err();
        match err {
            BoundaryError::GeocodeFailed { postal_code, source } => {
                assert_eq!(postal_code, "000000");
                assert!(matches!(source, ProviderError::NoResults));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
