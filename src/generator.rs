//! Boundary generation: the pipeline behind the cache.

use std::sync::Arc;
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::cache::BoundaryCache;
use crate::config::{Config, PipelineConfig};
use crate::error::BoundaryError;
use crate::geometry::{convex_hull, ring_is_simple};
use crate::models::{BoundaryRecord, CacheStats, GeoPoint, Polygon};
use crate::pip::{contains, BoundarySpatialIndex};
use crate::pipeline::{
    assemble, estimate_radius, resolve, sample, select_ring_points, smooth, sort_by_angle,
    RoadSnapper,
};
use crate::providers::{GeocodingProvider, GoogleGeocoder, GoogleRoadsClient, RoadSnappingProvider};

/// Generates, caches and queries approximate postal code boundaries
pub struct BoundaryGenerator {
    geocoder: Arc<dyn GeocodingProvider>,
    roads: Arc<dyn RoadSnappingProvider>,
    snapper: RoadSnapper,
    config: PipelineConfig,
    cache: Arc<BoundaryCache>,
    rng: Mutex<ChaCha8Rng>,
}

impl BoundaryGenerator {
    /// Fails with `InvalidConfig` when `config` does not validate
    pub fn new(
        geocoder: Arc<dyn GeocodingProvider>,
        roads: Arc<dyn RoadSnappingProvider>,
        cache: Arc<BoundaryCache>,
        config: PipelineConfig,
        interpolate: bool,
    ) -> Result<Self, BoundaryError> {
        config
            .validate()
            .map_err(|e| BoundaryError::InvalidConfig {
                reason: e.to_string(),
            })?;

        let seed = config.seed.unwrap_or_else(rand::random);
        Ok(Self {
            geocoder,
            roads,
            snapper: RoadSnapper::from_config(&config, interpolate),
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
            config,
            cache,
        })
    }

    /// Generator backed by the Google Maps providers
    pub fn from_config(config: &Config, cache: Arc<BoundaryCache>) -> anyhow::Result<Self> {
        let geocoder = GoogleGeocoder::new(&config.providers)?;
        let roads = GoogleRoadsClient::new(&config.providers)?;

        let generator = Self::new(
            Arc::new(geocoder),
            Arc::new(roads),
            cache,
            config.pipeline.clone(),
            config.providers.interpolate,
        )?;
        Ok(generator)
    }

    pub fn cache(&self) -> &Arc<BoundaryCache> {
        &self.cache
    }

    /// Cached boundary for `postal_code`, generated on first request.
    ///
    /// Concurrent first requests for one code share a single generation.
    pub async fn generate_boundary(
        &self,
        postal_code: &str,
    ) -> Result<Arc<BoundaryRecord>, BoundaryError> {
        self.cache
            .get_or_try_insert_with(postal_code, || self.build(postal_code))
            .await
    }

    /// Run the whole pipeline, bypassing the cache
    pub async fn build(&self, postal_code: &str) -> Result<BoundaryRecord, BoundaryError> {
        let start = Instant::now();
        info!("Generating boundary for {}", postal_code);

        let location = resolve(self.geocoder.as_ref(), postal_code).await?;

        let radius = estimate_radius(location.viewport.as_ref(), &self.config);
        let radial = {
            let mut rng = self.rng.lock().await;
            sample(location.centroid, radius, &self.config, &mut *rng)
        };

        let snapped = self.snapper.snap(self.roads.as_ref(), &radial).await;
        let points = select_ring_points(&radial, &snapped, self.config.min_snapped_points);

        let mut ring = sort_by_angle(points, location.centroid);
        if self.config.enforce_simple_ring && !ring_is_simple(&ring) {
            warn!(
                "Ring for {} self-intersects, falling back to its convex hull",
                postal_code
            );
            ring = convex_hull(&ring);
        }

        let smoothed = smooth(&ring, self.config.smoothing_iterations)?;
        let record = assemble(postal_code, smoothed, location)?;

        if !contains(record.centroid, &record.polygon) {
            warn!("Centroid of {} falls outside its generated boundary", postal_code);
        }

        info!(
            "Generated boundary for {}: radius {:.0} m, {} snapped, {} ring points in {} ms",
            postal_code,
            radius,
            snapped.len(),
            record.point_count,
            start.elapsed().as_millis()
        );

        Ok(record)
    }

    pub fn is_point_in_boundary(point: GeoPoint, polygon: &Polygon) -> bool {
        contains(point, polygon)
    }

    /// Drop one cached boundary, or all of them
    pub async fn clear_boundary_cache(&self, postal_code: Option<&str>) -> usize {
        let removed = self.cache.invalidate(postal_code).await;
        info!(
            "Cleared {} cached boundaries ({})",
            removed,
            postal_code.unwrap_or("all")
        );
        removed
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Postal codes among the cached boundaries that contain `point`
    pub async fn locate(&self, point: GeoPoint) -> Vec<String> {
        let index = BoundarySpatialIndex::build(self.cache.snapshot().await);
        index
            .lookup(point)
            .into_iter()
            .map(|r| r.postal_code.clone())
            .collect()
    }
}
