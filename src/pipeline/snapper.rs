//! Road snapping of the radial sample.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::models::{GeoPoint, RadialPoint, SnappedPoint};
use crate::providers::RoadSnappingProvider;

/// Sends the radial sample to the road snapping provider in batches
pub struct RoadSnapper {
    batch_size: usize,
    batch_delay: Duration,
    interpolate: bool,
}

impl RoadSnapper {
    pub fn new(batch_size: usize, batch_delay: Duration, interpolate: bool) -> Self {
        Self {
            batch_size: batch_size.max(1),
            batch_delay,
            interpolate,
        }
    }

    pub fn from_config(config: &PipelineConfig, interpolate: bool) -> Self {
        Self::new(config.snap_batch_size, config.snap_batch_delay(), interpolate)
    }

    /// Snap every batch, skipping the ones the provider fails on.
    ///
    /// Never fails; the result may be empty.
    pub async fn snap(
        &self,
        provider: &dyn RoadSnappingProvider,
        points: &[RadialPoint],
    ) -> Vec<SnappedPoint> {
        let mut snapped = Vec::new();
        let batch_count = points.len().div_ceil(self.batch_size);

        for (batch_idx, batch) in points.chunks(self.batch_size).enumerate() {
            if batch_idx > 0 && !self.batch_delay.is_zero() {
                tokio::time::sleep(self.batch_delay).await;
            }

            let offset = batch_idx * self.batch_size;
            let path: Vec<GeoPoint> = batch.iter().map(|r| r.point).collect();

            match provider.snap_path(&path, self.interpolate).await {
                Ok(road_points) => {
                    debug!(
                        "Snap batch {}/{}: {} points in, {} out",
                        batch_idx + 1,
                        batch_count,
                        path.len(),
                        road_points.len()
                    );
                    snapped.extend(road_points.into_iter().map(|rp| SnappedPoint {
                        point: rp.location,
                        original_index: rp.original_index.map(|i| offset + i),
                    }));
                }
                Err(e) => {
                    warn!(
                        "Snap batch {}/{} failed, dropping {} points: {}",
                        batch_idx + 1,
                        batch_count,
                        path.len(),
                        e
                    );
                }
            }
        }

        snapped
    }
}

/// Pick the points the ring is built from: the snapped set when it has at
/// least `min_snapped` points, the unsnapped radial sample otherwise.
pub fn select_ring_points(
    radial: &[RadialPoint],
    snapped: &[SnappedPoint],
    min_snapped: usize,
) -> Vec<GeoPoint> {
    if snapped.len() >= min_snapped {
        return snapped.iter().map(|s| s.point).collect();
    }

    info!(
        "Only {} snapped points (need {}), using {} unsnapped radial points",
        snapped.len(),
        min_snapped,
        radial.len()
    );
    radial.iter().map(|r| r.point).collect()
}
