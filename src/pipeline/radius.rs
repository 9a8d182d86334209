//! Search radius from the geocoder viewport.

use crate::config::PipelineConfig;
use crate::geometry::great_circle_distance;
use crate::models::Viewport;

/// Half the viewport diagonal in meters, clamped to the configured bounds.
///
/// Without a viewport the default radius is used.
pub fn estimate_radius(viewport: Option<&Viewport>, config: &PipelineConfig) -> f64 {
    let Some(viewport) = viewport else {
        return config.default_radius_m;
    };

    let diagonal = great_circle_distance(viewport.northeast, viewport.southwest);
    if !diagonal.is_finite() {
        return config.default_radius_m;
    }

    (diagonal / 2.0).clamp(config.min_radius_m, config.max_radius_m)
}
