//! Radial candidate points around the centroid.

use rand::Rng;

use crate::config::PipelineConfig;
use crate::geometry::destination_point;
use crate::models::{GeoPoint, RadialPoint};

/// Cast `config.ray_count` evenly spaced rays from `centroid`.
///
/// Each ray gets its own radius, `radius` scaled by a factor drawn from
/// `[jitter_min, jitter_max]`. Angles are never jittered so no two rays
/// share a bearing.
pub fn sample<R: Rng + ?Sized>(
    centroid: GeoPoint,
    radius: f64,
    config: &PipelineConfig,
    rng: &mut R,
) -> Vec<RadialPoint> {
    let ray_count = config.ray_count;
    let step = 360.0 / ray_count as f64;

    (0..ray_count)
        .map(|i| {
            let angle = i as f64 * step;
            let distance = radius * rng.gen_range(config.jitter_min..=config.jitter_max);
            RadialPoint {
                point: destination_point(centroid, angle, distance),
                angle,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::great_circle_distance;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const CENTER: GeoPoint = GeoPoint {
        lat: 23.0330,
        lng: 72.5714,
    };

    #[test]
    fn test_ray_count_and_angles() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let points = sample(CENTER, 1000.0, &PipelineConfig::default(), &mut rng);

        assert_eq!(points.len(), 180);
        assert_eq!(points[0].angle, 0.0);
        assert_eq!(points[1].angle, 2.0);
        assert_eq!(points[179].angle, 358.0);
    }

    #[test]
    fn test_distances_within_jitter() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let points = sample(CENTER, 1000.0, &PipelineConfig::default(), &mut rng);

        for p in &points {
            let d = great_circle_distance(CENTER, p.point);
            assert!((849.0..=1151.0).contains(&d), "distance {d} out of range");
        }
    }

    #[test]
    fn test_same_seed_same_points() {
        let config = PipelineConfig::default();
        let a = sample(CENTER, 1000.0, &config, &mut ChaCha8Rng::seed_from_u64(9));
        let b = sample(CENTER, 1000.0, &config, &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_jitter_is_circle() {
        let config = PipelineConfig {
            jitter_min: 1.0,
            jitter_max: 1.0,
            ray_count: 12,
            ..PipelineConfig::default()
        };
        let points = sample(CENTER, 800.0, &config, &mut ChaCha8Rng::seed_from_u64(0));
        assert_eq!(points.len(), 12);
        for p in &points {
            assert!((great_circle_distance(CENTER, p.point) - 800.0).abs() < 0.5);
        }
    }
}
