//! Configuration for providers and pipeline tuning.

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const GOOGLE_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
pub const GOOGLE_ROADS_URL: &str = "https://roads.googleapis.com/v1/snapToRoads";
const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Rays cast around the centroid
pub const RAY_COUNT: usize = 180;
/// Per-ray radius jitter bounds
pub const JITTER_MIN: f64 = 0.85;
pub const JITTER_MAX: f64 = 1.15;
/// Radius used when the geocoder reports no viewport
pub const DEFAULT_RADIUS_M: f64 = 1000.0;
pub const MIN_RADIUS_M: f64 = 500.0;
pub const MAX_RADIUS_M: f64 = 3000.0;
/// Road snapping path-length limit per request
pub const SNAP_BATCH_SIZE: usize = 90;
pub const SNAP_BATCH_DELAY_MS: u64 = 100;
/// Below this many snapped points the unsnapped sample is used instead
pub const MIN_SNAPPED_POINTS: usize = 20;
pub const SMOOTHING_ITERATIONS: u32 = 3;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub providers: ProviderConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ProviderConfig {
    pub api_key: String,
    pub geocode_url: String,
    pub roads_url: String,
    /// ISO country code used to constrain geocoding
    pub country: String,
    pub timeout_secs: u64,
    /// Ask the road snapper to interpolate points along the road
    pub interpolate: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            geocode_url: GOOGLE_GEOCODE_URL.to_string(),
            roads_url: GOOGLE_ROADS_URL.to_string(),
            country: "IN".to_string(),
            timeout_secs: 10,
            interpolate: true,
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PipelineConfig {
    pub ray_count: usize,
    pub jitter_min: f64,
    pub jitter_max: f64,
    pub default_radius_m: f64,
    pub min_radius_m: f64,
    pub max_radius_m: f64,
    pub snap_batch_size: usize,
    pub snap_batch_delay_ms: u64,
    pub min_snapped_points: usize,
    pub smoothing_iterations: u32,
    /// Replace self-intersecting rings with their convex hull
    pub enforce_simple_ring: bool,
    /// Fixed seed for the radial jitter; entropy when absent
    pub seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            ray_count: RAY_COUNT,
            jitter_min: JITTER_MIN,
            jitter_max: JITTER_MAX,
            default_radius_m: DEFAULT_RADIUS_M,
            min_radius_m: MIN_RADIUS_M,
            max_radius_m: MAX_RADIUS_M,
            snap_batch_size: SNAP_BATCH_SIZE,
            snap_batch_delay_ms: SNAP_BATCH_DELAY_MS,
            min_snapped_points: MIN_SNAPPED_POINTS,
            smoothing_iterations: SMOOTHING_ITERATIONS,
            enforce_simple_ring: false,
            seed: None,
        }
    }
}

impl PipelineConfig {
    pub fn snap_batch_delay(&self) -> Duration {
        Duration::from_millis(self.snap_batch_delay_ms)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.ray_count > 0, "ray_count must be positive");
        ensure!(
            self.jitter_min > 0.0 && self.jitter_min <= self.jitter_max,
            "jitter bounds must satisfy 0 < jitter_min <= jitter_max"
        );
        ensure!(
            self.min_radius_m > 0.0 && self.min_radius_m <= self.max_radius_m,
            "radius bounds must satisfy 0 < min_radius_m <= max_radius_m"
        );
        ensure!(self.default_radius_m > 0.0, "default_radius_m must be positive");
        ensure!(self.snap_batch_size > 0, "snap_batch_size must be positive");
        Ok(())
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let mut config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        config.apply_env();
        config.pipeline.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides, for running without a config file
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                self.providers.api_key = key;
            }
        }
    }
}
