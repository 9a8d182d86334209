//! HTTP server for postal boundary lookups.
//!
//! Exposes boundary generation, point membership, reverse lookup and cache
//! administration over JSON.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get},
    Router,
};
use clap::Parser;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pinbound::{BoundaryCache, BoundaryError, BoundaryGenerator, BoundaryRecord, CacheStats, Config, GeoPoint};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "pinbound-server")]
#[command(about = "Approximate postal code boundary server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:3000")]
    listen: String,

    /// TOML config file; defaults plus GOOGLE_MAPS_API_KEY when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Application state shared across handlers
struct AppState {
    generator: BoundaryGenerator,
    pincode_pattern: Regex,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::from_env(),
    };
    config.pipeline.validate()?;

    if config.providers.api_key.is_empty() {
        tracing::warn!("No API key configured, provider calls will be rejected");
    }

    let cache = Arc::new(BoundaryCache::new());
    let generator = BoundaryGenerator::from_config(&config, cache)
        .context("Failed to create boundary generator")?;

    let state = Arc::new(AppState {
        generator,
        pincode_pattern: Regex::new(r"^\d{6}$")?,
    });

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/boundary/{pincode}", get(boundary_handler))
        .route("/v1/boundary/{pincode}/geojson", get(geojson_handler))
        .route("/v1/boundary/{pincode}/contains", get(contains_handler))
        .route("/v1/locate", get(locate_handler))
        .route("/v1/cache/stats", get(stats_handler))
        .route("/v1/cache", delete(clear_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Starting server on {}", args.listen);

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

type ApiError = (StatusCode, String);

impl AppState {
    async fn boundary(&self, pincode: &str) -> Result<Arc<BoundaryRecord>, ApiError> {
        if !self.pincode_pattern.is_match(pincode) {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("'{}' is not a 6-digit postal code", pincode),
            ));
        }

        self.generator
            .generate_boundary(pincode)
            .await
            .map_err(|e| {
                tracing::error!("Boundary generation failed: {}", e);
                match e {
                    BoundaryError::GeocodeFailed { .. } => (StatusCode::NOT_FOUND, e.to_string()),
                    _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
                }
            })
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    cached_boundaries: usize,
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        cached_boundaries: state.generator.cache_stats().await.size,
    })
}

async fn boundary_handler(
    State(state): State<Arc<AppState>>,
    Path(pincode): Path<String>,
) -> Result<Json<BoundaryRecord>, ApiError> {
    let record = state.boundary(&pincode).await?;
    Ok(Json(record.as_ref().clone()))
}

async fn geojson_handler(
    State(state): State<Arc<AppState>>,
    Path(pincode): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let record = state.boundary(&pincode).await?;
    Ok(Json(record.to_feature()))
}

#[derive(Deserialize)]
struct PointParams {
    lat: f64,
    lng: f64,
}

#[derive(Serialize)]
struct ContainsResponse {
    postal_code: String,
    inside: bool,
}

async fn contains_handler(
    State(state): State<Arc<AppState>>,
    Path(pincode): Path<String>,
    Query(params): Query<PointParams>,
) -> Result<Json<ContainsResponse>, ApiError> {
    let record = state.boundary(&pincode).await?;
    let point = GeoPoint::new(params.lat, params.lng);

    Ok(Json(ContainsResponse {
        inside: BoundaryGenerator::is_point_in_boundary(point, &record.polygon),
        postal_code: pincode,
    }))
}

#[derive(Serialize)]
struct LocateResponse {
    postal_codes: Vec<String>,
}

/// Cached postal codes whose boundary contains the point
async fn locate_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PointParams>,
) -> Json<LocateResponse> {
    let point = GeoPoint::new(params.lat, params.lng);
    Json(LocateResponse {
        postal_codes: state.generator.locate(point).await,
    })
}

async fn stats_handler(State(state): State<Arc<AppState>>) -> Json<CacheStats> {
    Json(state.generator.cache_stats().await)
}

#[derive(Deserialize)]
struct ClearParams {
    pincode: Option<String>,
}

#[derive(Serialize)]
struct ClearResponse {
    removed: usize,
}

async fn clear_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ClearParams>,
) -> Json<ClearResponse> {
    Json(ClearResponse {
        removed: state
            .generator
            .clear_boundary_cache(params.pincode.as_deref())
            .await,
    })
}
