//! Error types for the boundary engine.

use thiserror::Error;

/// Failure talking to an external provider (geocoding or road snapping)
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Transport failure, including request timeouts.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("provider returned HTTP {status}")]
    Status { status: u16 },

    /// The provider answered but reported a non-OK status in its body.
    #[error("provider status {status}: {message}")]
    Api { status: String, message: String },

    /// Successful call with an empty result set.
    #[error("provider returned no results")]
    NoResults,

    #[error("failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid provider endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

/// Errors surfaced by boundary generation
#[derive(Error, Debug)]
pub enum BoundaryError {
    /// No centroid could be resolved; nothing is cached.
    #[error("geocoding failed for postal code {postal_code}: {source}")]
    GeocodeFailed {
        postal_code: String,
        #[source]
        source: ProviderError,
    },

    /// Too few points reached the smoother to form a ring.
    #[error("cannot build a ring from {points} points (need at least 3)")]
    DegenerateRing { points: usize },

    /// Pipeline tuning rejected when the generator was built.
    #[error("invalid pipeline configuration: {reason}")]
    InvalidConfig { reason: String },
}

pub type Result<T, E = BoundaryError> = std::result::Result<T, E>;
