#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Place-name geocoding to administrative boundary polygons.
//!
//! Resolves a free-text place name (e.g. "Paris, France") to the boundary
//! polygon of the best-matching place, using the Nominatim / `OpenStreetMap`
//! search API with `polygon_geojson=1`.
//!
//! The provider is configured via TOML files in `services/` (see
//! [`service_registry`]). Lookups go through a [`BoundaryLookup`]
//! implementation; [`cache::resolve`] memoizes results in a caller-owned
//! [`BoundaryCache`] so that one session never looks up the same string
//! twice.

pub mod cache;
pub mod nominatim;
pub mod service_registry;

use async_trait::async_trait;
use geo::MultiPolygon;
use thiserror::Error;

pub use cache::{BoundaryCache, resolve};
pub use nominatim::NominatimClient;

/// A place resolved to its boundary polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBoundary {
    /// The trimmed query that produced this boundary.
    pub query: String,
    /// Full display name from the provider
    /// (e.g. "Paris, Île-de-France, France métropolitaine, France").
    pub display_name: Option<String>,
    /// `OpenStreetMap` element type (`relation`, `way`, `node`).
    pub osm_type: Option<String>,
    /// `OpenStreetMap` element ID.
    pub osm_id: Option<u64>,
    /// Place category (e.g. `boundary`, `place`).
    pub place_class: Option<String>,
    /// Place type within the category (e.g. `administrative`, `city`).
    pub place_type: Option<String>,
    /// Boundary in WGS84 longitude/latitude. Single polygons are wrapped
    /// in a one-part multi-polygon.
    pub boundary: MultiPolygon<f64>,
}

/// Errors from geocoding operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The query was blank after trimming.
    #[error("No place name given")]
    EmptyQuery,

    /// The provider returned no place with a polygon boundary.
    #[error("Place '{query}' not found")]
    NotFound {
        /// The query that failed to resolve.
        query: String,
    },

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,
}

impl GeocodeError {
    /// Whether the failure came from the service or network rather than
    /// from the query itself. Transient failures are never cached.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Parse { .. } | Self::RateLimited
        )
    }
}

/// An external service that resolves place names to boundaries.
#[async_trait]
pub trait BoundaryLookup: Send + Sync {
    /// Looks up the boundary of the best-matching place for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::NotFound`] if no place with a polygon
    /// boundary matches, or a transient [`GeocodeError`] if the request
    /// fails.
    async fn lookup(&self, query: &str) -> Result<ResolvedBoundary, GeocodeError>;
}
