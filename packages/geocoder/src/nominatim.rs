//! Nominatim / `OpenStreetMap` boundary lookup client.
//!
//! Issues a free-form search with `polygon_geojson=1` and returns the first
//! candidate whose geometry is a `Polygon` or `MultiPolygon`. Candidates
//! that only carry a point or line (e.g. a city node without a boundary
//! relation) are skipped.
//!
//! The public instance allows **1 request per second**; the client spaces
//! its own requests by `rate_limit_ms` from the service TOML.
//!
//! See <https://nominatim.org/release-docs/develop/api/Search/>

use std::time::Duration;

use async_trait::async_trait;
use geo::MultiPolygon;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::service_registry::{self, GeocodingService, ProviderConfig};
use crate::{BoundaryLookup, GeocodeError, ResolvedBoundary};

/// HTTP client for the Nominatim search endpoint.
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
    result_limit: u32,
    rate_limit: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl NominatimClient {
    /// Creates a client for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
        result_limit: u32,
        rate_limit: Duration,
    ) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            result_limit: result_limit.max(1),
            rate_limit,
            last_request: Mutex::new(None),
        })
    }

    /// Creates a client from a service definition, applying the
    /// `NOMINATIM_URL` and `NOMINATIM_USER_AGENT` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the HTTP client cannot be built.
    pub fn from_service(service: &GeocodingService) -> Result<Self, GeocodeError> {
        let ProviderConfig::Nominatim {
            base_url,
            user_agent,
            result_limit,
            timeout_secs,
            rate_limit_ms,
        } = &service.provider;

        let base_url = std::env::var("NOMINATIM_URL").unwrap_or_else(|_| base_url.clone());
        let user_agent =
            std::env::var("NOMINATIM_USER_AGENT").unwrap_or_else(|_| user_agent.clone());

        log::debug!(
            "Using geocoding service '{}' at {base_url} (rate limit {rate_limit_ms}ms)",
            service.id
        );

        Self::new(
            base_url,
            &user_agent,
            Duration::from_secs(*timeout_secs),
            *result_limit,
            Duration::from_millis(*rate_limit_ms),
        )
    }

    /// Creates a client from the highest-priority enabled service in the
    /// registry.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Parse`] if no service is enabled, or
    /// [`GeocodeError::Http`] if the HTTP client cannot be built.
    pub fn from_registry() -> Result<Self, GeocodeError> {
        let service = service_registry::default_service().ok_or_else(|| GeocodeError::Parse {
            message: "No enabled geocoding service configured".to_string(),
        })?;
        Self::from_service(&service)
    }

    /// Waits until at least `rate_limit` has passed since the previous
    /// request, then records the new request time.
    async fn throttle(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.rate_limit {
                tokio::time::sleep(self.rate_limit - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[async_trait]
impl BoundaryLookup for NominatimClient {
    async fn lookup(&self, query: &str) -> Result<ResolvedBoundary, GeocodeError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        self.throttle().await;

        let limit = self.result_limit.to_string();
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", query),
                ("format", "jsonv2"),
                ("polygon_geojson", "1"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        check_rate_limit(resp.status())?;

        let body: serde_json::Value = resp.error_for_status()?.json().await?;
        parse_response(query, &body)
    }
}

/// Maps HTTP 429 to [`GeocodeError::RateLimited`]; other statuses pass
/// through to `error_for_status`.
fn check_rate_limit(status: reqwest::StatusCode) -> Result<(), GeocodeError> {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        log::warn!("Nominatim rate limit hit");
        return Err(GeocodeError::RateLimited);
    }
    Ok(())
}

/// Parses a Nominatim `jsonv2` search response.
fn parse_response(query: &str, body: &serde_json::Value) -> Result<ResolvedBoundary, GeocodeError> {
    let results = body.as_array().ok_or_else(|| GeocodeError::Parse {
        message: "Nominatim response is not an array".to_string(),
    })?;

    for result in results {
        let Some(boundary) = result.get("geojson").and_then(parse_boundary) else {
            log::debug!(
                "Skipping non-polygon candidate for '{query}': {}",
                result["display_name"].as_str().unwrap_or("<unnamed>")
            );
            continue;
        };

        return Ok(ResolvedBoundary {
            query: query.to_string(),
            display_name: result["display_name"].as_str().map(String::from),
            osm_type: result["osm_type"].as_str().map(String::from),
            osm_id: result["osm_id"].as_u64(),
            place_class: result["category"]
                .as_str()
                .or_else(|| result["class"].as_str())
                .map(String::from),
            place_type: result["type"].as_str().map(String::from),
            boundary,
        });
    }

    Err(GeocodeError::NotFound {
        query: query.to_string(),
    })
}

/// Converts a `GeoJSON` geometry value into a [`MultiPolygon`].
/// Handles both `Polygon` and `MultiPolygon` geometry types.
fn parse_boundary(value: &serde_json::Value) -> Option<MultiPolygon<f64>> {
    let geometry: geojson::Geometry = serde_json::from_value(value.clone()).ok()?;
    let geo_geom: geo::Geometry<f64> = geometry.try_into().ok()?;
    match geo_geom {
        geo::Geometry::MultiPolygon(mp) if !mp.0.is_empty() => Some(mp),
        geo::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        _ => None,
    }
}
