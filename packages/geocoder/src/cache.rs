//! Per-session memoization of boundary lookups.
//!
//! Keys are the raw query strings exactly as the user typed them. Entries
//! live as long as the owning session and are never invalidated: place
//! boundaries do not change while someone is comparing cities. Definitive
//! "not found" answers are remembered too; transient failures are not, so
//! the next user action can try again.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{BoundaryLookup, GeocodeError, ResolvedBoundary};

/// Session-scoped cache of resolved boundaries.
///
/// Never share one instance between users.
#[derive(Debug, Default)]
pub struct BoundaryCache {
    /// `None` records a query that resolved to nothing.
    entries: BTreeMap<String, Option<Arc<ResolvedBoundary>>>,
}

impl BoundaryCache {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Returns the cached outcome for `query`, if it has been looked up.
    #[must_use]
    pub fn get(&self, query: &str) -> Option<Option<Arc<ResolvedBoundary>>> {
        self.entries.get(query).cloned()
    }

    /// Number of remembered queries, including misses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been looked up yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves `query` to a boundary, consulting `cache` first.
///
/// A cache hit returns the same [`Arc`] that the first lookup produced.
/// Blank queries fail with [`GeocodeError::EmptyQuery`] without touching
/// the cache or the lookup service.
///
/// # Errors
///
/// Returns [`GeocodeError::NotFound`] if the place has no boundary (now or
/// in an earlier lookup this session), or a transient [`GeocodeError`] if
/// the service could not be reached.
pub async fn resolve(
    lookup: &dyn BoundaryLookup,
    cache: &mut BoundaryCache,
    query: &str,
) -> Result<Arc<ResolvedBoundary>, GeocodeError> {
    if query.trim().is_empty() {
        return Err(GeocodeError::EmptyQuery);
    }

    if let Some(cached) = cache.get(query) {
        log::debug!("Boundary cache hit for '{query}'");
        return cached.ok_or_else(|| GeocodeError::NotFound {
            query: query.trim().to_string(),
        });
    }

    match lookup.lookup(query).await {
        Ok(boundary) => {
            log::info!(
                "Resolved '{query}' to {} ({} part(s))",
                boundary.display_name.as_deref().unwrap_or(&boundary.query),
                boundary.boundary.0.len()
            );
            let boundary = Arc::new(boundary);
            cache
                .entries
                .insert(query.to_string(), Some(Arc::clone(&boundary)));
            Ok(boundary)
        }
        Err(e @ GeocodeError::NotFound { .. }) => {
            log::info!("No boundary found for '{query}'");
            cache.entries.insert(query.to_string(), None);
            Err(e)
        }
        Err(e) => {
            log::warn!("Lookup for '{query}' failed: {e}");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use geo::{MultiPolygon, polygon};

    use super::*;

    /// Resolves "Square" and fails everything else, counting calls.
    struct CountingLookup {
        calls: AtomicUsize,
        transient: bool,
    }

    impl CountingLookup {
        const fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                transient: false,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl BoundaryLookup for CountingLookup {
        async fn lookup(&self, query: &str) -> Result<ResolvedBoundary, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.transient {
                return Err(GeocodeError::RateLimited);
            }
            if query.trim() != "Square" {
                return Err(GeocodeError::NotFound {
                    query: query.trim().to_string(),
                });
            }
            Ok(ResolvedBoundary {
                query: query.trim().to_string(),
                display_name: Some("Square".to_string()),
                osm_type: None,
                osm_id: None,
                place_class: None,
                place_type: None,
                boundary: MultiPolygon(vec![polygon![
                    (x: 0.0, y: 0.0),
                    (x: 1.0, y: 0.0),
                    (x: 1.0, y: 1.0),
                    (x: 0.0, y: 1.0),
                    (x: 0.0, y: 0.0),
                ]]),
            })
        }
    }

    #[tokio::test]
    async fn repeated_query_hits_cache() {
        let lookup = CountingLookup::new();
        let mut cache = BoundaryCache::new();

        let first = resolve(&lookup, &mut cache, "Square").await.unwrap();
        let second = resolve(&lookup, &mut cache, "Square").await.unwrap();

        assert_eq!(lookup.calls(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn cache_is_keyed_by_raw_input() {
        let lookup = CountingLookup::new();
        let mut cache = BoundaryCache::new();

        resolve(&lookup, &mut cache, "Square").await.unwrap();
        resolve(&lookup, &mut cache, " Square ").await.unwrap();

        assert_eq!(lookup.calls(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn not_found_is_remembered() {
        let lookup = CountingLookup::new();
        let mut cache = BoundaryCache::new();

        let first = resolve(&lookup, &mut cache, "Atlantis").await.unwrap_err();
        let second = resolve(&lookup, &mut cache, "Atlantis").await.unwrap_err();

        assert!(matches!(first, GeocodeError::NotFound { .. }));
        assert!(matches!(second, GeocodeError::NotFound { query } if query == "Atlantis"));
        assert_eq!(lookup.calls(), 1);
    }

    #[tokio::test]
    async fn transient_failures_are_not_cached() {
        let lookup = CountingLookup {
            calls: AtomicUsize::new(0),
            transient: true,
        };
        let mut cache = BoundaryCache::new();

        assert!(resolve(&lookup, &mut cache, "Square").await.is_err());
        assert!(resolve(&lookup, &mut cache, "Square").await.is_err());

        assert_eq!(lookup.calls(), 2);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn blank_query_skips_lookup() {
        let lookup = CountingLookup::new();
        let mut cache = BoundaryCache::new();

        let err = resolve(&lookup, &mut cache, "  ").await.unwrap_err();

        assert!(matches!(err, GeocodeError::EmptyQuery));
        assert_eq!(lookup.calls(), 0);
        assert!(cache.is_empty());
    }
}
