//! API Handlers
//!
//! HTTP request handlers for each sieve server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::cache::DomainStore;
use crate::error::Result;
use crate::models::{DomainsResponse, HealthResponse, SieveQuery, SieveResponse, StatsResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared domain store; interior locking is per-domain, so handlers
    /// on unrelated domains never contend
    pub store: Arc<DomainStore>,
}

impl AppState {
    /// Creates a new AppState around the given store.
    pub fn new(store: DomainStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(DomainStore::new(config))
    }
}

/// Handler for GET /sieve
///
/// Validates the requested range, then serves it from the domain's
/// cached prefix, extending the prefix first when needed.
pub async fn sieve_handler(
    State(state): State<AppState>,
    Query(query): Query<SieveQuery>,
) -> Result<Json<SieveResponse>> {
    let (lower, upper) = query.validate(state.store.max_bound())?;
    let values = state.store.get_or_extend(&query.domain, lower, upper).await?;

    Ok(Json(SieveResponse::new(query.domain, lower, upper, values)))
}

/// Handler for GET /domains
///
/// Lists the configured domain catalog with each domain's filter.
pub async fn domains_handler(State(state): State<AppState>) -> Json<DomainsResponse> {
    Json(DomainsResponse::new(state.store.catalog()))
}

/// Handler for GET /stats
///
/// Returns cache counters, including the computation count that makes
/// recomputation after eviction observable.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let snapshot = state.store.stats();
    let cached = state.store.cached_len().await;

    Json(StatsResponse::new(snapshot, cached))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::SieveError;

    fn test_state() -> AppState {
        let config = Config {
            max_bound: 1000,
            ..Config::default()
        };
        AppState::from_config(&config)
    }

    fn query(domain: &str, lower: i64, upper: i64) -> SieveQuery {
        SieveQuery {
            domain: domain.to_string(),
            lower,
            upper,
        }
    }

    #[tokio::test]
    async fn test_sieve_handler_first_primes() {
        let state = test_state();

        let response = sieve_handler(State(state), Query(query("primes", 0, 10)))
            .await
            .unwrap();
        assert_eq!(response.values, vec![2, 3, 5, 7]);
        assert_eq!(response.count, 4);
    }

    #[tokio::test]
    async fn test_sieve_handler_rejects_inverted_range() {
        let state = test_state();

        let result = sieve_handler(State(state), Query(query("primes", 20, 10))).await;
        assert!(matches!(result, Err(SieveError::InvalidBound(_))));
    }

    #[tokio::test]
    async fn test_sieve_handler_rejects_over_max() {
        let state = test_state();

        let result = sieve_handler(State(state), Query(query("primes", 0, 1001))).await;
        assert!(matches!(result, Err(SieveError::InvalidBound(_))));
    }

    #[tokio::test]
    async fn test_sieve_handler_unknown_domain() {
        let state = test_state();

        let result = sieve_handler(State(state), Query(query("twin-primes", 0, 10))).await;
        assert!(matches!(result, Err(SieveError::UnknownDomain(_))));
    }

    #[tokio::test]
    async fn test_domains_handler_lists_catalog() {
        let state = test_state();

        let response = domains_handler(State(state)).await;
        assert_eq!(response.domains.len(), 1);
        assert_eq!(response.domains[0].name, "primes");
    }

    #[tokio::test]
    async fn test_stats_handler_reflects_requests() {
        let state = test_state();

        sieve_handler(State(state.clone()), Query(query("primes", 0, 10)))
            .await
            .unwrap();
        sieve_handler(State(state.clone()), Query(query("primes", 0, 10)))
            .await
            .unwrap();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.misses, 1);
        assert_eq!(response.hits, 1);
        assert_eq!(response.cached_domains, 1);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
