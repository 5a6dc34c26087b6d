//! Response DTOs for the sieve server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::StatsSnapshot;
use crate::sieve::SieveFilter;

/// Response body for the sieve endpoint (GET /sieve)
#[derive(Debug, Clone, Serialize)]
pub struct SieveResponse {
    /// The sieved domain
    pub domain: String,
    /// Lower bound of the returned slice, inclusive
    pub lower: u64,
    /// Upper bound of the returned slice, inclusive
    pub upper: u64,
    /// Survivors within the slice, ascending
    pub values: Vec<u64>,
    /// Number of survivors returned
    pub count: usize,
}

impl SieveResponse {
    /// Creates a new SieveResponse
    pub fn new(domain: impl Into<String>, lower: u64, upper: u64, values: Vec<u64>) -> Self {
        Self {
            domain: domain.into(),
            lower,
            upper,
            count: values.len(),
            values,
        }
    }
}

/// One configured domain in the catalog response (GET /domains)
#[derive(Debug, Clone, Serialize)]
pub struct DomainInfo {
    /// Domain key used in sieve requests
    pub name: String,
    /// The filter the domain sieves with
    pub filter: SieveFilter,
}

/// Response body for the domain catalog (GET /domains)
#[derive(Debug, Clone, Serialize)]
pub struct DomainsResponse {
    pub domains: Vec<DomainInfo>,
}

impl DomainsResponse {
    /// Creates a catalog response from (name, filter) pairs.
    pub fn new<'a, I>(catalog: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a SieveFilter)>,
    {
        Self {
            domains: catalog
                .into_iter()
                .map(|(name, filter)| DomainInfo {
                    name: name.clone(),
                    filter: filter.clone(),
                })
                .collect(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Requests served entirely from a cached prefix
    pub hits: u64,
    /// Requests that required a prefix extension
    pub misses: u64,
    /// Entries removed by capacity or TTL eviction
    pub evictions: u64,
    /// Engine invocations (deltas actually sieved)
    pub computations: u64,
    /// Domains currently held in the cache
    pub cached_domains: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from a counter snapshot
    pub fn new(snapshot: StatsSnapshot, cached_domains: usize) -> Self {
        let hit_rate = snapshot.hit_rate();
        Self {
            hits: snapshot.hits,
            misses: snapshot.misses,
            evictions: snapshot.evictions,
            computations: snapshot.computations,
            cached_domains,
            hit_rate,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sieve_response_counts_values() {
        let resp = SieveResponse::new("primes", 0, 10, vec![2, 3, 5, 7]);
        assert_eq!(resp.count, 4);

        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"values\":[2,3,5,7]"));
        assert!(json.contains("\"count\":4"));
    }

    #[test]
    fn test_sieve_response_empty_slice() {
        let resp = SieveResponse::new("primes", 8, 10, Vec::new());
        assert_eq!(resp.count, 0);
        assert!(resp.values.is_empty());
    }

    #[test]
    fn test_domains_response() {
        let name = "primes".to_string();
        let filter = SieveFilter::Primes;
        let resp = DomainsResponse::new(vec![(&name, &filter)]);
        assert_eq!(resp.domains.len(), 1);

        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("primes"));
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let snapshot = StatsSnapshot {
            hits: 8,
            misses: 2,
            evictions: 1,
            computations: 2,
        };
        let resp = StatsResponse::new(snapshot, 3);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.cached_domains, 3);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
