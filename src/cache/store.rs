//! Domain Store Module
//!
//! The cache / extension manager: maps domain keys to their computed
//! prefixes, serves covered ranges without recomputation, and serializes
//! prefix extension per domain.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::timeout;
use tracing::debug;

use crate::cache::{CacheStats, DomainEntry, LruTracker, StatsSnapshot};
use crate::config::Config;
use crate::error::{Result, SieveError};
use crate::sieve::{extend_range, isqrt, SieveFilter};

// == Domain Store ==
/// Process-wide keyed store of sieve domains.
///
/// Entries are created on first use, extended monotonically, and
/// evicted whole (capacity LRU or idle TTL) so a domain is either fully
/// consistent or absent. Extension of one domain never blocks requests
/// on any other domain.
#[derive(Debug)]
pub struct DomainStore {
    /// Configured domain catalog, immutable for the process lifetime
    domains: BTreeMap<String, SieveFilter>,
    /// Cached entries plus their LRU order
    inner: RwLock<Inner>,
    /// Shared performance counters
    stats: Arc<CacheStats>,
    /// Hard ceiling on any requested upper bound
    max_bound: u64,
    /// Maximum number of cached entries
    max_entries: usize,
    /// Idle time before an entry is eviction-eligible
    entry_ttl: Duration,
    /// Per-request cap on awaiting an extension
    compute_timeout: Duration,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, Arc<DomainEntry>>,
    lru: LruTracker,
}

impl DomainStore {
    // == Constructor ==
    /// Creates a store from the process configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            domains: config.domains.clone(),
            inner: RwLock::new(Inner::default()),
            stats: Arc::new(CacheStats::new()),
            max_bound: config.max_bound,
            max_entries: config.cache_max_entries,
            entry_ttl: config.cache_ttl(),
            compute_timeout: config.compute_timeout(),
        }
    }

    pub fn max_bound(&self) -> u64 {
        self.max_bound
    }

    /// Configured domain catalog.
    pub fn catalog(&self) -> &BTreeMap<String, SieveFilter> {
        &self.domains
    }

    /// Point-in-time counter values.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Number of domains currently cached.
    pub async fn cached_len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    // == Get Or Extend ==
    /// Serves the survivors in `[lower, upper]` for a domain, extending
    /// its prefix first if the current bound does not cover `upper`.
    ///
    /// Already-covered requests are answered from the prefix under a
    /// read lock and never invoke the engine. Extension runs in a
    /// detached task holding the per-domain build lock, so concurrent
    /// requests trigger at most one computation per domain, and a
    /// caller that times out or disconnects never cancels a build.
    pub async fn get_or_extend(&self, domain: &str, lower: u64, upper: u64) -> Result<Vec<u64>> {
        if upper > self.max_bound {
            return Err(SieveError::InvalidBound(format!(
                "upper bound {} exceeds configured maximum {}",
                upper, self.max_bound
            )));
        }

        let entry = self.entry_for(domain).await?;

        {
            let prefix = entry.prefix().read().await;
            if prefix.bound() >= upper {
                self.stats.record_hit();
                return Ok(prefix.slice(lower, upper).to_vec());
            }
        }

        self.stats.record_miss();

        let task = tokio::spawn(extend_entry(
            Arc::clone(&entry),
            upper,
            Arc::clone(&self.stats),
        ));

        match timeout(self.compute_timeout, task).await {
            Ok(Ok(Ok(()))) => {
                let prefix = entry.prefix().read().await;
                Ok(prefix.slice(lower, upper).to_vec())
            }
            Ok(Ok(Err(e))) => Err(e),
            Ok(Err(join_err)) => Err(SieveError::Internal(format!(
                "extension task failed: {join_err}"
            ))),
            Err(_) => Err(SieveError::ComputeTimeout(format!(
                "domain '{}' did not reach bound {} within {:?}",
                domain, upper, self.compute_timeout
            ))),
        }
    }

    // == Entry Lookup ==
    /// Fetches the cached entry for a domain, creating it on first use.
    /// Creation may evict the least recently used entry to stay within
    /// capacity.
    async fn entry_for(&self, domain: &str) -> Result<Arc<DomainEntry>> {
        let filter = self
            .domains
            .get(domain)
            .ok_or_else(|| SieveError::UnknownDomain(domain.to_string()))?;

        let mut inner = self.inner.write().await;

        if let Some(entry) = inner.entries.get(domain) {
            let entry = Arc::clone(entry);
            inner.lru.touch(domain);
            entry.touch();
            return Ok(entry);
        }

        while inner.entries.len() >= self.max_entries {
            match inner.lru.evict_oldest() {
                Some(victim) => {
                    inner.entries.remove(&victim);
                    self.stats.record_eviction();
                    debug!("evicted domain '{}' for capacity", victim);
                }
                None => break,
            }
        }

        let entry = Arc::new(DomainEntry::new(filter.clone()));
        inner.entries.insert(domain.to_string(), Arc::clone(&entry));
        inner.lru.touch(domain);
        Ok(entry)
    }

    // == TTL Eviction ==
    /// Removes every entry idle for at least the configured TTL.
    ///
    /// Returns the number of entries removed. An in-flight extension on
    /// an evicted entry finishes against its own handle and is dropped
    /// with it; the next request recomputes from scratch.
    pub async fn evict_expired(&self) -> usize {
        let mut inner = self.inner.write().await;

        let expired: Vec<String> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.idle() >= self.entry_ttl)
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired.len();
        for key in expired {
            inner.entries.remove(&key);
            inner.lru.remove(&key);
            self.stats.record_eviction();
        }
        count
    }
}

// == Extension Task ==
/// Extends an entry's prefix to `upper` under the entry's build lock.
///
/// The bound is re-checked after the lock is acquired: a competing
/// request may already have extended past `upper` while this task
/// waited, in which case there is nothing to do. The delta is sieved on
/// a blocking worker thread and appended in one step, so the prefix is
/// never observable half-extended.
async fn extend_entry(
    entry: Arc<DomainEntry>,
    upper: u64,
    stats: Arc<CacheStats>,
) -> Result<()> {
    let _build = entry.build_lock().lock().await;

    let (from, seed) = {
        let prefix = entry.prefix().read().await;
        if prefix.bound() >= upper {
            return Ok(());
        }
        (prefix.bound(), prefix.seed(isqrt(upper)))
    };

    let filter = entry.filter().clone();
    let delta = tokio::task::spawn_blocking(move || extend_range(&filter, &seed, from, upper))
        .await
        .map_err(|e| SieveError::Internal(format!("sieve worker failed: {e}")))?;
    stats.record_computation();

    let mut prefix = entry.prefix().write().await;
    prefix.extend_to(upper, delta);
    Ok(())
}
