//! Domain Entry Module
//!
//! Per-domain cache state: the computed prefix, the build lock that
//! serializes extensions, and the idle timestamp driving TTL eviction.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::sync::{Mutex, RwLock};

use crate::sieve::{SieveFilter, SievePrefix};

// == Domain Entry ==
/// Cached state for one sieve domain.
///
/// The prefix is shared read-only with concurrent requesters; mutation
/// goes through exactly one path, the extension task holding `build`.
/// Readers of an already-covered range therefore never wait on a
/// computation.
#[derive(Debug)]
pub struct DomainEntry {
    /// Filter this domain sieves with
    filter: SieveFilter,
    /// Largest contiguous computed result
    prefix: RwLock<SievePrefix>,
    /// Serializes extension so at most one build runs per domain
    build: Mutex<()>,
    /// Last access timestamp (Unix milliseconds), drives TTL eviction
    last_access: AtomicU64,
}

impl DomainEntry {
    // == Constructor ==
    /// Creates a fresh entry with an empty prefix.
    pub fn new(filter: SieveFilter) -> Self {
        Self {
            filter,
            prefix: RwLock::new(SievePrefix::empty()),
            build: Mutex::new(()),
            last_access: AtomicU64::new(current_timestamp_ms()),
        }
    }

    pub fn filter(&self) -> &SieveFilter {
        &self.filter
    }

    pub fn prefix(&self) -> &RwLock<SievePrefix> {
        &self.prefix
    }

    pub fn build_lock(&self) -> &Mutex<()> {
        &self.build
    }

    // == Access Tracking ==
    /// Stamps the entry as just used.
    pub fn touch(&self) {
        self.last_access
            .store(current_timestamp_ms(), Ordering::Relaxed);
    }

    /// Time since the last access.
    ///
    /// An entry is eviction-eligible once this reaches the configured
    /// TTL; the boundary is inclusive, so a TTL of zero makes every
    /// entry immediately eligible.
    pub fn idle(&self) -> Duration {
        let last = self.last_access.load(Ordering::Relaxed);
        Duration::from_millis(current_timestamp_ms().saturating_sub(last))
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
