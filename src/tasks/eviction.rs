//! TTL Eviction Task
//!
//! Background task that periodically evicts idle domain entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::DomainStore;

/// Spawns a background task that periodically evicts domain entries
/// idle past the configured TTL.
///
/// Eviction always removes whole entries; a domain evicted here is
/// recomputed from scratch on its next request. The returned handle is
/// aborted during graceful shutdown.
pub fn spawn_eviction_task(store: Arc<DomainStore>, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting TTL eviction task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = store.evict_expired().await;

            if removed > 0 {
                info!("TTL eviction: removed {} idle domain entries", removed);
            } else {
                debug!("TTL eviction: no idle entries found");
            }
        }
    })
}
