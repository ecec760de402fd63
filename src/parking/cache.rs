use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::info;

use super::model::LotDescription;

/// Time source for cache freshness checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug)]
struct Snapshot {
    lots: Arc<Vec<LotDescription>>,
    fetched_at: Instant,
}

/// Holds at most one description snapshot.
///
/// A snapshot is a miss when it is empty or, if a TTL is configured, older
/// than the TTL. An empty fetch result is stored as-is, so a failed fetch is
/// retried on the next call. The lock is held across read, fetch and store:
/// concurrent first callers wait for one fetch instead of racing to replace
/// the snapshot.
pub struct DescriptionCache {
    snapshot: Mutex<Option<Snapshot>>,
    ttl: Option<Duration>,
    clock: Arc<dyn Clock>,
}

impl DescriptionCache {
    /// Cache whose snapshots never expire.
    pub fn new() -> Self {
        Self::with_policy(None, Arc::new(SystemClock))
    }

    pub fn with_policy(ttl: Option<Duration>, clock: Arc<dyn Clock>) -> Self {
        Self {
            snapshot: Mutex::new(None),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Return the cached snapshot, running `fetch` and replacing the
    /// snapshot with its result on a miss.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Arc<Vec<LotDescription>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Vec<LotDescription>>,
    {
        let mut guard = self.snapshot.lock().await;

        if let Some(snapshot) = guard.as_ref() {
            if !self.is_miss(snapshot) {
                return Arc::clone(&snapshot.lots);
            }
        }

        let lots = Arc::new(fetch().await);
        if !lots.is_empty() {
            info!(lots = lots.len(), "description cache populated");
        }
        *guard = Some(Snapshot {
            lots: Arc::clone(&lots),
            fetched_at: self.clock.now(),
        });
        lots
    }

    /// Number of lots in the current snapshot, `None` if nothing was ever stored.
    pub async fn len(&self) -> Option<usize> {
        self.snapshot.lock().await.as_ref().map(|s| s.lots.len())
    }

    /// Age of the current snapshot.
    pub async fn age(&self) -> Option<Duration> {
        let guard = self.snapshot.lock().await;
        guard
            .as_ref()
            .map(|s| self.clock.now().saturating_duration_since(s.fetched_at))
    }

    fn is_miss(&self, snapshot: &Snapshot) -> bool {
        if snapshot.lots.is_empty() {
            return true;
        }
        match self.ttl {
            Some(ttl) => self.clock.now().saturating_duration_since(snapshot.fetched_at) >= ttl,
            None => false,
        }
    }
}

impl Default for DescriptionCache {
    fn default() -> Self {
        Self::new()
    }
}
