use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::FetchError;

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub value: T,
    pub fetched_at: DateTime<Utc>,
}

impl<T> Snapshot<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            fetched_at: Utc::now(),
        }
    }
}

/// Latest successful value plus its fetch time.
///
/// Only refreshes write the slot; a replacement swaps the whole `Arc`, so
/// readers see either the old snapshot or the new one.
pub struct SnapshotCache<T> {
    name: &'static str,
    slot: RwLock<Option<Arc<Snapshot<T>>>>,
    in_flight: AtomicUsize,
}

impl<T> SnapshotCache<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: RwLock::new(None),
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn latest(&self) -> Option<Arc<Snapshot<T>>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn store(&self, snapshot: Snapshot<T>) -> Arc<Snapshot<T>> {
        let snapshot = Arc::new(snapshot);
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&snapshot));
        snapshot
    }

    pub fn is_refreshing(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Runs `fetch` and stores its value; a failure is logged and the previous
    /// snapshot stays in place.
    pub async fn refresh<F>(&self, fetch: F) -> bool
    where
        F: Future<Output = Result<T, FetchError>>,
    {
        let outcome = {
            let _guard = InFlight::enter(&self.in_flight);
            fetch.await
        };
        match outcome {
            Ok(value) => {
                let snapshot = self.store(Snapshot::new(value));
                info!(cache = self.name, fetched_at = %snapshot.fetched_at.to_rfc3339(), "cache refreshed");
                true
            }
            Err(err) => {
                warn!(cache = self.name, error = %err, "cache refresh failed; keeping previous snapshot");
                false
            }
        }
    }
}

// Released on drop, so a cancelled refresh does not stay counted.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
