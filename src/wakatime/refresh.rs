// Periodic profile refresh.
// The cache holds only plain data (stats plus refresh metadata); live task
// handles stay in a process-local scheduler map and are never serialized.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cache::CacheStore;
use crate::error::Result;

use super::cache_key;
use super::client::WakaTimeClient;
use super::types::WakaStats;

/// Plain-data description of a refresh schedule.
///
/// Enough to reconstruct the schedule after a process restart; the live task
/// handle itself never goes through the cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshMeta {
    pub username: String,
    pub period_secs: u64,
    pub last_run: DateTime<Utc>,
}

/// The record cached for a registered time-tracking user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackedStats {
    pub data: WakaStats,
    pub refresh: RefreshMeta,
}

/// Process-local registry of active refresh tasks, one per user.
///
/// Owning the single handle per user is what serializes refresh triggering;
/// the cache itself provides no mutual exclusion.
#[derive(Debug, Default)]
pub struct RefreshScheduler {
    tasks: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl RefreshScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the periodic refresh task for a user.
    ///
    /// Any previously scheduled task for the same user is aborted first, so at
    /// most one refresh loop per user is ever in flight.
    pub fn schedule(
        &self,
        store: CacheStore,
        client: Arc<WakaTimeClient>,
        username: &str,
        period: Duration,
    ) {
        let user = username.to_string();
        let task_user = user.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                refresh_profile(&store, &client, &task_user, period).await;
            }
        });

        if let Some(previous) = self.lock().insert(user.clone(), handle) {
            previous.abort();
            debug!(username = %user, "replaced existing refresh schedule");
        }
    }

    /// Stop the refresh task for a user. Returns whether one was scheduled.
    pub fn cancel(&self, username: &str) -> bool {
        match self.lock().remove(username) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_scheduled(&self, username: &str) -> bool {
        self.lock().contains_key(username)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, JoinHandle<()>>> {
        // Handles stay usable even if a task panicked while holding the lock.
        self.tasks.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Fetch fresh stats and overwrite the cached record wholesale.
///
/// Upstream failures are logged and leave the previous entry in place; the
/// next tick retries.
pub async fn refresh_profile(
    store: &CacheStore,
    client: &WakaTimeClient,
    username: &str,
    period: Duration,
) {
    let key = cache_key(username, "stats");
    match client.fetch_stats(username).await {
        Ok(data) => {
            let record = TrackedStats {
                data,
                refresh: RefreshMeta {
                    username: username.to_string(),
                    period_secs: period.as_secs(),
                    last_run: Utc::now(),
                },
            };
            store.set(&key, &record, true).await;
            debug!(username, "refreshed time-tracking profile");
        }
        Err(e) => warn!(username, error = %e, "failed to refresh time-tracking profile"),
    }
}

/// Unregister a user: stop their refresh task and delete their cache entry.
///
/// Returns whether a cache entry existed. A backend failure during deletion is
/// surfaced so the caller can warn the user that automatic expiration is the
/// fallback.
pub async fn unregister(
    scheduler: &RefreshScheduler,
    store: &CacheStore,
    username: &str,
) -> Result<bool> {
    scheduler.cancel(username);
    let removed = store.delete(&cache_key(username, "stats")).await?;
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::backend::{CacheBackend, MemoryBackend};
    use crate::config::DeploymentMode;
    use crate::error::DevcardsError;
    use crate::wakatime::types::UsageSlice;

    fn sample_stats() -> WakaStats {
        WakaStats {
            total_seconds: 360_000.0,
            human_readable_total: "100 hrs".to_string(),
            daily_average: 7_200.0,
            human_readable_daily_average: "2 hrs".to_string(),
            languages: vec![UsageSlice {
                name: "Rust".to_string(),
                percent: 80.0,
                total_seconds: 288_000.0,
            }],
            editors: vec![],
            operating_systems: vec![],
        }
    }

    fn sample_record(username: &str) -> TrackedStats {
        TrackedStats {
            data: sample_stats(),
            refresh: RefreshMeta {
                username: username.to_string(),
                period_secs: 3_600,
                last_run: Utc::now(),
            },
        }
    }

    fn memory_store() -> (CacheStore, MemoryBackend) {
        let backend = MemoryBackend::new();
        let store = CacheStore::with_backend(
            CacheBackend::Memory(backend.clone()),
            DeploymentMode::Development,
        );
        (store, backend)
    }

    #[tokio::test]
    async fn test_tracked_stats_round_trip() {
        let (store, _) = memory_store();
        let record = sample_record("anna");
        let key = cache_key("anna", "stats");

        store.set(&key, &record, true).await;
        let cached: Option<TrackedStats> = store.get(&key).await;
        assert_eq!(cached, Some(record));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduler_owns_one_handle_per_user() {
        let (store, _) = memory_store();
        let client = Arc::new(WakaTimeClient::new("test-key").unwrap());
        let scheduler = RefreshScheduler::new();

        scheduler.schedule(store.clone(), client.clone(), "anna", Duration::from_secs(3_600));
        scheduler.schedule(store, client, "anna", Duration::from_secs(3_600));

        assert!(scheduler.is_scheduled("anna"));
        assert!(scheduler.cancel("anna"));
        assert!(!scheduler.cancel("anna"));
        assert!(!scheduler.is_scheduled("anna"));
    }

    #[tokio::test]
    async fn test_unregister_deletes_cached_record() {
        let (store, _) = memory_store();
        let scheduler = RefreshScheduler::new();
        let key = cache_key("anna", "stats");
        store.set(&key, &sample_record("anna"), true).await;

        assert!(unregister(&scheduler, &store, "anna").await.unwrap());
        assert!(store.get::<TrackedStats>(&key).await.is_none());
        // Second unregister finds nothing to remove.
        assert!(!unregister(&scheduler, &store, "anna").await.unwrap());
    }

    #[tokio::test]
    async fn test_unregister_surfaces_backend_failure() {
        let (store, backend) = memory_store();
        let scheduler = RefreshScheduler::new();
        store.set(&cache_key("anna", "stats"), &sample_record("anna"), true).await;
        backend.set_outage(true);

        match unregister(&scheduler, &store, "anna").await {
            Err(DevcardsError::Cache(_)) => {}
            other => panic!("expected a cache failure, got {other:?}"),
        }
    }
}
