// Cache store for reading and writing cached provider data.
// Applies the serializer on both paths and the expiration policy on writes;
// backend failures degrade to miss/drop everywhere except delete.

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::config::{DeploymentMode, RedisSettings};

use super::backend::{CacheBackend, MemoryBackend, RedisBackend};
use super::codec::{self, Graph};
use super::error::CacheResult;
use super::policy;

/// Keyed storage between rate-limited upstream APIs and the HTTP layer.
///
/// One store is constructed per process, before first use, and shared by all
/// callers. Reads and writes are best-effort: any failure is logged and
/// surfaces as a miss or a dropped write, never as an error. Delete is the
/// exception; see [`CacheStore::delete`].
#[derive(Debug, Clone)]
pub struct CacheStore {
    backend: CacheBackend,
    mode: DeploymentMode,
}

impl CacheStore {
    /// Connect to the Redis backend selected by `settings`.
    pub async fn connect(settings: &RedisSettings, mode: DeploymentMode) -> CacheResult<Self> {
        let backend = RedisBackend::connect(settings).await?;
        Ok(Self {
            backend: CacheBackend::Redis(Box::new(backend)),
            mode,
        })
    }

    /// Store backed by an in-process map, for tests and local runs.
    pub fn in_memory(mode: DeploymentMode) -> Self {
        Self::with_backend(CacheBackend::Memory(MemoryBackend::new()), mode)
    }

    pub fn with_backend(backend: CacheBackend, mode: DeploymentMode) -> Self {
        Self { backend, mode }
    }

    /// Check that the backend is reachable.
    pub async fn ping(&self) -> CacheResult<()> {
        self.backend.ping().await
    }

    /// Write a record under `key`, best-effort.
    ///
    /// Persistent entries never expire; others get the TTL for the current
    /// deployment mode. Encoding or backend failures are logged and swallowed,
    /// so callers never block request serving on a cache write.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T, persistent: bool) {
        let raw = match codec::encode_record(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "dropping cache write: encode failed");
                return;
            }
        };
        self.set_raw(key, raw, persistent).await;
    }

    /// Write an already-built value graph under `key`, best-effort.
    pub async fn set_graph(&self, key: &str, graph: &Graph, persistent: bool) {
        let raw = match codec::encode(graph) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "dropping cache write: encode failed");
                return;
            }
        };
        self.set_raw(key, raw, persistent).await;
    }

    async fn set_raw(&self, key: &str, raw: String, persistent: bool) {
        let expiration = policy::expiration_for(persistent, self.mode);
        match self.backend.set(key, &raw, expiration).await {
            Ok(()) => debug!(key, ?expiration, "cache set"),
            Err(e) => warn!(key, error = %e, "dropping cache write: backend failed"),
        }
    }

    /// Read the record stored under `key`.
    ///
    /// A backend miss, a backend failure, or a corrupt stored representation
    /// all return `None`; callers fall back to refetching from the source of
    /// truth.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_raw(key).await?;
        match codec::decode_record(&raw) {
            Ok(value) => {
                debug!(key, "cache hit");
                Some(value)
            }
            Err(e) => {
                warn!(key, error = %e, "treating cache entry as miss: decode failed");
                None
            }
        }
    }

    /// Read the value graph stored under `key`. Same miss semantics as `get`.
    pub async fn get_graph(&self, key: &str) -> Option<Graph> {
        let raw = self.get_raw(key).await?;
        match codec::decode(&raw) {
            Ok(graph) => {
                debug!(key, "cache hit");
                Some(graph)
            }
            Err(e) => {
                warn!(key, error = %e, "treating cache entry as miss: decode failed");
                None
            }
        }
    }

    async fn get_raw(&self, key: &str) -> Option<String> {
        match self.backend.get(key).await {
            Ok(Some(raw)) => Some(raw),
            Ok(None) => {
                debug!(key, "cache miss");
                None
            }
            Err(e) => {
                warn!(key, error = %e, "treating cache read as miss: backend failed");
                None
            }
        }
    }

    /// Remove the entry under `key`.
    ///
    /// Returns whether an entry existed. Unlike reads and writes, a backend
    /// failure here is surfaced: callers delete as part of an unregister flow
    /// where a silent no-op would leave stale personal data behind, and they
    /// need to warn the user that expiration is the eventual fallback.
    pub async fn delete(&self, key: &str) -> CacheResult<bool> {
        let removed = self.backend.delete(key).await.inspect_err(|e| {
            warn!(key, error = %e, "cache delete failed");
        })?;
        debug!(key, removed, "cache delete");
        Ok(removed)
    }
}
