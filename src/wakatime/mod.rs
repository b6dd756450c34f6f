// WakaTime provider module.
// Client, cached-record shapes, and the periodic refresh scheduler for
// time-tracking statistics.

pub mod client;
pub mod refresh;
pub mod types;

pub use client::WakaTimeClient;
pub use refresh::{RefreshMeta, RefreshScheduler, TrackedStats, refresh_profile, unregister};
pub use types::{UsageSlice, WakaStats};

use crate::cache::keys;

/// Cache key for a WakaTime user's data subset.
pub fn cache_key(username: &str, subroute: &str) -> String {
    keys::key_builder(keys::WAKATIME)(username, subroute)
}
