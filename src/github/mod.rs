// GitHub provider module.
// Cached-record shapes and the rank-grade computation for the stats cards.

pub mod rank;
pub mod types;

pub use rank::rank_grade;
pub use types::{ActivityTotals, LanguageStats, StreakStats, UserStats};

use crate::cache::keys;

/// Cache key for a GitHub user's data subset.
pub fn cache_key(username: &str, subroute: &str) -> String {
    keys::key_builder(keys::GITHUB)(username, subroute)
}
