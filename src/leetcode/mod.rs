// LeetCode provider module.
// Cached-record shapes for the coding-challenge statistics cards.

pub mod types;

pub use types::{Badge, Credential, QuestionCount, RecentSubmission, UserStats};

use crate::cache::keys;

/// Cache key for a LeetCode user's data subset.
pub fn cache_key(username: &str, subroute: &str) -> String {
    keys::key_builder(keys::LEETCODE)(username, subroute)
}
