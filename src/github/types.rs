// GitHub cached-record types.
// Shapes for the source-control statistics stored by the cache, mirroring the
// card subroutes (stats, streak, languages).

use serde::{Deserialize, Serialize};

/// Raw activity totals used as input to the rank computation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ActivityTotals {
    pub commits: u64,
    pub contributed_to: u64,
    pub issues: u64,
    pub stars: u64,
    pub prs: u64,
    pub followers: u64,
    pub repos: u64,
}

/// Cached record for the `stats` subroute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub grade: String,
    pub total_stars: u64,
    pub total_commits: u64,
    #[serde(rename = "totalPR")]
    pub total_pr: u64,
    pub total_issues: u64,
    pub contributed_to: u64,
    pub followers: u64,
    pub repos: u64,
}

/// Cached record for the `streak` subroute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StreakStats {
    pub total: u64,
    pub total_range: String,
    pub current: u64,
    pub current_date: String,
    pub longest: u64,
    pub longest_date: String,
}

/// Cached record for the `languages` subroute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguageStats {
    pub name: String,
    pub usage: f64,
    pub color: String,
}
