// LeetCode cached-record types.
// Shaved shapes for the coding-challenge statistics stored by the cache.

use serde::{Deserialize, Serialize};

/// Cached record for the `stats` subroute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub username: String,
    pub ranking: u64,
    pub reputation: i64,
    pub star_rating: f64,
    pub contribution_points: u64,
    pub solved: Vec<QuestionCount>,
    pub badges: Vec<Badge>,
}

/// Questions solved at one difficulty level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestionCount {
    pub difficulty: String,
    pub count: u64,
}

/// An earned badge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: String,
    pub display_name: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
}

/// Cached record for the `recent-questions` subroute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentSubmission {
    pub title: String,
    pub title_slug: String,
    pub timestamp: String,
    pub status_display: String,
    pub lang: String,
}

/// Session credentials for the authenticated GraphQL endpoint.
///
/// Shape contract only; credential extraction lives with the route layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Credential {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csrf: Option<String>,
}
