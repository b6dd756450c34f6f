// WakaTime API response types.
// The raw all-time stats payload and the shaved record kept in the cache.

use serde::{Deserialize, Serialize};

/// Envelope around every WakaTime API response.
#[derive(Debug, Deserialize)]
pub struct StatsEnvelope {
    pub data: RawStats,
}

/// All-time stats as returned by the API, before shaving.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStats {
    pub total_seconds: f64,
    pub human_readable_total: String,
    pub daily_average: f64,
    pub human_readable_daily_average: String,
    #[serde(default)]
    pub languages: Vec<UsageSlice>,
    #[serde(default)]
    pub editors: Vec<UsageSlice>,
    #[serde(default)]
    pub operating_systems: Vec<UsageSlice>,
    #[serde(default)]
    pub categories: Vec<UsageSlice>,
}

/// One entry of a usage breakdown (language, editor, OS).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UsageSlice {
    pub name: String,
    pub percent: f64,
    pub total_seconds: f64,
}

/// Cached record for the `stats` subroute, shaved to spare the cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WakaStats {
    pub total_seconds: f64,
    pub human_readable_total: String,
    pub daily_average: f64,
    pub human_readable_daily_average: String,
    pub languages: Vec<UsageSlice>,
    pub editors: Vec<UsageSlice>,
    pub operating_systems: Vec<UsageSlice>,
}

impl From<RawStats> for WakaStats {
    fn from(raw: RawStats) -> Self {
        Self {
            total_seconds: raw.total_seconds,
            human_readable_total: raw.human_readable_total,
            daily_average: raw.daily_average,
            human_readable_daily_average: raw.human_readable_daily_average,
            languages: raw.languages,
            editors: raw.editors,
            operating_systems: raw.operating_systems,
        }
    }
}
