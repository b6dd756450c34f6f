// devcards: developer-profile statistics aggregator.
// Provider modules fetch and shape upstream data; the cache subsystem keeps
// it between rate-limited API calls and the HTTP layer.

pub mod cache;
pub mod config;
pub mod error;
pub mod github;
pub mod leetcode;
pub mod wakatime;

pub use cache::CacheStore;
pub use config::{DeploymentMode, RedisSettings};
pub use error::{DevcardsError, Result, UpstreamError};
