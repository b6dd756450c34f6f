// Expiration policy.
// Decides, per write, whether an entry is persistent or time-bounded.

use std::time::Duration;

use crate::config::DeploymentMode;

/// Long TTL for production deployments, sparing upstream rate limits.
pub const PRODUCTION_TTL: Duration = Duration::from_secs(60 * 60 * 24);

/// Short TTL everywhere else, so local iteration is not blocked by stale
/// cached fixtures.
pub const DEVELOPMENT_TTL: Duration = Duration::from_secs(60 * 10);

/// How long a cache entry lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiration {
    /// Removed only by explicit delete.
    Never,
    /// Expires this long after the write.
    After(Duration),
}

/// Decide the expiration for a write.
pub fn expiration_for(persistent: bool, mode: DeploymentMode) -> Expiration {
    if persistent {
        return Expiration::Never;
    }
    if mode.is_production() {
        Expiration::After(PRODUCTION_TTL)
    } else {
        Expiration::After(DEVELOPMENT_TTL)
    }
}
