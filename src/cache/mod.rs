// Caching subsystem.
// Sits between rate-limited upstream APIs and the HTTP layer: keyed storage
// with differentiated expiration and graph-safe serialization.

pub mod backend;
pub mod codec;
pub mod error;
pub mod keys;
pub mod policy;
pub mod store;

pub use backend::{Backend, CacheBackend, MemoryBackend, RedisBackend};
pub use codec::{Graph, Node, NodeId};
pub use error::{CacheError, CacheResult};
pub use keys::key_builder;
pub use policy::{DEVELOPMENT_TTL, Expiration, PRODUCTION_TTL};
pub use store::CacheStore;
