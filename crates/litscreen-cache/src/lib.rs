//! litscreen-cache
//!
//! TTL cache for literature search results with in-memory and flat-file
//! backends, plus the cache-aside wrapper search call sites go through.
//! The cache is an optimization, never a dependency: backend failures are
//! downgraded to misses or dropped writes and never reach the caller.

pub mod aside;
pub mod key;
pub mod settings;
pub mod store;

pub use aside::cached_search;
pub use settings::CacheSettings;
pub use store::{Backend, CacheStats, SearchCache};
