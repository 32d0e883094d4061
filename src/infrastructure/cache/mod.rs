//! Caching abstractions for the redirect hot path.

pub mod null_cache;
pub mod redis_cache;
pub mod service;

pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};
