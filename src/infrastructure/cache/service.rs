//! Cache service trait and error types.

use async_trait::async_trait;
use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching slug-to-target-URL mappings on the redirect hot path.
///
/// Implementations must be thread-safe and fail open: cache failures degrade
/// to database lookups, never to failed redirects.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the redirect target for a pretty slug from cache.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss or error (fail-open behavior)
    async fn get_target(&self, slug: &str) -> CacheResult<Option<String>>;

    /// Stores a slug-to-target mapping in cache with optional TTL.
    ///
    /// # Errors
    ///
    /// Implementations log errors and return `Ok(())` to avoid disrupting
    /// the request flow.
    async fn set_target(
        &self,
        slug: &str,
        target_url: &str,
        ttl_seconds: Option<usize>,
    ) -> CacheResult<()>;

    /// Removes a cached mapping.
    ///
    /// Used when a link is deactivated, deleted, or its slug regenerated.
    async fn invalidate(&self, slug: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by the health endpoint to report cache status.
    async fn health_check(&self) -> bool;
}
