//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

/// Redis cache for the redirect hot path.
///
/// Uses connection pooling via `ConnectionManager` for efficient connection
/// reuse. All operations are fail-open: errors are logged but don't
/// propagate to callers.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: usize,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis, validates the connection with a PING, and
    /// configures the default TTL.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the
    /// connection cannot be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl: default_ttl_seconds as usize,
            key_prefix: "slug:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, slug: &str) -> String {
        format!("{}{}", self.key_prefix, slug)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_target(&self, slug: &str) -> CacheResult<Option<String>> {
        let key = self.build_key(slug);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(url)) => {
                debug!("Cache HIT: {} -> {}", slug, url);
                Ok(Some(url))
            }
            Ok(None) => {
                debug!("Cache MISS: {}", slug);
                Ok(None)
            }
            Err(e) => {
                error!("Redis GET error for {}: {}", slug, e);
                Ok(None)
            }
        }
    }

    async fn set_target(
        &self,
        slug: &str,
        target_url: &str,
        ttl: Option<usize>,
    ) -> CacheResult<()> {
        let key = self.build_key(slug);
        let mut conn = self.client.clone();
        let ttl_seconds = ttl.unwrap_or(self.default_ttl);

        match conn
            .set_ex::<_, _, ()>(&key, target_url, ttl_seconds as u64)
            .await
        {
            Ok(_) => {
                debug!("Cache SET: {} -> {} (TTL: {}s)", slug, target_url, ttl_seconds);
                Ok(())
            }
            Err(e) => {
                warn!("Redis SET error for {}: {}", slug, e);
                Ok(())
            }
        }
    }

    async fn invalidate(&self, slug: &str) -> CacheResult<()> {
        let key = self.build_key(slug);
        let mut conn = self.client.clone();

        match conn.del::<_, i32>(&key).await {
            Ok(deleted) => {
                if deleted > 0 {
                    debug!("Cache INVALIDATE: {}", slug);
                }
                Ok(())
            }
            Err(e) => {
                warn!("Redis DEL error for {}: {}", slug, e);
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
