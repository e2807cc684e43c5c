//! Redis-backed permission cache.

use async_trait::async_trait;
use redis::AsyncCommands;
use rolegate_application::PermissionCache;
use rolegate_core::{AppError, AppResult};

/// Redis implementation of the permission cache port.
#[derive(Clone)]
pub struct RedisPermissionCache {
    client: redis::Client,
}

impl RedisPermissionCache {
    /// Creates a cache adapter with a configured Redis client.
    #[must_use]
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|error| AppError::Internal(format!("failed to connect to redis: {error}")))
    }
}

#[async_trait]
impl PermissionCache for RedisPermissionCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut connection = self.connection().await?;
        connection.get(key).await.map_err(|error| {
            AppError::Internal(format!("failed to read permission cache entry: {error}"))
        })
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> AppResult<()> {
        if ttl_seconds == 0 {
            return Ok(());
        }

        let mut connection = self.connection().await?;
        connection
            .set_ex(key, value, ttl_seconds)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to write permission cache entry: {error}"))
            })
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let mut connection = self.connection().await?;
        connection.del(key).await.map_err(|error| {
            AppError::Internal(format!("failed to delete permission cache entry: {error}"))
        })
    }
}
