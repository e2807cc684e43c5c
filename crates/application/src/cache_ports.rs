use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;
use rolegate_core::AppResult;

/// Optional key-value cache port with per-entry TTL.
#[async_trait]
pub trait PermissionCache: Send + Sync {
    /// Returns the raw cached value for a key, if present.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Stores a value under a key with a TTL in seconds.
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> AppResult<()>;

    /// Removes a key; removing an absent key succeeds.
    async fn delete(&self, key: &str) -> AppResult<()>;
}

/// Detached unit of background work.
///
/// Tasks capture the data they need by value and carry no reference to the
/// submitting request, so cancelling the request cannot abort the task.
pub type BackgroundTask = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Optional fire-and-forget executor port for named worker pools.
pub trait TaskExecutor: Send + Sync {
    /// Submits a task to a named pool; returns once the task is accepted,
    /// without waiting for it to run.
    fn execute(&self, pool: &str, task: BackgroundTask) -> AppResult<()>;
}
