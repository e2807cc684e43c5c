use std::collections::BTreeSet;
use std::sync::{Arc, RwLock, RwLockReadGuard};

use rolegate_core::{AppResult, UserId};
use rolegate_domain::{Permission, resolver};

use crate::{BackgroundTask, EntityStore, PermissionCache, TaskExecutor};

/// TTL applied to cached effective permission sets.
pub const PERMISSION_CACHE_TTL_SECONDS: u64 = 3600;

/// Executor pool reserved for cache maintenance work.
pub const CACHE_MAINTENANCE_POOL: &str = "rbac-cache-maintenance";

/// Read-through coordinator for per-user effective permission sets.
///
/// Cache entries are keyed `user:perms:{user_id}` and hold the set as a JSON
/// array of canonical `resource:action` strings, sorted and deduplicated. A
/// decodable hit is authoritative for the TTL window; a miss recomputes the
/// set from the entity store and repopulates the cache off the request path.
///
/// Cache and executor backends are optional and may be swapped at runtime;
/// every use takes a snapshot of the current backend so a concurrent swap
/// never produces a torn read.
pub struct PermissionCacheCoordinator {
    store: Arc<dyn EntityStore>,
    cache: RwLock<Option<Arc<dyn PermissionCache>>>,
    executor: RwLock<Option<Arc<dyn TaskExecutor>>>,
}

impl PermissionCacheCoordinator {
    /// Creates a coordinator over the entity store with no backends attached.
    #[must_use]
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self {
            store,
            cache: RwLock::new(None),
            executor: RwLock::new(None),
        }
    }

    /// Attaches or detaches the cache backend.
    pub fn set_cache(&self, cache: Option<Arc<dyn PermissionCache>>) {
        match self.cache.write() {
            Ok(mut guard) => *guard = cache,
            Err(poisoned) => *poisoned.into_inner() = cache,
        }
    }

    /// Attaches or detaches the background executor.
    pub fn set_executor(&self, executor: Option<Arc<dyn TaskExecutor>>) {
        match self.executor.write() {
            Ok(mut guard) => *guard = executor,
            Err(poisoned) => *poisoned.into_inner() = executor,
        }
    }

    /// Returns the cache key for a user's effective permission set.
    #[must_use]
    pub fn cache_key(user_id: UserId) -> String {
        format!("user:perms:{user_id}")
    }

    /// Decides whether the user may perform `action` on `resource`.
    ///
    /// A cache hit answers directly; bounded staleness up to the TTL is
    /// accepted. On a miss the fresh verdict is returned as soon as it is
    /// computed, with cache population dispatched as a detached task. Only
    /// entity store failures surface as errors; every cache failure degrades
    /// to a miss.
    pub async fn check_permission(
        &self,
        user_id: UserId,
        resource: &str,
        action: &str,
    ) -> AppResult<bool> {
        let key = Self::cache_key(user_id);

        if let Some(cache) = self.cache_snapshot() {
            match cache.get(&key).await {
                Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                    Ok(entries) => return Ok(resolver::allows(&entries, resource, action)),
                    Err(error) => {
                        tracing::debug!(%key, %error, "discarding undecodable permission cache entry");
                    }
                },
                Ok(None) => {}
                Err(error) => {
                    tracing::debug!(%key, %error, "permission cache read failed, falling back to store");
                }
            }
        }

        let fresh = self.store.user_permissions(user_id).await?;
        let entries: BTreeSet<String> = fresh.iter().map(Permission::canonical).collect();
        let verdict = resolver::allows(&entries, resource, action);

        match serde_json::to_string(&entries) {
            Ok(serialized) => self.schedule_set(key, serialized).await,
            Err(error) => {
                tracing::debug!(%key, %error, "skipping cache population for unserializable set");
            }
        }

        Ok(verdict)
    }

    /// Removes the user's cached permission set, best effort.
    ///
    /// Called after role assignment changes. Deletion failures are swallowed;
    /// TTL expiry is the backstop.
    pub async fn invalidate_user(&self, user_id: UserId) {
        let Some(cache) = self.cache_snapshot() else {
            return;
        };

        let key = Self::cache_key(user_id);
        self.dispatch(Box::pin(async move {
            if let Err(error) = cache.delete(&key).await {
                tracing::warn!(%key, %error, "failed to invalidate permission cache entry");
            }
        }))
        .await;
    }

    async fn schedule_set(&self, key: String, value: String) {
        let Some(cache) = self.cache_snapshot() else {
            return;
        };

        self.dispatch(Box::pin(async move {
            if let Err(error) = cache
                .set(&key, &value, PERMISSION_CACHE_TTL_SECONDS)
                .await
            {
                tracing::warn!(%key, %error, "failed to populate permission cache entry");
            }
        }))
        .await;
    }

    /// Runs a cache maintenance task through the executor when one is
    /// configured, inline otherwise. Submission failures are swallowed; the
    /// next natural cache miss repopulates.
    async fn dispatch(&self, task: BackgroundTask) {
        match self.executor_snapshot() {
            Some(executor) => {
                if let Err(error) = executor.execute(CACHE_MAINTENANCE_POOL, task) {
                    tracing::warn!(%error, "failed to submit cache maintenance task");
                }
            }
            None => task.await,
        }
    }

    fn cache_snapshot(&self) -> Option<Arc<dyn PermissionCache>> {
        Self::read_slot(&self.cache)
    }

    fn executor_snapshot(&self) -> Option<Arc<dyn TaskExecutor>> {
        Self::read_slot(&self.executor)
    }

    fn read_slot<T: ?Sized>(slot: &RwLock<Option<Arc<T>>>) -> Option<Arc<T>> {
        let guard: RwLockReadGuard<'_, _> = match slot.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.clone()
    }
}
