use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use rolegate_application::PermissionCache;
use rolegate_core::AppResult;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// In-memory cache adapter for permission sets.
#[derive(Default)]
pub struct InMemoryPermissionCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemoryPermissionCache {
    /// Creates an empty in-memory permission cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PermissionCache for InMemoryPermissionCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Ok(Some(entry.value.clone()));
                }
                Some(_) => {}
                None => return Ok(None),
            }
        }

        let mut entries = self.entries.write().await;
        if entries
            .get(key)
            .is_some_and(|entry| entry.expires_at <= Instant::now())
        {
            entries.remove(key);
        }

        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> AppResult<()> {
        if ttl_seconds == 0 {
            return Ok(());
        }

        let now = Instant::now();
        let expires_at = now
            .checked_add(Duration::from_secs(ttl_seconds))
            .unwrap_or(now);

        self.entries.write().await.insert(
            key.to_owned(),
            CacheEntry {
                value: value.to_owned(),
                expires_at,
            },
        );

        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rolegate_application::PermissionCache;

    use super::InMemoryPermissionCache;

    #[tokio::test]
    async fn set_then_get_returns_the_value() {
        let cache = InMemoryPermissionCache::new();
        let stored = cache.set("user:perms:1", r#"["posts:write"]"#, 60).await;
        assert!(stored.is_ok());

        let value = cache.get("user:perms:1").await;
        assert_eq!(value.ok().flatten().as_deref(), Some(r#"["posts:write"]"#));
    }

    #[tokio::test]
    async fn zero_ttl_writes_are_skipped() {
        let cache = InMemoryPermissionCache::new();
        let stored = cache.set("user:perms:1", "[]", 0).await;
        assert!(stored.is_ok());
        assert_eq!(cache.get("user:perms:1").await.ok().flatten(), None);
    }

    #[tokio::test]
    async fn delete_removes_the_entry() {
        let cache = InMemoryPermissionCache::new();
        let stored = cache.set("user:perms:1", "[]", 60).await;
        assert!(stored.is_ok());
        assert!(cache.delete("user:perms:1").await.is_ok());
        assert_eq!(cache.get("user:perms:1").await.ok().flatten(), None);

        // Deleting an absent key also succeeds.
        assert!(cache.delete("user:perms:1").await.is_ok());
    }
}
