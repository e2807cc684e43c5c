//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_entity_store;
mod in_memory_permission_cache;
mod postgres_entity_store;
mod redis_permission_cache;
mod tokio_task_executor;

pub use in_memory_entity_store::InMemoryEntityStore;
pub use in_memory_permission_cache::InMemoryPermissionCache;
pub use postgres_entity_store::PostgresEntityStore;
pub use redis_permission_cache::RedisPermissionCache;
pub use tokio_task_executor::TokioTaskExecutor;
