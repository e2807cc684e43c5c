//! Application services and ports.

#![forbid(unsafe_code)]

mod authorization_service;
mod cache_coordinator;
mod cache_ports;
mod entity_store;
#[cfg(test)]
mod test_support;

pub use authorization_service::AuthorizationService;
pub use cache_coordinator::{
    CACHE_MAINTENANCE_POOL, PERMISSION_CACHE_TTL_SECONDS, PermissionCacheCoordinator,
};
pub use cache_ports::{BackgroundTask, PermissionCache, TaskExecutor};
pub use entity_store::{
    CreatePermissionInput, CreateRoleInput, EntityStore, NewPermission, NewRole, Page, PageQuery,
    UpdatePermissionInput, UpdateRoleInput,
};
