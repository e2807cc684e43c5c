use std::sync::Arc;

use rolegate_core::{AppError, AppResult, PermissionId, RoleId, UserId};
use rolegate_domain::{Permission, Role};

use crate::entity_store::{
    CreatePermissionInput, CreateRoleInput, EntityStore, Page, PageQuery, UpdatePermissionInput,
    UpdateRoleInput,
};
use crate::{PermissionCache, PermissionCacheCoordinator, TaskExecutor};

mod assignments;
mod permissions;
mod roles;

/// Public facade over role and permission administration plus access checks.
///
/// CRUD operations delegate persistence to the entity store and add only the
/// domain rules: name uniqueness among live rows, status defaulting, and
/// permission token validation. Assignment changes keep the cache coordinator
/// consistent; access checks delegate to it entirely.
pub struct AuthorizationService {
    store: Arc<dyn EntityStore>,
    coordinator: Arc<PermissionCacheCoordinator>,
}

impl AuthorizationService {
    /// Creates a service over the entity store with its own coordinator.
    #[must_use]
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        let coordinator = Arc::new(PermissionCacheCoordinator::new(store.clone()));
        Self { store, coordinator }
    }

    /// Attaches or detaches the permission cache backend.
    pub fn set_cache(&self, cache: Option<Arc<dyn PermissionCache>>) {
        self.coordinator.set_cache(cache);
    }

    /// Attaches or detaches the background task executor.
    pub fn set_executor(&self, executor: Option<Arc<dyn TaskExecutor>>) {
        self.coordinator.set_executor(executor);
    }

    /// Decides whether the user may perform `action` on `resource`.
    ///
    /// Denial is `Ok(false)`; an error means the decision could not be made
    /// and the caller should fail closed.
    pub async fn check_permission(
        &self,
        user_id: UserId,
        resource: &str,
        action: &str,
    ) -> AppResult<bool> {
        self.coordinator
            .check_permission(user_id, resource, action)
            .await
    }
}
