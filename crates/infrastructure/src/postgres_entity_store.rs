//! PostgreSQL-backed entity store.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use rolegate_application::{EntityStore, NewPermission, NewRole, Page, PageQuery};
use rolegate_core::{AppError, AppResult, PermissionId, RoleId, UserId};
use rolegate_domain::{EntityStatus, Permission, Role};

mod permissions;
mod relations;
mod roles;

/// PostgreSQL implementation of the entity store port.
///
/// Soft deletes set `deleted_at`; a partial unique index keeps names unique
/// among live rows only, so a tombstoned name can be reused.
#[derive(Clone)]
pub struct PostgresEntityStore {
    pool: PgPool,
}

impl PostgresEntityStore {
    /// Creates a store with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RoleRow {
    id: i64,
    name: String,
    description: String,
    status: String,
}

impl RoleRow {
    fn into_role(self) -> AppResult<Role> {
        Ok(Role {
            id: RoleId::new(self.id),
            name: self.name,
            description: self.description,
            status: decode_status(&self.status)?,
        })
    }
}

#[derive(Debug, FromRow)]
struct PermissionRow {
    id: i64,
    name: String,
    resource: String,
    action: String,
    description: String,
    status: String,
}

impl PermissionRow {
    fn into_permission(self) -> AppResult<Permission> {
        Ok(Permission {
            id: PermissionId::new(self.id),
            name: self.name,
            resource: self.resource,
            action: self.action,
            description: self.description,
            status: decode_status(&self.status)?,
        })
    }
}

fn decode_status(value: &str) -> AppResult<EntityStatus> {
    EntityStatus::from_str(value)
        .map_err(|_| AppError::Internal(format!("invalid stored status value '{value}'")))
}

fn map_unique_violation(error: sqlx::Error, entity: &str, name: &str) -> AppError {
    if let sqlx::Error::Database(database_error) = &error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::AlreadyExists(format!("{entity} '{name}' already exists"));
    }

    AppError::Internal(format!("failed to persist {entity} '{name}': {error}"))
}

fn page_offset(query: PageQuery) -> i64 {
    i64::from(query.page.saturating_sub(1)) * i64::from(query.page_size)
}

#[async_trait]
impl EntityStore for PostgresEntityStore {
    async fn create_role(&self, role: NewRole) -> AppResult<Role> {
        self.create_role_impl(role).await
    }

    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<Role>> {
        self.find_role_impl(role_id).await
    }

    async fn find_role_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        self.find_role_by_name_impl(name).await
    }

    async fn list_roles(&self, query: PageQuery) -> AppResult<Page<Role>> {
        self.list_roles_impl(query).await
    }

    async fn update_role(&self, role: &Role) -> AppResult<()> {
        self.update_role_impl(role).await
    }

    async fn delete_role(&self, role_id: RoleId) -> AppResult<bool> {
        self.delete_role_impl(role_id).await
    }

    async fn create_permission(&self, permission: NewPermission) -> AppResult<Permission> {
        self.create_permission_impl(permission).await
    }

    async fn find_permission(&self, permission_id: PermissionId) -> AppResult<Option<Permission>> {
        self.find_permission_impl(permission_id).await
    }

    async fn find_permission_by_name(&self, name: &str) -> AppResult<Option<Permission>> {
        self.find_permission_by_name_impl(name).await
    }

    async fn list_permissions(&self, query: PageQuery) -> AppResult<Page<Permission>> {
        self.list_permissions_impl(query).await
    }

    async fn update_permission(&self, permission: &Permission) -> AppResult<()> {
        self.update_permission_impl(permission).await
    }

    async fn delete_permission(&self, permission_id: PermissionId) -> AppResult<bool> {
        self.delete_permission_impl(permission_id).await
    }

    async fn assign_role_to_user(&self, user_id: UserId, role_id: RoleId) -> AppResult<()> {
        self.assign_role_to_user_impl(user_id, role_id).await
    }

    async fn remove_role_from_user(&self, user_id: UserId, role_id: RoleId) -> AppResult<()> {
        self.remove_role_from_user_impl(user_id, role_id).await
    }

    async fn user_roles(&self, user_id: UserId) -> AppResult<Vec<Role>> {
        self.user_roles_impl(user_id).await
    }

    async fn user_permissions(&self, user_id: UserId) -> AppResult<Vec<Permission>> {
        self.user_permissions_impl(user_id).await
    }

    async fn assign_permission_to_role(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        self.assign_permission_to_role_impl(role_id, permission_id)
            .await
    }

    async fn remove_permission_from_role(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        self.remove_permission_from_role_impl(role_id, permission_id)
            .await
    }

    async fn role_permissions(&self, role_id: RoleId) -> AppResult<Vec<Permission>> {
        self.role_permissions_impl(role_id).await
    }

    async fn user_has_permission(
        &self,
        user_id: UserId,
        resource: &str,
        action: &str,
    ) -> AppResult<bool> {
        self.user_has_permission_impl(user_id, resource, action)
            .await
    }
}
