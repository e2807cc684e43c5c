use async_trait::async_trait;
use rolegate_core::{AppResult, PermissionId, RoleId, UserId};
use rolegate_domain::{EntityStatus, Permission, Role};

/// Input payload for role creation.
///
/// A `None` status means the caller supplied no value; the service defaults
/// it to [`EntityStatus::Enabled`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoleInput {
    /// Unique role name.
    pub name: String,
    /// Human-readable role description.
    pub description: String,
    /// Optional lifecycle status.
    pub status: Option<EntityStatus>,
}

/// Partial update payload for roles; only supplied fields change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRoleInput {
    /// New role name, if changing.
    pub name: Option<String>,
    /// New description, if changing.
    pub description: Option<String>,
    /// New lifecycle status, if changing.
    pub status: Option<EntityStatus>,
}

/// Input payload for permission creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePermissionInput {
    /// Unique permission name.
    pub name: String,
    /// Resource token.
    pub resource: String,
    /// Action token.
    pub action: String,
    /// Human-readable permission description.
    pub description: String,
    /// Optional lifecycle status.
    pub status: Option<EntityStatus>,
}

/// Partial update payload for permissions; only supplied fields change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePermissionInput {
    /// New permission name, if changing.
    pub name: Option<String>,
    /// New resource token, if changing.
    pub resource: Option<String>,
    /// New action token, if changing.
    pub action: Option<String>,
    /// New description, if changing.
    pub description: Option<String>,
    /// New lifecycle status, if changing.
    pub status: Option<EntityStatus>,
}

/// Validated role row handed to the entity store for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRole {
    /// Unique role name.
    pub name: String,
    /// Human-readable role description.
    pub description: String,
    /// Resolved lifecycle status.
    pub status: EntityStatus,
}

/// Validated permission row handed to the entity store for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPermission {
    /// Unique permission name.
    pub name: String,
    /// Resource token.
    pub resource: String,
    /// Action token.
    pub action: String,
    /// Human-readable permission description.
    pub description: String,
    /// Resolved lifecycle status.
    pub status: EntityStatus,
}

/// Offset pagination parameters; pages are one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    /// One-based page number.
    pub page: u32,
    /// Maximum rows per page.
    pub page_size: u32,
}

/// One page of results with the total row count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Rows in this page.
    pub items: Vec<T>,
    /// Total matching rows across all pages.
    pub total: u64,
}

/// Storage port for roles, permissions and their relations.
///
/// Soft deletes tombstone the row: deleted entities are excluded from every
/// query and their identifiers are never reused. Relation writes are
/// idempotent; assigning an existing pair or removing an absent one succeeds.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Persists a new role.
    async fn create_role(&self, role: NewRole) -> AppResult<Role>;

    /// Returns one role by identifier.
    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<Role>>;

    /// Returns one role by exact name match.
    async fn find_role_by_name(&self, name: &str) -> AppResult<Option<Role>>;

    /// Lists roles with offset pagination.
    async fn list_roles(&self, query: PageQuery) -> AppResult<Page<Role>>;

    /// Writes back a loaded role; last writer wins.
    async fn update_role(&self, role: &Role) -> AppResult<()>;

    /// Soft-deletes a role; returns whether a live row was tombstoned.
    async fn delete_role(&self, role_id: RoleId) -> AppResult<bool>;

    /// Persists a new permission.
    async fn create_permission(&self, permission: NewPermission) -> AppResult<Permission>;

    /// Returns one permission by identifier.
    async fn find_permission(&self, permission_id: PermissionId) -> AppResult<Option<Permission>>;

    /// Returns one permission by exact name match.
    async fn find_permission_by_name(&self, name: &str) -> AppResult<Option<Permission>>;

    /// Lists permissions with offset pagination.
    async fn list_permissions(&self, query: PageQuery) -> AppResult<Page<Permission>>;

    /// Writes back a loaded permission; last writer wins.
    async fn update_permission(&self, permission: &Permission) -> AppResult<()>;

    /// Soft-deletes a permission; returns whether a live row was tombstoned.
    async fn delete_permission(&self, permission_id: PermissionId) -> AppResult<bool>;

    /// Records a user-role assignment.
    async fn assign_role_to_user(&self, user_id: UserId, role_id: RoleId) -> AppResult<()>;

    /// Removes a user-role assignment.
    async fn remove_role_from_user(&self, user_id: UserId, role_id: RoleId) -> AppResult<()>;

    /// Returns the roles a user holds.
    async fn user_roles(&self, user_id: UserId) -> AppResult<Vec<Role>>;

    /// Returns the user's effective permissions: the deduplicated union of
    /// enabled permissions across every role the user holds.
    async fn user_permissions(&self, user_id: UserId) -> AppResult<Vec<Permission>>;

    /// Records a role-permission grant.
    async fn assign_permission_to_role(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()>;

    /// Removes a role-permission grant.
    async fn remove_permission_from_role(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()>;

    /// Returns the permissions granted to a role.
    async fn role_permissions(&self, role_id: RoleId) -> AppResult<Vec<Permission>>;

    /// Existence check for one exact `(resource, action)` grant. Not used on
    /// the check path, which recomputes the full set for caching.
    async fn user_has_permission(
        &self,
        user_id: UserId,
        resource: &str,
        action: &str,
    ) -> AppResult<bool>;
}
