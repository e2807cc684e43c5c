use super::*;

impl AuthorizationService {
    /// Assigns a role to a user and invalidates the user's cached set.
    ///
    /// Re-assigning an already-held role succeeds.
    pub async fn assign_role(&self, user_id: UserId, role_id: RoleId) -> AppResult<()> {
        self.get_role(role_id).await?;
        self.store.assign_role_to_user(user_id, role_id).await?;
        self.coordinator.invalidate_user(user_id).await;
        Ok(())
    }

    /// Removes a role from a user and invalidates the user's cached set.
    ///
    /// Revoking a role the user never held succeeds.
    pub async fn revoke_role(&self, user_id: UserId, role_id: RoleId) -> AppResult<()> {
        self.store.remove_role_from_user(user_id, role_id).await?;
        self.coordinator.invalidate_user(user_id).await;
        Ok(())
    }

    /// Grants a permission to a role.
    ///
    /// Users holding the role keep their cached sets until TTL expiry; grant
    /// changes do not fan out invalidation across assignees.
    pub async fn assign_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        self.get_role(role_id).await?;
        self.get_permission(permission_id).await?;
        self.store
            .assign_permission_to_role(role_id, permission_id)
            .await
    }

    /// Removes a permission from a role. Cached sets expire via TTL, as with
    /// [`Self::assign_permission`].
    pub async fn revoke_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        self.store
            .remove_permission_from_role(role_id, permission_id)
            .await
    }

    /// Returns the roles a user holds.
    pub async fn user_roles(&self, user_id: UserId) -> AppResult<Vec<Role>> {
        self.store.user_roles(user_id).await
    }

    /// Returns the user's effective permissions, recomputed from the store.
    pub async fn user_permissions(&self, user_id: UserId) -> AppResult<Vec<Permission>> {
        self.store.user_permissions(user_id).await
    }

    /// Returns the permissions granted to a role.
    pub async fn role_permissions(&self, role_id: RoleId) -> AppResult<Vec<Permission>> {
        self.store.role_permissions(role_id).await
    }
}
