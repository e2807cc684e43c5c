use super::*;

impl PostgresEntityStore {
    pub(super) async fn assign_role_to_user_impl(
        &self,
        user_id: UserId,
        role_id: RoleId,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO rbac_user_roles (user_id, role_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, role_id) DO NOTHING
            "#,
        )
        .bind(user_id.value())
        .bind(role_id.value())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to assign role to user: {error}")))?;

        Ok(())
    }

    pub(super) async fn remove_role_from_user_impl(
        &self,
        user_id: UserId,
        role_id: RoleId,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            DELETE FROM rbac_user_roles
            WHERE user_id = $1 AND role_id = $2
            "#,
        )
        .bind(user_id.value())
        .bind(role_id.value())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to remove role from user: {error}"))
        })?;

        Ok(())
    }

    pub(super) async fn user_roles_impl(&self, user_id: UserId) -> AppResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT roles.id, roles.name, roles.description, roles.status
            FROM rbac_roles AS roles
            JOIN rbac_user_roles AS user_roles
                ON user_roles.role_id = roles.id
            WHERE user_roles.user_id = $1 AND roles.deleted_at IS NULL
            ORDER BY roles.id
            "#,
        )
        .bind(user_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list user roles: {error}")))?;

        rows.into_iter().map(RoleRow::into_role).collect()
    }

    pub(super) async fn user_permissions_impl(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<Permission>> {
        // TODO: decide whether disabled roles should stop contributing to
        // the effective set; the join currently filters permission status only.
        let rows = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT DISTINCT
                permissions.id,
                permissions.name,
                permissions.resource,
                permissions.action,
                permissions.description,
                permissions.status
            FROM rbac_permissions AS permissions
            JOIN rbac_role_permissions AS role_permissions
                ON role_permissions.permission_id = permissions.id
            JOIN rbac_user_roles AS user_roles
                ON user_roles.role_id = role_permissions.role_id
            JOIN rbac_roles AS roles
                ON roles.id = user_roles.role_id AND roles.deleted_at IS NULL
            WHERE user_roles.user_id = $1
                AND permissions.status = 'enabled'
                AND permissions.deleted_at IS NULL
            ORDER BY permissions.id
            "#,
        )
        .bind(user_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list user permissions: {error}"))
        })?;

        rows.into_iter().map(PermissionRow::into_permission).collect()
    }

    pub(super) async fn assign_permission_to_role_impl(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO rbac_role_permissions (role_id, permission_id)
            VALUES ($1, $2)
            ON CONFLICT (role_id, permission_id) DO NOTHING
            "#,
        )
        .bind(role_id.value())
        .bind(permission_id.value())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to assign permission to role: {error}"))
        })?;

        Ok(())
    }

    pub(super) async fn remove_permission_from_role_impl(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            DELETE FROM rbac_role_permissions
            WHERE role_id = $1 AND permission_id = $2
            "#,
        )
        .bind(role_id.value())
        .bind(permission_id.value())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to remove permission from role: {error}"))
        })?;

        Ok(())
    }

    pub(super) async fn role_permissions_impl(
        &self,
        role_id: RoleId,
    ) -> AppResult<Vec<Permission>> {
        let rows = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT
                permissions.id,
                permissions.name,
                permissions.resource,
                permissions.action,
                permissions.description,
                permissions.status
            FROM rbac_permissions AS permissions
            JOIN rbac_role_permissions AS role_permissions
                ON role_permissions.permission_id = permissions.id
            WHERE role_permissions.role_id = $1
                AND permissions.deleted_at IS NULL
            ORDER BY permissions.id
            "#,
        )
        .bind(role_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list role permissions: {error}"))
        })?;

        rows.into_iter().map(PermissionRow::into_permission).collect()
    }

    pub(super) async fn user_has_permission_impl(
        &self,
        user_id: UserId,
        resource: &str,
        action: &str,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM rbac_permissions AS permissions
                JOIN rbac_role_permissions AS role_permissions
                    ON role_permissions.permission_id = permissions.id
                JOIN rbac_user_roles AS user_roles
                    ON user_roles.role_id = role_permissions.role_id
                JOIN rbac_roles AS roles
                    ON roles.id = user_roles.role_id AND roles.deleted_at IS NULL
                WHERE user_roles.user_id = $1
                    AND permissions.resource = $2
                    AND permissions.action = $3
                    AND permissions.status = 'enabled'
                    AND permissions.deleted_at IS NULL
            )
            "#,
        )
        .bind(user_id.value())
        .bind(resource)
        .bind(action)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to check user permission: {error}"))
        })
    }
}
