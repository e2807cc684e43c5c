use super::*;

impl PostgresEntityStore {
    pub(super) async fn create_permission_impl(
        &self,
        permission: NewPermission,
    ) -> AppResult<Permission> {
        let row = sqlx::query_as::<_, PermissionRow>(
            r#"
            INSERT INTO rbac_permissions (name, resource, action, description, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, resource, action, description, status
            "#,
        )
        .bind(permission.name.as_str())
        .bind(permission.resource.as_str())
        .bind(permission.action.as_str())
        .bind(permission.description.as_str())
        .bind(permission.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| map_unique_violation(error, "permission", permission.name.as_str()))?;

        row.into_permission()
    }

    pub(super) async fn find_permission_impl(
        &self,
        permission_id: PermissionId,
    ) -> AppResult<Option<Permission>> {
        let row = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, name, resource, action, description, status
            FROM rbac_permissions
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(permission_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load permission: {error}")))?;

        row.map(PermissionRow::into_permission).transpose()
    }

    pub(super) async fn find_permission_by_name_impl(
        &self,
        name: &str,
    ) -> AppResult<Option<Permission>> {
        let row = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, name, resource, action, description, status
            FROM rbac_permissions
            WHERE name = $1 AND deleted_at IS NULL
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load permission by name: {error}"))
        })?;

        row.map(PermissionRow::into_permission).transpose()
    }

    pub(super) async fn list_permissions_impl(
        &self,
        query: PageQuery,
    ) -> AppResult<Page<Permission>> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM rbac_permissions
            WHERE deleted_at IS NULL
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to count permissions: {error}")))?;

        let rows = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, name, resource, action, description, status
            FROM rbac_permissions
            WHERE deleted_at IS NULL
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(query.page_size))
        .bind(page_offset(query))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list permissions: {error}")))?;

        Ok(Page {
            items: rows
                .into_iter()
                .map(PermissionRow::into_permission)
                .collect::<AppResult<Vec<_>>>()?,
            total: u64::try_from(total).unwrap_or_default(),
        })
    }

    pub(super) async fn update_permission_impl(&self, permission: &Permission) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE rbac_permissions
            SET name = $2, resource = $3, action = $4, description = $5, status = $6
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(permission.id.value())
        .bind(permission.name.as_str())
        .bind(permission.resource.as_str())
        .bind(permission.action.as_str())
        .bind(permission.description.as_str())
        .bind(permission.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| map_unique_violation(error, "permission", permission.name.as_str()))?;

        Ok(())
    }

    pub(super) async fn delete_permission_impl(
        &self,
        permission_id: PermissionId,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE rbac_permissions
            SET deleted_at = now()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(permission_id.value())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete permission: {error}")))?;

        Ok(result.rows_affected() > 0)
    }
}
