use super::*;

impl PostgresEntityStore {
    pub(super) async fn create_role_impl(&self, role: NewRole) -> AppResult<Role> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            INSERT INTO rbac_roles (name, description, status)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, status
            "#,
        )
        .bind(role.name.as_str())
        .bind(role.description.as_str())
        .bind(role.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| map_unique_violation(error, "role", role.name.as_str()))?;

        row.into_role()
    }

    pub(super) async fn find_role_impl(&self, role_id: RoleId) -> AppResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, name, description, status
            FROM rbac_roles
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(role_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load role: {error}")))?;

        row.map(RoleRow::into_role).transpose()
    }

    pub(super) async fn find_role_by_name_impl(&self, name: &str) -> AppResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, name, description, status
            FROM rbac_roles
            WHERE name = $1 AND deleted_at IS NULL
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load role by name: {error}")))?;

        row.map(RoleRow::into_role).transpose()
    }

    pub(super) async fn list_roles_impl(&self, query: PageQuery) -> AppResult<Page<Role>> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM rbac_roles
            WHERE deleted_at IS NULL
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to count roles: {error}")))?;

        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, name, description, status
            FROM rbac_roles
            WHERE deleted_at IS NULL
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(query.page_size))
        .bind(page_offset(query))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list roles: {error}")))?;

        Ok(Page {
            items: rows
                .into_iter()
                .map(RoleRow::into_role)
                .collect::<AppResult<Vec<_>>>()?,
            total: u64::try_from(total).unwrap_or_default(),
        })
    }

    pub(super) async fn update_role_impl(&self, role: &Role) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE rbac_roles
            SET name = $2, description = $3, status = $4
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(role.id.value())
        .bind(role.name.as_str())
        .bind(role.description.as_str())
        .bind(role.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| map_unique_violation(error, "role", role.name.as_str()))?;

        Ok(())
    }

    pub(super) async fn delete_role_impl(&self, role_id: RoleId) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE rbac_roles
            SET deleted_at = now()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(role_id.value())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete role: {error}")))?;

        Ok(result.rows_affected() > 0)
    }
}
