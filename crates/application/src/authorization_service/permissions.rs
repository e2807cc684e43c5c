use super::*;

use crate::entity_store::NewPermission;

impl AuthorizationService {
    /// Creates a permission; the name must be unique among live permissions.
    pub async fn create_permission(&self, input: CreatePermissionInput) -> AppResult<Permission> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidFormat(
                "permission name must not be empty".to_owned(),
            ));
        }
        validate_token("resource", &input.resource)?;
        validate_token("action", &input.action)?;

        if self.store.find_permission_by_name(name).await?.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "permission '{name}' already exists"
            )));
        }

        self.store
            .create_permission(NewPermission {
                name: name.to_owned(),
                resource: input.resource,
                action: input.action,
                description: input.description,
                status: input.status.unwrap_or_default(),
            })
            .await
    }

    /// Returns one permission by identifier.
    pub async fn get_permission(&self, permission_id: PermissionId) -> AppResult<Permission> {
        self.store
            .find_permission(permission_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("permission '{permission_id}' was not found"))
            })
    }

    /// Lists permissions with offset pagination.
    pub async fn list_permissions(&self, query: PageQuery) -> AppResult<Page<Permission>> {
        self.store.list_permissions(query).await
    }

    /// Applies a partial update to a permission.
    ///
    /// Name uniqueness is re-checked only when the name actually changes.
    pub async fn update_permission(
        &self,
        permission_id: PermissionId,
        input: UpdatePermissionInput,
    ) -> AppResult<Permission> {
        let mut permission = self.get_permission(permission_id).await?;

        if let Some(name) = input.name {
            let name = name.trim().to_owned();
            if name.is_empty() {
                return Err(AppError::InvalidFormat(
                    "permission name must not be empty".to_owned(),
                ));
            }
            if name != permission.name {
                if self.store.find_permission_by_name(&name).await?.is_some() {
                    return Err(AppError::AlreadyExists(format!(
                        "permission '{name}' already exists"
                    )));
                }
                permission.name = name;
            }
        }
        if let Some(resource) = input.resource {
            validate_token("resource", &resource)?;
            permission.resource = resource;
        }
        if let Some(action) = input.action {
            validate_token("action", &action)?;
            permission.action = action;
        }
        if let Some(description) = input.description {
            permission.description = description;
        }
        if let Some(status) = input.status {
            permission.status = status;
        }

        self.store.update_permission(&permission).await?;
        Ok(permission)
    }

    /// Soft-deletes a permission.
    pub async fn delete_permission(&self, permission_id: PermissionId) -> AppResult<()> {
        if !self.store.delete_permission(permission_id).await? {
            return Err(AppError::NotFound(format!(
                "permission '{permission_id}' was not found"
            )));
        }
        Ok(())
    }
}

/// Permission tokens must be non-empty and free of the canonical-form
/// separator; `*` is the only recognized wildcard value.
fn validate_token(field: &str, value: &str) -> AppResult<()> {
    if value.is_empty() {
        return Err(AppError::InvalidFormat(format!(
            "permission {field} must not be empty"
        )));
    }
    if value.contains(':') {
        return Err(AppError::InvalidFormat(format!(
            "permission {field} '{value}' must not contain ':'"
        )));
    }
    Ok(())
}
