use super::*;

use crate::entity_store::NewRole;

impl AuthorizationService {
    /// Creates a role; the name must be unique among live roles.
    pub async fn create_role(&self, input: CreateRoleInput) -> AppResult<Role> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidFormat(
                "role name must not be empty".to_owned(),
            ));
        }

        if self.store.find_role_by_name(name).await?.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "role '{name}' already exists"
            )));
        }

        self.store
            .create_role(NewRole {
                name: name.to_owned(),
                description: input.description,
                status: input.status.unwrap_or_default(),
            })
            .await
    }

    /// Returns one role by identifier.
    pub async fn get_role(&self, role_id: RoleId) -> AppResult<Role> {
        self.store
            .find_role(role_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' was not found")))
    }

    /// Lists roles with offset pagination.
    pub async fn list_roles(&self, query: PageQuery) -> AppResult<Page<Role>> {
        self.store.list_roles(query).await
    }

    /// Applies a partial update to a role.
    ///
    /// Name uniqueness is re-checked only when the name actually changes.
    pub async fn update_role(&self, role_id: RoleId, input: UpdateRoleInput) -> AppResult<Role> {
        let mut role = self.get_role(role_id).await?;

        if let Some(name) = input.name {
            let name = name.trim().to_owned();
            if name.is_empty() {
                return Err(AppError::InvalidFormat(
                    "role name must not be empty".to_owned(),
                ));
            }
            if name != role.name {
                if self.store.find_role_by_name(&name).await?.is_some() {
                    return Err(AppError::AlreadyExists(format!(
                        "role '{name}' already exists"
                    )));
                }
                role.name = name;
            }
        }
        if let Some(description) = input.description {
            role.description = description;
        }
        if let Some(status) = input.status {
            role.status = status;
        }

        self.store.update_role(&role).await?;
        Ok(role)
    }

    /// Soft-deletes a role.
    pub async fn delete_role(&self, role_id: RoleId) -> AppResult<()> {
        if !self.store.delete_role(role_id).await? {
            return Err(AppError::NotFound(format!(
                "role '{role_id}' was not found"
            )));
        }
        Ok(())
    }
}
