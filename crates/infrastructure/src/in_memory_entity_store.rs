//! In-memory entity store adapter.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use rolegate_application::{EntityStore, NewPermission, NewRole, Page, PageQuery};
use rolegate_core::{AppResult, PermissionId, RoleId, UserId};
use rolegate_domain::{Permission, Role};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct RoleRecord {
    role: Role,
    deleted: bool,
}

#[derive(Debug, Clone)]
struct PermissionRecord {
    permission: Permission,
    deleted: bool,
}

#[derive(Default)]
struct StoreState {
    roles: BTreeMap<i64, RoleRecord>,
    permissions: BTreeMap<i64, PermissionRecord>,
    user_roles: BTreeSet<(i64, i64)>,
    role_permissions: BTreeSet<(i64, i64)>,
    next_id: i64,
}

impl StoreState {
    fn allocate_id(&mut self) -> i64 {
        // Monotonic counter; tombstoned rows keep their identifiers so they
        // are never reused.
        self.next_id += 1;
        self.next_id
    }

    fn live_role(&self, role_id: i64) -> Option<&Role> {
        self.roles
            .get(&role_id)
            .filter(|record| !record.deleted)
            .map(|record| &record.role)
    }

    fn live_permission(&self, permission_id: i64) -> Option<&Permission> {
        self.permissions
            .get(&permission_id)
            .filter(|record| !record.deleted)
            .map(|record| &record.permission)
    }
}

/// In-memory implementation of the entity store port.
#[derive(Default)]
pub struct InMemoryEntityStore {
    state: RwLock<StoreState>,
}

impl InMemoryEntityStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    async fn create_role(&self, role: NewRole) -> AppResult<Role> {
        let mut state = self.state.write().await;
        let id = state.allocate_id();
        let created = Role {
            id: RoleId::new(id),
            name: role.name,
            description: role.description,
            status: role.status,
        };
        state.roles.insert(
            id,
            RoleRecord {
                role: created.clone(),
                deleted: false,
            },
        );
        Ok(created)
    }

    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<Role>> {
        let state = self.state.read().await;
        Ok(state.live_role(role_id.value()).cloned())
    }

    async fn find_role_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        let state = self.state.read().await;
        Ok(state
            .roles
            .values()
            .filter(|record| !record.deleted)
            .map(|record| &record.role)
            .find(|role| role.name == name)
            .cloned())
    }

    async fn list_roles(&self, query: PageQuery) -> AppResult<Page<Role>> {
        let state = self.state.read().await;
        let live: Vec<Role> = state
            .roles
            .values()
            .filter(|record| !record.deleted)
            .map(|record| record.role.clone())
            .collect();
        Ok(paginate(live, query))
    }

    async fn update_role(&self, role: &Role) -> AppResult<()> {
        let mut state = self.state.write().await;
        if let Some(record) = state.roles.get_mut(&role.id.value())
            && !record.deleted
        {
            record.role = role.clone();
        }
        Ok(())
    }

    async fn delete_role(&self, role_id: RoleId) -> AppResult<bool> {
        let mut state = self.state.write().await;
        match state.roles.get_mut(&role_id.value()) {
            Some(record) if !record.deleted => {
                record.deleted = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn create_permission(&self, permission: NewPermission) -> AppResult<Permission> {
        let mut state = self.state.write().await;
        let id = state.allocate_id();
        let created = Permission {
            id: PermissionId::new(id),
            name: permission.name,
            resource: permission.resource,
            action: permission.action,
            description: permission.description,
            status: permission.status,
        };
        state.permissions.insert(
            id,
            PermissionRecord {
                permission: created.clone(),
                deleted: false,
            },
        );
        Ok(created)
    }

    async fn find_permission(&self, permission_id: PermissionId) -> AppResult<Option<Permission>> {
        let state = self.state.read().await;
        Ok(state.live_permission(permission_id.value()).cloned())
    }

    async fn find_permission_by_name(&self, name: &str) -> AppResult<Option<Permission>> {
        let state = self.state.read().await;
        Ok(state
            .permissions
            .values()
            .filter(|record| !record.deleted)
            .map(|record| &record.permission)
            .find(|permission| permission.name == name)
            .cloned())
    }

    async fn list_permissions(&self, query: PageQuery) -> AppResult<Page<Permission>> {
        let state = self.state.read().await;
        let live: Vec<Permission> = state
            .permissions
            .values()
            .filter(|record| !record.deleted)
            .map(|record| record.permission.clone())
            .collect();
        Ok(paginate(live, query))
    }

    async fn update_permission(&self, permission: &Permission) -> AppResult<()> {
        let mut state = self.state.write().await;
        if let Some(record) = state.permissions.get_mut(&permission.id.value())
            && !record.deleted
        {
            record.permission = permission.clone();
        }
        Ok(())
    }

    async fn delete_permission(&self, permission_id: PermissionId) -> AppResult<bool> {
        let mut state = self.state.write().await;
        match state.permissions.get_mut(&permission_id.value()) {
            Some(record) if !record.deleted => {
                record.deleted = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn assign_role_to_user(&self, user_id: UserId, role_id: RoleId) -> AppResult<()> {
        self.state
            .write()
            .await
            .user_roles
            .insert((user_id.value(), role_id.value()));
        Ok(())
    }

    async fn remove_role_from_user(&self, user_id: UserId, role_id: RoleId) -> AppResult<()> {
        self.state
            .write()
            .await
            .user_roles
            .remove(&(user_id.value(), role_id.value()));
        Ok(())
    }

    async fn user_roles(&self, user_id: UserId) -> AppResult<Vec<Role>> {
        let state = self.state.read().await;
        Ok(state
            .user_roles
            .iter()
            .filter(|(user, _)| *user == user_id.value())
            .filter_map(|(_, role_id)| state.live_role(*role_id))
            .cloned()
            .collect())
    }

    async fn user_permissions(&self, user_id: UserId) -> AppResult<Vec<Permission>> {
        let state = self.state.read().await;
        let mut effective: BTreeMap<i64, Permission> = BTreeMap::new();

        // TODO: decide whether disabled roles should stop contributing to
        // the effective set; the join currently ignores role status.
        for (user, role_id) in &state.user_roles {
            if *user != user_id.value() || state.live_role(*role_id).is_none() {
                continue;
            }
            for (role, permission_id) in &state.role_permissions {
                if role != role_id {
                    continue;
                }
                let Some(permission) = state.live_permission(*permission_id) else {
                    continue;
                };
                if permission.status.is_enabled() {
                    effective.insert(*permission_id, permission.clone());
                }
            }
        }

        Ok(effective.into_values().collect())
    }

    async fn assign_permission_to_role(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        self.state
            .write()
            .await
            .role_permissions
            .insert((role_id.value(), permission_id.value()));
        Ok(())
    }

    async fn remove_permission_from_role(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        self.state
            .write()
            .await
            .role_permissions
            .remove(&(role_id.value(), permission_id.value()));
        Ok(())
    }

    async fn role_permissions(&self, role_id: RoleId) -> AppResult<Vec<Permission>> {
        let state = self.state.read().await;
        Ok(state
            .role_permissions
            .iter()
            .filter(|(role, _)| *role == role_id.value())
            .filter_map(|(_, permission_id)| state.live_permission(*permission_id))
            .cloned()
            .collect())
    }

    async fn user_has_permission(
        &self,
        user_id: UserId,
        resource: &str,
        action: &str,
    ) -> AppResult<bool> {
        let effective = self.user_permissions(user_id).await?;
        Ok(effective
            .iter()
            .any(|permission| permission.resource == resource && permission.action == action))
    }
}

fn paginate<T>(rows: Vec<T>, query: PageQuery) -> Page<T> {
    let total = rows.len() as u64;
    let offset = query.page.saturating_sub(1) as usize * query.page_size as usize;
    let items = rows
        .into_iter()
        .skip(offset)
        .take(query.page_size as usize)
        .collect();
    Page { items, total }
}
