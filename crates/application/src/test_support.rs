//! Shared fakes for application service tests.

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex as StdMutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use rolegate_core::{AppResult, PermissionId, RoleId, UserId};
use rolegate_domain::{Permission, Role};
use tokio::sync::Mutex;

use crate::{
    BackgroundTask, EntityStore, NewPermission, NewRole, Page, PageQuery, PermissionCache,
    TaskExecutor,
};

#[derive(Default)]
struct StoreState {
    roles: Vec<Role>,
    deleted_roles: BTreeSet<i64>,
    permissions: Vec<Permission>,
    deleted_permissions: BTreeSet<i64>,
    user_roles: BTreeSet<(i64, i64)>,
    role_permissions: BTreeSet<(i64, i64)>,
}

/// In-memory entity store fake counting join queries.
#[derive(Default)]
pub struct FakeEntityStore {
    state: Mutex<StoreState>,
    next_id: AtomicI64,
    /// Number of `user_permissions` join queries served.
    pub user_permissions_calls: AtomicUsize,
}

impl FakeEntityStore {
    pub fn user_permissions_call_count(&self) -> usize {
        self.user_permissions_calls.load(Ordering::SeqCst)
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[async_trait]
impl EntityStore for FakeEntityStore {
    async fn create_role(&self, role: NewRole) -> AppResult<Role> {
        let created = Role {
            id: RoleId::new(self.allocate_id()),
            name: role.name,
            description: role.description,
            status: role.status,
        };
        self.state.lock().await.roles.push(created.clone());
        Ok(created)
    }

    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<Role>> {
        let state = self.state.lock().await;
        Ok(state
            .roles
            .iter()
            .find(|role| role.id == role_id && !state.deleted_roles.contains(&role.id.value()))
            .cloned())
    }

    async fn find_role_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        let state = self.state.lock().await;
        Ok(state
            .roles
            .iter()
            .find(|role| role.name == name && !state.deleted_roles.contains(&role.id.value()))
            .cloned())
    }

    async fn list_roles(&self, query: PageQuery) -> AppResult<Page<Role>> {
        let state = self.state.lock().await;
        let live: Vec<Role> = state
            .roles
            .iter()
            .filter(|role| !state.deleted_roles.contains(&role.id.value()))
            .cloned()
            .collect();
        Ok(paginate(live, query))
    }

    async fn update_role(&self, role: &Role) -> AppResult<()> {
        let mut state = self.state.lock().await;
        if let Some(existing) = state.roles.iter_mut().find(|entry| entry.id == role.id) {
            *existing = role.clone();
        }
        Ok(())
    }

    async fn delete_role(&self, role_id: RoleId) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        let live = state.roles.iter().any(|role| role.id == role_id)
            && !state.deleted_roles.contains(&role_id.value());
        if live {
            state.deleted_roles.insert(role_id.value());
        }
        Ok(live)
    }

    async fn create_permission(&self, permission: NewPermission) -> AppResult<Permission> {
        let created = Permission {
            id: PermissionId::new(self.allocate_id()),
            name: permission.name,
            resource: permission.resource,
            action: permission.action,
            description: permission.description,
            status: permission.status,
        };
        self.state.lock().await.permissions.push(created.clone());
        Ok(created)
    }

    async fn find_permission(&self, permission_id: PermissionId) -> AppResult<Option<Permission>> {
        let state = self.state.lock().await;
        Ok(state
            .permissions
            .iter()
            .find(|permission| {
                permission.id == permission_id
                    && !state.deleted_permissions.contains(&permission.id.value())
            })
            .cloned())
    }

    async fn find_permission_by_name(&self, name: &str) -> AppResult<Option<Permission>> {
        let state = self.state.lock().await;
        Ok(state
            .permissions
            .iter()
            .find(|permission| {
                permission.name == name
                    && !state.deleted_permissions.contains(&permission.id.value())
            })
            .cloned())
    }

    async fn list_permissions(&self, query: PageQuery) -> AppResult<Page<Permission>> {
        let state = self.state.lock().await;
        let live: Vec<Permission> = state
            .permissions
            .iter()
            .filter(|permission| !state.deleted_permissions.contains(&permission.id.value()))
            .cloned()
            .collect();
        Ok(paginate(live, query))
    }

    async fn update_permission(&self, permission: &Permission) -> AppResult<()> {
        let mut state = self.state.lock().await;
        if let Some(existing) = state
            .permissions
            .iter_mut()
            .find(|entry| entry.id == permission.id)
        {
            *existing = permission.clone();
        }
        Ok(())
    }

    async fn delete_permission(&self, permission_id: PermissionId) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        let live = state
            .permissions
            .iter()
            .any(|permission| permission.id == permission_id)
            && !state.deleted_permissions.contains(&permission_id.value());
        if live {
            state.deleted_permissions.insert(permission_id.value());
        }
        Ok(live)
    }

    async fn assign_role_to_user(&self, user_id: UserId, role_id: RoleId) -> AppResult<()> {
        self.state
            .lock()
            .await
            .user_roles
            .insert((user_id.value(), role_id.value()));
        Ok(())
    }

    async fn remove_role_from_user(&self, user_id: UserId, role_id: RoleId) -> AppResult<()> {
        self.state
            .lock()
            .await
            .user_roles
            .remove(&(user_id.value(), role_id.value()));
        Ok(())
    }

    async fn user_roles(&self, user_id: UserId) -> AppResult<Vec<Role>> {
        let state = self.state.lock().await;
        Ok(state
            .roles
            .iter()
            .filter(|role| {
                state.user_roles.contains(&(user_id.value(), role.id.value()))
                    && !state.deleted_roles.contains(&role.id.value())
            })
            .cloned()
            .collect())
    }

    async fn user_permissions(&self, user_id: UserId) -> AppResult<Vec<Permission>> {
        self.user_permissions_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().await;
        let mut seen = BTreeSet::new();
        let mut effective = Vec::new();
        for (user, role_id) in &state.user_roles {
            if *user != user_id.value() || state.deleted_roles.contains(role_id) {
                continue;
            }
            for (role, permission_id) in &state.role_permissions {
                if role != role_id {
                    continue;
                }
                let Some(permission) = state
                    .permissions
                    .iter()
                    .find(|permission| permission.id.value() == *permission_id)
                else {
                    continue;
                };
                if !permission.status.is_enabled()
                    || state.deleted_permissions.contains(permission_id)
                    || !seen.insert(*permission_id)
                {
                    continue;
                }
                effective.push(permission.clone());
            }
        }
        Ok(effective)
    }

    async fn assign_permission_to_role(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        self.state
            .lock()
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
            .lock()
            .await
            .role_permissions
            .remove(&(role_id.value(), permission_id.value()));
        Ok(())
    }

    async fn role_permissions(&self, role_id: RoleId) -> AppResult<Vec<Permission>> {
        let state = self.state.lock().await;
        Ok(state
            .permissions
            .iter()
            .filter(|permission| {
                state
                    .role_permissions
                    .contains(&(role_id.value(), permission.id.value()))
                    && !state.deleted_permissions.contains(&permission.id.value())
            })
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
    let offset = (query.page.saturating_sub(1) as usize) * query.page_size as usize;
    let items = rows
        .into_iter()
        .skip(offset)
        .take(query.page_size as usize)
        .collect();
    Page { items, total }
}

/// In-memory cache fake; TTL is recorded but never enforced.
#[derive(Default)]
pub struct FakePermissionCache {
    entries: Mutex<HashMap<String, String>>,
    /// When set, reads fail with an internal error.
    pub fail_reads: std::sync::atomic::AtomicBool,
}

impl FakePermissionCache {
    pub async fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .await
            .insert(key.to_owned(), value.to_owned());
    }

    pub async fn entry(&self, key: &str) -> Option<String> {
        self.entries.lock().await.get(key).cloned()
    }
}

#[async_trait]
impl PermissionCache for FakePermissionCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(rolegate_core::AppError::Internal(
                "cache backend unavailable".to_owned(),
            ));
        }
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str, _ttl_seconds: u64) -> AppResult<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

/// Executor fake capturing submitted tasks for manual draining.
#[derive(Default)]
pub struct RecordingExecutor {
    tasks: StdMutex<Vec<(String, BackgroundTask)>>,
}

impl RecordingExecutor {
    /// Runs every captured task to completion and returns the pool names
    /// they were submitted under.
    pub async fn drain(&self) -> Vec<String> {
        let drained: Vec<(String, BackgroundTask)> = match self.tasks.lock() {
            Ok(mut guard) => guard.drain(..).collect(),
            Err(poisoned) => poisoned.into_inner().drain(..).collect(),
        };
        let mut pools = Vec::new();
        for (pool, task) in drained {
            task.await;
            pools.push(pool);
        }
        pools
    }

    pub fn pending(&self) -> usize {
        match self.tasks.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }
}

impl TaskExecutor for RecordingExecutor {
    fn execute(&self, pool: &str, task: BackgroundTask) -> AppResult<()> {
        match self.tasks.lock() {
            Ok(mut guard) => guard.push((pool.to_owned(), task)),
            Err(poisoned) => poisoned.into_inner().push((pool.to_owned(), task)),
        }
        Ok(())
    }
}
