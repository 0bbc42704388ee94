//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Role storage abstraction

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::StorageConfig;
use crate::error::{RolesError, RolesResult};
use crate::roles::model::{Assignment, Role, Subject};

/// Role storage trait
///
/// Live queries exclude soft-deleted roles; `get_role_any` is the only
/// accessor that sees them. Assignment uniqueness on
/// `(role_id, subject.kind, subject.id)` is enforced here, inside the
/// store's own write path, so concurrent attaches cannot duplicate rows.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Insert a role
    async fn insert_role(&self, role: &Role) -> RolesResult<()>;

    /// Update a role in place
    async fn update_role(&self, role: &Role) -> RolesResult<()>;

    /// Get a live role by ID
    async fn get_role(&self, role_id: &str) -> RolesResult<Option<Role>>;

    /// Get a role by ID, including soft-deleted records
    async fn get_role_any(&self, role_id: &str) -> RolesResult<Option<Role>>;

    /// Find a live role by slug
    async fn find_by_slug(&self, slug: &str) -> RolesResult<Option<Role>>;

    /// List all live roles, ordered by slug
    async fn list_roles(&self) -> RolesResult<Vec<Role>>;

    /// Remove a role row entirely, cascading its assignment rows
    async fn remove_role(&self, role_id: &str) -> RolesResult<bool>;

    /// Insert an assignment row, returning false when the row already exists
    async fn insert_assignment(&self, assignment: &Assignment) -> RolesResult<bool>;

    /// Delete the assignment row for a role and subject, returning false when absent
    async fn delete_assignment(&self, role_id: &str, subject: &Subject) -> RolesResult<bool>;

    /// Delete every assignment row for a subject, returning the count removed
    async fn delete_assignments_for(&self, subject: &Subject) -> RolesResult<u64>;

    /// Live roles currently assigned to a subject, in assignment order
    async fn roles_for(&self, subject: &Subject) -> RolesResult<Vec<Role>>;
}

/// In-memory role storage
pub struct InMemoryRoleStore {
    config: StorageConfig,
    roles: Arc<RwLock<HashMap<String, Role>>>,
    assignments: Arc<RwLock<Vec<Assignment>>>,
}

impl InMemoryRoleStore {
    /// Create a new in-memory store
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            roles: Arc::new(RwLock::new(HashMap::new())),
            assignments: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryRoleStore {
    fn default() -> Self {
        Self::new(StorageConfig::default())
    }
}

#[async_trait]
impl RoleStore for InMemoryRoleStore {
    async fn insert_role(&self, role: &Role) -> RolesResult<()> {
        let mut roles = self.roles.write().await;
        if roles.contains_key(&role.id) {
            return Err(RolesError::storage(format!(
                "duplicate primary key in {}: {}",
                self.config.roles_table, role.id
            )));
        }
        roles.insert(role.id.clone(), role.clone());
        debug!("Inserted role {} into {}", role.slug, self.config.roles_table);
        Ok(())
    }

    async fn update_role(&self, role: &Role) -> RolesResult<()> {
        let mut roles = self.roles.write().await;
        if !roles.contains_key(&role.id) {
            return Err(RolesError::role_not_found(&role.id));
        }
        roles.insert(role.id.clone(), role.clone());
        Ok(())
    }

    async fn get_role(&self, role_id: &str) -> RolesResult<Option<Role>> {
        let roles = self.roles.read().await;
        Ok(roles.get(role_id).filter(|r| !r.is_deleted()).cloned())
    }

    async fn get_role_any(&self, role_id: &str) -> RolesResult<Option<Role>> {
        let roles = self.roles.read().await;
        Ok(roles.get(role_id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> RolesResult<Option<Role>> {
        let roles = self.roles.read().await;
        Ok(roles
            .values()
            .find(|r| r.slug == slug && !r.is_deleted())
            .cloned())
    }

    async fn list_roles(&self) -> RolesResult<Vec<Role>> {
        let roles = self.roles.read().await;
        let mut out: Vec<Role> = roles.values().filter(|r| !r.is_deleted()).cloned().collect();
        out.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(out)
    }

    async fn remove_role(&self, role_id: &str) -> RolesResult<bool> {
        let mut roles = self.roles.write().await;
        let removed = roles.remove(role_id).is_some();
        drop(roles);

        if removed {
            let mut assignments = self.assignments.write().await;
            assignments.retain(|a| a.role_id != role_id);
        }

        Ok(removed)
    }

    async fn insert_assignment(&self, assignment: &Assignment) -> RolesResult<bool> {
        let mut assignments = self.assignments.write().await;
        let exists = assignments
            .iter()
            .any(|a| a.role_id == assignment.role_id && a.subject == assignment.subject);
        if exists {
            return Ok(false);
        }
        assignments.push(assignment.clone());
        debug!(
            "Inserted row into {} for {}:{}",
            self.config.assignments_table, assignment.subject.kind, assignment.subject.id
        );
        Ok(true)
    }

    async fn delete_assignment(&self, role_id: &str, subject: &Subject) -> RolesResult<bool> {
        let mut assignments = self.assignments.write().await;
        let before = assignments.len();
        assignments.retain(|a| !(a.role_id == role_id && &a.subject == subject));
        Ok(assignments.len() < before)
    }

    async fn delete_assignments_for(&self, subject: &Subject) -> RolesResult<u64> {
        let mut assignments = self.assignments.write().await;
        let before = assignments.len();
        assignments.retain(|a| &a.subject != subject);
        Ok((before - assignments.len()) as u64)
    }

    async fn roles_for(&self, subject: &Subject) -> RolesResult<Vec<Role>> {
        let assignments = self.assignments.read().await;
        let roles = self.roles.read().await;

        let mut out = Vec::new();
        for assignment in assignments.iter().filter(|a| &a.subject == subject) {
            if let Some(role) = roles.get(&assignment.role_id) {
                if !role.is_deleted() {
                    out.push(role.clone());
                }
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(id: &str, slug: &str, level: u32) -> Role {
        Role::new(id, slug.to_uppercase(), slug, None, level)
    }

    #[tokio::test]
    async fn test_role_roundtrip() {
        let store = InMemoryRoleStore::default();
        store.insert_role(&role("1", "admin", 0)).await.unwrap();

        let found = store.get_role("1").await.unwrap().unwrap();
        assert_eq!(found.slug, "admin");

        let found = store.find_by_slug("admin").await.unwrap().unwrap();
        assert_eq!(found.id, "1");

        assert!(store.get_role("2").await.unwrap().is_none());
        assert!(store.find_by_slug("editor").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_role_id_rejected() {
        let store = InMemoryRoleStore::default();
        store.insert_role(&role("1", "admin", 0)).await.unwrap();
        assert!(store.insert_role(&role("1", "editor", 0)).await.is_err());
    }

    #[tokio::test]
    async fn test_soft_deleted_roles_hidden_from_live_queries() {
        let store = InMemoryRoleStore::default();
        let mut r = role("1", "admin", 0);
        store.insert_role(&r).await.unwrap();

        r.deleted_at = Some(chrono::Utc::now());
        store.update_role(&r).await.unwrap();

        assert!(store.get_role("1").await.unwrap().is_none());
        assert!(store.find_by_slug("admin").await.unwrap().is_none());
        assert!(store.list_roles().await.unwrap().is_empty());
        assert!(store.get_role_any("1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_assignment_uniqueness() {
        let store = InMemoryRoleStore::default();
        let subject = Subject::new("user", "1");
        let assignment = Assignment::new("1", subject);

        assert!(store.insert_assignment(&assignment).await.unwrap());
        assert!(!store.insert_assignment(&assignment).await.unwrap());
    }

    #[tokio::test]
    async fn test_roles_for_joins_assignments() {
        let store = InMemoryRoleStore::default();
        store.insert_role(&role("1", "admin", 0)).await.unwrap();
        store.insert_role(&role("2", "editor", 0)).await.unwrap();

        let subject = Subject::new("user", "1");
        store
            .insert_assignment(&Assignment::new("2", subject.clone()))
            .await
            .unwrap();
        store
            .insert_assignment(&Assignment::new("1", subject.clone()))
            .await
            .unwrap();

        let roles = store.roles_for(&subject).await.unwrap();
        let slugs: Vec<&str> = roles.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["editor", "admin"]);

        let other = Subject::new("team", "1");
        assert!(store.roles_for(&other).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_assignments() {
        let store = InMemoryRoleStore::default();
        let subject = Subject::new("user", "1");
        store
            .insert_assignment(&Assignment::new("1", subject.clone()))
            .await
            .unwrap();
        store
            .insert_assignment(&Assignment::new("2", subject.clone()))
            .await
            .unwrap();

        assert!(store.delete_assignment("1", &subject).await.unwrap());
        assert!(!store.delete_assignment("1", &subject).await.unwrap());

        assert_eq!(store.delete_assignments_for(&subject).await.unwrap(), 1);
        assert_eq!(store.delete_assignments_for(&subject).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_remove_role_cascades_assignments() {
        let store = InMemoryRoleStore::default();
        store.insert_role(&role("1", "admin", 0)).await.unwrap();

        let subject = Subject::new("user", "1");
        store
            .insert_assignment(&Assignment::new("1", subject.clone()))
            .await
            .unwrap();

        assert!(store.remove_role("1").await.unwrap());
        assert!(!store.remove_role("1").await.unwrap());
        assert!(store.roles_for(&subject).await.unwrap().is_empty());
    }
}
