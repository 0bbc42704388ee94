//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Role management functionality

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::config::RolesConfig;
use crate::error::{RolesError, RolesResult};
use crate::normalize::{self, RoleRef};
use crate::slug::slugify;
use crate::storage::{InMemoryRoleStore, RoleStore};
use crate::subject::SubjectRoles;

use super::model::{Role, Subject};
use super::stats::RoleStats;

/// Role manager
///
/// Owns the role records and hands out per-subject membership handles.
pub struct RoleManager {
    /// Role system configuration
    config: RolesConfig,

    /// Role storage
    store: Arc<dyn RoleStore>,

    /// Sequential key source, used when UUID keys are disabled
    next_id: AtomicU64,

    /// Statistics
    stats: Arc<RwLock<RoleStats>>,
}

impl RoleManager {
    /// Create a new role manager over a storage backend
    pub fn new(config: RolesConfig, store: Arc<dyn RoleStore>) -> Self {
        Self {
            config,
            store,
            next_id: AtomicU64::new(1),
            stats: Arc::new(RwLock::new(RoleStats::default())),
        }
    }

    /// Create a new role manager over in-memory storage
    pub fn in_memory(config: RolesConfig) -> Self {
        let store = Arc::new(InMemoryRoleStore::new(config.storage.clone()));
        Self::new(config, store)
    }

    /// Role system configuration
    pub fn config(&self) -> &RolesConfig {
        &self.config
    }

    /// Role storage handle
    pub fn store(&self) -> Arc<dyn RoleStore> {
        Arc::clone(&self.store)
    }

    fn next_role_id(&self) -> String {
        if self.config.storage.uuid_keys {
            Uuid::new_v4().to_string()
        } else {
            self.next_id.fetch_add(1, Ordering::Relaxed).to_string()
        }
    }

    /// Create a new role
    ///
    /// The slug is derived from the name; a duplicate slug is an error.
    pub async fn create_role(
        &self,
        name: &str,
        description: Option<&str>,
        level: u32,
    ) -> RolesResult<Role> {
        let slug = slugify(name, self.config.membership.slug_separator);
        if self.store.find_by_slug(&slug).await?.is_some() {
            return Err(RolesError::duplicate_role(slug));
        }

        let mut role = Role::new(
            self.next_role_id(),
            name,
            slug,
            description.map(str::to_string),
            level,
        );
        if self.config.storage.timestamps {
            role = role.with_timestamps();
        }

        self.store.insert_role(&role).await?;

        {
            let mut stats = self.stats.write().await;
            stats.increment_roles_created();
        }

        info!("Created role: {}", role.slug);
        Ok(role)
    }

    /// Get a role by ID
    pub async fn get_role(&self, role_id: &str) -> RolesResult<Option<Role>> {
        self.store.get_role(role_id).await
    }

    /// Find a role by slug
    pub async fn find_by_slug(&self, slug: &str) -> RolesResult<Option<Role>> {
        self.store.find_by_slug(slug).await
    }

    /// List all live roles
    pub async fn list_roles(&self) -> RolesResult<Vec<Role>> {
        self.store.list_roles().await
    }

    /// Update a role record
    pub async fn update_role(&self, role: &Role) -> RolesResult<()> {
        let mut role = role.clone();
        if self.config.storage.timestamps {
            role.updated_at = Some(chrono::Utc::now());
        }
        self.store.update_role(&role).await
    }

    /// Delete a role
    ///
    /// Soft-deletes when enabled, removes the row otherwise. Returns false
    /// when no live role matched.
    pub async fn delete_role(&self, role_id: &str) -> RolesResult<bool> {
        let Some(mut role) = self.store.get_role(role_id).await? else {
            return Ok(false);
        };

        if self.config.storage.soft_deletes {
            role.deleted_at = Some(chrono::Utc::now());
            self.store.update_role(&role).await?;
        } else {
            self.store.remove_role(role_id).await?;
        }

        {
            let mut stats = self.stats.write().await;
            stats.increment_roles_deleted();
        }

        info!("Deleted role: {}", role.slug);
        Ok(true)
    }

    /// Restore a soft-deleted role, returning false when there was nothing
    /// to restore
    pub async fn restore_role(&self, role_id: &str) -> RolesResult<bool> {
        match self.store.get_role_any(role_id).await? {
            Some(mut role) if role.is_deleted() => {
                role.deleted_at = None;
                if self.config.storage.timestamps {
                    role.updated_at = Some(chrono::Utc::now());
                }
                self.store.update_role(&role).await?;

                {
                    let mut stats = self.stats.write().await;
                    stats.increment_roles_restored();
                }

                info!("Restored role: {}", role.slug);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Remove a role row regardless of the soft-delete setting
    pub async fn force_delete_role(&self, role_id: &str) -> RolesResult<bool> {
        let removed = self.store.remove_role(role_id).await?;
        if removed {
            let mut stats = self.stats.write().await;
            stats.increment_roles_deleted();
        }
        Ok(removed)
    }

    /// Resolve a single normalized reference to a concrete role
    ///
    /// A role record resolves to itself; a scalar queries by primary key
    /// first, then by slug. No match is `Ok(None)`, never an error.
    pub async fn resolve(&self, reference: &RoleRef) -> RolesResult<Option<Role>> {
        match reference {
            RoleRef::Role(role) => Ok(Some(role.clone())),
            RoleRef::Value(value) => {
                if let Some(role) = self.store.get_role(value).await? {
                    return Ok(Some(role));
                }
                self.store.find_by_slug(value).await
            }
            RoleRef::Many(_) => {
                debug_assert!(false, "resolve expects normalized references");
                Ok(None)
            }
        }
    }

    /// Flatten and resolve references, silently skipping anything that
    /// does not match
    pub async fn resolve_all(&self, refs: Vec<RoleRef>) -> RolesResult<Vec<Role>> {
        let mut out = Vec::new();
        for reference in normalize::flatten(refs) {
            if let Some(role) = self.resolve(&reference).await? {
                out.push(role);
            }
        }
        Ok(out)
    }

    /// Create a membership handle for a subject
    pub fn subject(self: &Arc<Self>, subject: Subject) -> SubjectRoles {
        SubjectRoles::new(subject, Arc::clone(self))
    }

    /// Get role statistics
    pub async fn get_stats(&self) -> RoleStats {
        let stats = self.stats.read().await;
        stats.clone()
    }

    pub(crate) async fn record_attached(&self, count: u64) {
        let mut stats = self.stats.write().await;
        stats.record_assignments_created(count);
    }

    pub(crate) async fn record_detached(&self, count: u64) {
        let mut stats = self.stats.write().await;
        stats.record_assignments_removed(count);
    }

    pub(crate) async fn record_sync(&self) {
        let mut stats = self.stats.write().await;
        stats.increment_syncs();
    }
}

impl std::fmt::Debug for RoleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleManager")
            .field("config", &self.config)
            .field("store", &"<store>")
            .field("stats", &self.stats)
            .finish()
    }
}
