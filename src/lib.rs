//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Role-based access control for application subjects
//!
//! This crate associates roles with arbitrary subjects (users, teams,
//! API keys) and answers membership questions about them. Roles carry an
//! optional hierarchy level, and membership can be evaluated flat or
//! hierarchically depending on configuration. Route guards for axum are
//! included for gating handlers by role slug or minimum level.
//!
//! # Quick start
//!
//! ```rust
//! use roleable::{init_roles_system, RolesConfig, Subject};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = init_roles_system(RolesConfig::default()).await?;
//!
//!     let alice = manager.subject(Subject::new("user", "1"));
//!     alice.attach(["admin"]).await?;
//!
//!     assert!(alice.has_one(["admin"]).await?);
//!     assert!(alice.dispatch("isAdmin").await?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod membership;
pub mod middleware;
pub mod normalize;
pub mod roles;
pub mod seed;
pub mod slug;
pub mod storage;
pub mod subject;

// Re-export commonly used types
pub use config::{
    MembershipConfig, MiddlewareConfig, RolesConfig, SeedConfig, StorageConfig,
};
pub use error::{RolesError, RolesResult};
pub use membership::{for_config, MembershipStrategy};
pub use middleware::{require_level, require_role};
pub use normalize::{flatten, RoleRef};
pub use roles::{Assignment, Role, RoleManager, RoleStats, Subject};
pub use seed::RoleSeeder;
pub use slug::slugify;
pub use storage::{InMemoryRoleStore, RoleStore};
pub use subject::SubjectRoles;

use std::sync::Arc;
use tracing::info;

/// Crate version
pub const ROLES_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default separator used when deriving slugs from role names
pub const DEFAULT_SLUG_SEPARATOR: char = '-';

/// Default hierarchy level for roles created without one
pub const DEFAULT_ROLE_LEVEL: u32 = 0;

/// Initialize the role system with the given configuration
///
/// Validates the configuration, brings up a manager over in-memory
/// storage, and runs the default seeder. Callers wanting a different
/// storage backend construct [`RoleManager::new`] directly.
pub async fn init_roles_system(config: RolesConfig) -> RolesResult<Arc<RoleManager>> {
    config.validate()?;

    let manager = Arc::new(RoleManager::in_memory(config));
    let seeded = RoleSeeder::new(Arc::clone(&manager)).run().await?;

    info!(
        "Role system initialized (version {}, {} role(s) seeded)",
        ROLES_VERSION, seeded
    );
    Ok(manager)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_seeds_default_roles() {
        let manager = init_roles_system(RolesConfig::default()).await.unwrap();

        let slugs: Vec<String> = manager
            .list_roles()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.slug)
            .collect();
        assert_eq!(slugs, vec!["admin", "editor", "moderator", "user"]);
    }

    #[tokio::test]
    async fn test_init_rejects_invalid_config() {
        let mut config = RolesConfig::default();
        config.storage.roles_table = String::new();

        let err = init_roles_system(config).await.unwrap_err();
        assert!(matches!(err, RolesError::Configuration { .. }));
    }

    #[tokio::test]
    async fn test_end_to_end_membership() {
        let mut config = RolesConfig::default();
        config.seed.with_levels = true;
        config.membership.hierarchical = true;
        let manager = init_roles_system(config).await.unwrap();

        let alice = manager.subject(Subject::new("user", "1"));
        alice.attach(["editor"]).await.unwrap();

        assert!(alice.has_one(["moderator"]).await.unwrap());
        assert!(!alice.has_one(["admin"]).await.unwrap());
        assert_eq!(alice.level().await.unwrap(), 3);
    }

    #[test]
    fn test_version_is_set() {
        assert!(!ROLES_VERSION.is_empty());
    }
}
