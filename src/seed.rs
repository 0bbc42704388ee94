//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Default role seeding

use std::sync::Arc;
use tracing::{debug, info};

use crate::error::RolesResult;
use crate::roles::manager::RoleManager;
use crate::slug::slugify;

/// Default role set seeded into fresh installations: name, description,
/// hierarchy level
const DEFAULT_ROLES: &[(&str, &str, u32)] = &[
    ("Admin", "Full administrative access", 4),
    ("Editor", "Content editing access", 3),
    ("Moderator", "Moderation access", 2),
    ("User", "Standard user access", 1),
];

/// Default role seeder
pub struct RoleSeeder {
    manager: Arc<RoleManager>,
}

impl RoleSeeder {
    /// Create a new seeder
    pub fn new(manager: Arc<RoleManager>) -> Self {
        Self { manager }
    }

    /// Insert any default roles whose slug is not already present
    ///
    /// Levels are carried only when level seeding is enabled; otherwise
    /// every seeded role sits at level 0. Returns the number of roles
    /// inserted.
    pub async fn run(&self) -> RolesResult<usize> {
        let config = self.manager.config();
        if !config.seed.enabled {
            debug!("Role seeder is disabled");
            return Ok(0);
        }

        let separator = config.membership.slug_separator;
        let with_levels = config.seed.with_levels;
        let mut inserted = 0;

        for &(name, description, level) in DEFAULT_ROLES {
            let slug = slugify(name, separator);
            if self.manager.find_by_slug(&slug).await?.is_some() {
                continue;
            }

            let level = if with_levels { level } else { 0 };
            self.manager
                .create_role(name, Some(description), level)
                .await?;
            inserted += 1;
        }

        if inserted > 0 {
            info!("Seeded {} default role(s)", inserted);
        }

        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RolesConfig;

    #[tokio::test]
    async fn test_seeder_inserts_default_roles() {
        let manager = Arc::new(RoleManager::in_memory(RolesConfig::default()));
        let seeder = RoleSeeder::new(Arc::clone(&manager));

        assert_eq!(seeder.run().await.unwrap(), 4);
        assert!(manager.find_by_slug("admin").await.unwrap().is_some());
        assert!(manager.find_by_slug("moderator").await.unwrap().is_some());

        // Levels are zeroed unless level seeding is enabled
        let admin = manager.find_by_slug("admin").await.unwrap().unwrap();
        assert_eq!(admin.level, 0);
    }

    #[tokio::test]
    async fn test_seeder_is_guarded_by_existing_slugs() {
        let manager = Arc::new(RoleManager::in_memory(RolesConfig::default()));
        manager.create_role("Admin", None, 0).await.unwrap();

        let seeder = RoleSeeder::new(Arc::clone(&manager));
        assert_eq!(seeder.run().await.unwrap(), 3);
        assert_eq!(seeder.run().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_seeder_with_levels() {
        let mut config = RolesConfig::default();
        config.seed.with_levels = true;
        let manager = Arc::new(RoleManager::in_memory(config));

        RoleSeeder::new(Arc::clone(&manager)).run().await.unwrap();

        let admin = manager.find_by_slug("admin").await.unwrap().unwrap();
        let user = manager.find_by_slug("user").await.unwrap().unwrap();
        assert_eq!(admin.level, 4);
        assert_eq!(user.level, 1);
    }

    #[tokio::test]
    async fn test_seeder_disabled() {
        let mut config = RolesConfig::default();
        config.seed.enabled = false;
        let manager = Arc::new(RoleManager::in_memory(config));

        assert_eq!(RoleSeeder::new(manager).run().await.unwrap(), 0);
    }
}
