//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Main role system configuration

use serde::{Deserialize, Serialize};

use super::membership::MembershipConfig;
use super::middleware::MiddlewareConfig;
use super::seed::SeedConfig;
use super::storage::StorageConfig;

/// Role system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolesConfig {
    /// Storage configuration
    pub storage: StorageConfig,

    /// Membership evaluation configuration
    pub membership: MembershipConfig,

    /// Route guard configuration
    pub middleware: MiddlewareConfig,

    /// Default role seeding configuration
    pub seed: SeedConfig,
}

impl Default for RolesConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            membership: MembershipConfig::default(),
            middleware: MiddlewareConfig::default(),
            seed: SeedConfig::default(),
        }
    }
}

impl RolesConfig {
    /// Validate the role system configuration
    pub fn validate(&self) -> crate::RolesResult<()> {
        if self.storage.roles_table.is_empty() {
            return Err(crate::RolesError::configuration(
                "roles table name cannot be empty",
            ));
        }

        if self.storage.assignments_table.is_empty() {
            return Err(crate::RolesError::configuration(
                "assignments table name cannot be empty",
            ));
        }

        if self.storage.primary_key.is_empty() {
            return Err(crate::RolesError::configuration(
                "primary key column name cannot be empty",
            ));
        }

        if self.membership.slug_separator.is_alphanumeric() {
            return Err(crate::RolesError::configuration(
                "slug separator must not be alphanumeric",
            ));
        }

        Ok(())
    }

    /// Create configuration from environment variables
    ///
    /// Reads configuration values from `ROLES_`-prefixed environment
    /// variables with sensible defaults.
    ///
    /// # Environment Variables
    ///
    /// ## Storage
    /// - `ROLES_ROLES_TABLE`: Roles table name (default: "roles")
    /// - `ROLES_ASSIGNMENTS_TABLE`: Assignments table name (default: "roleables")
    /// - `ROLES_PRIMARY_KEY`: Primary key column name (default: "id")
    /// - `ROLES_UUID_KEYS`: Use UUID primary keys (default: true)
    /// - `ROLES_SOFT_DELETES`: Soft-delete roles (default: false)
    /// - `ROLES_TIMESTAMPS`: Maintain record timestamps (default: true)
    ///
    /// ## Membership
    /// - `ROLES_HIERARCHICAL`: Enable level-based hierarchy (default: false)
    /// - `ROLES_EXTENDED_IDENTITY`: Require ID and slug to agree (default: false)
    /// - `ROLES_RELOAD_ON_MUTATE`: Reload cached roles after mutation (default: true)
    /// - `ROLES_SLUG_SEPARATOR`: Slug separator character (default: "-")
    ///
    /// ## Middleware
    /// - `ROLES_MIDDLEWARE_ENABLED`: Enable route guards (default: true)
    /// - `ROLES_DENY_MESSAGE`: Message for 403 responses
    ///
    /// ## Seeding
    /// - `ROLES_SEED_ENABLED`: Allow the seeder to run (default: true)
    /// - `ROLES_SEED_WITH_LEVELS`: Seed roles with hierarchy levels (default: false)
    pub fn from_env() -> crate::RolesResult<Self> {
        let mut config = Self::default();

        // Storage configuration
        if let Ok(table) = std::env::var("ROLES_ROLES_TABLE") {
            config.storage.roles_table = table;
        }

        if let Ok(table) = std::env::var("ROLES_ASSIGNMENTS_TABLE") {
            config.storage.assignments_table = table;
        }

        if let Ok(key) = std::env::var("ROLES_PRIMARY_KEY") {
            config.storage.primary_key = key;
        }

        if let Ok(uuid_keys) = std::env::var("ROLES_UUID_KEYS") {
            config.storage.uuid_keys = uuid_keys.parse().unwrap_or(true);
        }

        if let Ok(soft_deletes) = std::env::var("ROLES_SOFT_DELETES") {
            config.storage.soft_deletes = soft_deletes.parse().unwrap_or(false);
        }

        if let Ok(timestamps) = std::env::var("ROLES_TIMESTAMPS") {
            config.storage.timestamps = timestamps.parse().unwrap_or(true);
        }

        // Membership configuration
        if let Ok(hierarchical) = std::env::var("ROLES_HIERARCHICAL") {
            config.membership.hierarchical = hierarchical.parse().unwrap_or(false);
        }

        if let Ok(extended) = std::env::var("ROLES_EXTENDED_IDENTITY") {
            config.membership.extended_identity = extended.parse().unwrap_or(false);
        }

        if let Ok(reload) = std::env::var("ROLES_RELOAD_ON_MUTATE") {
            config.membership.reload_on_mutate = reload.parse().unwrap_or(true);
        }

        if let Ok(separator) = std::env::var("ROLES_SLUG_SEPARATOR") {
            if let Some(ch) = separator.chars().next() {
                config.membership.slug_separator = ch;
            }
        }

        // Middleware configuration
        if let Ok(enabled) = std::env::var("ROLES_MIDDLEWARE_ENABLED") {
            config.middleware.enabled = enabled.parse().unwrap_or(true);
        }

        if let Ok(message) = std::env::var("ROLES_DENY_MESSAGE") {
            config.middleware.deny_message = message;
        }

        // Seed configuration
        if let Ok(enabled) = std::env::var("ROLES_SEED_ENABLED") {
            config.seed.enabled = enabled.parse().unwrap_or(true);
        }

        if let Ok(with_levels) = std::env::var("ROLES_SEED_WITH_LEVELS") {
            config.seed.with_levels = with_levels.parse().unwrap_or(false);
        }

        // Validate the configuration
        config.validate()?;

        Ok(config)
    }
}
