//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Storage configuration

use serde::{Deserialize, Serialize};

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Roles table name
    pub roles_table: String,

    /// Assignments (roleable) table name
    pub assignments_table: String,

    /// Primary key column name
    pub primary_key: String,

    /// Whether primary keys are UUIDs instead of sequential integers
    pub uuid_keys: bool,

    /// Whether deleted roles are soft-deleted instead of removed
    pub soft_deletes: bool,

    /// Whether records carry created/updated timestamps
    pub timestamps: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            roles_table: "roles".to_string(),
            assignments_table: "roleables".to_string(),
            primary_key: "id".to_string(),
            uuid_keys: true,
            soft_deletes: false,
            timestamps: true,
        }
    }
}
