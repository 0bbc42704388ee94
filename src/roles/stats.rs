//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Role statistics

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Role statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoleStats {
    /// Number of roles created
    pub roles_created: u64,

    /// Number of roles deleted
    pub roles_deleted: u64,

    /// Number of roles restored from soft delete
    pub roles_restored: u64,

    /// Number of assignment rows created
    pub assignments_created: u64,

    /// Number of assignment rows removed
    pub assignments_removed: u64,

    /// Number of sync operations
    pub syncs: u64,

    /// Last role created
    pub last_role_created: Option<DateTime<Utc>>,

    /// Last assignment change
    pub last_assignment_change: Option<DateTime<Utc>>,
}

impl RoleStats {
    /// Create new role statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment roles created count
    pub fn increment_roles_created(&mut self) {
        self.roles_created += 1;
        self.last_role_created = Some(Utc::now());
    }

    /// Increment roles deleted count
    pub fn increment_roles_deleted(&mut self) {
        self.roles_deleted += 1;
    }

    /// Increment roles restored count
    pub fn increment_roles_restored(&mut self) {
        self.roles_restored += 1;
    }

    /// Record created assignment rows
    pub fn record_assignments_created(&mut self, count: u64) {
        self.assignments_created += count;
        self.last_assignment_change = Some(Utc::now());
    }

    /// Record removed assignment rows
    pub fn record_assignments_removed(&mut self, count: u64) {
        self.assignments_removed += count;
        self.last_assignment_change = Some(Utc::now());
    }

    /// Increment sync operations count
    pub fn increment_syncs(&mut self) {
        self.syncs += 1;
    }
}
