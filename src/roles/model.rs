//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Role, subject and assignment model definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// Role ID (UUID or sequential integer rendered as a string)
    pub id: String,

    /// Unique display name
    pub name: String,

    /// Unique normalized slug
    pub slug: String,

    /// Role description
    pub description: Option<String>,

    /// Hierarchy level (0 when levels are unused)
    pub level: u32,

    /// Creation time
    pub created_at: Option<DateTime<Utc>>,

    /// Last update time
    pub updated_at: Option<DateTime<Utc>>,

    /// Soft-delete marker
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Role {
    /// Create a new role without timestamps
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        slug: impl Into<String>,
        description: Option<String>,
        level: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
            description,
            level,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }

    /// Stamp creation and update times
    pub fn with_timestamps(mut self) -> Self {
        let now = Utc::now();
        self.created_at = Some(now);
        self.updated_at = Some(now);
        self
    }

    /// Whether the role is soft-deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Polymorphic owner of role assignments
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subject {
    /// Owner type (e.g. "user")
    pub kind: String,

    /// Owner ID
    pub id: String,
}

impl Subject {
    /// Create a new subject reference
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }
}

/// Join record linking a role to a subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Role ID
    pub role_id: String,

    /// Owning subject
    pub subject: Subject,

    /// Creation time
    pub created_at: Option<DateTime<Utc>>,
}

impl Assignment {
    /// Create a new assignment without a timestamp
    pub fn new(role_id: impl Into<String>, subject: Subject) -> Self {
        Self {
            role_id: role_id.into(),
            subject,
            created_at: None,
        }
    }

    /// Stamp the creation time
    pub fn with_timestamp(mut self) -> Self {
        self.created_at = Some(Utc::now());
        self
    }
}
