//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Membership evaluation configuration

use serde::{Deserialize, Serialize};

/// Membership evaluation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipConfig {
    /// Whether hierarchical levels imply membership in lower roles
    pub hierarchical: bool,

    /// Whether flat matches require both ID and slug to agree
    pub extended_identity: bool,

    /// Whether mutators refresh the cached role collection after a change
    pub reload_on_mutate: bool,

    /// Separator used when generating slugs
    pub slug_separator: char,
}

impl Default for MembershipConfig {
    fn default() -> Self {
        Self {
            hierarchical: false,
            extended_identity: false,
            reload_on_mutate: true,
            slug_separator: crate::DEFAULT_SLUG_SEPARATOR,
        }
    }
}
