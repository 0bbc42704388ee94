//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Default role seeding configuration

use serde::{Deserialize, Serialize};

/// Default role seeding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Whether the seeder is allowed to run
    pub enabled: bool,

    /// Whether seeded roles carry hierarchy levels
    pub with_levels: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            with_levels: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_config_default() {
        let config = SeedConfig::default();
        assert!(config.enabled);
        assert!(!config.with_levels);
    }
}
