//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Route guard configuration

use serde::{Deserialize, Serialize};

/// Route guard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// Whether route guards are active
    pub enabled: bool,

    /// Message returned with 403 responses
    pub deny_message: String,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            deny_message: "You do not have permission to access this resource".to_string(),
        }
    }
}
