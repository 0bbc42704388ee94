//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Role system configuration module

pub mod membership;
pub mod middleware;
pub mod roles;
pub mod seed;
pub mod storage;

// Re-export commonly used types
pub use membership::MembershipConfig;
pub use middleware::MiddlewareConfig;
pub use roles::RolesConfig;
pub use seed::SeedConfig;
pub use storage::StorageConfig;
