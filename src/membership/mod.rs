//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Membership evaluation

pub mod strategy;

// Re-export commonly used types
pub use strategy::{
    for_config, ExtendedFlatMembership, FlatMembership, HierarchicalMembership,
    MembershipStrategy,
};
