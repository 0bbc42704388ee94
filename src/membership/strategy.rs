//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Membership evaluation strategies

use std::sync::Arc;

use crate::config::MembershipConfig;
use crate::roles::model::Role;

/// Membership evaluation strategy
///
/// Chosen once from configuration when a subject handle is constructed;
/// callers never switch strategies mid-flight.
pub trait MembershipStrategy: Send + Sync {
    /// Strategy name for logging
    fn name(&self) -> &'static str;

    /// Whether the held roles satisfy a check against the candidate role
    fn matches(&self, held: &[Role], candidate: &Role) -> bool;

    /// Whether attaching the candidate would be a no-op for the held set
    fn attach_is_noop(&self, held: &[Role], candidate: &Role) -> bool;
}

/// Select the strategy for a membership configuration
pub fn for_config(config: &MembershipConfig) -> Arc<dyn MembershipStrategy> {
    if config.hierarchical {
        Arc::new(HierarchicalMembership)
    } else if config.extended_identity {
        Arc::new(ExtendedFlatMembership)
    } else {
        Arc::new(FlatMembership)
    }
}

/// The highest level among held roles, 0 when none are held
pub fn level(held: &[Role]) -> u32 {
    held.iter().map(|r| r.level).max().unwrap_or(0)
}

/// The held role with the highest level, first-encountered on ties
pub fn current_role(held: &[Role]) -> Option<&Role> {
    held.iter().fold(None, |best: Option<&Role>, role| match best {
        Some(b) if b.level >= role.level => Some(b),
        _ => Some(role),
    })
}

/// Exact set membership: a candidate matches when a held role shares its
/// ID or slug
pub struct FlatMembership;

impl MembershipStrategy for FlatMembership {
    fn name(&self) -> &'static str {
        "flat"
    }

    fn matches(&self, held: &[Role], candidate: &Role) -> bool {
        held.iter()
            .any(|r| r.id == candidate.id || r.slug == candidate.slug)
    }

    fn attach_is_noop(&self, held: &[Role], candidate: &Role) -> bool {
        held.iter().any(|r| r.id == candidate.id)
    }
}

/// Set membership requiring ID and slug to agree, guarding against key
/// reuse across renamed roles
pub struct ExtendedFlatMembership;

impl MembershipStrategy for ExtendedFlatMembership {
    fn name(&self) -> &'static str {
        "extended"
    }

    fn matches(&self, held: &[Role], candidate: &Role) -> bool {
        held.iter()
            .any(|r| r.id == candidate.id && r.slug == candidate.slug)
    }

    fn attach_is_noop(&self, held: &[Role], candidate: &Role) -> bool {
        self.matches(held, candidate)
    }
}

/// Level-based membership: the highest held level implies every role at
/// that level or below
pub struct HierarchicalMembership;

impl MembershipStrategy for HierarchicalMembership {
    fn name(&self) -> &'static str {
        "hierarchical"
    }

    fn matches(&self, held: &[Role], candidate: &Role) -> bool {
        level(held) >= candidate.level
    }

    fn attach_is_noop(&self, held: &[Role], candidate: &Role) -> bool {
        // A role already implied by the current level is never explicitly
        // stored. A roleless subject sits at level 0, so level-0 roles
        // cannot be attached in hierarchical mode.
        level(held) >= candidate.level
    }
}
