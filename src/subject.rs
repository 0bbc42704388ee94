//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Per-subject membership handle and association mutators

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::{RolesError, RolesResult};
use crate::membership::strategy::{self, MembershipStrategy};
use crate::normalize::{self, RoleRef};
use crate::roles::manager::RoleManager;
use crate::roles::model::{Assignment, Role, Subject};
use crate::slug::slugify;

/// Role membership handle for a single subject
///
/// Holds a cached role collection, loaded on first use and refreshed
/// either explicitly via [`reload`](Self::reload) or automatically after
/// mutations when `reload_on_mutate` is enabled. Membership semantics are
/// fixed at construction by the configured strategy.
pub struct SubjectRoles {
    /// The owning subject
    subject: Subject,

    /// Role manager
    manager: Arc<RoleManager>,

    /// Membership evaluation strategy
    strategy: Arc<dyn MembershipStrategy>,

    /// Cached role collection
    cached: RwLock<Option<Vec<Role>>>,
}

impl SubjectRoles {
    pub(crate) fn new(subject: Subject, manager: Arc<RoleManager>) -> Self {
        let strategy = strategy::for_config(&manager.config().membership);
        Self {
            subject,
            manager,
            strategy,
            cached: RwLock::new(None),
        }
    }

    /// The owning subject
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// The subject's cached role collection, loaded on first use
    pub async fn roles(&self) -> RolesResult<Vec<Role>> {
        {
            let cached = self.cached.read().await;
            if let Some(roles) = cached.as_ref() {
                return Ok(roles.clone());
            }
        }
        self.reload().await
    }

    /// Refresh the cached role collection from the store
    pub async fn reload(&self) -> RolesResult<Vec<Role>> {
        let roles = self.manager.store().roles_for(&self.subject).await?;
        let mut cached = self.cached.write().await;
        *cached = Some(roles.clone());
        Ok(roles)
    }

    /// The subject's current level: the highest cached role level, 0 when
    /// the subject holds no roles
    pub async fn level(&self) -> RolesResult<u32> {
        Ok(strategy::level(&self.roles().await?))
    }

    /// The cached role with the highest level, first-encountered on ties
    pub async fn current_role(&self) -> RolesResult<Option<Role>> {
        Ok(strategy::current_role(&self.roles().await?).cloned())
    }

    /// True when at least one reference matches a held role
    ///
    /// Unresolvable references are skipped. An empty reference list is
    /// false.
    pub async fn has_one<I>(&self, refs: I) -> RolesResult<bool>
    where
        I: IntoIterator,
        I::Item: Into<RoleRef>,
    {
        let held = self.roles().await?;
        for reference in Self::normalized(refs) {
            if let Some(role) = self.manager.resolve(&reference).await? {
                if self.strategy.matches(&held, &role) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// True when every reference matches a held role
    ///
    /// Unresolvable references count as non-matches. An empty reference
    /// list is vacuously true.
    pub async fn has_all<I>(&self, refs: I) -> RolesResult<bool>
    where
        I: IntoIterator,
        I::Item: Into<RoleRef>,
    {
        let held = self.roles().await?;
        for reference in Self::normalized(refs) {
            let matched = match self.manager.resolve(&reference).await? {
                Some(role) => self.strategy.matches(&held, &role),
                None => false,
            };
            if !matched {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Dispatch to [`has_all`](Self::has_all) or [`has_one`](Self::has_one)
    pub async fn has<I>(&self, refs: I, all: bool) -> RolesResult<bool>
    where
        I: IntoIterator,
        I::Item: Into<RoleRef>,
    {
        if all {
            self.has_all(refs).await
        } else {
            self.has_one(refs).await
        }
    }

    /// Shorthand dispatcher for dynamic `isX` checks
    ///
    /// `"isAdmin"` and `"is_admin"` both evaluate `has_one("admin")`; a
    /// shorthand whose derived slug matches no role is simply false. A
    /// method not of the `isX` form is an [`RolesError::UnknownMethod`],
    /// leaving the caller to fall back to its own method resolution.
    pub async fn dispatch(&self, method: &str) -> RolesResult<bool> {
        let rest = method
            .strip_prefix("is")
            .filter(|rest| !rest.is_empty())
            .filter(|rest| {
                rest.starts_with(|c: char| c.is_uppercase() || !c.is_alphanumeric())
            })
            .ok_or_else(|| RolesError::unknown_method(method))?;

        let slug = slugify(rest, self.manager.config().membership.slug_separator);
        if slug.is_empty() {
            return Err(RolesError::unknown_method(method));
        }

        self.has_one([RoleRef::Value(slug)]).await
    }

    /// Attach roles to the subject
    ///
    /// References are normalized and resolved; unresolvable entries are
    /// skipped. Roles already held (by identity in flat mode, by implied
    /// level in hierarchical mode) are no-ops, evaluated against the
    /// working set so a genuinely higher role still attaches in the same
    /// call. True when at least one row was inserted.
    pub async fn attach<I>(&self, refs: I) -> RolesResult<bool>
    where
        I: IntoIterator,
        I::Item: Into<RoleRef>,
    {
        let resolved = self
            .manager
            .resolve_all(refs.into_iter().map(Into::into).collect())
            .await?;

        let store = self.manager.store();
        let mut held = store.roles_for(&self.subject).await?;
        let timestamps = self.manager.config().storage.timestamps;
        let mut attached = 0u64;

        for role in resolved {
            if self.strategy.attach_is_noop(&held, &role) {
                continue;
            }

            let mut assignment = Assignment::new(role.id.clone(), self.subject.clone());
            if timestamps {
                assignment = assignment.with_timestamp();
            }

            if store.insert_assignment(&assignment).await? {
                attached += 1;
                held.push(role);
            }
        }

        if attached > 0 {
            self.manager.record_attached(attached).await;
            info!(
                "Attached {} role(s) to {}:{}",
                attached, self.subject.kind, self.subject.id
            );
            self.after_mutation().await?;
        }

        Ok(attached > 0)
    }

    /// Detach roles from the subject
    ///
    /// An empty reference list behaves as [`detach_all`](Self::detach_all).
    /// True when at least one row was deleted.
    pub async fn detach<I>(&self, refs: I) -> RolesResult<bool>
    where
        I: IntoIterator,
        I::Item: Into<RoleRef>,
    {
        let normalized = normalize::flatten(refs.into_iter().map(Into::into));
        if normalized.is_empty() {
            return self.detach_all().await;
        }

        let store = self.manager.store();
        let mut detached = 0u64;

        for reference in normalized {
            if let Some(role) = self.manager.resolve(&reference).await? {
                if store.delete_assignment(&role.id, &self.subject).await? {
                    detached += 1;
                }
            }
        }

        if detached > 0 {
            self.manager.record_detached(detached).await;
            info!(
                "Detached {} role(s) from {}:{}",
                detached, self.subject.kind, self.subject.id
            );
            self.after_mutation().await?;
        }

        Ok(detached > 0)
    }

    /// Detach every role from the subject, returning true when any existed
    pub async fn detach_all(&self) -> RolesResult<bool> {
        let removed = self
            .manager
            .store()
            .delete_assignments_for(&self.subject)
            .await?;

        if removed > 0 {
            self.manager.record_detached(removed).await;
            info!(
                "Detached all {} role(s) from {}:{}",
                removed, self.subject.kind, self.subject.id
            );
            self.after_mutation().await?;
        }

        Ok(removed > 0)
    }

    /// Replace membership with exactly the resolved reference set
    pub async fn sync<I>(&self, refs: I) -> RolesResult<bool>
    where
        I: IntoIterator,
        I::Item: Into<RoleRef>,
    {
        let detached = self.detach_all().await?;
        let attached = self.attach(refs).await?;
        self.manager.record_sync().await;
        Ok(detached || attached)
    }

    fn normalized<I>(refs: I) -> Vec<RoleRef>
    where
        I: IntoIterator,
        I::Item: Into<RoleRef>,
    {
        normalize::flatten(refs.into_iter().map(Into::into))
    }

    async fn after_mutation(&self) -> RolesResult<()> {
        if self.manager.config().membership.reload_on_mutate {
            self.reload().await?;
        }
        // Otherwise the cache stays stale until the caller reloads.
        Ok(())
    }
}
