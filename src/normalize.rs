//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Role reference normalization

use crate::roles::model::Role;

/// A reference to a role in any of the shapes callers pass around:
/// a scalar identifier, a concrete role record, or a nested collection
/// of either.
#[derive(Debug, Clone)]
pub enum RoleRef {
    /// A scalar identifier: primary key or slug, optionally `,`/`|` delimited
    Value(String),

    /// A concrete role record
    Role(Role),

    /// A nested collection of references
    Many(Vec<RoleRef>),
}

impl From<&str> for RoleRef {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<String> for RoleRef {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl From<u64> for RoleRef {
    fn from(value: u64) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<Role> for RoleRef {
    fn from(role: Role) -> Self {
        Self::Role(role)
    }
}

impl<T: Into<RoleRef>> From<Vec<T>> for RoleRef {
    fn from(items: Vec<T>) -> Self {
        Self::Many(items.into_iter().map(Into::into).collect())
    }
}

/// Flatten heterogeneous role references into a flat list of scalar
/// identifiers and role records.
///
/// Nested collections are flattened recursively and delimited strings are
/// split on `,` and `|` into trimmed tokens. Order is preserved, duplicates
/// are preserved, empty tokens are dropped.
pub fn flatten<I>(refs: I) -> Vec<RoleRef>
where
    I: IntoIterator<Item = RoleRef>,
{
    let mut out = Vec::new();
    for reference in refs {
        flatten_into(reference, &mut out);
    }
    out
}

fn flatten_into(reference: RoleRef, out: &mut Vec<RoleRef>) {
    match reference {
        RoleRef::Many(items) => {
            for item in items {
                flatten_into(item, out);
            }
        }
        RoleRef::Value(value) => {
            for token in value.split([',', '|']) {
                let token = token.trim();
                if !token.is_empty() {
                    out.push(RoleRef::Value(token.to_string()));
                }
            }
        }
        role @ RoleRef::Role(_) => out.push(role),
    }
}
