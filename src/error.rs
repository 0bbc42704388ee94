//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Error handling for role operations

use thiserror::Error;

/// Role operations result type
pub type RolesResult<T> = Result<T, RolesError>;

/// Role operations error types
#[derive(Error, Debug)]
pub enum RolesError {
    #[error("Role not found: {reference}")]
    RoleNotFound { reference: String },

    #[error("Role already exists: {slug}")]
    DuplicateRole { slug: String },

    #[error("Unknown method: {method}")]
    UnknownMethod { method: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl RolesError {
    /// Create a role not found error
    pub fn role_not_found(reference: impl Into<String>) -> Self {
        Self::RoleNotFound {
            reference: reference.into(),
        }
    }

    /// Create a duplicate role error
    pub fn duplicate_role(slug: impl Into<String>) -> Self {
        Self::DuplicateRole { slug: slug.into() }
    }

    /// Create an unknown method error
    pub fn unknown_method(method: impl Into<String>) -> Self {
        Self::UnknownMethod {
            method: method.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
