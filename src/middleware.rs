//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Route guards for role and level checks

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::roles::manager::RoleManager;
use crate::roles::model::Subject;

/// Require any of a comma-joined list of role slugs
///
/// The authenticated [`Subject`] is read from request extensions, where
/// the host's authentication layer placed it. Passes when the subject has
/// any of the listed roles; responds 403 with the configured message
/// otherwise, 401 when no subject is present.
///
/// Apply per-route with `middleware::from_fn_with_state`, binding the slug
/// list from the route definition:
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use axum::{extract::{Request, State}, middleware::{self, Next}, routing::get, Router};
/// use roleable::{middleware::require_role, RoleManager, RolesConfig};
///
/// let manager = Arc::new(RoleManager::in_memory(RolesConfig::default()));
/// let app: Router = Router::new()
///     .route("/admin", get(|| async { "ok" }))
///     .layer(middleware::from_fn_with_state(
///         manager,
///         |state: State<Arc<RoleManager>>, request: Request, next: Next| {
///             require_role("admin,editor".to_string(), state, request, next)
///         },
///     ));
/// ```
pub async fn require_role(
    slugs: String,
    State(manager): State<Arc<RoleManager>>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    if !manager.config().middleware.enabled {
        return Ok(next.run(request).await);
    }

    let Some(subject) = request.extensions().get::<Subject>().cloned() else {
        warn!("No authenticated subject on request");
        return Err((
            StatusCode::UNAUTHORIZED,
            "Authentication required".to_string(),
        ));
    };

    let handle = manager.subject(subject.clone());
    match handle.has_one([slugs.as_str()]).await {
        Ok(true) => {
            debug!("Subject {}:{} has role in: {}", subject.kind, subject.id, slugs);
            Ok(next.run(request).await)
        }
        Ok(false) => {
            warn!(
                "Subject {}:{} lacks required role(s): {}",
                subject.kind, subject.id, slugs
            );
            Err((
                StatusCode::FORBIDDEN,
                manager.config().middleware.deny_message.clone(),
            ))
        }
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
    }
}

/// Require a minimum role level
///
/// Passes when the subject's current level is at least `min_level`;
/// responds 403 with a human-readable message otherwise, 401 when no
/// subject is present.
pub async fn require_level(
    min_level: u32,
    State(manager): State<Arc<RoleManager>>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    if !manager.config().middleware.enabled {
        return Ok(next.run(request).await);
    }

    let Some(subject) = request.extensions().get::<Subject>().cloned() else {
        warn!("No authenticated subject on request");
        return Err((
            StatusCode::UNAUTHORIZED,
            "Authentication required".to_string(),
        ));
    };

    let handle = manager.subject(subject.clone());
    match handle.level().await {
        Ok(level) if level >= min_level => {
            debug!(
                "Subject {}:{} at level {} meets minimum {}",
                subject.kind, subject.id, level, min_level
            );
            Ok(next.run(request).await)
        }
        Ok(level) => {
            warn!(
                "Subject {}:{} at level {} below minimum {}",
                subject.kind, subject.id, level, min_level
            );
            Err((
                StatusCode::FORBIDDEN,
                format!("A minimum role level of {} is required", min_level),
            ))
        }
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, middleware, routing::get, Router};
    use tower::ServiceExt;

    use crate::config::RolesConfig;

    async fn ok_handler() -> &'static str {
        "ok"
    }

    async fn manager(configure: impl FnOnce(&mut RolesConfig)) -> Arc<RoleManager> {
        let mut config = RolesConfig::default();
        configure(&mut config);
        Arc::new(RoleManager::in_memory(config))
    }

    fn role_router(manager: Arc<RoleManager>, slugs: &'static str) -> Router {
        Router::new()
            .route("/guarded", get(ok_handler))
            .layer(middleware::from_fn_with_state(
                manager,
                move |state: State<Arc<RoleManager>>, request: Request, next: Next| {
                    require_role(slugs.to_string(), state, request, next)
                },
            ))
    }

    fn level_router(manager: Arc<RoleManager>, min_level: u32) -> Router {
        Router::new()
            .route("/guarded", get(ok_handler))
            .layer(middleware::from_fn_with_state(
                manager,
                move |state: State<Arc<RoleManager>>, request: Request, next: Next| {
                    require_level(min_level, state, request, next)
                },
            ))
    }

    fn request(subject: Option<Subject>) -> Request {
        let mut request = Request::builder()
            .uri("/guarded")
            .body(Body::empty())
            .unwrap();
        if let Some(subject) = subject {
            request.extensions_mut().insert(subject);
        }
        request
    }

    #[tokio::test]
    async fn test_require_role_grants_and_denies() {
        let manager = manager(|_| {}).await;
        manager.create_role("Admin", None, 0).await.unwrap();
        manager.create_role("Editor", None, 0).await.unwrap();

        let alice = Subject::new("user", "1");
        manager.subject(alice.clone()).attach(["editor"]).await.unwrap();

        let app = role_router(Arc::clone(&manager), "admin,editor");
        let response = app
            .clone()
            .oneshot(request(Some(alice.clone())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bob = Subject::new("user", "2");
        let response = app.clone().oneshot(request(Some(bob))).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_require_role_without_subject_is_unauthorized() {
        let manager = manager(|_| {}).await;
        let app = role_router(manager, "admin");

        let response = app.oneshot(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_disabled_middleware_passes_through() {
        let manager = manager(|c| c.middleware.enabled = false).await;
        let app = role_router(manager, "admin");

        let response = app.oneshot(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_require_level_thresholds() {
        let manager = manager(|c| c.membership.hierarchical = true).await;
        manager.create_role("Editor", None, 2).await.unwrap();

        let alice = Subject::new("user", "1");
        manager.subject(alice.clone()).attach(["editor"]).await.unwrap();

        let response = level_router(Arc::clone(&manager), 2)
            .oneshot(request(Some(alice.clone())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = level_router(Arc::clone(&manager), 3)
            .oneshot(request(Some(alice)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
