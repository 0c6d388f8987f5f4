//! Router-level tests for the access gate and the API auth tiers.
//!
//! The app is driven through `tower::ServiceExt::oneshot` with an
//! in-memory settings provider, so no database or live server is needed.
//! Paths that pass the gate but have no route fall through to axum's 404,
//! which these tests use to distinguish "allowed" from "redirected".

use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use marketplace_api::app;
use marketplace_api::auth::{issue_token, Claims, Role};
use marketplace_api::middleware::GateState;
use marketplace_api::services::{MemorySettings, SettingsProvider};

fn test_app(settings: Arc<dyn SettingsProvider>) -> Router {
    app::router(GateState::new(settings))
}

fn token_for(role: Role) -> String {
    let claims = Claims::new(Uuid::new_v4(), format!("{role}@example.com"), role);
    issue_token(&claims).expect("token")
}

fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

fn get_with_session(path: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .header(header::COOKIE, format!("session_token={token}"))
        .body(Body::empty())
        .unwrap()
}

fn location(response: &axum::response::Response) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

#[tokio::test]
async fn maintenance_redirects_public_pages() -> Result<()> {
    let app = test_app(Arc::new(MemorySettings::new(true)));

    let response = app.oneshot(get("/pricing")).await?;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response).as_deref(), Some("/maintenance"));
    Ok(())
}

#[tokio::test]
async fn maintenance_exempts_maintenance_page_and_admin_tree() -> Result<()> {
    let app = test_app(Arc::new(MemorySettings::new(true)));

    // Allowed through the gate; no page route exists, so axum answers 404.
    let response = app.clone().oneshot(get("/maintenance")).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get("/admin/users")).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn admin_tree_redirects_anonymous_to_login() -> Result<()> {
    let app = test_app(Arc::new(MemorySettings::new(false)));

    let response = app.oneshot(get("/admin/users")).await?;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response).as_deref(), Some("/login"));
    Ok(())
}

#[tokio::test]
async fn admin_tree_redirects_non_admin_to_dashboard() -> Result<()> {
    let app = test_app(Arc::new(MemorySettings::new(false)));
    let token = token_for(Role::Creator);

    let response = app.oneshot(get_with_session("/admin/users", &token)).await?;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response).as_deref(), Some("/dashboard"));
    Ok(())
}

#[tokio::test]
async fn admin_tree_passes_admin_session() -> Result<()> {
    let app = test_app(Arc::new(MemorySettings::new(false)));
    let token = token_for(Role::Admin);

    let response = app.oneshot(get_with_session("/admin/users", &token)).await?;
    // Through the gate; no page route, so 404 rather than a redirect.
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn dashboard_requires_any_session() -> Result<()> {
    let app = test_app(Arc::new(MemorySettings::new(false)));

    let response = app.clone().oneshot(get("/dashboard/profile")).await?;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response).as_deref(), Some("/login"));

    let token = token_for(Role::Brand);
    let response = app.oneshot(get_with_session("/dashboard/profile", &token)).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn garbage_session_cookie_is_anonymous() -> Result<()> {
    let app = test_app(Arc::new(MemorySettings::new(false)));

    let response = app
        .oneshot(get_with_session("/dashboard/profile", "not-a-jwt"))
        .await?;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response).as_deref(), Some("/login"));
    Ok(())
}

#[tokio::test]
async fn settings_failure_fails_open() -> Result<()> {
    let app = test_app(Arc::new(MemorySettings::failing()));

    // Identical to maintenance off: public pages pass, role rules apply.
    let response = app.clone().oneshot(get("/pricing")).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get("/admin/users")).await?;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response).as_deref(), Some("/login"));
    Ok(())
}

#[tokio::test]
async fn root_serves_service_description() -> Result<()> {
    let app = test_app(Arc::new(MemorySettings::new(false)));

    let response = app.oneshot(get("/")).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await?.to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["name"], "Marketplace API");
    Ok(())
}

#[tokio::test]
async fn maintenance_flag_changes_take_effect() -> Result<()> {
    let settings = Arc::new(MemorySettings::new(false));
    let app = test_app(settings.clone());

    let response = app.clone().oneshot(get("/pricing")).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    settings.set_maintenance(true);
    let response = app.oneshot(get("/pricing")).await?;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response).as_deref(), Some("/maintenance"));
    Ok(())
}

#[tokio::test]
async fn unrouted_paths_fall_through_to_404_not_401() -> Result<()> {
    let app = test_app(Arc::new(MemorySettings::new(false)));

    // Page paths have no axum route; the API guards must not capture the
    // router fallback, so these reach it and get a plain 404.
    for path in ["/login", "/pricing", "/maintenance"] {
        let response = app.clone().oneshot(get(path)).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "path: {path}");
    }

    // Same for unknown API subpaths under a guarded prefix.
    let response = app.oneshot(get("/api/dashboard/unknown")).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn maintenance_keeps_admin_api_reachable() -> Result<()> {
    let app = test_app(Arc::new(MemorySettings::new(true)));

    // The admin API passes the gate during maintenance; a non-admin token
    // then hits the role guard, proving the request was not redirected.
    let token = token_for(Role::Creator);
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/admin/users")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Anonymous admin API calls get the auth guard's 401, not a redirect.
    let response = app.clone().oneshot(get("/api/admin/settings")).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The liveness endpoint answers for itself during maintenance.
    let response = app.oneshot(get("/health")).await?;
    assert_ne!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    Ok(())
}

#[tokio::test]
async fn api_tier_ignores_session_cookies() -> Result<()> {
    let app = test_app(Arc::new(MemorySettings::new(false)));

    // A valid browser session passes the gate, but the API tier
    // authenticates on its own from the Authorization header.
    let token = token_for(Role::Admin);
    let response = app
        .oneshot(get_with_session("/api/auth/whoami", &token))
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn protected_api_requires_bearer_token() -> Result<()> {
    let app = test_app(Arc::new(MemorySettings::new(false)));

    let response = app.oneshot(get("/api/auth/whoami")).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn admin_api_rejects_non_admin_roles() -> Result<()> {
    let app = test_app(Arc::new(MemorySettings::new(false)));
    let token = token_for(Role::Coach);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/users")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    Ok(())
}
