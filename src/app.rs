use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{admin, protected, public};
use crate::middleware::{
    access_gate_middleware, require_admin_middleware, require_auth_middleware, GateState,
};

/// Assemble the full application router. The access gate wraps every
/// route; the API tiers add their own bearer-token guards on top.
pub fn router(gate: GateState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        .merge(protected_routes())
        .merge(admin_routes(gate.clone()))
        // Global middleware
        .layer(from_fn_with_state(gate, access_gate_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn public_routes() -> Router {
    use axum::routing::post;

    Router::new()
        .route("/api/auth/register", post(public::auth::register))
        .route("/api/auth/login", post(public::auth::login))
        .route("/api/settings", get(public::settings::get_settings))
        .route("/api/frontend", get(public::frontend::get_contents))
        .route("/api/pages/:slug", get(public::pages::get_page_by_slug))
}

fn protected_routes() -> Router {
    use axum::routing::put;

    Router::new()
        .route("/api/auth/whoami", get(protected::auth::whoami))
        .route("/api/dashboard/overview", get(protected::dashboard::overview))
        .route("/api/dashboard/briefs", get(protected::briefs::list_briefs).post(protected::briefs::create_brief))
        .route("/api/dashboard/profile", put(protected::dashboard::update_profile))
        // route_layer keeps the guard off the router's fallback: unmatched
        // paths fall through to 404 instead of 401.
        .route_layer(from_fn(require_auth_middleware))
}

fn admin_routes(gate: GateState) -> Router {
    use axum::routing::{post, put};

    Router::new()
        .route("/api/admin/users", get(admin::users::list_users))
        .route(
            "/api/admin/users/:id",
            get(admin::users::get_user)
                .put(admin::users::update_user)
                .delete(admin::users::delete_user),
        )
        .route("/api/admin/creators/approve", post(admin::creators::approve))
        .route("/api/admin/creators/featured", post(admin::creators::feature))
        .route(
            "/api/admin/settings",
            get(admin::settings::get_settings).put(admin::settings::update_settings),
        )
        .route(
            "/api/admin/pages",
            get(admin::pages::list_pages).post(admin::pages::create_page),
        )
        .route(
            "/api/admin/pages/:id",
            get(admin::pages::get_page)
                .put(admin::pages::update_page)
                .delete(admin::pages::delete_page),
        )
        .route(
            "/api/admin/frontend",
            get(admin::frontend::list_contents).post(admin::frontend::upsert_content),
        )
        .route(
            "/api/admin/frontend/:id",
            put(admin::frontend::update_content).delete(admin::frontend::delete_content),
        )
        // Auth runs first (outer layer), then the admin role check.
        // route_layer so only matched admin routes are guarded.
        .route_layer(from_fn(require_admin_middleware))
        .route_layer(from_fn(require_auth_middleware))
        .with_state(gate)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Marketplace API",
        "version": version,
        "description": "Creator/brand marketplace backend (Axum)",
        "endpoints": {
            "home": "/ (public)",
            "auth": "/api/auth/register, /api/auth/login (public), /api/auth/whoami (protected)",
            "settings": "/api/settings (public), /api/admin/settings (admin)",
            "pages": "/api/pages/:slug (public), /api/admin/pages[/:id] (admin)",
            "frontend": "/api/frontend (public), /api/admin/frontend[/:id] (admin)",
            "dashboard": "/api/dashboard/* (protected)",
            "admin": "/api/admin/* (admin)",
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
