use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::auth;
use crate::config;
use crate::gate::{evaluate, Decision, Session};
use crate::services::SettingsProvider;

/// Cookie carrying the session token for browser navigation.
const SESSION_COOKIE: &str = "session_token";

/// State handed to the gate middleware: the maintenance-flag source.
#[derive(Clone)]
pub struct GateState {
    pub settings: Arc<dyn SettingsProvider>,
}

impl GateState {
    pub fn new(settings: Arc<dyn SettingsProvider>) -> Self {
        Self { settings }
    }
}

/// Request-time access gate. Resolves the maintenance flag and the
/// caller's session, evaluates the access policy, and either forwards the
/// request or answers with a 307 redirect.
///
/// A failed settings read is logged and (by default) treated as
/// maintenance off, so a settings outage degrades enforcement rather than
/// availability. A failed session decode is an anonymous caller, not an
/// error.
pub async fn access_gate_middleware(
    State(state): State<GateState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    let maintenance = match state.settings.maintenance_mode().await {
        Ok(flag) => flag,
        Err(err) => {
            tracing::error!("Maintenance check failed: {}", err);
            !config::config().gate.fail_open
        }
    };

    let session = extract_token(&request)
        .and_then(|token| auth::verify_token(&token))
        .map(|claims| Session {
            subject_id: claims.sub,
            role: claims.role,
        });

    // The API tiers run their own bearer-token guards, so the gate only
    // answers allow-or-redirect and forwards the request untouched.
    match evaluate(&path, maintenance, session.as_ref()) {
        Decision::Allow => next.run(request).await,
        Decision::RedirectTo(target) => {
            tracing::debug!("Gate redirect: {} -> {}", path, target);
            Redirect::temporary(target).into_response()
        }
    }
}

/// Pull the session token from the session cookie, falling back to a
/// Bearer Authorization header.
fn extract_token(request: &Request) -> Option<String> {
    if let Some(cookies) = request
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
    {
        for pair in cookies.split(';') {
            let mut parts = pair.trim().splitn(2, '=');
            if parts.next() == Some(SESSION_COOKIE) {
                match parts.next() {
                    Some(token) if !token.is_empty() => return Some(token.to_string()),
                    _ => {}
                }
            }
        }
    }

    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with(header_name: header::HeaderName, value: &str) -> Request {
        axum::http::Request::builder()
            .uri("/dashboard")
            .header(header_name, value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn token_from_session_cookie() {
        let req = request_with(header::COOKIE, "theme=dark; session_token=abc123; foo=bar");
        assert_eq!(extract_token(&req).as_deref(), Some("abc123"));
    }

    #[test]
    fn token_from_bearer_header() {
        let req = request_with(header::AUTHORIZATION, "Bearer tok");
        assert_eq!(extract_token(&req).as_deref(), Some("tok"));
    }

    #[test]
    fn missing_or_empty_token_is_none() {
        let req = request_with(header::COOKIE, "session_token=");
        assert_eq!(extract_token(&req), None);

        let req = request_with(header::AUTHORIZATION, "Basic abc");
        assert_eq!(extract_token(&req), None);
    }
}
