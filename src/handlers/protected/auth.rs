use axum::{response::IntoResponse, Extension, Json};
use serde_json::json;

use crate::database::{models::User, DatabaseManager};
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// GET /api/auth/whoami - fresh account view for the current session.
/// Reads the database rather than echoing claims, so role or flag changes
/// made by an admin show up without re-login.
pub async fn whoami(Extension(auth_user): Extension<AuthUser>) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(auth_user.id)
        .fetch_optional(&pool)
        .await?;

    // A valid token for a deleted account is still an unauthenticated caller.
    let user = user.ok_or_else(|| ApiError::unauthorized("Account no longer exists"))?;

    Ok(Json(json!({ "user": user.public_view() })))
}
