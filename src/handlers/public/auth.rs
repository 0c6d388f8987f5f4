use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::auth::{self, Claims, Role};
use crate::config;
use crate::database::{models::User, DatabaseManager};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub role: Role,
    pub phone: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/register - create a BRAND, CREATOR, or COACH account.
/// Admin accounts are never created through self-service.
pub async fn register(Json(payload): Json<RegisterRequest>) -> Result<impl IntoResponse, ApiError> {
    if payload.role == Role::Admin {
        return Err(ApiError::bad_request("Cannot self-register an admin account"));
    }
    if !payload.email.contains('@') {
        return Err(ApiError::bad_request("A valid email address is required"));
    }
    if payload.username.trim().is_empty() {
        return Err(ApiError::bad_request("Username is required"));
    }
    if payload.password.len() < 8 {
        return Err(ApiError::bad_request("Password must be at least 8 characters"));
    }

    let pool = DatabaseManager::pool().await?;

    let duplicate: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM users WHERE email = $1 OR username = $2")
            .bind(&payload.email)
            .bind(&payload.username)
            .fetch_optional(&pool)
            .await?;

    if duplicate.is_some() {
        return Err(ApiError::conflict("Username or email already exists"));
    }

    let password_hash = auth::hash_password(&payload.password)?;

    let user: User = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, username, password_hash, role, phone, country)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&payload.email)
    .bind(&payload.username)
    .bind(&password_hash)
    .bind(payload.role.as_str())
    .bind(&payload.phone)
    .bind(&payload.country)
    .fetch_one(&pool)
    .await?;

    tracing::info!("Registered {} account for {}", user.role, user.email);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "user": user.public_view() })),
    ))
}

/// POST /api/auth/login - exchange credentials for a session token.
pub async fn login(Json(payload): Json<LoginRequest>) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&payload.email)
        .fetch_optional(&pool)
        .await?;

    // One message for both unknown email and bad password.
    let invalid = || ApiError::unauthorized("Invalid email or password");

    let user = user.ok_or_else(invalid)?;

    if !auth::verify_password(&payload.password, &user.password_hash) {
        return Err(invalid());
    }

    let role = user
        .role()
        .ok_or_else(|| ApiError::internal_server_error("Account has an unrecognized role"))?;

    let claims = Claims::new(user.id, user.email.clone(), role);
    let token = auth::issue_token(&claims)?;
    let expires_in = config::config().security.jwt_expiry_hours * 3600;

    Ok(Json(json!({
        "token": token,
        "user": user.public_view(),
        "expires_in": expires_in
    })))
}
