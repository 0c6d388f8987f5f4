use axum::{extract::Path, response::IntoResponse, Extension, Json};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::auth::Role;
use crate::database::{
    models::{Brand, Creator, User},
    DatabaseManager,
};
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// GET /api/admin/users - all accounts, newest first.
pub async fn list_users() -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let users: Vec<User> = sqlx::query_as("SELECT * FROM users ORDER BY created_at DESC")
        .fetch_all(&pool)
        .await?;

    let views: Vec<_> = users.iter().map(User::public_view).collect();

    Ok(Json(json!({ "users": views })))
}

/// GET /api/admin/users/:id - one account with its marketplace profile.
pub async fn get_user(Path(id): Path<Uuid>) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await?;
    let user = user.ok_or_else(|| ApiError::not_found("User not found"))?;

    let creator: Option<Creator> = sqlx::query_as("SELECT * FROM creators WHERE user_id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await?;
    let brand: Option<Brand> = sqlx::query_as("SELECT * FROM brands WHERE user_id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await?;

    Ok(Json(json!({
        "user": user.public_view(),
        "creator": creator,
        "brand": brand
    })))
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub is_approved: Option<bool>,
    pub is_featured: Option<bool>,
}

/// PUT /api/admin/users/:id - partial account update. Only provided
/// fields change.
pub async fn update_user(
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let existing: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await?;
    let existing = existing.ok_or_else(|| ApiError::not_found("User not found"))?;

    // Uniqueness check when username or email changes.
    let username = payload.username.as_deref().unwrap_or(&existing.username);
    let email = payload.email.as_deref().unwrap_or(&existing.email);
    if username != existing.username || email != existing.email {
        let duplicate: Option<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM users WHERE (username = $1 OR email = $2) AND id <> $3",
        )
        .bind(username)
        .bind(email)
        .bind(id)
        .fetch_optional(&pool)
        .await?;

        if duplicate.is_some() {
            return Err(ApiError::conflict("Username or email already exists"));
        }
    }

    let user: User = sqlx::query_as(
        r#"
        UPDATE users SET
            username = COALESCE($2, username),
            email = COALESCE($3, email),
            role = COALESCE($4, role),
            phone = COALESCE($5, phone),
            country = COALESCE($6, country),
            is_approved = COALESCE($7, is_approved),
            is_featured = COALESCE($8, is_featured),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&payload.username)
    .bind(&payload.email)
    .bind(payload.role.map(|r| r.as_str()))
    .bind(&payload.phone)
    .bind(&payload.country)
    .bind(payload.is_approved)
    .bind(payload.is_featured)
    .fetch_one(&pool)
    .await?;

    Ok(Json(json!({ "user": user.public_view() })))
}

/// DELETE /api/admin/users/:id - remove an account. Admins cannot delete
/// themselves; that would lock everyone out of the panel.
pub async fn delete_user(
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    if id == auth_user.id {
        return Err(ApiError::conflict("Cannot delete your own admin account"));
    }

    let pool = DatabaseManager::pool().await?;

    let deleted: Option<(Uuid,)> = sqlx::query_as("DELETE FROM users WHERE id = $1 RETURNING id")
        .bind(id)
        .fetch_optional(&pool)
        .await?;

    deleted.ok_or_else(|| ApiError::not_found("User not found"))?;

    tracing::info!("Admin {} deleted user {}", auth_user.email, id);

    Ok(Json(json!({ "deleted": id })))
}
