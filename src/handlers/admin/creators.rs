use axum::{response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::database::{models::User, DatabaseManager};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    pub user_id: Uuid,
    pub approved: bool,
}

#[derive(Debug, Deserialize)]
pub struct FeatureRequest {
    pub user_id: Uuid,
    pub featured: bool,
}

/// POST /api/admin/creators/approve - approve or revoke a creator listing.
pub async fn approve(Json(payload): Json<ApproveRequest>) -> Result<impl IntoResponse, ApiError> {
    let user = set_creator_flag(payload.user_id, "is_approved", payload.approved).await?;
    Ok(Json(json!({ "user": user.public_view() })))
}

/// POST /api/admin/creators/featured - feature or unfeature a creator on
/// the marketing pages.
pub async fn feature(Json(payload): Json<FeatureRequest>) -> Result<impl IntoResponse, ApiError> {
    let user = set_creator_flag(payload.user_id, "is_featured", payload.featured).await?;
    Ok(Json(json!({ "user": user.public_view() })))
}

async fn set_creator_flag(user_id: Uuid, column: &str, value: bool) -> Result<User, ApiError> {
    let pool = DatabaseManager::pool().await?;

    // Flags only apply to creator-side accounts.
    let query = format!(
        "UPDATE users SET {column} = $2, updated_at = NOW() \
         WHERE id = $1 AND role IN ('CREATOR', 'COACH') RETURNING *"
    );

    let user: Option<User> = sqlx::query_as(&query)
        .bind(user_id)
        .bind(value)
        .fetch_optional(&pool)
        .await?;

    user.ok_or_else(|| ApiError::not_found("Creator not found"))
}
