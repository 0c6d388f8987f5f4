use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::database::{models::FrontendContent, DatabaseManager};
use crate::error::ApiError;
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub section: Option<String>,
}

/// GET /api/admin/frontend - active fragments as a flat list for the
/// editor, optionally filtered by section.
pub async fn list_contents(Query(query): Query<ListQuery>) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let contents: Vec<FrontendContent> = match &query.section {
        Some(section) => {
            sqlx::query_as(
                "SELECT * FROM frontend_contents WHERE is_active = TRUE AND section = $1 \
                 ORDER BY section ASC, sort_order ASC",
            )
            .bind(section)
            .fetch_all(&pool)
            .await?
        }
        None => {
            sqlx::query_as(
                "SELECT * FROM frontend_contents WHERE is_active = TRUE \
                 ORDER BY section ASC, sort_order ASC",
            )
            .fetch_all(&pool)
            .await?
        }
    };

    Ok(Json(json!({ "contents": contents })))
}

#[derive(Debug, Deserialize)]
pub struct UpsertContentRequest {
    pub section: String,
    pub key: String,
    pub content: Option<String>,
    pub sort_order: Option<i32>,
}

/// POST /api/admin/frontend - create or replace the fragment at
/// (section, key). Re-posting an existing address updates it in place.
pub async fn upsert_content(
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<UpsertContentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.section.trim().is_empty() || payload.key.trim().is_empty() {
        return Err(ApiError::bad_request("Section and key are required"));
    }

    let pool = DatabaseManager::pool().await?;

    let content: FrontendContent = sqlx::query_as(
        r#"
        INSERT INTO frontend_contents (id, section, key, content, sort_order, updated_by)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (section, key) DO UPDATE SET
            content = EXCLUDED.content,
            sort_order = EXCLUDED.sort_order,
            is_active = TRUE,
            updated_by = EXCLUDED.updated_by,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&payload.section)
    .bind(&payload.key)
    .bind(payload.content.as_deref().unwrap_or(""))
    .bind(payload.sort_order.unwrap_or(0))
    .bind(auth_user.id)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(json!({ "content": content }))))
}

#[derive(Debug, Deserialize)]
pub struct UpdateContentRequest {
    pub content: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// PUT /api/admin/frontend/:id - partial update of one fragment.
pub async fn update_content(
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateContentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let content: Option<FrontendContent> = sqlx::query_as(
        r#"
        UPDATE frontend_contents SET
            content = COALESCE($2, content),
            sort_order = COALESCE($3, sort_order),
            is_active = COALESCE($4, is_active),
            updated_by = $5,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&payload.content)
    .bind(payload.sort_order)
    .bind(payload.is_active)
    .bind(auth_user.id)
    .fetch_optional(&pool)
    .await?;

    let content = content.ok_or_else(|| ApiError::not_found("Content not found"))?;

    Ok(Json(json!({ "content": content })))
}

/// DELETE /api/admin/frontend/:id - deactivate a fragment. Rows are kept
/// so the editor can restore them; the public endpoint only serves active
/// fragments.
pub async fn delete_content(
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let deactivated: Option<(Uuid,)> = sqlx::query_as(
        "UPDATE frontend_contents SET is_active = FALSE, updated_by = $2, updated_at = NOW() \
         WHERE id = $1 RETURNING id",
    )
    .bind(id)
    .bind(auth_user.id)
    .fetch_optional(&pool)
    .await?;

    deactivated.ok_or_else(|| ApiError::not_found("Content not found"))?;

    Ok(Json(json!({ "success": true })))
}
