use axum::{extract::Path, http::StatusCode, response::IntoResponse, Extension, Json};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::database::{models::Page, DatabaseManager};
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// GET /api/admin/pages - all CMS pages, most recently edited first.
pub async fn list_pages() -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let pages: Vec<Page> = sqlx::query_as("SELECT * FROM pages ORDER BY updated_at DESC")
        .fetch_all(&pool)
        .await?;

    Ok(Json(json!({ "pages": pages })))
}

#[derive(Debug, Deserialize)]
pub struct CreatePageRequest {
    pub slug: String,
    pub title: String,
    pub content: String,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub featured_image: Option<String>,
    pub is_active: Option<bool>,
}

/// POST /api/admin/pages - create a CMS page.
pub async fn create_page(
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<CreatePageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.slug.trim().is_empty() || payload.title.trim().is_empty() || payload.content.is_empty() {
        return Err(ApiError::bad_request("Slug, title, and content are required"));
    }

    let pool = DatabaseManager::pool().await?;

    let duplicate: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM pages WHERE slug = $1")
        .bind(&payload.slug)
        .fetch_optional(&pool)
        .await?;
    if duplicate.is_some() {
        return Err(ApiError::conflict("Page with this slug already exists"));
    }

    let page: Page = sqlx::query_as(
        r#"
        INSERT INTO pages
            (id, slug, title, content, meta_title, meta_description, featured_image, is_active, updated_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&payload.slug)
    .bind(&payload.title)
    .bind(&payload.content)
    .bind(&payload.meta_title)
    .bind(&payload.meta_description)
    .bind(&payload.featured_image)
    .bind(payload.is_active.unwrap_or(true))
    .bind(auth_user.id)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(json!({ "page": page }))))
}

/// GET /api/admin/pages/:id - one page, active or not.
pub async fn get_page(Path(id): Path<Uuid>) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let page: Option<Page> = sqlx::query_as("SELECT * FROM pages WHERE id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await?;

    let page = page.ok_or_else(|| ApiError::not_found("Page not found"))?;

    Ok(Json(json!({ "page": page })))
}

#[derive(Debug, Deserialize)]
pub struct UpdatePageRequest {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub featured_image: Option<String>,
    pub is_active: Option<bool>,
}

/// PUT /api/admin/pages/:id - partial page update.
pub async fn update_page(
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;

    if let Some(slug) = &payload.slug {
        let duplicate: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM pages WHERE slug = $1 AND id <> $2")
                .bind(slug)
                .bind(id)
                .fetch_optional(&pool)
                .await?;
        if duplicate.is_some() {
            return Err(ApiError::conflict("Page with this slug already exists"));
        }
    }

    let page: Option<Page> = sqlx::query_as(
        r#"
        UPDATE pages SET
            slug = COALESCE($2, slug),
            title = COALESCE($3, title),
            content = COALESCE($4, content),
            meta_title = COALESCE($5, meta_title),
            meta_description = COALESCE($6, meta_description),
            featured_image = COALESCE($7, featured_image),
            is_active = COALESCE($8, is_active),
            updated_by = $9,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&payload.slug)
    .bind(&payload.title)
    .bind(&payload.content)
    .bind(&payload.meta_title)
    .bind(&payload.meta_description)
    .bind(&payload.featured_image)
    .bind(payload.is_active)
    .bind(auth_user.id)
    .fetch_optional(&pool)
    .await?;

    let page = page.ok_or_else(|| ApiError::not_found("Page not found"))?;

    Ok(Json(json!({ "page": page })))
}

/// DELETE /api/admin/pages/:id
pub async fn delete_page(Path(id): Path<Uuid>) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let deleted: Option<(Uuid,)> = sqlx::query_as("DELETE FROM pages WHERE id = $1 RETURNING id")
        .bind(id)
        .fetch_optional(&pool)
        .await?;

    deleted.ok_or_else(|| ApiError::not_found("Page not found"))?;

    Ok(Json(json!({ "deleted": id })))
}
