use axum::{extract::Path, response::IntoResponse, Json};
use serde_json::json;

use crate::database::{models::Page, DatabaseManager};
use crate::error::ApiError;

/// GET /api/pages/:slug - active CMS page by slug.
pub async fn get_page_by_slug(Path(slug): Path<String>) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let page: Option<Page> =
        sqlx::query_as("SELECT * FROM pages WHERE slug = $1 AND is_active = TRUE")
            .bind(&slug)
            .fetch_optional(&pool)
            .await?;

    let page = page.ok_or_else(|| ApiError::not_found("Page not found"))?;

    Ok(Json(json!({ "page": page })))
}
