use axum::{response::IntoResponse, Json};
use serde_json::json;

use crate::database::{models::SiteSettings, DatabaseManager};
use crate::error::ApiError;

/// GET /api/settings - public site settings, defaults when the table is
/// empty. Consumed by page chrome and by external maintenance probes, so
/// it stays reachable during maintenance mode.
pub async fn get_settings() -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let settings: Option<SiteSettings> = sqlx::query_as("SELECT * FROM site_settings LIMIT 1")
        .fetch_optional(&pool)
        .await?;

    let settings = settings.unwrap_or_else(SiteSettings::default_row);

    Ok(Json(json!({ "settings": settings })))
}
