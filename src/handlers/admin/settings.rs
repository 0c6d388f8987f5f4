use axum::{extract::State, response::IntoResponse, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::{models::SiteSettings, DatabaseManager};
use crate::error::ApiError;
use crate::middleware::{AuthUser, GateState};

/// GET /api/admin/settings - the settings row, created with defaults on
/// first read so the admin form always has something to edit.
pub async fn get_settings() -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let settings: Option<SiteSettings> = sqlx::query_as("SELECT * FROM site_settings LIMIT 1")
        .fetch_optional(&pool)
        .await?;

    let settings = match settings {
        Some(settings) => settings,
        None => {
            let defaults = SiteSettings::default_row();
            sqlx::query_as(
                r#"
                INSERT INTO site_settings
                    (id, site_name, site_description, favicon_url, logo_url, copyright,
                     contact_email, support_email, social_links, meta_title)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&defaults.site_name)
            .bind(&defaults.site_description)
            .bind(&defaults.favicon_url)
            .bind(&defaults.logo_url)
            .bind(&defaults.copyright)
            .bind(&defaults.contact_email)
            .bind(&defaults.support_email)
            .bind(&defaults.social_links)
            .bind(&defaults.meta_title)
            .fetch_one(&pool)
            .await?
        }
    };

    Ok(Json(json!({ "settings": settings })))
}

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub site_name: Option<String>,
    pub site_description: Option<String>,
    pub favicon_url: Option<String>,
    pub logo_url: Option<String>,
    pub copyright: Option<String>,
    pub contact_email: Option<String>,
    pub support_email: Option<String>,
    pub social_links: Option<Value>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub google_analytics_id: Option<String>,
    pub maintenance_mode: Option<bool>,
}

/// PUT /api/admin/settings - partial settings update. Toggling
/// `maintenance_mode` here is what flips the access gate site-wide, so
/// the gate's cached flag is invalidated after the write.
pub async fn update_settings(
    State(state): State<GateState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM site_settings LIMIT 1")
        .fetch_optional(&pool)
        .await?;

    let settings: SiteSettings = match existing {
        Some((id,)) => {
            sqlx::query_as(
                r#"
                UPDATE site_settings SET
                    site_name = COALESCE($2, site_name),
                    site_description = COALESCE($3, site_description),
                    favicon_url = COALESCE($4, favicon_url),
                    logo_url = COALESCE($5, logo_url),
                    copyright = COALESCE($6, copyright),
                    contact_email = COALESCE($7, contact_email),
                    support_email = COALESCE($8, support_email),
                    social_links = COALESCE($9, social_links),
                    meta_title = COALESCE($10, meta_title),
                    meta_description = COALESCE($11, meta_description),
                    google_analytics_id = COALESCE($12, google_analytics_id),
                    maintenance_mode = COALESCE($13, maintenance_mode),
                    updated_at = NOW(),
                    updated_by = $14
                WHERE id = $1
                RETURNING *
                "#,
            )
            .bind(id)
            .bind(&payload.site_name)
            .bind(&payload.site_description)
            .bind(&payload.favicon_url)
            .bind(&payload.logo_url)
            .bind(&payload.copyright)
            .bind(&payload.contact_email)
            .bind(&payload.support_email)
            .bind(&payload.social_links)
            .bind(&payload.meta_title)
            .bind(&payload.meta_description)
            .bind(&payload.google_analytics_id)
            .bind(payload.maintenance_mode)
            .bind(auth_user.id)
            .fetch_one(&pool)
            .await?
        }
        None => {
            let defaults = SiteSettings::default_row();
            sqlx::query_as(
                r#"
                INSERT INTO site_settings
                    (id, site_name, site_description, favicon_url, logo_url, copyright,
                     contact_email, support_email, social_links, meta_title,
                     meta_description, google_analytics_id, maintenance_mode, updated_by)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(payload.site_name.as_deref().unwrap_or(&defaults.site_name))
            .bind(payload.site_description.or(defaults.site_description))
            .bind(payload.favicon_url.or(defaults.favicon_url))
            .bind(payload.logo_url.or(defaults.logo_url))
            .bind(payload.copyright.or(defaults.copyright))
            .bind(payload.contact_email.or(defaults.contact_email))
            .bind(payload.support_email.or(defaults.support_email))
            .bind(payload.social_links.or(defaults.social_links))
            .bind(payload.meta_title.or(defaults.meta_title))
            .bind(&payload.meta_description)
            .bind(&payload.google_analytics_id)
            .bind(payload.maintenance_mode.unwrap_or(false))
            .bind(auth_user.id)
            .fetch_one(&pool)
            .await?
        }
    };

    // Push-invalidate so the gate sees the change immediately.
    state.settings.invalidate().await;

    if let Some(mode) = payload.maintenance_mode {
        tracing::info!(
            "Maintenance mode set to {} by {}",
            mode,
            auth_user.email
        );
    }

    Ok(Json(json!({ "settings": settings })))
}
