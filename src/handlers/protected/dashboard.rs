use axum::{response::IntoResponse, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::auth::Role;
use crate::database::{
    models::{Brand, Creator},
    DatabaseManager,
};
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// GET /api/dashboard/overview - role-specific dashboard summary.
pub async fn overview(Extension(auth_user): Extension<AuthUser>) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let data = match auth_user.role {
        Role::Admin => {
            let (user_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
                .fetch_one(&pool)
                .await?;
            let (page_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM pages")
                .fetch_one(&pool)
                .await?;
            let (pending,): (i64,) = sqlx::query_as(
                "SELECT COUNT(*) FROM users WHERE role = 'CREATOR' AND is_approved = FALSE",
            )
            .fetch_one(&pool)
            .await?;

            json!({
                "role": auth_user.role,
                "users": user_count,
                "pages": page_count,
                "pending_approvals": pending
            })
        }
        Role::Brand => {
            let profile = brand_profile(&pool, &auth_user).await?;
            json!({
                "role": auth_user.role,
                "profile_complete": profile.is_some(),
                "brand": profile
            })
        }
        Role::Creator | Role::Coach => {
            let profile = creator_profile(&pool, &auth_user).await?;
            let flags: Option<(bool, bool)> =
                sqlx::query_as("SELECT is_approved, is_featured FROM users WHERE id = $1")
                    .bind(auth_user.id)
                    .fetch_optional(&pool)
                    .await?;
            let (is_approved, is_featured) = flags.unwrap_or((false, false));

            json!({
                "role": auth_user.role,
                "profile_complete": profile.is_some(),
                "is_approved": is_approved,
                "is_featured": is_featured,
                "creator": profile
            })
        }
    };

    Ok(Json(json!({ "overview": data })))
}

#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    // Creator/coach fields
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<Value>,
    pub social_links: Option<Value>,
    // Brand fields
    pub company_name: Option<String>,
    pub company_website: Option<String>,
    pub billing_info: Option<Value>,
}

/// PUT /api/dashboard/profile - upsert the caller's marketplace profile.
/// The accepted fields depend on the caller's role.
pub async fn update_profile(
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<ProfileUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;

    match auth_user.role {
        Role::Creator | Role::Coach => {
            let display_name = payload
                .display_name
                .filter(|s| !s.trim().is_empty())
                .ok_or_else(|| ApiError::bad_request("display_name is required"))?;

            let profile: Creator = sqlx::query_as(
                r#"
                INSERT INTO creators (user_id, display_name, bio, skills, social_links)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (user_id) DO UPDATE SET
                    display_name = EXCLUDED.display_name,
                    bio = EXCLUDED.bio,
                    skills = EXCLUDED.skills,
                    social_links = EXCLUDED.social_links,
                    updated_at = NOW()
                RETURNING *
                "#,
            )
            .bind(auth_user.id)
            .bind(&display_name)
            .bind(&payload.bio)
            .bind(&payload.skills)
            .bind(&payload.social_links)
            .fetch_one(&pool)
            .await?;

            Ok(Json(json!({ "creator": profile })))
        }
        Role::Brand => {
            let company_name = payload
                .company_name
                .filter(|s| !s.trim().is_empty())
                .ok_or_else(|| ApiError::bad_request("company_name is required"))?;

            let profile: Brand = sqlx::query_as(
                r#"
                INSERT INTO brands (user_id, company_name, company_website, billing_info)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (user_id) DO UPDATE SET
                    company_name = EXCLUDED.company_name,
                    company_website = EXCLUDED.company_website,
                    billing_info = EXCLUDED.billing_info,
                    updated_at = NOW()
                RETURNING *
                "#,
            )
            .bind(auth_user.id)
            .bind(&company_name)
            .bind(&payload.company_website)
            .bind(&payload.billing_info)
            .fetch_one(&pool)
            .await?;

            Ok(Json(json!({ "brand": profile })))
        }
        Role::Admin => Err(ApiError::bad_request(
            "Admin accounts do not have a marketplace profile",
        )),
    }
}

async fn creator_profile(pool: &PgPool, auth_user: &AuthUser) -> Result<Option<Creator>, ApiError> {
    let profile = sqlx::query_as("SELECT * FROM creators WHERE user_id = $1")
        .bind(auth_user.id)
        .fetch_optional(pool)
        .await?;
    Ok(profile)
}

async fn brand_profile(pool: &PgPool, auth_user: &AuthUser) -> Result<Option<Brand>, ApiError> {
    let profile = sqlx::query_as("SELECT * FROM brands WHERE user_id = $1")
        .bind(auth_user.id)
        .fetch_optional(pool)
        .await?;
    Ok(profile)
}
