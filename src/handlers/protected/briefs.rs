use axum::{extract::Query, http::StatusCode, response::IntoResponse, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::Role;
use crate::database::{models::Brief, DatabaseManager};
use crate::error::ApiError;
use crate::middleware::AuthUser;

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct BriefListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
}

/// How much of the brief table a caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BriefScope {
    /// Brands see only their own briefs.
    Own,
    /// Creators and coaches browse the open pool.
    OpenPool,
    /// Admins see everything.
    All,
}

fn scope_for(role: Role) -> BriefScope {
    match role {
        Role::Brand => BriefScope::Own,
        Role::Creator | Role::Coach => BriefScope::OpenPool,
        Role::Admin => BriefScope::All,
    }
}

fn page_params(query: &BriefListQuery) -> (i64, i64, i64) {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = (page - 1) * limit;
    (page, limit, offset)
}

fn page_count(total: i64, limit: i64) -> i64 {
    (total + limit - 1) / limit
}

/// GET /api/dashboard/briefs - paginated brief listing, scoped by role:
/// brands get their own briefs, creators and coaches the OPEN pool,
/// admins everything. Optional `?status=` filter on top of the scope.
pub async fn list_briefs(
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<BriefListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let (page, limit, offset) = page_params(&query);

    let scope = scope_for(auth_user.role);
    let status = match (scope, &query.status) {
        (BriefScope::OpenPool, _) => Some("OPEN".to_string()),
        (_, status) => status.clone(),
    };
    let brand_id = matches!(scope, BriefScope::Own).then_some(auth_user.id);

    let (total,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM briefs \
         WHERE ($1::uuid IS NULL OR brand_id = $1) AND ($2::text IS NULL OR status = $2)",
    )
    .bind(brand_id)
    .bind(&status)
    .fetch_one(&pool)
    .await?;

    let briefs: Vec<Brief> = sqlx::query_as(
        "SELECT * FROM briefs \
         WHERE ($1::uuid IS NULL OR brand_id = $1) AND ($2::text IS NULL OR status = $2) \
         ORDER BY created_at DESC LIMIT $3 OFFSET $4",
    )
    .bind(brand_id)
    .bind(&status)
    .bind(limit)
    .bind(offset)
    .fetch_all(&pool)
    .await?;

    Ok(Json(json!({
        "briefs": briefs,
        "pagination": {
            "page": page,
            "limit": limit,
            "total": total,
            "pages": page_count(total, limit)
        }
    })))
}

#[derive(Debug, Deserialize)]
pub struct CreateBriefRequest {
    pub title: String,
    pub description: String,
    pub budget: Option<f64>,
    pub deliverables: Option<Value>,
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
}

/// POST /api/dashboard/briefs - brands post a new brief. Requires a
/// completed brand profile so creators always see who is hiring.
pub async fn create_brief(
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<CreateBriefRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if auth_user.role != Role::Brand {
        return Err(ApiError::forbidden("Only brands can post briefs"));
    }
    if payload.title.trim().is_empty() || payload.description.trim().is_empty() {
        return Err(ApiError::bad_request("Title and description are required"));
    }

    let pool = DatabaseManager::pool().await?;

    let profile: Option<(Uuid,)> = sqlx::query_as("SELECT user_id FROM brands WHERE user_id = $1")
        .bind(auth_user.id)
        .fetch_optional(&pool)
        .await?;
    if profile.is_none() {
        return Err(ApiError::not_found(
            "Brand profile not found. Complete your profile before posting briefs",
        ));
    }

    let brief: Brief = sqlx::query_as(
        r#"
        INSERT INTO briefs (id, brand_id, title, description, budget, deliverables, deadline, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, 'OPEN')
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(payload.title.trim())
    .bind(payload.description.trim())
    .bind(payload.budget)
    .bind(&payload.deliverables)
    .bind(payload.deadline)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(json!({ "brief": brief }))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_map_to_listing_scopes() {
        assert_eq!(scope_for(Role::Brand), BriefScope::Own);
        assert_eq!(scope_for(Role::Creator), BriefScope::OpenPool);
        assert_eq!(scope_for(Role::Coach), BriefScope::OpenPool);
        assert_eq!(scope_for(Role::Admin), BriefScope::All);
    }

    #[test]
    fn pagination_defaults_and_bounds() {
        let query = BriefListQuery {
            page: None,
            limit: None,
            status: None,
        };
        assert_eq!(page_params(&query), (1, DEFAULT_PAGE_SIZE, 0));

        let query = BriefListQuery {
            page: Some(3),
            limit: Some(20),
            status: None,
        };
        assert_eq!(page_params(&query), (3, 20, 40));

        // Out-of-range values are clamped, not rejected.
        let query = BriefListQuery {
            page: Some(0),
            limit: Some(10_000),
            status: None,
        };
        assert_eq!(page_params(&query), (1, MAX_PAGE_SIZE, 0));
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
    }
}
