use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Creator profile attached to a CREATOR account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Creator {
    pub user_id: Uuid,
    pub display_name: String,
    pub bio: Option<String>,
    pub skills: Option<Value>,
    pub social_links: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Brand profile attached to a BRAND account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Brand {
    pub user_id: Uuid,
    pub company_name: String,
    pub company_website: Option<String>,
    pub billing_info: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
