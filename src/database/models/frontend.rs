use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One editable frontend content fragment, addressed by (section, key).
/// The public site reads active fragments grouped by section; the admin
/// panel upserts them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FrontendContent {
    pub id: Uuid,
    pub section: String,
    pub key: String,
    pub content: String,
    pub is_active: bool,
    pub sort_order: i32,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
