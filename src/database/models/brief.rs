use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A brand's campaign brief, posted from the dashboard for creators to
/// pick up. Status is free text in the store; new briefs start OPEN.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Brief {
    pub id: Uuid,
    pub brand_id: Uuid,
    pub title: String,
    pub description: String,
    pub budget: Option<f64>,
    pub deliverables: Option<Value>,
    pub deadline: Option<DateTime<Utc>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
