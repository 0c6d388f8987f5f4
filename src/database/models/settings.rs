use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::FromRow;
use uuid::Uuid;

/// Single-row site configuration. The table is expected to hold at most
/// one row; readers fall back to [`SiteSettings::default_row`] when empty.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SiteSettings {
    pub id: Uuid,
    pub site_name: String,
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
    pub maintenance_mode: bool,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
}

impl SiteSettings {
    /// Defaults served when no settings row exists yet.
    pub fn default_row() -> Self {
        Self {
            id: Uuid::nil(),
            site_name: "Content Africa".to_string(),
            site_description: Some(
                "Connecting African content creators with global brands".to_string(),
            ),
            favicon_url: Some("/favicon.ico".to_string()),
            logo_url: Some("/logo.png".to_string()),
            copyright: Some("© 2024 Content Africa. All rights reserved.".to_string()),
            contact_email: Some("hello@contentafrica.com".to_string()),
            support_email: Some("support@contentafrica.com".to_string()),
            social_links: Some(json!({})),
            meta_title: Some("Content Africa - Connecting Creators with Brands".to_string()),
            meta_description: None,
            google_analytics_id: None,
            maintenance_mode: false,
            updated_at: Utc::now(),
            updated_by: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_row_has_maintenance_off() {
        let settings = SiteSettings::default_row();
        assert!(!settings.maintenance_mode);
        assert_eq!(settings.site_name, "Content Africa");
    }
}
