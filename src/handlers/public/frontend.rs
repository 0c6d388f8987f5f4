use std::collections::BTreeMap;

use axum::{extract::Query, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::database::{models::FrontendContent, DatabaseManager};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct FrontendQuery {
    pub section: Option<String>,
}

/// GET /api/frontend - active frontend content fragments, grouped
/// section -> key -> content for direct template consumption. Optional
/// `?section=` filter.
pub async fn get_contents(
    Query(query): Query<FrontendQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let contents: Vec<FrontendContent> = match &query.section {
        Some(section) => {
            sqlx::query_as(
                "SELECT * FROM frontend_contents WHERE is_active = TRUE AND section = $1 \
                 ORDER BY section ASC, sort_order ASC",
            )
            .bind(section)
            .fetch_all(&pool)
            .await?
        }
        None => {
            sqlx::query_as(
                "SELECT * FROM frontend_contents WHERE is_active = TRUE \
                 ORDER BY section ASC, sort_order ASC",
            )
            .fetch_all(&pool)
            .await?
        }
    };

    Ok(Json(json!({ "contents": group_by_section(contents) })))
}

/// Fold a flat fragment list into section -> key -> content maps. Input
/// order is preserved within a section only through later keys winning,
/// which matches the unique (section, key) constraint.
fn group_by_section(contents: Vec<FrontendContent>) -> BTreeMap<String, BTreeMap<String, String>> {
    let mut grouped: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    for item in contents {
        grouped
            .entry(item.section)
            .or_default()
            .insert(item.key, item.content);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn fragment(section: &str, key: &str, content: &str) -> FrontendContent {
        FrontendContent {
            id: Uuid::new_v4(),
            section: section.to_string(),
            key: key.to_string(),
            content: content.to_string(),
            is_active: true,
            sort_order: 0,
            updated_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn groups_fragments_by_section_and_key() {
        let grouped = group_by_section(vec![
            fragment("hero", "title", "Hire creators"),
            fragment("hero", "subtitle", "Across Africa"),
            fragment("footer", "copyright", "© 2026"),
        ]);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["hero"]["title"], "Hire creators");
        assert_eq!(grouped["hero"]["subtitle"], "Across Africa");
        assert_eq!(grouped["footer"]["copyright"], "© 2026");
    }

    #[test]
    fn empty_input_groups_to_empty_map() {
        assert!(group_by_section(Vec::new()).is_empty());
    }
}
