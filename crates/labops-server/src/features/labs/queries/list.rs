//! List laboratories query

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::LabStatus;

/// A laboratory list entry with its machine count
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LabListItem {
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub room_number: Option<String>,
    pub capacity: i32,
    pub status: LabStatus,
    pub assigned_instructor: Option<String>,
    pub created_at: DateTime<Utc>,
    pub computer_count: i64,
}

/// Response for the list labs query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListLabsResponse {
    pub labs: Vec<LabListItem>,
    pub total: i64,
}

/// Error type for the list labs query
#[derive(Debug, thiserror::Error)]
pub enum ListLabsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handler returning every laboratory, newest first
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool) -> Result<ListLabsResponse, ListLabsError> {
    let labs = sqlx::query_as::<_, LabListItem>(
        r#"
        SELECT l.id, l.name, l.location, l.room_number, l.capacity, l.status,
               l.assigned_instructor, l.created_at,
               COUNT(c.id) AS computer_count
        FROM laboratories l
        LEFT JOIN computers c ON c.laboratory_id = l.id
        GROUP BY l.id
        ORDER BY l.created_at DESC
        "#,
    )
    .fetch_all(&pool)
    .await?;

    let total = labs.len() as i64;

    tracing::debug!(total, "Laboratories listed");

    Ok(ListLabsResponse { labs, total })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_item_serialization() {
        let item = LabListItem {
            id: Uuid::nil(),
            name: "Computer Lab A".to_string(),
            location: Some("Building 2".to_string()),
            room_number: Some("204".to_string()),
            capacity: 40,
            status: LabStatus::Active,
            assigned_instructor: None,
            created_at: Utc::now(),
            computer_count: 12,
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["computer_count"], 12);
        assert_eq!(value["status"], "ACTIVE");
    }
}
