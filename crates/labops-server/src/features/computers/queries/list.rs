//! List computers query
//!
//! Supports optional filtering by laboratory and status. Results are grouped
//! by laboratory and ordered by seat number within each one.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::features::computers::types::ComputerListItem;
use crate::models::ComputerStatus;

/// Query parameters for listing computers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListComputersQuery {
    pub lab_id: Option<Uuid>,
    pub status: Option<ComputerStatus>,
}

/// Response for the list computers query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListComputersResponse {
    pub computers: Vec<ComputerListItem>,
    pub total: i64,
}

/// Error type for the list computers query
#[derive(Debug, thiserror::Error)]
pub enum ListComputersError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handler returning computers, optionally scoped to a lab or a status
#[tracing::instrument(skip(pool), fields(lab_id = ?query.lab_id, status = ?query.status))]
pub async fn handle(
    pool: PgPool,
    query: ListComputersQuery,
) -> Result<ListComputersResponse, ListComputersError> {
    let computers = sqlx::query_as::<_, ComputerListItem>(
        r#"
        SELECT c.id, c.laboratory_id, l.name AS laboratory_name,
               l.location AS laboratory_location,
               c.name, c.seat_number, c.status, c.is_locked,
               c.ip_address, c.mac_address, c.updated_at
        FROM computers c
        JOIN laboratories l ON l.id = c.laboratory_id
        WHERE ($1::uuid IS NULL OR c.laboratory_id = $1)
          AND ($2::computer_status IS NULL OR c.status = $2)
        ORDER BY c.laboratory_id, c.seat_number
        "#,
    )
    .bind(query.lab_id)
    .bind(query.status)
    .fetch_all(&pool)
    .await?;

    let total = computers.len() as i64;

    tracing::debug!(total, "Computers listed");

    Ok(ListComputersResponse { computers, total })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_deserializes_from_params() {
        let query: ListComputersQuery =
            serde_json::from_value(serde_json::json!({"status": "OFFLINE"})).unwrap();
        assert_eq!(query.status, Some(ComputerStatus::Offline));
        assert!(query.lab_id.is_none());
    }

    #[test]
    fn test_query_defaults_to_no_filters() {
        let query = ListComputersQuery::default();
        assert!(query.lab_id.is_none());
        assert!(query.status.is_none());
    }
}
