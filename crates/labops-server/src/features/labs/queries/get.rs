//! Get laboratory query
//!
//! Single laboratory plus its machines, ordered by seat number so the
//! response mirrors the seat layout the provisioning functions created.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::features::labs::types::{fetch_computers_by_seat, ComputerSummary, LabRecord};

/// Query for a single laboratory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetLabQuery {
    pub id: Uuid,
}

/// Response for the get lab query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetLabResponse {
    #[serde(flatten)]
    pub lab: LabRecord,
    pub computers: Vec<ComputerSummary>,
    pub computer_count: i64,
}

/// Error type for the get lab query
#[derive(Debug, thiserror::Error)]
pub enum GetLabError {
    #[error("Laboratory '{0}' not found")]
    NotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handler returning one laboratory with its machines
#[tracing::instrument(skip(pool), fields(lab_id = %query.id))]
pub async fn handle(pool: PgPool, query: GetLabQuery) -> Result<GetLabResponse, GetLabError> {
    let lab = sqlx::query_as::<_, LabRecord>(
        r#"
        SELECT id, name, location, room_number, capacity, status, assigned_instructor,
               created_at, updated_at
        FROM laboratories
        WHERE id = $1
        "#,
    )
    .bind(query.id)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetLabError::NotFound(query.id))?;

    let computers = fetch_computers_by_seat(&pool, lab.id).await?;

    Ok(GetLabResponse {
        lab,
        computer_count: computers.len() as i64,
        computers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error_mentions_id() {
        let id = Uuid::new_v4();
        let err = GetLabError::NotFound(id);
        assert!(err.to_string().contains(&id.to_string()));
    }
}
