//! Get computer query

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::features::computers::types::ComputerListItem;

/// Query for a single computer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetComputerQuery {
    pub id: Uuid,
}

/// Response for the get computer query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetComputerResponse {
    #[serde(flatten)]
    pub computer: ComputerListItem,
}

/// Error type for the get computer query
#[derive(Debug, thiserror::Error)]
pub enum GetComputerError {
    #[error("Computer '{0}' not found")]
    NotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handler returning one computer with its laboratory's display fields
#[tracing::instrument(skip(pool), fields(computer_id = %query.id))]
pub async fn handle(
    pool: PgPool,
    query: GetComputerQuery,
) -> Result<GetComputerResponse, GetComputerError> {
    let computer = sqlx::query_as::<_, ComputerListItem>(
        r#"
        SELECT c.id, c.laboratory_id, l.name AS laboratory_name,
               l.location AS laboratory_location,
               c.name, c.seat_number, c.status, c.is_locked,
               c.ip_address, c.mac_address, c.updated_at
        FROM computers c
        JOIN laboratories l ON l.id = c.laboratory_id
        WHERE c.id = $1
        "#,
    )
    .bind(query.id)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetComputerError::NotFound(query.id))?;

    Ok(GetComputerResponse { computer })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error_mentions_id() {
        let id = Uuid::new_v4();
        let err = GetComputerError::NotFound(id);
        assert!(err.to_string().contains(&id.to_string()));
    }
}
