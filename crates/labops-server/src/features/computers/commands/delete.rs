//! Delete computer command
//!
//! A machine that is currently in use cannot be removed; the caller must
//! wait for the session to end or force the status first.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::ComputerStatus;

/// Command to delete a computer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteComputerCommand {
    pub id: Uuid,
}

/// Response after deleting a computer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteComputerResponse {
    pub id: Uuid,
    pub name: String,
    pub laboratory_id: Uuid,
}

/// Error type for the delete computer command
#[derive(Debug, thiserror::Error)]
pub enum DeleteComputerError {
    #[error("Computer '{0}' not found")]
    NotFound(Uuid),

    #[error("Cannot delete computer that is currently in use")]
    InUse,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handler for deleting a computer
#[tracing::instrument(skip(pool), fields(computer_id = %command.id))]
pub async fn handle(
    pool: PgPool,
    command: DeleteComputerCommand,
) -> Result<DeleteComputerResponse, DeleteComputerError> {
    let mut tx = pool.begin().await?;

    let (id, name, laboratory_id, status) =
        sqlx::query_as::<_, (Uuid, String, Uuid, ComputerStatus)>(
            r#"
            SELECT id, name, laboratory_id, status
            FROM computers
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(command.id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(DeleteComputerError::NotFound(command.id))?;

    if status == ComputerStatus::InUse {
        return Err(DeleteComputerError::InUse);
    }

    sqlx::query("DELETE FROM computers WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(computer_id = %id, name = %name, "Computer deleted");

    Ok(DeleteComputerResponse {
        id,
        name,
        laboratory_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_use_error_message() {
        let err = DeleteComputerError::InUse;
        assert_eq!(
            err.to_string(),
            "Cannot delete computer that is currently in use"
        );
    }

    #[test]
    fn test_not_found_error_mentions_id() {
        let id = Uuid::new_v4();
        let err = DeleteComputerError::NotFound(id);
        assert!(err.to_string().contains(&id.to_string()));
    }
}
