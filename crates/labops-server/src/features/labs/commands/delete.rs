//! Delete laboratory command
//!
//! Deletes the laboratory row; the machine rows go with it through the
//! schema's ON DELETE CASCADE. The response reports how many machines were
//! removed along with the lab.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Command to delete a laboratory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteLabCommand {
    pub id: Uuid,
}

/// Response from deleting a laboratory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteLabResponse {
    pub id: Uuid,
    pub name: String,
    pub computers_removed: i64,
}

/// Errors that can occur when deleting a laboratory
#[derive(Debug, thiserror::Error)]
pub enum DeleteLabError {
    #[error("Laboratory '{0}' not found")]
    NotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handler for deleting laboratories
#[tracing::instrument(skip(pool), fields(lab_id = %command.id))]
pub async fn handle(
    pool: PgPool,
    command: DeleteLabCommand,
) -> Result<DeleteLabResponse, DeleteLabError> {
    let mut tx = pool.begin().await?;

    let lab: Option<(Uuid, String)> =
        sqlx::query_as("SELECT id, name FROM laboratories WHERE id = $1 FOR UPDATE")
            .bind(command.id)
            .fetch_optional(&mut *tx)
            .await?;

    let (id, name) = lab.ok_or(DeleteLabError::NotFound(command.id))?;

    let computers_removed: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM computers WHERE laboratory_id = $1")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

    sqlx::query("DELETE FROM laboratories WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(
        lab_id = %id,
        lab_name = %name,
        computers_removed,
        "Laboratory deleted"
    );

    Ok(DeleteLabResponse {
        id,
        name,
        computers_removed,
    })
}
