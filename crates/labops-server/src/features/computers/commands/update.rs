//! Update computer command
//!
//! Partial update of a single machine. Seat numbers and names stay unique
//! within a laboratory, so a clashing change surfaces as a conflict rather
//! than a server error.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::features::computers::types::ComputerRecord;
use crate::features::shared::validation::{
    merge_optional_text, validate_name, validate_positive, NameValidationError,
};
use crate::models::ComputerStatus;

/// Command to update a computer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateComputerCommand {
    #[serde(skip)]
    pub id: Uuid,
    pub name: Option<String>,
    pub seat_number: Option<i32>,
    pub status: Option<ComputerStatus>,
    pub is_locked: Option<bool>,
    pub ip_address: Option<String>,
    pub mac_address: Option<String>,
}

impl UpdateComputerCommand {
    /// Validates the command before execution
    pub fn validate(&self) -> Result<(), UpdateComputerError> {
        if self.name.is_none()
            && self.seat_number.is_none()
            && self.status.is_none()
            && self.is_locked.is_none()
            && self.ip_address.is_none()
            && self.mac_address.is_none()
        {
            return Err(UpdateComputerError::NoFieldsToUpdate);
        }

        if let Some(name) = &self.name {
            validate_name(name, 100)?;
        }

        if let Some(seat) = self.seat_number {
            validate_positive(seat as i64, "seat_number")
                .map_err(|_| UpdateComputerError::SeatNumberInvalid)?;
        }

        Ok(())
    }
}

/// Response after updating a computer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateComputerResponse {
    #[serde(flatten)]
    pub computer: ComputerRecord,
}

/// Error type for the update computer command
#[derive(Debug, thiserror::Error)]
pub enum UpdateComputerError {
    #[error("No fields provided to update")]
    NoFieldsToUpdate,

    #[error("Computer name validation failed: {0}")]
    Name(#[from] NameValidationError),

    #[error("Seat number must be at least 1")]
    SeatNumberInvalid,

    #[error("Computer '{0}' not found")]
    NotFound(Uuid),

    #[error("Seat number or name already taken in this laboratory")]
    Duplicate,

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for UpdateComputerError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::Duplicate,
            _ => Self::Database(err),
        }
    }
}

/// Handler for updating a computer
#[tracing::instrument(skip(pool, command), fields(computer_id = %command.id))]
pub async fn handle(
    pool: PgPool,
    command: UpdateComputerCommand,
) -> Result<UpdateComputerResponse, UpdateComputerError> {
    command.validate()?;

    let mut tx = pool.begin().await?;

    let existing = sqlx::query_as::<_, ComputerRecord>(
        r#"
        SELECT id, laboratory_id, name, seat_number, status, is_locked,
               ip_address, mac_address, created_at, updated_at
        FROM computers
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(command.id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(UpdateComputerError::NotFound(command.id))?;

    let name = match &command.name {
        Some(name) => name.trim().to_string(),
        None => existing.name,
    };
    let seat_number = command.seat_number.unwrap_or(existing.seat_number);
    let status = command.status.unwrap_or(existing.status);
    let is_locked = command.is_locked.unwrap_or(existing.is_locked);
    // A provided blank string clears the column; an absent field keeps it
    let ip_address = merge_optional_text(command.ip_address.as_deref(), existing.ip_address);
    let mac_address = merge_optional_text(command.mac_address.as_deref(), existing.mac_address);

    let computer = sqlx::query_as::<_, ComputerRecord>(
        r#"
        UPDATE computers
        SET name = $2, seat_number = $3, status = $4, is_locked = $5,
            ip_address = $6, mac_address = $7, updated_at = NOW()
        WHERE id = $1
        RETURNING id, laboratory_id, name, seat_number, status, is_locked,
                  ip_address, mac_address, created_at, updated_at
        "#,
    )
    .bind(command.id)
    .bind(&name)
    .bind(seat_number)
    .bind(status)
    .bind(is_locked)
    .bind(&ip_address)
    .bind(&mac_address)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        computer_id = %computer.id,
        status = %computer.status,
        is_locked = computer.is_locked,
        "Computer updated"
    );

    Ok(UpdateComputerResponse { computer })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_update_rejected() {
        let command = UpdateComputerCommand::default();
        assert!(matches!(
            command.validate(),
            Err(UpdateComputerError::NoFieldsToUpdate)
        ));
    }

    #[test]
    fn test_seat_number_must_be_positive() {
        let command = UpdateComputerCommand {
            seat_number: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            command.validate(),
            Err(UpdateComputerError::SeatNumberInvalid)
        ));
    }

    #[test]
    fn test_status_only_update_is_valid() {
        let command = UpdateComputerCommand {
            status: Some(ComputerStatus::Maintenance),
            ..Default::default()
        };
        assert!(command.validate().is_ok());
    }

    #[test]
    fn test_body_deserializes_without_id() {
        let command: UpdateComputerCommand = serde_json::from_value(serde_json::json!({
            "status": "ONLINE",
            "is_locked": true
        }))
        .unwrap();
        assert_eq!(command.id, Uuid::nil());
        assert_eq!(command.status, Some(ComputerStatus::Online));
        assert_eq!(command.is_locked, Some(true));
    }

    #[test]
    fn test_blank_network_fields_clear_stored_values() {
        // Blank ip/mac clears the column, absent keeps the stored value
        assert_eq!(
            merge_optional_text(Some(""), Some("10.0.0.12".to_string())),
            None
        );
        assert_eq!(
            merge_optional_text(None, Some("AA:BB:CC:DD:EE:01".to_string())),
            Some("AA:BB:CC:DD:EE:01".to_string())
        );
        assert_eq!(
            merge_optional_text(Some(" 10.0.0.13 "), None),
            Some("10.0.0.13".to_string())
        );
    }

    #[test]
    fn test_blank_name_rejected() {
        let command = UpdateComputerCommand {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            command.validate(),
            Err(UpdateComputerError::Name(_))
        ));
    }
}
