//! Update laboratory command
//!
//! Partial update of a laboratory plus capacity reconciliation. When the
//! command carries a `computer_count`, the handler compares it against the
//! lab's existing machines inside a single transaction (the lab row is
//! locked FOR UPDATE so concurrent capacity changes cannot both read the
//! same count and append overlapping seats):
//!
//! - equal: nothing to do
//! - larger: the delta is generated and inserted, seat numbering continuing
//!   after the current machines, names taken from the lab's name as of this
//!   update
//! - smaller: no machines are touched; the response carries a
//!   `COMPUTER_COUNT_REDUCTION` warning and the declared capacity still
//!   moves to the requested value

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::features::labs::provisioning::{
    self, ProvisionError, ReconcileOutcome, COMPUTER_COUNT_REDUCTION,
};
use crate::features::labs::types::{fetch_computers_by_seat, ComputerSummary, LabRecord};
use crate::features::shared::validation::{
    merge_optional_text, validate_name, NameValidationError,
};
use crate::models::LabStatus;

/// Command to update an existing laboratory
///
/// `id` comes from the URL path. Fields left `None` are not changed;
/// optional text fields sent as a blank string are cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLabCommand {
    #[serde(skip)]
    pub id: Uuid,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LabStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_instructor: Option<String>,

    /// Desired machine count; triggers reconciliation when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computer_count: Option<i64>,
}

/// Advisory payload returned when a capacity change shrinks a lab
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityWarning {
    #[serde(rename = "type")]
    pub warning_type: String,
    pub current_count: i64,
    pub new_count: i64,
    pub message: String,
}

/// Response from updating a laboratory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLabResponse {
    #[serde(flatten)]
    pub lab: LabRecord,
    pub computers: Vec<ComputerSummary>,
    pub computer_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<CapacityWarning>,
}

/// Errors that can occur when updating a laboratory
#[derive(Debug, thiserror::Error)]
pub enum UpdateLabError {
    #[error("At least one field must be provided for update")]
    NoFieldsToUpdate,

    #[error("Lab name validation failed: {0}")]
    Name(#[from] NameValidationError),

    #[error("Valid capacity is required")]
    CapacityInvalid,

    #[error(transparent)]
    Provision(#[from] ProvisionError),

    #[error("Laboratory '{0}' not found")]
    NotFound(Uuid),

    #[error(
        "New computers would reuse seat numbers that are already taken; \
         renumber or remove the clashing machines first"
    )]
    SeatConflict,

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for UpdateLabError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::SeatConflict,
            _ => Self::Database(err),
        }
    }
}

impl UpdateLabCommand {
    /// Validates the command parameters
    ///
    /// Runs before the transaction opens; a request with an out-of-range
    /// computer count is rejected with no mutation at all.
    pub fn validate(&self) -> Result<(), UpdateLabError> {
        if self.name.is_none()
            && self.location.is_none()
            && self.room_number.is_none()
            && self.capacity.is_none()
            && self.status.is_none()
            && self.assigned_instructor.is_none()
            && self.computer_count.is_none()
        {
            return Err(UpdateLabError::NoFieldsToUpdate);
        }

        if let Some(ref name) = self.name {
            validate_name(name, 256)?;
        }

        if let Some(capacity) = self.capacity {
            if capacity < 1 {
                return Err(UpdateLabError::CapacityInvalid);
            }
        }

        if let Some(count) = self.computer_count {
            provisioning::validate_computer_count(count)?;
        }

        Ok(())
    }
}

/// Handler for updating laboratories
#[tracing::instrument(
    skip(pool, command),
    fields(lab_id = %command.id, computer_count = ?command.computer_count)
)]
pub async fn handle(
    pool: PgPool,
    command: UpdateLabCommand,
) -> Result<UpdateLabResponse, UpdateLabError> {
    command.validate()?;

    let mut tx = pool.begin().await?;

    // Lock the row for the whole read-reconcile-write sequence
    let existing = sqlx::query_as::<_, LabRecord>(
        r#"
        SELECT id, name, location, room_number, capacity, status, assigned_instructor,
               created_at, updated_at
        FROM laboratories
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(command.id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(UpdateLabError::NotFound(command.id))?;

    let new_name = command
        .name
        .as_deref()
        .map(str::trim)
        .map(str::to_string)
        .unwrap_or_else(|| existing.name.clone());
    // A provided blank string clears the column; an absent field keeps it
    let new_location =
        merge_optional_text(command.location.as_deref(), existing.location.clone());
    let new_room_number =
        merge_optional_text(command.room_number.as_deref(), existing.room_number.clone());
    let new_status = command.status.unwrap_or(existing.status);
    let new_instructor = merge_optional_text(
        command.assigned_instructor.as_deref(),
        existing.assigned_instructor.clone(),
    );

    // The declared capacity follows an explicit capacity field first, and
    // otherwise the requested machine count (the nominal seat count).
    let new_capacity = match (command.capacity, command.computer_count) {
        (Some(capacity), _) => capacity,
        (None, Some(requested)) => requested as i32,
        (None, None) => existing.capacity,
    };

    let mut warning = None;

    if let Some(requested) = command.computer_count {
        let current: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM computers WHERE laboratory_id = $1")
                .bind(command.id)
                .fetch_one(&mut *tx)
                .await?;

        // Machines added now take their names from the name this update sets
        match provisioning::reconcile(current, requested, &new_name)? {
            ReconcileOutcome::NoChange => {},
            ReconcileOutcome::Grow { drafts } => {
                tracing::info!(
                    lab_id = %command.id,
                    added = drafts.len(),
                    "Growing laboratory"
                );
                super::create::insert_drafts(&mut tx, command.id, &drafts).await?;
            },
            ReconcileOutcome::ShrinkWarning {
                current_count,
                new_count,
                message,
            } => {
                tracing::warn!(
                    lab_id = %command.id,
                    current_count,
                    new_count,
                    "Capacity reduced below machine count; keeping existing computers"
                );
                warning = Some(CapacityWarning {
                    warning_type: COMPUTER_COUNT_REDUCTION.to_string(),
                    current_count,
                    new_count,
                    message,
                });
            },
        }
    }

    let lab = sqlx::query_as::<_, LabRecord>(
        r#"
        UPDATE laboratories
        SET name = $2, location = $3, room_number = $4, capacity = $5, status = $6,
            assigned_instructor = $7, updated_at = NOW()
        WHERE id = $1
        RETURNING id, name, location, room_number, capacity, status, assigned_instructor,
                  created_at, updated_at
        "#,
    )
    .bind(command.id)
    .bind(&new_name)
    .bind(&new_location)
    .bind(&new_room_number)
    .bind(new_capacity)
    .bind(new_status)
    .bind(&new_instructor)
    .fetch_one(&mut *tx)
    .await?;

    let computers = fetch_computers_by_seat(&mut *tx, lab.id).await?;

    tx.commit().await?;

    tracing::info!(
        lab_id = %lab.id,
        lab_name = %lab.name,
        computers = computers.len(),
        "Laboratory updated"
    );

    Ok(UpdateLabResponse {
        lab,
        computer_count: computers.len() as i64,
        computers,
        warning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_command() -> UpdateLabCommand {
        UpdateLabCommand {
            id: Uuid::new_v4(),
            name: None,
            location: None,
            room_number: None,
            capacity: None,
            status: None,
            assigned_instructor: None,
            computer_count: None,
        }
    }

    #[test]
    fn test_validation_requires_some_field() {
        assert!(matches!(
            empty_command().validate(),
            Err(UpdateLabError::NoFieldsToUpdate)
        ));
    }

    #[test]
    fn test_validation_accepts_single_field() {
        let cmd = UpdateLabCommand {
            name: Some("Renamed Lab".to_string()),
            ..empty_command()
        };
        assert!(cmd.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_blank_name() {
        let cmd = UpdateLabCommand {
            name: Some("  ".to_string()),
            ..empty_command()
        };
        assert!(matches!(cmd.validate(), Err(UpdateLabError::Name(_))));
    }

    #[test]
    fn test_validation_rejects_zero_capacity() {
        let cmd = UpdateLabCommand {
            capacity: Some(0),
            ..empty_command()
        };
        assert!(matches!(cmd.validate(), Err(UpdateLabError::CapacityInvalid)));
    }

    #[test]
    fn test_validation_rejects_oversized_computer_count() {
        let cmd = UpdateLabCommand {
            computer_count: Some(500),
            ..empty_command()
        };
        assert!(matches!(
            cmd.validate(),
            Err(UpdateLabError::Provision(ProvisionError::InvalidCapacity {
                requested: 500
            }))
        ));
    }

    #[test]
    fn test_validation_accepts_bounded_computer_count() {
        for count in [1, 100, 200] {
            let cmd = UpdateLabCommand {
                computer_count: Some(count),
                ..empty_command()
            };
            assert!(cmd.validate().is_ok(), "count {} should pass", count);
        }
    }

    #[test]
    fn test_warning_serializes_with_type_field() {
        let warning = CapacityWarning {
            warning_type: COMPUTER_COUNT_REDUCTION.to_string(),
            current_count: 8,
            new_count: 3,
            message: "Computer count reduced from 8 to 3.".to_string(),
        };
        let value = serde_json::to_value(&warning).unwrap();
        assert_eq!(value["type"], "COMPUTER_COUNT_REDUCTION");
        assert_eq!(value["current_count"], 8);
        assert_eq!(value["new_count"], 3);
    }

    #[test]
    fn test_body_deserializes_without_id() {
        let cmd: UpdateLabCommand =
            serde_json::from_str(r#"{"computer_count": 8, "name": "Lab B"}"#).unwrap();
        assert_eq!(cmd.computer_count, Some(8));
        assert_eq!(cmd.name.as_deref(), Some("Lab B"));
        assert_eq!(cmd.id, Uuid::nil());
    }

    #[test]
    fn test_blank_optional_fields_clear_stored_values() {
        // Field provided as blank clears; absent field keeps the stored value
        assert_eq!(
            merge_optional_text(Some("  "), Some("Building 2".to_string())),
            None
        );
        assert_eq!(
            merge_optional_text(None, Some("Dr. Reyes".to_string())),
            Some("Dr. Reyes".to_string())
        );
    }

    #[test]
    fn test_non_unique_database_errors_stay_database() {
        let err = UpdateLabError::from(sqlx::Error::PoolClosed);
        assert!(matches!(err, UpdateLabError::Database(_)));
    }

    #[test]
    fn test_seat_conflict_message_is_actionable() {
        let err = UpdateLabError::SeatConflict;
        assert!(err.to_string().contains("seat numbers"));
        assert!(err.to_string().contains("renumber or remove"));
    }
}
