//! Create laboratory command
//!
//! Inserts the laboratory row and, when an initial `computer_count` is
//! supplied, bulk-creates its machines in the same transaction. Seats start
//! at 1 and the machine names come from the lab's name via the provisioning
//! functions.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::features::labs::provisioning::{self, ProvisionError};
use crate::features::labs::types::{ComputerSummary, LabRecord};
use crate::features::shared::validation::{validate_name, NameValidationError};
use crate::models::LabStatus;

/// Command to create a new laboratory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLabCommand {
    /// Display name, also the source of machine-name prefixes
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Defaults to the lab name when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,

    /// Intended seat count; independent of how many machines exist
    pub capacity: i32,

    #[serde(default)]
    pub status: LabStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_instructor: Option<String>,

    /// Number of machines to provision immediately (1..=200)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computer_count: Option<i64>,
}

/// Response from creating a laboratory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLabResponse {
    #[serde(flatten)]
    pub lab: LabRecord,
    pub computers: Vec<ComputerSummary>,
    pub computer_count: i64,
}

/// Errors that can occur when creating a laboratory
#[derive(Debug, thiserror::Error)]
pub enum CreateLabError {
    #[error("Lab name validation failed: {0}")]
    Name(#[from] NameValidationError),

    #[error("Valid capacity is required")]
    CapacityInvalid,

    #[error(transparent)]
    Provision(#[from] ProvisionError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl CreateLabCommand {
    /// Validates the command parameters
    ///
    /// All checks run before any mutation: an invalid computer count must
    /// reject the whole request.
    pub fn validate(&self) -> Result<(), CreateLabError> {
        validate_name(&self.name, 256)?;

        if self.capacity < 1 {
            return Err(CreateLabError::CapacityInvalid);
        }

        if let Some(count) = self.computer_count {
            provisioning::validate_computer_count(count)?;
        }

        Ok(())
    }
}

/// Handler for creating laboratories
#[tracing::instrument(
    skip(pool, command),
    fields(name = %command.name, computer_count = ?command.computer_count)
)]
pub async fn handle(
    pool: PgPool,
    command: CreateLabCommand,
) -> Result<CreateLabResponse, CreateLabError> {
    command.validate()?;

    let name = command.name.trim().to_string();
    let room_number = command
        .room_number
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| name.clone());

    // Generate drafts up front so a bad name fails before the insert
    let drafts = match command.computer_count {
        Some(count) => provisioning::generate_computers(&name, 1, count)?,
        None => Vec::new(),
    };

    let mut tx = pool.begin().await?;

    let lab = sqlx::query_as::<_, LabRecord>(
        r#"
        INSERT INTO laboratories (name, location, room_number, capacity, status, assigned_instructor)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, name, location, room_number, capacity, status, assigned_instructor,
                  created_at, updated_at
        "#,
    )
    .bind(&name)
    .bind(command.location.as_deref().map(str::trim).filter(|s| !s.is_empty()))
    .bind(&room_number)
    .bind(command.capacity)
    .bind(command.status)
    .bind(&command.assigned_instructor)
    .fetch_one(&mut *tx)
    .await?;

    insert_drafts(&mut tx, lab.id, &drafts).await?;

    let computers = super::super::types::fetch_computers_by_seat(&mut *tx, lab.id).await?;

    tx.commit().await?;

    tracing::info!(
        lab_id = %lab.id,
        lab_name = %lab.name,
        computers = computers.len(),
        "Laboratory created"
    );

    Ok(CreateLabResponse {
        lab,
        computer_count: computers.len() as i64,
        computers,
    })
}

/// Insert generated machine rows for a lab
pub(crate) async fn insert_drafts(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    lab_id: Uuid,
    drafts: &[provisioning::ComputerDraft],
) -> Result<(), sqlx::Error> {
    for draft in drafts {
        sqlx::query(
            r#"
            INSERT INTO computers (laboratory_id, name, seat_number, status, is_locked)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(lab_id)
        .bind(&draft.name)
        .bind(draft.seat_number)
        .bind(draft.status)
        .bind(draft.is_locked)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_command() -> CreateLabCommand {
        CreateLabCommand {
            name: "EdTech Laboratory".to_string(),
            location: None,
            room_number: None,
            capacity: 30,
            status: LabStatus::Active,
            assigned_instructor: None,
            computer_count: None,
        }
    }

    #[test]
    fn test_validation_success() {
        assert!(base_command().validate().is_ok());
    }

    #[test]
    fn test_validation_success_with_computer_count() {
        let cmd = CreateLabCommand {
            computer_count: Some(5),
            ..base_command()
        };
        assert!(cmd.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_name() {
        let cmd = CreateLabCommand {
            name: "   ".to_string(),
            ..base_command()
        };
        assert!(matches!(cmd.validate(), Err(CreateLabError::Name(_))));
    }

    #[test]
    fn test_validation_zero_capacity() {
        let cmd = CreateLabCommand {
            capacity: 0,
            ..base_command()
        };
        assert!(matches!(cmd.validate(), Err(CreateLabError::CapacityInvalid)));
    }

    #[test]
    fn test_validation_computer_count_bounds() {
        for count in [0, -1, 201, 500] {
            let cmd = CreateLabCommand {
                computer_count: Some(count),
                ..base_command()
            };
            assert!(
                matches!(cmd.validate(), Err(CreateLabError::Provision(_))),
                "count {} should be rejected",
                count
            );
        }
        let cmd = CreateLabCommand {
            computer_count: Some(200),
            ..base_command()
        };
        assert!(cmd.validate().is_ok());
    }

    #[test]
    fn test_status_defaults_to_active_in_json() {
        let cmd: CreateLabCommand =
            serde_json::from_str(r#"{"name": "Sandbox", "capacity": 10}"#).unwrap();
        assert_eq!(cmd.status, LabStatus::Active);
        assert!(cmd.computer_count.is_none());
    }
}
