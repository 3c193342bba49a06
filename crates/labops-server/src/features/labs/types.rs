//! Row records shared by the labs commands and queries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ComputerStatus, LabStatus};

/// A laboratory row as stored
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LabRecord {
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub room_number: Option<String>,
    pub capacity: i32,
    pub status: LabStatus,
    pub assigned_instructor: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A computer row as returned inside laboratory responses
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ComputerSummary {
    pub id: Uuid,
    pub name: String,
    pub seat_number: i32,
    pub status: ComputerStatus,
    pub is_locked: bool,
    pub ip_address: Option<String>,
    pub mac_address: Option<String>,
}

/// Fetch a lab's computers ordered by seat number
pub(crate) async fn fetch_computers_by_seat<'e, E>(
    executor: E,
    lab_id: Uuid,
) -> Result<Vec<ComputerSummary>, sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query_as::<_, ComputerSummary>(
        r#"
        SELECT id, name, seat_number, status, is_locked, ip_address, mac_address
        FROM computers
        WHERE laboratory_id = $1
        ORDER BY seat_number ASC
        "#,
    )
    .bind(lab_id)
    .fetch_all(executor)
    .await
}
