//! Shared row types for the computers feature

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::ComputerStatus;

/// A full computer row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ComputerRecord {
    pub id: Uuid,
    pub laboratory_id: Uuid,
    pub name: String,
    pub seat_number: i32,
    pub status: ComputerStatus,
    pub is_locked: bool,
    pub ip_address: Option<String>,
    pub mac_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A computer row joined with its laboratory's display fields
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ComputerListItem {
    pub id: Uuid,
    pub laboratory_id: Uuid,
    pub laboratory_name: String,
    pub laboratory_location: Option<String>,
    pub name: String,
    pub seat_number: i32,
    pub status: ComputerStatus,
    pub is_locked: bool,
    pub ip_address: Option<String>,
    pub mac_address: Option<String>,
    pub updated_at: DateTime<Utc>,
}
