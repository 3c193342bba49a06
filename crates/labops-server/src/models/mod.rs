//! Shared domain types
//!
//! Status enums for laboratories and computers. Both map onto PostgreSQL
//! enum types created by the initial migration, and serialize in the
//! SCREAMING_SNAKE_CASE form the API exposes.

use serde::{Deserialize, Serialize};

/// Operational status of a laboratory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "lab_status")]
pub enum LabStatus {
    #[sqlx(rename = "ACTIVE")]
    Active,
    #[sqlx(rename = "INACTIVE")]
    Inactive,
}

impl Default for LabStatus {
    fn default() -> Self {
        LabStatus::Active
    }
}

impl std::fmt::Display for LabStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabStatus::Active => write!(f, "ACTIVE"),
            LabStatus::Inactive => write!(f, "INACTIVE"),
        }
    }
}

/// Live status of a single computer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "computer_status")]
pub enum ComputerStatus {
    #[sqlx(rename = "ONLINE")]
    Online,
    #[sqlx(rename = "OFFLINE")]
    Offline,
    #[sqlx(rename = "IN_USE")]
    InUse,
    #[sqlx(rename = "IDLE")]
    Idle,
    #[sqlx(rename = "MAINTENANCE")]
    Maintenance,
}

impl Default for ComputerStatus {
    fn default() -> Self {
        ComputerStatus::Offline
    }
}

impl std::fmt::Display for ComputerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComputerStatus::Online => write!(f, "ONLINE"),
            ComputerStatus::Offline => write!(f, "OFFLINE"),
            ComputerStatus::InUse => write!(f, "IN_USE"),
            ComputerStatus::Idle => write!(f, "IDLE"),
            ComputerStatus::Maintenance => write!(f, "MAINTENANCE"),
        }
    }
}
