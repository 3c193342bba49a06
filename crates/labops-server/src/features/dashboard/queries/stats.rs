//! Dashboard statistics query
//!
//! Aggregated fleet health: laboratory and computer counts broken down by
//! status, plus a per-laboratory utilization overview.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{ComputerStatus, LabStatus};

/// Laboratory counts by status
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabStats {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
}

/// Computer counts by status
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComputerStats {
    pub total: i64,
    pub online: i64,
    pub offline: i64,
    pub in_use: i64,
    pub idle: i64,
    pub maintenance: i64,
    pub locked: i64,
}

/// Per-laboratory utilization row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LabOverview {
    pub id: Uuid,
    pub name: String,
    pub status: LabStatus,
    pub capacity: i32,
    pub computer_count: i64,
    pub online_count: i64,
    pub offline_count: i64,
    pub in_use_count: i64,
}

/// Response for the dashboard stats query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStatsResponse {
    pub labs: LabStats,
    pub computers: ComputerStats,
    pub overview: Vec<LabOverview>,
}

/// Error type for the dashboard stats query
#[derive(Debug, thiserror::Error)]
pub enum DashboardStatsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handler computing the dashboard aggregates
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool) -> Result<DashboardStatsResponse, DashboardStatsError> {
    let lab_counts = sqlx::query_as::<_, (LabStatus, i64)>(
        "SELECT status, COUNT(*) FROM laboratories GROUP BY status",
    )
    .fetch_all(&pool)
    .await?;

    let mut labs = LabStats::default();
    for (status, count) in lab_counts {
        labs.total += count;
        match status {
            LabStatus::Active => labs.active = count,
            LabStatus::Inactive => labs.inactive = count,
        }
    }

    let computer_counts = sqlx::query_as::<_, (ComputerStatus, i64)>(
        "SELECT status, COUNT(*) FROM computers GROUP BY status",
    )
    .fetch_all(&pool)
    .await?;

    let mut computers = ComputerStats::default();
    for (status, count) in computer_counts {
        computers.total += count;
        match status {
            ComputerStatus::Online => computers.online = count,
            ComputerStatus::Offline => computers.offline = count,
            ComputerStatus::InUse => computers.in_use = count,
            ComputerStatus::Idle => computers.idle = count,
            ComputerStatus::Maintenance => computers.maintenance = count,
        }
    }

    computers.locked =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM computers WHERE is_locked")
            .fetch_one(&pool)
            .await?;

    let overview = sqlx::query_as::<_, LabOverview>(
        r#"
        SELECT l.id, l.name, l.status, l.capacity,
               COUNT(c.id) AS computer_count,
               COUNT(c.id) FILTER (WHERE c.status = 'ONLINE') AS online_count,
               COUNT(c.id) FILTER (WHERE c.status = 'OFFLINE') AS offline_count,
               COUNT(c.id) FILTER (WHERE c.status = 'IN_USE') AS in_use_count
        FROM laboratories l
        LEFT JOIN computers c ON c.laboratory_id = l.id
        GROUP BY l.id
        ORDER BY l.created_at DESC
        "#,
    )
    .fetch_all(&pool)
    .await?;

    tracing::debug!(
        lab_total = labs.total,
        computer_total = computers.total,
        "Dashboard stats computed"
    );

    Ok(DashboardStatsResponse {
        labs,
        computers,
        overview,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default_to_zero() {
        let stats = ComputerStats::default();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.in_use, 0);
        assert_eq!(stats.locked, 0);
    }

    #[test]
    fn test_response_serialization_shape() {
        let response = DashboardStatsResponse {
            labs: LabStats {
                total: 3,
                active: 2,
                inactive: 1,
            },
            computers: ComputerStats {
                total: 40,
                online: 10,
                offline: 20,
                in_use: 5,
                idle: 3,
                maintenance: 2,
                locked: 4,
            },
            overview: vec![],
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["labs"]["active"], 2);
        assert_eq!(value["computers"]["in_use"], 5);
        assert_eq!(value["computers"]["locked"], 4);
        assert!(value["overview"].as_array().unwrap().is_empty());
    }
}
