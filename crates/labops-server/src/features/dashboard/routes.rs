//! Dashboard API routes
//!
//! - `GET /api/v1/dashboard/stats` - Fleet-wide statistics

use crate::api::response::ApiResponse;
use crate::error::{AppError, AppResult};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use sqlx::PgPool;

use super::queries::DashboardStatsError;

/// Creates the dashboard router
pub fn dashboard_routes() -> Router<PgPool> {
    Router::new().route("/stats", get(dashboard_stats))
}

/// Aggregated laboratory and computer statistics
#[tracing::instrument(skip(pool))]
async fn dashboard_stats(State(pool): State<PgPool>) -> AppResult<Response> {
    let response = super::queries::stats::handle(pool)
        .await
        .map_err(|DashboardStatsError::Database(err)| AppError::Database(err))?;

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_structure() {
        let router = dashboard_routes();
        assert!(format!("{:?}", router).contains("Router"));
    }

    #[test]
    fn test_database_error_maps_to_500() {
        let err = AppError::Database(sqlx::Error::PoolClosed);
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
