//! Feature modules
//!
//! Each feature is a vertical slice owning its commands, queries, routes,
//! and error mapping. Handlers are plain async functions taking the pool,
//! so slices stay independently testable.

pub mod computers;
pub mod dashboard;
pub mod labs;
pub mod shared;

use axum::Router;
use sqlx::PgPool;

/// Assembles every feature router under one tree, sharing the pool as state
pub fn router(pool: PgPool) -> Router {
    Router::new()
        .nest("/labs", labs::labs_routes())
        .nest("/computers", computers::computers_routes())
        .nest("/dashboard", dashboard::dashboard_routes())
        .with_state(pool)
}
