//! Dashboard feature
//!
//! Read-only aggregates over laboratories and computers.

pub mod queries;
pub mod routes;

pub use routes::dashboard_routes;
