//! LabOps Server Library
//!
//! HTTP backend for managing computer laboratories.
//!
//! # Overview
//!
//! The server provides a REST API for laboratory management:
//!
//! - **Laboratories**: CRUD plus seat provisioning (computers are generated
//!   from a lab's name and seat numbers, and capacity changes are reconciled
//!   against the existing machines)
//! - **Computers**: listing, filtering, per-machine updates and removal
//! - **Dashboard**: aggregate status statistics
//!
//! # Architecture
//!
//! The server follows a CQRS-flavored vertical-slice layout:
//!
//! - **Commands** (write operations): create, update, delete. Each command is
//!   a plain data structure with a `validate()` method and a standalone
//!   `handle(pool, command)` function holding the business logic.
//! - **Queries** (read operations): get, list, stats. Same shape, no
//!   mutation.
//!
//! Routes under `features/*/routes.rs` wire the handlers to Axum and map
//! per-operation error enums to HTTP responses.
//!
//! ## Framework Stack
//!
//! - **Axum**: web framework
//! - **SQLx**: PostgreSQL driver and migrations
//! - **Tower HTTP**: CORS, tracing, and compression middleware

pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod middleware;
pub mod models;

// Re-export commonly used types
pub use error::{AppError, AppResult};
