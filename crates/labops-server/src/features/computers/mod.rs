//! Computer management feature
//!
//! Individual machine records inside a laboratory. Machines are mostly
//! created through laboratory provisioning; this feature covers listing,
//! inspection, status changes, and decommissioning.

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use routes::computers_routes;
pub use types::{ComputerListItem, ComputerRecord};
