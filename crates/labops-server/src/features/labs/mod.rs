//! Laboratory management feature
//!
//! Laboratories are the unit of machine provisioning: creating one with a
//! `computer_count` seeds its machines, and updating the count reconciles
//! the fleet (growth appends seats, shrinking only warns).

pub mod commands;
pub mod provisioning;
pub mod queries;
pub mod routes;
pub mod types;

pub use provisioning::{
    generate_computers, reconcile, ComputerDraft, ProvisionError, ReconcileOutcome,
    MAX_COMPUTERS_PER_LAB,
};
pub use routes::labs_routes;
pub use types::{ComputerSummary, LabRecord};
