pub mod stats;

pub use stats::{DashboardStatsError, DashboardStatsResponse, LabOverview};
