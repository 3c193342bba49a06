//! LabOps Common Library
//!
//! Shared infrastructure for the LabOps workspace:
//!
//! - **Error Handling**: the [`LabopsError`] type and [`Result`] alias
//! - **Logging**: tracing subscriber configuration and initialization
//!
//! Domain types live in the server crate; this crate only carries concerns
//! that more than one binary needs.

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{LabopsError, Result};
