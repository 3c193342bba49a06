pub mod get;
pub mod list;

pub use get::{GetComputerError, GetComputerQuery, GetComputerResponse};
pub use list::{ListComputersError, ListComputersQuery, ListComputersResponse};
