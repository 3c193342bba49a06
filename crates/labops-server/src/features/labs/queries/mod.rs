pub mod get;
pub mod list;

pub use get::{GetLabError, GetLabQuery, GetLabResponse};
pub use list::{LabListItem, ListLabsError, ListLabsResponse};
