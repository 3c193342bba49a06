pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreateLabCommand, CreateLabError, CreateLabResponse};
pub use delete::{DeleteLabCommand, DeleteLabError, DeleteLabResponse};
pub use update::{CapacityWarning, UpdateLabCommand, UpdateLabError, UpdateLabResponse};
