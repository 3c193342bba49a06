pub mod delete;
pub mod update;

pub use delete::{DeleteComputerCommand, DeleteComputerError, DeleteComputerResponse};
pub use update::{UpdateComputerCommand, UpdateComputerError, UpdateComputerResponse};
