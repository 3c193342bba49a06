//! Shared validation utilities
//!
//! Common input checks used by commands and queries across features.

use thiserror::Error;

/// Errors that can occur during name validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NameValidationError {
    #[error("Name is required and cannot be empty")]
    Required,

    #[error("Name must be between 1 and {max_length} characters")]
    TooLong { max_length: usize },
}

/// Errors that can occur validating a positive integer field
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PositiveIntValidationError {
    #[error("{field_name} must be a positive integer")]
    NotPositive { field_name: String },
}

/// Validate a name field
///
/// # Rules
/// - Must not be empty (after trimming whitespace)
/// - Must not exceed max_length characters
pub fn validate_name(name: &str, max_length: usize) -> Result<(), NameValidationError> {
    if name.trim().is_empty() {
        return Err(NameValidationError::Required);
    }

    if name.len() > max_length {
        return Err(NameValidationError::TooLong { max_length });
    }

    Ok(())
}

/// Validate that an integer field is >= 1
pub fn validate_positive(
    value: i64,
    field_name: &str,
) -> Result<(), PositiveIntValidationError> {
    if value < 1 {
        return Err(PositiveIntValidationError::NotPositive {
            field_name: field_name.to_string(),
        });
    }
    Ok(())
}

/// Merge an optional text field for a partial update.
///
/// An absent field keeps the stored value. A provided value is trimmed,
/// and a value that is empty after trimming clears the column to NULL.
pub fn merge_optional_text(update: Option<&str>, existing: Option<String>) -> Option<String> {
    match update {
        Some(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        },
        None => existing,
    }
}
