use thiserror::Error;

use crate::domain::validator::ValidationErrors;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid user id: {0}")]
    InvalidFormat(String),
}

/// Error for role tag conversions
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    UnknownName(String),

    #[error("Unknown role id: {0}")]
    UnknownId(i32),
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Invalid user id: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("User not found: {0}")]
    NotFound(String),

    /// Unique email constraint hit on insert.
    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
