use thiserror::Error;

use crate::domain::validator::ValidationErrors;

/// Top-level error for token issuance and validation.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Unknown email, wrong password, or a token that is malformed, unknown,
    /// expired or issued for another scope. Deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token generation failed: {0}")]
    Generation(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
