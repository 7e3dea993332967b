use thiserror::Error;

/// Error type for password operations.
///
/// A password that simply does not match is not an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash unusable: {0}")]
    VerificationFailed(String),
}
