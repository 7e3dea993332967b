use thiserror::Error;

/// Error type for opaque token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Random source unavailable: {0}")]
    RandomSource(String),

    #[error("Token is malformed")]
    Malformed,
}
