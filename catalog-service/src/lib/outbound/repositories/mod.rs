use std::future::Future;
use std::time::Duration;

use thiserror::Error;

pub mod token;
pub mod user;

pub use token::PostgresTokenRepository;
pub use user::PostgresUserRepository;

/// Failure of a single bounded database call.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("query `{0}` exceeded its deadline")]
    DeadlineExceeded(&'static str),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Run `query`, giving up once `deadline` has elapsed.
pub async fn with_deadline<T, F>(
    deadline: Duration,
    operation: &'static str,
    query: F,
) -> Result<T, QueryError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(deadline, query).await {
        Ok(result) => Ok(result?),
        Err(_) => {
            tracing::error!(
                operation,
                deadline_ms = deadline.as_millis() as u64,
                "Database query deadline exceeded"
            );
            Err(QueryError::DeadlineExceeded(operation))
        }
    }
}
