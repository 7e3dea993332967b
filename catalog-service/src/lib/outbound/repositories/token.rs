use std::time::Duration;

use async_trait::async_trait;
use auth::TokenHash;
use auth::TokenScope;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use super::user::UserRow;
use super::user::USER_COLUMNS;
use super::with_deadline;
use super::QueryError;
use crate::domain::token::errors::TokenError;
use crate::domain::token::models::TokenRecord;
use crate::domain::token::ports::TokenRepository;
use crate::domain::user::models::User;

impl From<QueryError> for TokenError {
    fn from(err: QueryError) -> Self {
        TokenError::DatabaseError(err.to_string())
    }
}

pub struct PostgresTokenRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl PostgresTokenRepository {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

#[async_trait]
impl TokenRepository for PostgresTokenRepository {
    async fn insert(&self, token: &TokenRecord) -> Result<(), TokenError> {
        with_deadline(
            self.query_timeout,
            "insert_token",
            sqlx::query(
                r#"
                INSERT INTO tokens (hash, user_id, expiry, scope)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(token.hash.as_bytes())
            .bind(token.user_id.0)
            .bind(token.expiry)
            .bind(token.scope.as_str())
            .execute(&self.pool),
        )
        .await?;

        Ok(())
    }

    async fn find_user_by_token(
        &self,
        hash: &TokenHash,
        scope: TokenScope,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, TokenError> {
        let sql = format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            INNER JOIN tokens ON users.id = tokens.user_id
            WHERE tokens.hash = $1
              AND tokens.scope = $2
              AND tokens.expiry > $3
              AND users.deleted_at IS NULL
            "#
        );

        let row = with_deadline(
            self.query_timeout,
            "get_user_for_token",
            sqlx::query_as::<_, UserRow>(&sql)
                .bind(hash.as_bytes())
                .bind(scope.as_str())
                .bind(now)
                .fetch_optional(&self.pool),
        )
        .await?;

        row.map(UserRow::into_user)
            .transpose()
            .map_err(TokenError::from)
    }
}
