use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use super::with_deadline;
use super::QueryError;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Password;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// Column list shared by every query that loads a user.
pub(crate) const USER_COLUMNS: &str = "users.id, users.first_name, users.last_name, users.email, \
     users.phone, users.address, users.password_hash, users.role, \
     users.created_at, users.updated_at, users.deleted_at";

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UserRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
    password_hash: String,
    role: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl UserRow {
    pub(crate) fn into_user(self) -> Result<User, UserError> {
        let role = Role::from_id(self.role)
            .map_err(|e| UserError::DatabaseError(format!("user {}: {}", self.id, e)))?;

        Ok(User {
            id: UserId(self.id),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            password: Password::from_hash(self.password_hash),
            role,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        })
    }
}

impl From<QueryError> for UserError {
    fn from(err: QueryError) -> Self {
        UserError::DatabaseError(err.to_string())
    }
}

pub struct PostgresUserRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let sql = format!(
            r#"
            INSERT INTO users (first_name, last_name, email, phone, address, password_hash, role)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = with_deadline(
            self.query_timeout,
            "insert_user",
            sqlx::query_as::<_, UserRow>(&sql)
                .bind(&user.first_name)
                .bind(&user.last_name)
                .bind(&user.email)
                .bind(&user.phone)
                .bind(&user.address)
                .bind(user.password.hash())
                .bind(user.role.id())
                .fetch_one(&self.pool),
        )
        .await
        .map_err(|e| match e {
            QueryError::Sqlx(sqlx::Error::Database(db_err))
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT) =>
            {
                UserError::DuplicateEmail(user.email.clone())
            }
            other => UserError::from(other),
        })?;

        row.into_user()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE users.id = $1 AND users.deleted_at IS NULL"
        );

        let row = with_deadline(
            self.query_timeout,
            "get_user_by_id",
            sqlx::query_as::<_, UserRow>(&sql)
                .bind(id.0)
                .fetch_optional(&self.pool),
        )
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE users.email = $1 AND users.deleted_at IS NULL"
        );

        let row = with_deadline(
            self.query_timeout,
            "get_user_by_email",
            sqlx::query_as::<_, UserRow>(&sql)
                .bind(email)
                .fetch_optional(&self.pool),
        )
        .await?;

        row.map(UserRow::into_user).transpose()
    }
}
