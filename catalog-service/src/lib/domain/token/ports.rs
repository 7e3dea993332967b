use async_trait::async_trait;
use auth::TokenHash;
use auth::TokenScope;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::domain::token::errors::TokenError;
use crate::domain::token::models::AuthenticateCommand;
use crate::domain::token::models::IssuedToken;
use crate::domain::token::models::TokenRecord;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for token issuance and validation.
#[async_trait]
pub trait TokenServicePort: Send + Sync + 'static {
    /// Exchange email and password for an authentication token.
    ///
    /// # Arguments
    /// * `command` - Raw login input
    ///
    /// # Returns
    /// Freshly issued authentication-scoped token
    ///
    /// # Errors
    /// * `Validation` - Email or password has the wrong shape
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `DatabaseError` - Database operation failed
    async fn create_authentication_token(
        &self,
        command: AuthenticateCommand,
    ) -> Result<IssuedToken, TokenError>;

    /// Issue and persist a token for `user_id`.
    ///
    /// # Arguments
    /// * `user_id` - Owner of the token
    /// * `ttl` - Lifetime of the token
    /// * `scope` - Purpose of the token
    ///
    /// # Errors
    /// * `Generation` - Random source failed
    /// * `DatabaseError` - Database operation failed
    async fn generate(
        &self,
        user_id: UserId,
        ttl: Duration,
        scope: TokenScope,
    ) -> Result<IssuedToken, TokenError>;

    /// Resolve a presented token to its owner.
    ///
    /// Tokens are multi-use; validating twice succeeds twice.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Malformed, unknown, expired or wrong scope
    /// * `DatabaseError` - Database operation failed
    async fn validate(&self, plaintext: &str, scope: TokenScope) -> Result<User, TokenError>;
}

/// Persistence operations for tokens.
#[async_trait]
pub trait TokenRepository: Send + Sync + 'static {
    /// Persist a token digest.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed or timed out
    async fn insert(&self, token: &TokenRecord) -> Result<(), TokenError>;

    /// Find the owner of a token that has `hash`, belongs to `scope` and
    /// expires strictly after `now`.
    ///
    /// # Returns
    /// Optional user entity (None if no such token)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed or timed out
    async fn find_user_by_token(
        &self,
        hash: &TokenHash,
        scope: TokenScope,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, TokenError>;
}
