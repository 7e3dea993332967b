use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::GeneratedToken;
use auth::TokenScope;
use chrono::Duration;
use chrono::Utc;

use crate::domain::token::errors::TokenError;
use crate::domain::token::models::AuthenticateCommand;
use crate::domain::token::models::IssuedToken;
use crate::domain::token::models::TokenRecord;
use crate::domain::token::ports::TokenRepository;
use crate::domain::token::ports::TokenServicePort;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::validation::validate_email;
use crate::domain::user::validation::validate_password_plaintext;
use crate::domain::validator::Validator;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// Issues opaque bearer tokens and resolves them back to users.
pub struct TokenService<UR, TR>
where
    UR: UserRepository,
    TR: TokenRepository,
{
    users: Arc<UR>,
    tokens: Arc<TR>,
    authenticator: Authenticator,
    authentication_ttl: Duration,
}

impl<UR, TR> TokenService<UR, TR>
where
    UR: UserRepository,
    TR: TokenRepository,
{
    /// # Arguments
    /// * `users` - User lookup used by login
    /// * `tokens` - Token persistence implementation
    /// * `authentication_ttl` - Lifetime of tokens issued at login
    pub fn new(users: Arc<UR>, tokens: Arc<TR>, authentication_ttl: Duration) -> Self {
        Self {
            users,
            tokens,
            authenticator: Authenticator::new(),
            authentication_ttl,
        }
    }

    async fn store(&self, token: GeneratedToken, user_id: UserId) -> Result<IssuedToken, TokenError> {
        let record = TokenRecord {
            hash: token.hash,
            user_id,
            expiry: token.expiry,
            scope: token.scope,
        };
        self.tokens.insert(&record).await?;

        tracing::debug!(
            user_id = %user_id,
            scope = %token.scope,
            expiry = %token.expiry,
            "Token issued"
        );

        Ok(IssuedToken {
            plaintext: token.plaintext,
            expiry: token.expiry,
            scope: token.scope,
        })
    }
}

#[async_trait]
impl<UR, TR> TokenServicePort for TokenService<UR, TR>
where
    UR: UserRepository,
    TR: TokenRepository,
{
    async fn create_authentication_token(
        &self,
        command: AuthenticateCommand,
    ) -> Result<IssuedToken, TokenError> {
        let mut v = Validator::new();
        validate_email(&mut v, &command.email);
        validate_password_plaintext(&mut v, &command.password);
        if !v.is_valid() {
            return Err(TokenError::Validation(v.into_errors()));
        }

        let user = self.users.find_by_email(&command.email).await?;

        let token = self
            .authenticator
            .authenticate(
                &command.password,
                user.as_ref().map(|u| u.password.hash()),
                self.authentication_ttl,
                TokenScope::Authentication,
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::debug!("Login rejected");
                    TokenError::InvalidCredentials
                }
                AuthenticationError::PasswordError(err) => TokenError::Password(err),
                AuthenticationError::TokenError(err) => TokenError::Generation(err.to_string()),
            })?;

        let user = user.ok_or(TokenError::InvalidCredentials)?;
        self.store(token, user.id).await
    }

    async fn generate(
        &self,
        user_id: UserId,
        ttl: Duration,
        scope: TokenScope,
    ) -> Result<IssuedToken, TokenError> {
        let token = self
            .authenticator
            .generate_token(ttl, scope)
            .map_err(|e| TokenError::Generation(e.to_string()))?;

        self.store(token, user_id).await
    }

    async fn validate(&self, plaintext: &str, scope: TokenScope) -> Result<User, TokenError> {
        let Ok(hash) = self.authenticator.digest_token(plaintext) else {
            return Err(TokenError::InvalidCredentials);
        };

        self.tokens
            .find_user_by_token(&hash, scope, Utc::now())
            .await?
            .ok_or(TokenError::InvalidCredentials)
    }
}

impl From<UserError> for TokenError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(errors) => TokenError::Validation(errors),
            UserError::Password(err) => TokenError::Password(err),
            other => TokenError::DatabaseError(other.to_string()),
        }
    }
}
