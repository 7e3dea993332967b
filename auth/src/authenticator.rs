use chrono::Duration;

use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::GeneratedToken;
use crate::token::TokenError;
use crate::token::TokenGenerator;
use crate::token::TokenHash;
use crate::token::TokenScope;

/// Well-formed Argon2id hash that no password is expected to match.
///
/// Verified against when the account does not exist, so an unknown email
/// costs the same as a wrong password.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Authentication coordinator combining password verification and token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_generator: TokenGenerator,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    pub fn new() -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_generator: TokenGenerator::new(),
        }
    }

    /// Verify credentials and issue a token.
    ///
    /// `stored_hash` is `None` when no account exists for the presented
    /// identifier. The password is still run through the hasher so both
    /// failure paths take the same time and yield the same error.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash, if the account exists
    /// * `ttl` - Lifetime of the issued token
    /// * `scope` - Scope of the issued token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown account or password does not match
    /// * `PasswordError` - Password verification failed unexpectedly
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: Option<&str>,
        ttl: Duration,
        scope: TokenScope,
    ) -> Result<GeneratedToken, AuthenticationError> {
        let is_valid = match stored_hash {
            Some(hash) => self.password_hasher.verify(password, hash)?,
            None => {
                self.password_hasher.verify(password, DUMMY_PASSWORD_HASH)?;
                false
            }
        };

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_generator.generate(ttl, scope)?)
    }

    /// Issue a token without password verification.
    ///
    /// # Errors
    /// * `TokenError` - Token generation failed
    pub fn generate_token(
        &self,
        ttl: Duration,
        scope: TokenScope,
    ) -> Result<GeneratedToken, TokenError> {
        self.token_generator.generate(ttl, scope)
    }

    /// Compute the storage digest of a presented token.
    ///
    /// # Errors
    /// * `Malformed` - Token is not something this authenticator issued
    pub fn digest_token(&self, plaintext: &str) -> Result<TokenHash, TokenError> {
        self.token_generator.digest(plaintext)
    }
}

impl Default for Authenticator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate_success() {
        let authenticator = Authenticator::new();

        let password = "my_password";
        let hash = PasswordHasher::new()
            .hash(password)
            .expect("Failed to hash password");

        let token = authenticator
            .authenticate(
                password,
                Some(&hash),
                Duration::hours(24),
                TokenScope::Authentication,
            )
            .expect("Authentication failed");

        assert!(!token.plaintext.is_empty());
        assert_eq!(token.scope, TokenScope::Authentication);

        let digest = authenticator
            .digest_token(&token.plaintext)
            .expect("Token digest failed");
        assert_eq!(digest, token.hash);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = Authenticator::new();

        let hash = PasswordHasher::new()
            .hash("my_password")
            .expect("Failed to hash password");

        let result = authenticator.authenticate(
            "wrong_password",
            Some(&hash),
            Duration::hours(24),
            TokenScope::Authentication,
        );
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_unknown_account() {
        let authenticator = Authenticator::new();

        let result = authenticator.authenticate(
            "my_password",
            None,
            Duration::hours(24),
            TokenScope::Authentication,
        );
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_dummy_hash_is_well_formed() {
        let hasher = PasswordHasher::new();

        let matched = hasher
            .verify("password123", DUMMY_PASSWORD_HASH)
            .expect("Dummy hash must parse");
        assert!(!matched);
    }

    #[test]
    fn test_digest_invalid_token() {
        let authenticator = Authenticator::new();

        let result = authenticator.digest_token("invalid.token.here");
        assert!(matches!(result, Err(TokenError::Malformed)));
    }
}
