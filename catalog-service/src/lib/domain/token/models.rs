use auth::TokenHash;
use auth::TokenScope;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::UserId;

/// Token row as persisted. Carries the digest only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub hash: TokenHash,
    pub user_id: UserId,
    pub expiry: DateTime<Utc>,
    pub scope: TokenScope,
}

/// Token handed back to the caller. The plaintext is not retrievable again.
#[derive(Clone)]
pub struct IssuedToken {
    pub plaintext: String,
    pub expiry: DateTime<Utc>,
    pub scope: TokenScope,
}

impl std::fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedToken")
            .field("plaintext", &"<redacted>")
            .field("expiry", &self.expiry)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Login input, as received from the client.
#[derive(Debug)]
pub struct AuthenticateCommand {
    pub email: String,
    pub password: String,
}
