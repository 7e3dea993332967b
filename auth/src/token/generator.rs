use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Digest;
use sha2::Sha256;

use super::errors::TokenError;
use super::scope::TokenScope;

/// SHA-256 digest of a token's raw random bytes.
///
/// This is the only form of a token that is ever persisted.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenHash([u8; 32]);

impl TokenHash {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for TokenHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenHash(..)")
    }
}

/// Freshly generated token.
///
/// `plaintext` is handed to the caller once and must never be stored.
#[derive(Clone)]
pub struct GeneratedToken {
    pub plaintext: String,
    pub hash: TokenHash,
    pub expiry: DateTime<Utc>,
    pub scope: TokenScope,
}

impl fmt::Debug for GeneratedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedToken")
            .field("plaintext", &"<redacted>")
            .field("expiry", &self.expiry)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Opaque bearer token generator.
///
/// Tokens are `TOKEN_BYTES` random bytes from the OS CSPRNG, handed out as
/// unpadded base64url text. The storage key is the SHA-256 of the raw bytes,
/// not of the encoded text.
pub struct TokenGenerator;

impl TokenGenerator {
    pub const TOKEN_BYTES: usize = 16;

    pub fn new() -> Self {
        Self
    }

    /// Generate a new token expiring `ttl` from now.
    ///
    /// # Arguments
    /// * `ttl` - Lifetime of the token
    /// * `scope` - Purpose the token is issued for
    ///
    /// # Errors
    /// * `RandomSource` - The OS random source failed
    pub fn generate(&self, ttl: Duration, scope: TokenScope) -> Result<GeneratedToken, TokenError> {
        self.generate_at(Utc::now(), ttl, scope)
    }

    /// Generate a new token expiring `ttl` after `now`.
    pub fn generate_at(
        &self,
        now: DateTime<Utc>,
        ttl: Duration,
        scope: TokenScope,
    ) -> Result<GeneratedToken, TokenError> {
        let mut bytes = [0u8; Self::TOKEN_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| TokenError::RandomSource(e.to_string()))?;

        Ok(GeneratedToken {
            plaintext: URL_SAFE_NO_PAD.encode(bytes),
            hash: Self::hash_bytes(&bytes),
            expiry: now + ttl,
            scope,
        })
    }

    /// Compute the storage digest of a presented plaintext token.
    ///
    /// # Errors
    /// * `Malformed` - Not valid base64url or not `TOKEN_BYTES` long once decoded
    pub fn digest(&self, plaintext: &str) -> Result<TokenHash, TokenError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(plaintext)
            .map_err(|_| TokenError::Malformed)?;

        if bytes.len() != Self::TOKEN_BYTES {
            return Err(TokenError::Malformed);
        }

        Ok(Self::hash_bytes(&bytes))
    }

    fn hash_bytes(bytes: &[u8]) -> TokenHash {
        TokenHash(Sha256::digest(bytes).into())
    }
}

impl Default for TokenGenerator {
    fn default() -> Self {
        Self::new()
    }
}
