use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::user::errors::RoleError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub password: Password,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// User unique identifier type, assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl UserId {
    /// Parse a user ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not a positive integer
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(UserId(id)),
            _ => Err(UserIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Stored password credential.
///
/// Always holds a hash. The plaintext is only present on a value produced by
/// [`Password::set`] and only lives until the user has been validated; it is
/// never written to storage.
#[derive(Clone)]
pub struct Password {
    hash: String,
    plaintext: Option<String>,
}

impl Password {
    /// Hash `plaintext` and keep it alongside for validation.
    ///
    /// # Errors
    /// * `HashingFailed` - The hashing primitive failed unexpectedly
    pub fn set(
        hasher: &auth::PasswordHasher,
        plaintext: String,
    ) -> Result<Self, auth::PasswordError> {
        let hash = hasher.hash(&plaintext)?;
        Ok(Self {
            hash,
            plaintext: Some(plaintext),
        })
    }

    /// Wrap a hash loaded from storage.
    pub fn from_hash(hash: String) -> Self {
        Self {
            hash,
            plaintext: None,
        }
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn plaintext(&self) -> Option<&str> {
        self.plaintext.as_deref()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(..)")
    }
}

/// Account role tag. Stored as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Client,
    Customer,
}

impl Role {
    pub fn id(&self) -> i32 {
        match self {
            Role::Admin => 0,
            Role::Client => 1,
            Role::Customer => 2,
        }
    }

    /// # Errors
    /// * `UnknownId` - No role has this storage id
    pub fn from_id(id: i32) -> Result<Self, RoleError> {
        match id {
            0 => Ok(Role::Admin),
            1 => Ok(Role::Client),
            2 => Ok(Role::Customer),
            other => Err(RoleError::UnknownId(other)),
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Customer
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "client" => Ok(Role::Client),
            "customer" => Ok(Role::Customer),
            _ => Err(RoleError::UnknownName(s.to_string())),
        }
    }
}

/// User ready to be inserted; storage assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub password: Password,
    pub role: Role,
}

/// Command to register a new user, as received from the client.
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Option<String>,
}
