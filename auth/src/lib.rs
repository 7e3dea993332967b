//! Authentication utilities library
//!
//! Provides the credential primitives used by the service:
//! - Password hashing (Argon2id, fixed cost)
//! - Opaque, scoped bearer tokens stored as SHA-256 digests
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use auth::{TokenGenerator, TokenScope};
//! use chrono::Duration;
//!
//! let generator = TokenGenerator::new();
//! let token = generator.generate(Duration::hours(24), TokenScope::Authentication).unwrap();
//!
//! // Only the digest is stored; the plaintext goes back to the caller once.
//! let digest = generator.digest(&token.plaintext).unwrap();
//! assert_eq!(digest, token.hash);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, PasswordHasher, TokenScope};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new();
//!
//! // Register: hash password
//! let hash = PasswordHasher::new().hash("password123").unwrap();
//!
//! // Login: verify and issue a token
//! let token = auth
//!     .authenticate("password123", Some(&hash), Duration::hours(24), TokenScope::Authentication)
//!     .unwrap();
//! println!("Token: {}", token.plaintext);
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::GeneratedToken;
pub use token::TokenError;
pub use token::TokenGenerator;
pub use token::TokenHash;
pub use token::TokenScope;
