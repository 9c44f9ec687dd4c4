//! Credential utilities library
//!
//! Provides the credential lifecycle primitives used by the auth service:
//! - Password hashing (bcrypt, cost 10)
//! - JWT token issuance and validation (HS256, fixed validity window)
//! - Authentication coordination
//!
//! No I/O happens here; persistence and transport live in the service crate.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//! use chrono::Duration;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Identity {
//!     id: String,
//! }
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24)).unwrap();
//! let token = handler.encode(&Identity { id: "user123".into() }).unwrap();
//! let decoded: Claims<Identity> = handler.decode(&token).unwrap();
//! assert_eq!(decoded.identity.id, "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
