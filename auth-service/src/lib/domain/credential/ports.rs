use async_trait::async_trait;

use crate::credential::errors::CredentialError;
use crate::credential::errors::DirectoryError;
use crate::credential::models::AuthSession;
use crate::credential::models::EmailAddress;
use crate::credential::models::LoginCommand;
use crate::credential::models::NewUser;
use crate::credential::models::RegisterCommand;
use crate::credential::models::User;

/// Port for credential domain service operations.
#[async_trait]
pub trait CredentialServicePort: Send + Sync + 'static {
    /// Register a new user and issue a token for it.
    ///
    /// # Arguments
    /// * `command` - Validated email, display name and plaintext password
    ///
    /// # Returns
    /// Sanitized identity and a fresh token
    ///
    /// # Errors
    /// * `DuplicateUser` - Email is already registered
    /// * `Unexpected` - Hashing, directory or token failure
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, CredentialError>;

    /// Check a login attempt and issue a token on success.
    ///
    /// # Arguments
    /// * `command` - Email and plaintext password
    ///
    /// # Returns
    /// Sanitized identity and a fresh token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `Unexpected` - Directory or token failure
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, CredentialError>;

    /// Validate a token and re-issue it with a new validity window.
    ///
    /// # Arguments
    /// * `token` - Previously issued token
    ///
    /// # Returns
    /// Identity claims of the token and a brand-new token
    ///
    /// # Errors
    /// * `Unauthorized` - Token forged, malformed or expired (indistinguishable)
    /// * `Unexpected` - Token re-encoding failed
    async fn verify_and_reissue(&self, token: &str) -> Result<AuthSession, CredentialError>;
}

/// Lookup and creation over persisted user records.
///
/// Implementations must enforce email uniqueness themselves and report a
/// violation as `DuplicateEmail`.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Retrieve user by email address.
    ///
    /// # Arguments
    /// * `email` - Email address, matched exactly
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Database` - Storage operation failed
    /// * `InvalidRecord` - Stored row could not be mapped to a user
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, DirectoryError>;

    /// Persist a new user.
    ///
    /// # Arguments
    /// * `user` - Email, display name and stored credential
    ///
    /// # Returns
    /// Created user entity with its assigned identifier
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `Database` - Storage operation failed
    async fn create(&self, user: NewUser) -> Result<User, DirectoryError>;
}
