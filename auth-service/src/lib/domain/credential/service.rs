use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Claims;

use crate::credential::errors::CredentialError;
use crate::credential::models::AuthSession;
use crate::credential::models::LoginCommand;
use crate::credential::models::NewUser;
use crate::credential::models::PlainPassword;
use crate::credential::models::RegisterCommand;
use crate::credential::models::UserIdentity;
use crate::credential::ports::CredentialServicePort;
use crate::credential::ports::UserDirectory;

/// Domain service implementation for credential operations.
///
/// Concrete implementation of CredentialServicePort with dependency injection.
/// Holds no request state; every operation is a single request/response.
pub struct CredentialService<UD>
where
    UD: UserDirectory,
{
    directory: Arc<UD>,
    authenticator: Arc<Authenticator>,
}

impl<UD> CredentialService<UD>
where
    UD: UserDirectory,
{
    /// Create a new credential service with injected dependencies.
    ///
    /// # Arguments
    /// * `directory` - User lookup/creation implementation
    /// * `authenticator` - Password hashing and token handling
    ///
    /// # Returns
    /// Configured credential service instance
    pub fn new(directory: Arc<UD>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            directory,
            authenticator,
        }
    }

    /// Hash on the blocking pool; bcrypt cost is paid off the async workers.
    async fn hash_password(&self, password: PlainPassword) -> Result<String, CredentialError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
            .await
            .map_err(|e| CredentialError::Unexpected(e.to_string()))?
            .map_err(|e| CredentialError::Unexpected(e.to_string()))
    }

    fn issue_session(&self, user: UserIdentity) -> Result<AuthSession, CredentialError> {
        let token = self
            .authenticator
            .generate_token(&user)
            .map_err(|e| CredentialError::Unexpected(e.to_string()))?;

        Ok(AuthSession { user, token })
    }
}

#[async_trait]
impl<UD> CredentialServicePort for CredentialService<UD>
where
    UD: UserDirectory,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, CredentialError> {
        // Fast path only; the directory's unique constraint is authoritative
        if self.directory.find_by_email(&command.email).await?.is_some() {
            tracing::debug!(email = %command.email, "Registration rejected: email already registered");
            return Err(CredentialError::DuplicateUser);
        }

        let password_hash = self.hash_password(command.password).await?;

        let user = self
            .directory
            .create(NewUser {
                email: command.email,
                name: command.name,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, email = %user.email, "User registered");

        self.issue_session(user.sanitize())
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, CredentialError> {
        let Some(user) = self.directory.find_by_email(&command.email).await? else {
            tracing::debug!(email = %command.email, "Login rejected: unknown email");
            return Err(CredentialError::InvalidCredentials);
        };

        let identity = user.sanitize();
        let claims = identity.clone();
        let stored_hash = user.password_hash;
        let password = command.password;
        let authenticator = Arc::clone(&self.authenticator);

        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(password.expose(), &stored_hash, &claims)
        })
        .await
        .map_err(|e| CredentialError::Unexpected(e.to_string()))?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => {
                tracing::debug!(user_id = %user.id, "Login rejected: password mismatch");
                CredentialError::InvalidCredentials
            }
            AuthenticationError::PasswordError(_) | AuthenticationError::JwtError(_) => {
                CredentialError::Unexpected(e.to_string())
            }
        })?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthSession {
            user: identity,
            token: result.access_token,
        })
    }

    async fn verify_and_reissue(&self, token: &str) -> Result<AuthSession, CredentialError> {
        let claims: Claims<UserIdentity> =
            self.authenticator.validate_token(token).map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                CredentialError::Unauthorized
            })?;

        // iat, exp and jti are dropped; the new token gets its own window
        self.issue_session(claims.into_identity())
    }
}
