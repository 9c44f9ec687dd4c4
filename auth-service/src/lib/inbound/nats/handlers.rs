use serde::Deserialize;
use serde::Serialize;

use crate::credential::errors::CredentialError;
use crate::credential::models::AuthSession;
use crate::credential::models::UserIdentity;

pub mod login_user;
pub mod register_user;
pub mod verify_user;

/// Structured failure returned to bus callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcError {
    pub status: u16,
    pub message: String,
}

impl RpcError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, message)
    }
}

impl From<CredentialError> for RpcError {
    fn from(err: CredentialError) -> Self {
        Self::new(err.status_code(), err.to_string())
    }
}

/// Success payload shared by every operation: sanitized user plus token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSessionData {
    pub user: UserData,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl From<UserIdentity> for UserData {
    fn from(identity: UserIdentity) -> Self {
        Self {
            id: identity.id,
            email: identity.email,
            name: identity.name,
        }
    }
}

impl From<AuthSession> for AuthSessionData {
    fn from(session: AuthSession) -> Self {
        Self {
            user: session.user.into(),
            token: session.token,
        }
    }
}
