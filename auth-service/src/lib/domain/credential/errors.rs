use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for DisplayName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DisplayNameError {
    #[error("Name must not be empty")]
    Empty,
}

/// Error for PlainPassword validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlainPasswordError {
    #[error("Password must not be empty")]
    Empty,
}

/// Failures reported by a user directory implementation.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    #[error("Stored user record is invalid: {0}")]
    InvalidRecord(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Outcome of a failed credential operation.
///
/// Distinct internal causes are deliberately collapsed: a caller cannot tell
/// an unknown email from a wrong password, nor an expired token from a
/// forged one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("User already registered")]
    DuplicateUser,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    Unauthorized,

    #[error("{0}")]
    Unexpected(String),
}

impl CredentialError {
    /// Wire-level status for this error kind.
    pub fn status_code(&self) -> u16 {
        match self {
            CredentialError::Unauthorized => 401,
            CredentialError::DuplicateUser
            | CredentialError::InvalidCredentials
            | CredentialError::Unexpected(_) => 400,
        }
    }
}

impl From<DirectoryError> for CredentialError {
    fn from(err: DirectoryError) -> Self {
        match err {
            // Storage-level uniqueness is the authoritative duplicate check
            DirectoryError::DuplicateEmail(_) => CredentialError::DuplicateUser,
            DirectoryError::InvalidRecord(_) | DirectoryError::Database(_) => {
                CredentialError::Unexpected(err.to_string())
            }
        }
    }
}
