use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::AuthSessionData;
use super::RpcError;
use crate::credential::errors::DisplayNameError;
use crate::credential::errors::EmailError;
use crate::credential::errors::PlainPasswordError;
use crate::credential::models::DisplayName;
use crate::credential::models::EmailAddress;
use crate::credential::models::PlainPassword;
use crate::credential::models::RegisterCommand;
use crate::credential::ports::CredentialServicePort;

pub async fn register_user<S: CredentialServicePort>(
    service: &S,
    data: Value,
) -> Result<AuthSessionData, RpcError> {
    let request: RegisterUserRequest =
        serde_json::from_value(data).map_err(|e| RpcError::bad_request(e.to_string()))?;

    service
        .register(request.try_into_command()?)
        .await
        .map_err(RpcError::from)
        .map(AuthSessionData::from)
}

/// Register payload (raw JSON); unknown fields are rejected
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterUserRequest {
    email: String,
    name: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterUserRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid name: {0}")]
    Name(#[from] DisplayNameError),

    #[error("Invalid password: {0}")]
    Password(#[from] PlainPasswordError),
}

impl RegisterUserRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterUserRequestError> {
        let email = EmailAddress::new(self.email)?;
        let name = DisplayName::new(self.name)?;
        let password = PlainPassword::new(self.password)?;
        Ok(RegisterCommand::new(email, name, password))
    }
}

impl From<ParseRegisterUserRequestError> for RpcError {
    fn from(err: ParseRegisterUserRequestError) -> Self {
        RpcError::bad_request(err.to_string())
    }
}
