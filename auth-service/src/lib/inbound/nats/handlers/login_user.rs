use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::AuthSessionData;
use super::RpcError;
use crate::credential::errors::EmailError;
use crate::credential::errors::PlainPasswordError;
use crate::credential::models::EmailAddress;
use crate::credential::models::LoginCommand;
use crate::credential::models::PlainPassword;
use crate::credential::ports::CredentialServicePort;

pub async fn login_user<S: CredentialServicePort>(
    service: &S,
    data: Value,
) -> Result<AuthSessionData, RpcError> {
    let request: LoginUserRequest =
        serde_json::from_value(data).map_err(|e| RpcError::bad_request(e.to_string()))?;

    service
        .login(request.try_into_command()?)
        .await
        .map_err(RpcError::from)
        .map(AuthSessionData::from)
}

/// Login payload (raw JSON); unknown fields are rejected
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginUserRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseLoginUserRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PlainPasswordError),
}

impl LoginUserRequest {
    fn try_into_command(self) -> Result<LoginCommand, ParseLoginUserRequestError> {
        let email = EmailAddress::new(self.email)?;
        let password = PlainPassword::new(self.password)?;
        Ok(LoginCommand::new(email, password))
    }
}

impl From<ParseLoginUserRequestError> for RpcError {
    fn from(err: ParseLoginUserRequestError) -> Self {
        RpcError::bad_request(err.to_string())
    }
}
