use serde::Deserialize;
use serde_json::Value;

use super::AuthSessionData;
use super::RpcError;
use crate::credential::errors::CredentialError;
use crate::credential::ports::CredentialServicePort;

pub async fn verify_user<S: CredentialServicePort>(
    service: &S,
    data: Value,
) -> Result<AuthSessionData, RpcError> {
    // A missing or oddly shaped token is just another invalid token
    let request: VerifyUserRequest = serde_json::from_value(data)
        .map_err(|_| RpcError::from(CredentialError::Unauthorized))?;

    service
        .verify_and_reissue(request.token())
        .await
        .map_err(RpcError::from)
        .map(AuthSessionData::from)
}

/// Verify payload: the bare token string or `{"token": ...}`
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum VerifyUserRequest {
    Token(String),
    Body(VerifyUserBody),
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifyUserBody {
    token: String,
}

impl VerifyUserRequest {
    fn token(&self) -> &str {
        match self {
            VerifyUserRequest::Token(token) => token,
            VerifyUserRequest::Body(body) => &body.token,
        }
    }
}
