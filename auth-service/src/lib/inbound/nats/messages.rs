use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use super::handlers::RpcError;

/// Inbound request as it arrives on the bus.
///
/// NestJS-style microservice clients wrap the payload as
/// `{"pattern", "data", "id"}`; other clients may send the bare payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestMessage {
    pub id: Option<String>,
    pub data: Value,
}

#[derive(Debug, Deserialize)]
struct RequestEnvelope {
    data: Value,
    id: Option<String>,
}

impl RequestMessage {
    /// Decode raw message bytes.
    ///
    /// # Errors
    /// * `RpcError` (400) - Payload is not JSON
    pub fn from_bytes(payload: &[u8]) -> Result<Self, RpcError> {
        let value: Value = serde_json::from_slice(payload)
            .map_err(|e| RpcError::bad_request(format!("Malformed request: {}", e)))?;

        let is_envelope = value
            .as_object()
            .map_or(false, |object| object.contains_key("pattern") && object.contains_key("data"));

        if is_envelope {
            let envelope: RequestEnvelope = serde_json::from_value(value)
                .map_err(|e| RpcError::bad_request(format!("Malformed request: {}", e)))?;
            Ok(Self {
                id: envelope.id,
                data: envelope.data,
            })
        } else {
            Ok(Self {
                id: None,
                data: value,
            })
        }
    }
}

/// Reply published to the request's reply subject.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyMessage<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub err: Option<RpcError>,

    #[serde(rename = "isDisposed")]
    pub is_disposed: bool,
}

impl<T: Serialize> ReplyMessage<T> {
    pub fn from_result(id: Option<String>, result: Result<T, RpcError>) -> Self {
        match result {
            Ok(response) => Self {
                id,
                response: Some(response),
                err: None,
                is_disposed: true,
            },
            Err(err) => Self {
                id,
                response: None,
                err: Some(err),
                is_disposed: true,
            },
        }
    }

    /// Serialize for publishing.
    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to serialize reply");
            br#"{"err":{"status":500,"message":"Failed to serialize reply"},"isDisposed":true}"#
                .to_vec()
        })
    }
}
