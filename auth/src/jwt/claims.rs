use chrono::Duration;
use serde::Deserialize;
use serde::Serialize;

/// Signed token payload.
///
/// The identity fields of `T` are flattened next to the registered temporal
/// claims, so the encoded token carries a single flat JSON object. Decoding
/// splits them back apart: `identity` only ever holds the fields of `T`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims<T> {
    /// Identity payload
    #[serde(flatten)]
    pub identity: T,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique token identifier)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl<T> Claims<T> {
    /// Wrap identity claims in a fresh validity window.
    ///
    /// # Arguments
    /// * `identity` - Identity payload
    /// * `issued_at` - Issuance instant (Unix timestamp)
    /// * `ttl` - Validity window starting at `issued_at`
    ///
    /// # Returns
    /// Claims with iat and exp set, no token id
    pub fn new(identity: T, issued_at: i64, ttl: Duration) -> Self {
        Self {
            identity,
            iat: issued_at,
            exp: issued_at + ttl.num_seconds(),
            jti: None,
        }
    }

    /// Set token id.
    pub fn with_token_id(mut self, jti: impl ToString) -> Self {
        self.jti = Some(jti.to_string());
        self
    }

    /// Drop the temporal claims and keep the identity payload.
    pub fn into_identity(self) -> T {
        self.identity
    }
}
