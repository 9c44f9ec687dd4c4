use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use super::claims::Claims;
use super::errors::JwtError;

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the identity payload so services define their own claims.
/// Uses HS256 (HMAC with SHA-256) and a fixed validity window.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
    ttl: Duration,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key and token lifetime.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    /// * `ttl` - Validity window applied to every issued token
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    ///
    /// # Errors
    /// * `MissingSecret` - Secret is empty
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], ttl: Duration) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::MissingSecret);
        }

        let algorithm = Algorithm::HS256;
        let mut validation = Validation::new(algorithm);
        // `exp` stays required; expiry is exact.
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            validation,
            ttl,
        })
    }

    /// Encode identity claims into a token issued now.
    ///
    /// # Arguments
    /// * `identity` - Identity payload (must implement Serialize)
    ///
    /// # Returns
    /// JWT token string with fresh iat, exp and jti
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, identity: &T) -> Result<String, JwtError> {
        self.encode_at(identity, Utc::now().timestamp(), Uuid::new_v4())
    }

    /// Encode identity claims into a token issued at a given instant.
    ///
    /// Deterministic: the same identity, timestamp and token id always yield
    /// the same token.
    ///
    /// # Arguments
    /// * `identity` - Identity payload
    /// * `issued_at` - Issuance instant (Unix timestamp)
    /// * `token_id` - Value of the jti claim
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode_at<T: Serialize>(
        &self,
        identity: &T,
        issued_at: i64,
        token_id: impl ToString,
    ) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);
        let claims = Claims::new(identity, issued_at, self.ttl).with_token_id(token_id);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT token.
    ///
    /// # Arguments
    /// * `token` - JWT token string to decode
    ///
    /// # Returns
    /// Decoded claims, identity separated from temporal fields
    ///
    /// # Errors
    /// * `TokenExpired` - Current time is past the exp claim
    /// * `InvalidToken` - Signature mismatch, malformed structure or missing exp
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<Claims<T>, JwtError> {
        let token_data =
            decode::<Claims<T>>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    _ => JwtError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}
