//! JWT token validation.
//!
//! Revocation is handled by the session cache, not a blocklist: an
//! access token that verifies here must still have a live session entry
//! before a request is authenticated.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use medialist_core::config::AuthConfig;
use medialist_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Validates JWT token signatures, expiry, and token type.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;
        if claims.token_type != TokenType::Access {
            return Err(AppError::authentication(
                "Invalid token type: expected access token",
            ));
        }
        Ok(claims)
    }

    /// Decodes and validates a refresh token string.
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(AppError::authentication(
                "Invalid token type: expected refresh token",
            ));
        }
        Ok(claims)
    }

    /// Internal decode without type checking. Every verification failure
    /// collapses into the same authentication error so callers cannot
    /// distinguish a forged token from an expired one.
    fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::authentication("Token has expired")
                    }
                    _ => AppError::authentication("Invalid token"),
                }
            })?;
        Ok(token_data.claims)
    }
}
