//! `AuthUser` extractor — pulls the bearer token from the Authorization
//! header, verifies it, resolves the session, and injects context.
//!
//! Per-request state machine: no token ⇒ 403; signature/expiry failure ⇒
//! authentication error; session-cache miss ⇒ the token verified but its
//! session is gone (expired or revoked), also an authentication error.
//! Every failure propagates through the standard error channel so the
//! single formatting boundary governs the response.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use medialist_core::error::AppError;
use medialist_service::context::RequestContext;

use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::token_missing("Access denied, token missing."))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::token_missing("Access denied, token missing."))?;

        let claims = state.jwt_decoder.decode_access_token(token)?;

        let session_user = state
            .sessions
            .get(token)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid token. User does not exist"))?;

        // The session entry is authoritative; the claim is only a hint.
        if session_user != claims.user_id() {
            return Err(AppError::authentication("Invalid token. User does not exist"));
        }

        Ok(AuthUser(RequestContext::new(session_user)))
    }
}
