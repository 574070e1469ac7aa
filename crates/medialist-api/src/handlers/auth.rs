//! Auth handlers — register, login, refresh.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use medialist_core::error::AppError;
use medialist_service::auth::{LoginIdentifier, RegisterData};

use crate::dto::request::{LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{LoginResponse, RefreshResponse, RegisterResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state
        .auth_service
        .register(RegisterData {
            name: req.name,
            username: req.username,
            email: req.email,
            password: req.password,
            profile_type: req.profile_type,
            avatar: req.avatar,
        })
        .await?;

    Ok(Json(RegisterResponse {
        message: "User registered successfully".to_string(),
        result: user,
    }))
}

/// POST /v1/auth/login
///
/// The request must carry exactly one of `username`/`email`; both or
/// neither is a validation error, checked explicitly here rather than
/// left to deserialization.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let identifier = match (req.username, req.email) {
        (Some(username), None) => LoginIdentifier::Username(username),
        (None, Some(email)) => LoginIdentifier::Email(email),
        (Some(_), Some(_)) => {
            return Err(AppError::validation(
                "Provide either username or email, not both",
            ));
        }
        (None, None) => {
            return Err(AppError::validation("Provide a username or an email"));
        }
    };

    let pair = state.auth_service.login(identifier, &req.password).await?;

    Ok(Json(LoginResponse {
        message: "Logged in successfully".to_string(),
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
    }))
}

/// POST /v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, AppError> {
    let access_token = state.auth_service.refresh(&req.refresh_token).await?;

    Ok(Json(RefreshResponse {
        message: "Access token refreshed".to_string(),
        access_token,
    }))
}
