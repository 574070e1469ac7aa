//! Response DTOs.

use serde::{Deserialize, Serialize};

use medialist_entity::list::List;
use medialist_entity::user::User;

/// Simple message-only response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

/// Response for `POST /v1/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Human-readable outcome.
    pub message: String,
    /// The created user. Credential fields are never serialized.
    pub result: User,
}

/// Response for `POST /v1/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Human-readable outcome.
    pub message: String,
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
}

/// Response for `POST /v1/auth/refresh`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    /// Human-readable outcome.
    pub message: String,
    /// The newly minted access token.
    pub access_token: String,
}

/// Response wrapping a single user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// Human-readable outcome.
    pub message: String,
    /// The affected user. Credential fields are never serialized.
    pub result: User,
}

/// Response wrapping a single list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    /// Human-readable outcome.
    pub message: String,
    /// The affected list.
    pub result: List,
}

/// Response for `GET /v1/user/search/{query}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matching users.
    pub result: Vec<User>,
}

/// Response for `GET /v1/user/tags`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagsResponse {
    /// The user's tags.
    pub tags: Vec<String>,
}

/// Response for `GET /v1/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: `ok` or `degraded`.
    pub status: String,
    /// Whether the cache backend is reachable.
    pub cache: bool,
}
