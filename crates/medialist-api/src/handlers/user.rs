//! User handlers — search, profile, password, account deletion, tags.

use axum::Json;
use axum::extract::{Path, Query, State};

use medialist_core::error::AppError;
use medialist_entity::user::UserProfilePatch;
use medialist_service::user::SearchType;

use crate::dto::request::{
    DeleteAccountRequest, SearchQuery, TagQuery, TagRequest, UpdatePasswordRequest,
    UpdateProfileRequest,
};
use crate::dto::response::{MessageResponse, SearchResponse, TagsResponse, UserResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /v1/user/search/{query}?type=name|username
pub async fn search(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(query): Path<String>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let search_type: SearchType = params.search_type.parse()?;
    let result = state.user_service.search(&query, search_type).await?;
    Ok(Json(SearchResponse { result }))
}

/// PUT /v1/user/update
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let patch = UserProfilePatch {
        name: req.name,
        username: req.username,
        email: req.email,
        profile_type: req.profile_type,
    };
    let user = state.user_service.update_profile(&auth, &patch).await?;

    Ok(Json(UserResponse {
        message: "Profile updated successfully".to_string(),
        result: user,
    }))
}

/// PUT /v1/user/updatePassword
pub async fn update_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdatePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .user_service
        .change_password(&auth, &req.old_password, &req.new_password)
        .await?;

    Ok(Json(MessageResponse {
        message: "Password updated successfully".to_string(),
    }))
}

/// DELETE /v1/user
pub async fn delete_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<DeleteAccountRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    state.user_service.delete_account(&auth, &req.password).await?;

    Ok(Json(MessageResponse {
        message: "Account deleted successfully".to_string(),
    }))
}

/// PUT /v1/user/tag?queryType=add|remove
pub async fn tag(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<TagQuery>,
    Json(req): Json<TagRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    match params.query_type.as_str() {
        "add" => state.user_service.add_tag(&auth, &req.tag).await?,
        "remove" => state.user_service.remove_tag(&auth, &req.tag).await?,
        other => {
            return Err(AppError::validation(format!(
                "Invalid queryType: '{other}'. Expected one of: add, remove"
            )));
        }
    }

    Ok(Json(MessageResponse {
        message: "Tags updated successfully".to_string(),
    }))
}

/// GET /v1/user/tags
pub async fn get_tags(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<TagsResponse>, AppError> {
    let tags = state.user_service.get_tags(&auth).await?;
    Ok(Json(TagsResponse { tags }))
}
