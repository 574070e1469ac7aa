//! List handlers — lifecycle, detail updates, and item operations.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use medialist_core::error::AppError;
use medialist_entity::list::{ItemPatch, ListDetailsPatch, ListKind, NewList};

use crate::dto::request::{
    AddItemsRequest, CreateListRequest, ListKindQuery, RemoveItemsRequest, UpdateListQuery,
    UpdateListRequest,
};
use crate::dto::response::{ListResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /v1/list
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateListRequest>,
) -> Result<Json<ListResponse>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let kind: ListKind = req.kind.parse()?;

    let list = state
        .list_service
        .create_list(
            &auth,
            NewList {
                name: req.name,
                privacy: req.privacy,
                kind,
                items: req.items,
            },
        )
        .await?;

    Ok(Json(ListResponse {
        message: "List created successfully".to_string(),
        result: list,
    }))
}

/// GET /v1/list/{listId}?type=...
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(list_id): Path<Uuid>,
    Query(params): Query<ListKindQuery>,
) -> Result<Json<ListResponse>, AppError> {
    let kind: ListKind = params.kind.parse()?;
    let list = state.list_service.get_list(&auth, list_id, kind).await?;

    Ok(Json(ListResponse {
        message: "List fetched successfully".to_string(),
        result: list,
    }))
}

/// DELETE /v1/list/{listId}?type=...
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(list_id): Path<Uuid>,
    Query(params): Query<ListKindQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    let kind: ListKind = params.kind.parse()?;
    state.list_service.delete_list(&auth, list_id, kind).await?;

    Ok(Json(MessageResponse {
        message: "List deleted successfully".to_string(),
    }))
}

/// PUT /v1/list/update/{listId}?updateType=privacy|name
///
/// The query names the detail being changed; the matching body field
/// must be present.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(list_id): Path<Uuid>,
    Query(params): Query<UpdateListQuery>,
    Json(req): Json<UpdateListRequest>,
) -> Result<Json<ListResponse>, AppError> {
    let patch = match params.update_type.as_str() {
        "name" => ListDetailsPatch {
            name: Some(
                req.name
                    .ok_or_else(|| AppError::validation("Missing field: name"))?,
            ),
            privacy: None,
        },
        "privacy" => ListDetailsPatch {
            name: None,
            privacy: Some(
                req.privacy
                    .ok_or_else(|| AppError::validation("Missing field: privacy"))?,
            ),
        },
        other => {
            return Err(AppError::validation(format!(
                "Invalid updateType: '{other}'. Expected one of: privacy, name"
            )));
        }
    };

    let list = state
        .list_service
        .update_details(&auth, list_id, &patch)
        .await?;

    Ok(Json(ListResponse {
        message: "List updated successfully".to_string(),
        result: list,
    }))
}

/// POST /v1/list/{listId}/items
pub async fn add_items(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(list_id): Path<Uuid>,
    Json(req): Json<AddItemsRequest>,
) -> Result<Json<ListResponse>, AppError> {
    let list = state
        .list_service
        .add_items(&auth, list_id, req.items)
        .await?;

    Ok(Json(ListResponse {
        message: "Items added successfully".to_string(),
        result: list,
    }))
}

/// DELETE /v1/list/{listId}/items
pub async fn remove_items(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(list_id): Path<Uuid>,
    Json(req): Json<RemoveItemsRequest>,
) -> Result<Json<ListResponse>, AppError> {
    let list = state
        .list_service
        .remove_items(&auth, list_id, req.media_ids)
        .await?;

    Ok(Json(ListResponse {
        message: "Items removed successfully".to_string(),
        result: list,
    }))
}

/// PUT /v1/list/{listId}/items/{mediaId}
pub async fn update_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((list_id, media_id)): Path<(Uuid, String)>,
    Json(patch): Json<ItemPatch>,
) -> Result<Json<ListResponse>, AppError> {
    let list = state
        .list_service
        .update_item(&auth, list_id, &media_id, &patch)
        .await?;

    Ok(Json(ListResponse {
        message: "Item updated successfully".to_string(),
        result: list,
    }))
}
