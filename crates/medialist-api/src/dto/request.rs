//! Request DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use medialist_entity::list::{Item, Privacy};
use medialist_entity::user::ProfileType;

/// Body for `POST /v1/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Desired username.
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    /// Email address.
    #[validate(email)]
    pub email: String,
    /// Plaintext password; policy is enforced by the auth service.
    pub password: String,
    /// Profile visibility.
    pub profile_type: ProfileType,
    /// Avatar path (optional).
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Body for `POST /v1/auth/login`. Exactly one of `username`/`email`
/// must be present; the handler enforces the exclusive-or.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Username credential.
    #[serde(default)]
    pub username: Option<String>,
    /// Email credential.
    #[serde(default)]
    pub email: Option<String>,
    /// Plaintext password.
    pub password: String,
}

/// Body for `POST /v1/auth/refresh`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    /// The refresh token issued at login.
    pub refresh_token: String,
}

/// Body for `PUT /v1/user/update` — sparse profile patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// New username.
    #[serde(default)]
    pub username: Option<String>,
    /// New email.
    #[serde(default)]
    pub email: Option<String>,
    /// New profile visibility.
    #[serde(default)]
    pub profile_type: Option<ProfileType>,
}

/// Body for `PUT /v1/user/updatePassword`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    /// The current password, re-verified before the change.
    pub old_password: String,
    /// The replacement password.
    pub new_password: String,
}

/// Body for `DELETE /v1/user`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAccountRequest {
    /// The current password, re-verified before deletion.
    pub password: String,
}

/// Body for `PUT /v1/user/tag`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRequest {
    /// The tag to add or remove.
    pub tag: String,
}

/// Query for `PUT /v1/user/tag?queryType=add|remove`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagQuery {
    /// Either `add` or `remove`.
    pub query_type: String,
}

/// Query for `GET /v1/user/search/{query}?type=name|username`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Either `name` or `username`.
    #[serde(rename = "type")]
    pub search_type: String,
}

/// Body for `POST /v1/list`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateListRequest {
    /// List name.
    #[validate(length(min = 3, max = 100))]
    pub name: String,
    /// Visibility.
    pub privacy: Privacy,
    /// Category; immutable after creation.
    #[serde(rename = "type")]
    pub kind: String,
    /// Initial items.
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Query for `GET`/`DELETE /v1/list/{listId}?type=...`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListKindQuery {
    /// The kind the caller claims the list under.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Query for `PUT /v1/list/update/{listId}?updateType=privacy|name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListQuery {
    /// Which detail to update: `privacy` or `name`.
    pub update_type: String,
}

/// Body for `PUT /v1/list/update/{listId}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListRequest {
    /// New name, when `updateType=name`.
    #[serde(default)]
    pub name: Option<String>,
    /// New visibility, when `updateType=privacy`.
    #[serde(default)]
    pub privacy: Option<Privacy>,
}

/// Body for `POST /v1/list/{listId}/items`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemsRequest {
    /// Items to append.
    pub items: Vec<Item>,
}

/// Body for `DELETE /v1/list/{listId}/items`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemsRequest {
    /// Media ids of the items to remove.
    pub media_ids: Vec<String>,
}
