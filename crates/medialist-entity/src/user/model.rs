//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::list::ListKind;

use super::profile_type::ProfileType;

/// A registered user in the MediaList system.
///
/// The `status_based_lists` and `theme_based_lists` arrays are the
/// ownership index: the authoritative record of which lists this user
/// owns, keyed by list kind.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Profile visibility.
    pub profile_type: ProfileType,
    /// Last issued refresh token. Single active session: issuing a new
    /// one invalidates the previous by overwrite.
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    /// Path to the avatar image, if uploaded.
    pub avatar: Option<String>,
    /// Ownership index for status-based lists.
    pub status_based_lists: Vec<Uuid>,
    /// Ownership index for theme-based lists.
    pub theme_based_lists: Vec<Uuid>,
    /// User-level tags (set semantics, enforced by the store).
    pub tags: Vec<String>,
    /// Friends (schema only, no workflow implemented).
    pub friends: Vec<Uuid>,
    /// Pending friend requests (schema only).
    pub friend_requests: Vec<Uuid>,
    /// Collaborative list references (schema only).
    pub collaborative_lists: Vec<Uuid>,
    /// Lists shared with or by this user (schema only).
    pub shared_lists: sqlx::types::Json<Vec<SharedListRef>>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Return the ownership index for both list kinds.
    pub fn list_index(&self) -> ListIndex {
        ListIndex {
            status_based: self.status_based_lists.clone(),
            theme_based: self.theme_based_lists.clone(),
        }
    }
}

/// Reference to a list shared between users (schema only).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedListRef {
    /// The shared list.
    pub list: Uuid,
    /// Who shared it.
    pub shared_by: Option<Uuid>,
    /// Who it was shared to.
    pub shared_to: Option<Uuid>,
}

/// Data required to create a new user. The password is hashed before
/// this struct is built; plaintext never reaches the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Profile visibility.
    pub profile_type: ProfileType,
    /// Avatar path (optional).
    pub avatar: Option<String>,
}

/// Sparse patch over the mutable profile fields. Only `Some` fields
/// are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfilePatch {
    /// New display name.
    pub name: Option<String>,
    /// New username.
    pub username: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New profile visibility.
    pub profile_type: Option<ProfileType>,
}

impl UserProfilePatch {
    /// Whether the patch carries at least one field.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.username.is_none()
            && self.email.is_none()
            && self.profile_type.is_none()
    }
}

/// Snapshot of a user's ownership index, both kinds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListIndex {
    /// Status-based list references.
    pub status_based: Vec<Uuid>,
    /// Theme-based list references.
    pub theme_based: Vec<Uuid>,
}

impl ListIndex {
    /// Whether the index claims the given list under the given kind.
    pub fn contains(&self, kind: ListKind, list_id: Uuid) -> bool {
        match kind {
            ListKind::StatusBased => self.status_based.contains(&list_id),
            ListKind::ThemeBased => self.theme_based.contains(&list_id),
        }
    }

    /// Whether the index claims the list under either kind.
    pub fn contains_any(&self, list_id: Uuid) -> bool {
        self.status_based.contains(&list_id) || self.theme_based.contains(&list_id)
    }

    /// The union of both kinds, status-based first.
    pub fn all(&self) -> Vec<Uuid> {
        let mut all = self.status_based.clone();
        all.extend_from_slice(&self.theme_based);
        all
    }
}
