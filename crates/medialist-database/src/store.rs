//! Store traits implemented by the PostgreSQL repositories and the
//! in-memory fakes.
//!
//! Services receive these as `Arc<dyn UserStore>` / `Arc<dyn ListStore>`
//! so the persistence backend is an injected dependency rather than a
//! process-wide singleton.

use async_trait::async_trait;
use uuid::Uuid;

use medialist_core::result::AppResult;
use medialist_entity::list::{Item, ItemPatch, List, ListDetailsPatch, ListKind, NewList};
use medialist_entity::user::{ListIndex, NewUser, User, UserProfilePatch};

/// CRUD and query operations over user rows, including the ownership
/// index arrays and user-level tags.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new user. The username and email must be unique.
    async fn create(&self, new_user: &NewUser) -> AppResult<User>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by exact username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find a user by exact email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Case-insensitive substring search over display names, restricted
    /// to public profiles.
    async fn search_by_name(&self, name: &str) -> AppResult<Vec<User>>;

    /// Sparse patch over the mutable profile fields. Returns the updated
    /// row, or `None` if the user does not exist.
    async fn update_profile(&self, id: Uuid, patch: &UserProfilePatch) -> AppResult<Option<User>>;

    /// Replace the stored password hash. Returns whether a row was written.
    async fn update_password_hash(&self, id: Uuid, hash: &str) -> AppResult<bool>;

    /// Overwrite the single-slot refresh token. Returns whether a row was
    /// written.
    async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> AppResult<bool>;

    /// Permanently delete the user. Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Return the user's tag list, or `None` if the user does not exist.
    async fn tags(&self, id: Uuid) -> AppResult<Option<Vec<String>>>;

    /// Add a tag with set semantics: adding a tag that is already present
    /// is a successful no-op. Returns whether the user exists.
    async fn add_tag(&self, id: Uuid, tag: &str) -> AppResult<bool>;

    /// Remove a tag from the user's tag list. Returns whether the user
    /// exists.
    async fn remove_tag(&self, id: Uuid, tag: &str) -> AppResult<bool>;

    /// Return both ownership index arrays, or `None` if the user does
    /// not exist.
    async fn list_index(&self, id: Uuid) -> AppResult<Option<ListIndex>>;

    /// Append a list reference to the index array matching `kind`.
    /// Returns whether the user exists.
    async fn attach_list(&self, id: Uuid, list_id: Uuid, kind: ListKind) -> AppResult<bool>;

    /// Pull a list reference from the index array matching `kind`.
    /// Returns whether the user exists.
    async fn detach_list(&self, id: Uuid, list_id: Uuid, kind: ListKind) -> AppResult<bool>;
}

/// CRUD and mutation operations over list rows and their embedded item
/// collections.
#[async_trait]
pub trait ListStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new list and return the stored row.
    async fn create(&self, new_list: &NewList) -> AppResult<List>;

    /// Find a list by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<List>>;

    /// Delete a list. Absence is a normal `false` outcome, not an error:
    /// the ownership coordinator interprets it.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Sparse patch over name and privacy. Returns the updated row, or
    /// `None` if the list does not exist.
    async fn update_details(&self, id: Uuid, patch: &ListDetailsPatch)
    -> AppResult<Option<List>>;

    /// Append items to the embedded collection.
    async fn add_items(&self, id: Uuid, items: &[Item]) -> AppResult<Option<List>>;

    /// Remove every item whose `mediaId` is in `media_ids`.
    async fn remove_items(&self, id: Uuid, media_ids: &[String]) -> AppResult<Option<List>>;

    /// Patch a single embedded item matched by `mediaId`. The
    /// kind-restriction validator runs inside the same update step as
    /// the write, so a concurrent detail change cannot race it.
    /// Returns `None` if the list or the item does not exist.
    async fn update_item(
        &self,
        id: Uuid,
        media_id: &str,
        patch: &ItemPatch,
    ) -> AppResult<Option<List>>;

    /// Pull a tag from every item across the given lists. Returns the
    /// number of items modified; zero is a successful outcome.
    async fn remove_tag_from_items(&self, list_ids: &[Uuid], tag: &str) -> AppResult<u64>;
}
