//! List service — ownership coordination between the user's index arrays
//! and the list rows they reference.
//!
//! The owning user's index array is the authoritative ownership record.
//! Every multi-step protocol here either completes, compensates, or
//! reports a consistency error; it never returns success while the index
//! and the list rows disagree.

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use medialist_core::error::AppError;
use medialist_core::result::AppResult;
use medialist_database::{ListStore, UserStore};
use medialist_entity::list::model::{LIST_NAME_MAX, LIST_NAME_MIN};
use medialist_entity::list::{Item, ItemPatch, List, ListDetailsPatch, ListKind, NewList};
use medialist_entity::user::ListIndex;

use crate::context::RequestContext;

/// Coordinates list rows with the owning user's index arrays.
#[derive(Debug, Clone)]
pub struct ListService {
    users: Arc<dyn UserStore>,
    lists: Arc<dyn ListStore>,
}

impl ListService {
    /// Creates a new list service.
    pub fn new(users: Arc<dyn UserStore>, lists: Arc<dyn ListStore>) -> Self {
        Self { users, lists }
    }

    /// Creates a list and attaches it to the caller's index.
    ///
    /// If the attach step fails the created row is deleted again, so the
    /// caller never observes an orphan. A compensation that itself fails
    /// is reported as a consistency error.
    pub async fn create_list(&self, ctx: &RequestContext, new_list: NewList) -> AppResult<List> {
        new_list.validate()?;

        let list = self.lists.create(&new_list).await?;

        let attached = match self.users.attach_list(ctx.user_id, list.id, list.kind).await {
            Ok(true) => true,
            Ok(false) => false,
            Err(e) => {
                self.compensate_create(list.id, &e).await?;
                return Err(AppError::consistency(
                    "Failed to record list ownership; the created list was removed",
                ));
            }
        };
        if !attached {
            // The user row vanished between auth and attach.
            self.compensate_create(list.id, &AppError::not_found("User not found"))
                .await?;
            return Err(AppError::not_found("User not found"));
        }

        info!(user_id = %ctx.user_id, list_id = %list.id, kind = %list.kind, "List created");
        Ok(list)
    }

    async fn compensate_create(&self, list_id: Uuid, cause: &AppError) -> AppResult<()> {
        warn!(%list_id, %cause, "Attach failed after create, removing orphan list");
        if let Err(delete_err) = self.lists.delete(list_id).await {
            error!(%list_id, error = %delete_err, "Compensating delete failed, orphan list remains");
            return Err(AppError::consistency(format!(
                "List {list_id} is orphaned: ownership attach and compensating delete both failed"
            )));
        }
        Ok(())
    }

    /// Fetches a list the caller claims under `kind`.
    ///
    /// If the index claims the list but the row is gone, the stale
    /// reference is detached (self-heal) and the result is not-found.
    pub async fn get_list(
        &self,
        ctx: &RequestContext,
        list_id: Uuid,
        kind: ListKind,
    ) -> AppResult<List> {
        let index = self.claimed_index(ctx).await?;
        if !index.contains(kind, list_id) {
            return Err(AppError::authorization("You do not own this list"));
        }

        match self.lists.find_by_id(list_id).await? {
            Some(list) => Ok(list),
            None => {
                self.self_heal(ctx.user_id, list_id, &index).await;
                Err(AppError::not_found("List not found"))
            }
        }
    }

    /// Deletes a list the caller claims under `kind`, then detaches the
    /// reference. Detach failure after a successful delete leaves a
    /// dangling index entry and is reported as a consistency error.
    pub async fn delete_list(
        &self,
        ctx: &RequestContext,
        list_id: Uuid,
        kind: ListKind,
    ) -> AppResult<()> {
        let index = self.claimed_index(ctx).await?;
        if !index.contains(kind, list_id) {
            return Err(AppError::authorization("You do not own this list"));
        }

        let existed = self.lists.delete(list_id).await?;
        if !existed {
            // Stale index entry: the row is already gone.
            self.self_heal(ctx.user_id, list_id, &index).await;
            return Err(AppError::not_found("List not found"));
        }

        match self.users.detach_list(ctx.user_id, list_id, kind).await {
            Ok(_) => {
                info!(user_id = %ctx.user_id, %list_id, "List deleted");
                Ok(())
            }
            Err(e) => {
                error!(
                    user_id = %ctx.user_id,
                    %list_id,
                    error = %e,
                    "List row deleted but index detach failed"
                );
                Err(AppError::consistency(format!(
                    "List {list_id} was deleted but its ownership reference could not be removed"
                )))
            }
        }
    }

    /// Updates a list's name and/or privacy. The route carries no kind,
    /// so ownership is checked against the union of both index arrays.
    pub async fn update_details(
        &self,
        ctx: &RequestContext,
        list_id: Uuid,
        patch: &ListDetailsPatch,
    ) -> AppResult<List> {
        if patch.is_empty() {
            return Err(AppError::validation("No list fields to update"));
        }
        if let Some(name) = &patch.name {
            let len = name.chars().count();
            if !(LIST_NAME_MIN..=LIST_NAME_MAX).contains(&len) {
                return Err(AppError::validation(format!(
                    "List name must be between {LIST_NAME_MIN} and {LIST_NAME_MAX} characters"
                )));
            }
        }

        let index = self.claimed_index(ctx).await?;
        if !index.contains_any(list_id) {
            return Err(AppError::authorization("You do not own this list"));
        }

        match self.lists.update_details(list_id, patch).await? {
            Some(list) => Ok(list),
            None => {
                self.self_heal(ctx.user_id, list_id, &index).await;
                Err(AppError::not_found("List not found"))
            }
        }
    }

    /// Appends items to an owned list.
    pub async fn add_items(
        &self,
        ctx: &RequestContext,
        list_id: Uuid,
        items: Vec<Item>,
    ) -> AppResult<List> {
        if items.is_empty() {
            return Err(AppError::validation("No items to add"));
        }
        let index = self.owned_or_deny(ctx, list_id).await?;

        match self.lists.add_items(list_id, &items).await? {
            Some(list) => Ok(list),
            None => {
                self.self_heal(ctx.user_id, list_id, &index).await;
                Err(AppError::not_found("List not found"))
            }
        }
    }

    /// Removes items from an owned list by their media ids.
    pub async fn remove_items(
        &self,
        ctx: &RequestContext,
        list_id: Uuid,
        media_ids: Vec<String>,
    ) -> AppResult<List> {
        if media_ids.is_empty() {
            return Err(AppError::validation("No items to remove"));
        }
        let index = self.owned_or_deny(ctx, list_id).await?;

        match self.lists.remove_items(list_id, &media_ids).await? {
            Some(list) => Ok(list),
            None => {
                self.self_heal(ctx.user_id, list_id, &index).await;
                Err(AppError::not_found("List not found"))
            }
        }
    }

    /// Patches one item on an owned list. The kind restriction is
    /// enforced by the store inside its update step.
    pub async fn update_item(
        &self,
        ctx: &RequestContext,
        list_id: Uuid,
        media_id: &str,
        patch: &ItemPatch,
    ) -> AppResult<List> {
        if patch.is_empty() {
            return Err(AppError::validation("No item fields to update"));
        }
        let index = self.owned_or_deny(ctx, list_id).await?;

        match self.lists.update_item(list_id, media_id, patch).await? {
            Some(list) => Ok(list),
            None => {
                // The store reports one `None` for both absences; only a
                // missing list row means the index entry is stale.
                if self.lists.find_by_id(list_id).await?.is_none() {
                    self.self_heal(ctx.user_id, list_id, &index).await;
                    return Err(AppError::not_found("List not found"));
                }
                Err(AppError::not_found("Item not found"))
            }
        }
    }

    async fn claimed_index(&self, ctx: &RequestContext) -> AppResult<ListIndex> {
        self.users
            .list_index(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    async fn owned_or_deny(&self, ctx: &RequestContext, list_id: Uuid) -> AppResult<ListIndex> {
        let index = self.claimed_index(ctx).await?;
        if !index.contains_any(list_id) {
            return Err(AppError::authorization("You do not own this list"));
        }
        Ok(index)
    }

    /// Detach a reference the index claims but the store no longer has.
    /// Best effort: the caller already has a definitive answer for the
    /// user, so a failure here only delays the heal to the next read.
    async fn self_heal(&self, user_id: Uuid, list_id: Uuid, index: &ListIndex) {
        warn!(%user_id, %list_id, "Index references a missing list, detaching stale entry");
        for kind in [ListKind::StatusBased, ListKind::ThemeBased] {
            if index.contains(kind, list_id) {
                if let Err(e) = self.users.detach_list(user_id, list_id, kind).await {
                    error!(%user_id, %list_id, error = %e, "Failed to detach stale list reference");
                }
            }
        }
    }
}
