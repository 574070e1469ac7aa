//! User self-service operations — profile, search, password, and tags.

use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use medialist_auth::password::{PasswordHasher, PasswordValidator};
use medialist_core::error::AppError;
use medialist_core::result::AppResult;
use medialist_database::{ListStore, UserStore};
use medialist_entity::user::{User, UserProfilePatch};

use crate::context::RequestContext;

/// How a user search interprets its query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Case-insensitive substring over display names, public profiles only.
    Name,
    /// Exact username match.
    Username,
}

impl FromStr for SearchType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "username" => Ok(Self::Username),
            _ => Err(AppError::validation(format!(
                "Invalid search type: '{s}'. Expected one of: name, username"
            ))),
        }
    }
}

/// Handles user self-service operations.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    lists: Arc<dyn ListStore>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        lists: Arc<dyn ListStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            users,
            lists,
            hasher,
            validator,
        }
    }

    /// Gets the current user's full profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Finds any user by id.
    pub async fn find_user(&self, id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Searches the user directory.
    pub async fn search(&self, query: &str, search_type: SearchType) -> AppResult<Vec<User>> {
        match search_type {
            SearchType::Name => self.users.search_by_name(query).await,
            SearchType::Username => {
                Ok(self.users.find_by_username(query).await?.into_iter().collect())
            }
        }
    }

    /// Updates the current user's profile with a sparse patch.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        patch: &UserProfilePatch,
    ) -> AppResult<User> {
        if patch.is_empty() {
            return Err(AppError::validation("No profile fields to update"));
        }

        let user = self
            .users
            .update_profile(ctx.user_id, patch)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %ctx.user_id, "Profile updated");
        Ok(user)
    }

    /// Changes the current user's password. The old password must
    /// re-verify; a mismatch is a conflict, distinct from a generic
    /// authentication failure.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        old_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = self.get_profile(ctx).await?;

        if !self
            .hasher
            .verify_password(old_password, &user.password_hash)?
        {
            return Err(AppError::conflict("Incorrect password"));
        }

        self.validator.validate_not_same(old_password, new_password)?;
        self.validator.validate(new_password)?;

        let hash = self.hasher.hash_password(new_password)?;
        self.users.update_password_hash(ctx.user_id, &hash).await?;

        info!(user_id = %ctx.user_id, "Password changed");
        Ok(())
    }

    /// Permanently deletes the current user's account after re-verifying
    /// the password.
    pub async fn delete_account(&self, ctx: &RequestContext, password: &str) -> AppResult<()> {
        let user = self.get_profile(ctx).await?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::conflict("Incorrect password"));
        }

        self.users.delete(ctx.user_id).await?;
        info!(user_id = %ctx.user_id, "Account deleted");
        Ok(())
    }

    /// Returns all of the current user's tags.
    pub async fn get_tags(&self, ctx: &RequestContext) -> AppResult<Vec<String>> {
        self.users
            .tags(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Returns the user's tags containing the query, case-insensitive.
    pub async fn find_tag(&self, ctx: &RequestContext, query: &str) -> AppResult<Vec<String>> {
        let needle = query.to_lowercase();
        let tags = self.get_tags(ctx).await?;
        Ok(tags
            .into_iter()
            .filter(|t| t.to_lowercase().contains(&needle))
            .collect())
    }

    /// Adds a tag to the current user's profile. Set semantics: adding a
    /// tag that already exists succeeds without duplicating it.
    pub async fn add_tag(&self, ctx: &RequestContext, tag: &str) -> AppResult<()> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(AppError::validation("Tag cannot be empty"));
        }
        if !self.users.add_tag(ctx.user_id, tag).await? {
            return Err(AppError::not_found("User not found"));
        }
        Ok(())
    }

    /// Removes a tag from the profile and from every item across the
    /// user's lists.
    ///
    /// Item-level removal runs first so a failure leaves the profile tag
    /// in place and the operation retryable. A zero item-modification
    /// count is not an error: the tag may simply not be used on any item.
    pub async fn remove_tag(&self, ctx: &RequestContext, tag: &str) -> AppResult<()> {
        let index = self
            .users
            .list_index(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let modified = self
            .lists
            .remove_tag_from_items(&index.all(), tag)
            .await?;
        debug!(user_id = %ctx.user_id, tag, modified, "Tag removed from items");

        if !self.users.remove_tag(ctx.user_id, tag).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!(user_id = %ctx.user_id, tag, "Tag removed");
        Ok(())
    }
}
