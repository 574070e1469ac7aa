//! In-memory user store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use tokio::sync::RwLock;
use uuid::Uuid;

use medialist_core::error::AppError;
use medialist_core::result::AppResult;
use medialist_entity::list::ListKind;
use medialist_entity::user::{ListIndex, NewUser, ProfileType, User, UserProfilePatch};

use crate::store::UserStore;

/// HashMap-backed user store with single-shot failure injection on the
/// index mutations.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
    fail_next_attach: AtomicBool,
    fail_next_detach: AtomicBool,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `attach_list` call fail with a database error.
    pub fn fail_next_attach(&self) {
        self.fail_next_attach.store(true, Ordering::SeqCst);
    }

    /// Make the next `detach_list` call fail with a database error.
    pub fn fail_next_detach(&self) {
        self.fail_next_detach.store(true, Ordering::SeqCst);
    }

    fn index_mut(user: &mut User, kind: ListKind) -> &mut Vec<Uuid> {
        match kind {
            ListKind::StatusBased => &mut user.status_based_lists,
            ListKind::ThemeBased => &mut user.theme_based_lists,
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, new_user: &NewUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == new_user.username) {
            return Err(AppError::conflict(format!(
                "Username '{}' already exists",
                new_user.username
            )));
        }
        if users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&new_user.email))
        {
            return Err(AppError::conflict("Email already in use".to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name.clone(),
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            password_hash: new_user.password_hash.clone(),
            profile_type: new_user.profile_type,
            refresh_token: None,
            avatar: new_user.avatar.clone(),
            status_based_lists: vec![],
            theme_based_lists: vec![],
            tags: vec![],
            friends: vec![],
            friend_requests: vec![],
            collaborative_lists: vec![],
            shared_lists: Json(vec![]),
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn search_by_name(&self, name: &str) -> AppResult<Vec<User>> {
        let needle = name.to_lowercase();
        let mut matches: Vec<User> = self
            .users
            .read()
            .await
            .values()
            .filter(|u| {
                u.profile_type == ProfileType::Public
                    && u.name.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(matches)
    }

    async fn update_profile(&self, id: Uuid, patch: &UserProfilePatch) -> AppResult<Option<User>> {
        let mut users = self.users.write().await;
        if let Some(username) = &patch.username {
            if users
                .values()
                .any(|u| u.id != id && &u.username == username)
            {
                return Err(AppError::conflict("Username already exists".to_string()));
            }
        }
        if let Some(email) = &patch.email {
            if users
                .values()
                .any(|u| u.id != id && u.email.eq_ignore_ascii_case(email))
            {
                return Err(AppError::conflict("Email already in use".to_string()));
            }
        }

        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &patch.name {
            user.name = name.clone();
        }
        if let Some(username) = &patch.username {
            user.username = username.clone();
        }
        if let Some(email) = &patch.email {
            user.email = email.clone();
        }
        if let Some(profile_type) = patch.profile_type {
            user.profile_type = profile_type;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn update_password_hash(&self, id: Uuid, hash: &str) -> AppResult<bool> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.password_hash = hash.to_string();
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> AppResult<bool> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.refresh_token = token.map(str::to_string);
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.users.write().await.remove(&id).is_some())
    }

    async fn tags(&self, id: Uuid) -> AppResult<Option<Vec<String>>> {
        Ok(self.users.read().await.get(&id).map(|u| u.tags.clone()))
    }

    async fn add_tag(&self, id: Uuid, tag: &str) -> AppResult<bool> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                if !user.tags.iter().any(|t| t == tag) {
                    user.tags.push(tag.to_string());
                }
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove_tag(&self, id: Uuid, tag: &str) -> AppResult<bool> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.tags.retain(|t| t != tag);
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_index(&self, id: Uuid) -> AppResult<Option<ListIndex>> {
        Ok(self.users.read().await.get(&id).map(User::list_index))
    }

    async fn attach_list(&self, id: Uuid, list_id: Uuid, kind: ListKind) -> AppResult<bool> {
        if self.fail_next_attach.swap(false, Ordering::SeqCst) {
            return Err(AppError::database("Injected attach failure"));
        }
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                Self::index_mut(user, kind).push(list_id);
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn detach_list(&self, id: Uuid, list_id: Uuid, kind: ListKind) -> AppResult<bool> {
        if self.fail_next_detach.swap(false, Ordering::SeqCst) {
            return Err(AppError::database("Injected detach failure"));
        }
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                Self::index_mut(user, kind).retain(|l| *l != list_id);
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
