//! In-memory list store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use tokio::sync::RwLock;
use uuid::Uuid;

use medialist_core::error::AppError;
use medialist_core::result::AppResult;
use medialist_entity::list::{
    validate_item_patch, Item, ItemPatch, List, ListDetailsPatch, NewList,
};

use crate::store::ListStore;

/// HashMap-backed list store with single-shot failure injection on
/// delete.
#[derive(Debug, Default)]
pub struct MemoryListStore {
    lists: RwLock<HashMap<Uuid, List>>,
    fail_next_delete: AtomicBool,
}

impl MemoryListStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `delete` call fail with a database error.
    pub fn fail_next_delete(&self) {
        self.fail_next_delete.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ListStore for MemoryListStore {
    async fn create(&self, new_list: &NewList) -> AppResult<List> {
        let now = Utc::now();
        let list = List {
            id: Uuid::new_v4(),
            name: new_list.name.clone(),
            privacy: new_list.privacy,
            kind: new_list.kind,
            items: Json(new_list.items.clone()),
            added_at: now,
            updated_at: now,
        };
        self.lists.write().await.insert(list.id, list.clone());
        Ok(list)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<List>> {
        Ok(self.lists.read().await.get(&id).cloned())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        if self.fail_next_delete.swap(false, Ordering::SeqCst) {
            return Err(AppError::database("Injected delete failure"));
        }
        Ok(self.lists.write().await.remove(&id).is_some())
    }

    async fn update_details(
        &self,
        id: Uuid,
        patch: &ListDetailsPatch,
    ) -> AppResult<Option<List>> {
        let mut lists = self.lists.write().await;
        let Some(list) = lists.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &patch.name {
            list.name = name.clone();
        }
        if let Some(privacy) = patch.privacy {
            list.privacy = privacy;
        }
        list.updated_at = Utc::now();
        Ok(Some(list.clone()))
    }

    async fn add_items(&self, id: Uuid, items: &[Item]) -> AppResult<Option<List>> {
        let mut lists = self.lists.write().await;
        let Some(list) = lists.get_mut(&id) else {
            return Ok(None);
        };
        list.items.0.extend_from_slice(items);
        list.updated_at = Utc::now();
        Ok(Some(list.clone()))
    }

    async fn remove_items(&self, id: Uuid, media_ids: &[String]) -> AppResult<Option<List>> {
        let mut lists = self.lists.write().await;
        let Some(list) = lists.get_mut(&id) else {
            return Ok(None);
        };
        list.items.0.retain(|item| !media_ids.contains(&item.media_id));
        list.updated_at = Utc::now();
        Ok(Some(list.clone()))
    }

    async fn update_item(
        &self,
        id: Uuid,
        media_id: &str,
        patch: &ItemPatch,
    ) -> AppResult<Option<List>> {
        let mut lists = self.lists.write().await;
        let Some(list) = lists.get_mut(&id) else {
            return Ok(None);
        };
        validate_item_patch(list.kind, patch)?;
        let Some(item) = list.items.0.iter_mut().find(|i| i.media_id == media_id) else {
            return Ok(None);
        };
        patch.apply(item);
        list.updated_at = Utc::now();
        Ok(Some(list.clone()))
    }

    async fn remove_tag_from_items(&self, list_ids: &[Uuid], tag: &str) -> AppResult<u64> {
        let mut lists = self.lists.write().await;
        let mut modified: u64 = 0;
        for id in list_ids {
            let Some(list) = lists.get_mut(id) else {
                continue;
            };
            let mut touched = false;
            for item in &mut list.items.0 {
                let before = item.tags.len();
                item.tags.retain(|t| t != tag);
                if item.tags.len() != before {
                    modified += 1;
                    touched = true;
                }
            }
            if touched {
                list.updated_at = Utc::now();
            }
        }
        Ok(modified)
    }
}
